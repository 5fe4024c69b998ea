use strum::{AsRefStr, Display};

/// Notification severity; the lowercase name is the `alert-*` style suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: AlertLevel,
    pub message: String,
}

impl Toast {
    pub fn css_class(&self) -> String {
        format!("alert alert-{} alert-dismissible fade show", self.level)
    }
}

/// Visible toasts, newest first.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id to dismiss the toast with once it expires.
    pub fn push(&mut self, level: AlertLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.insert(0, Toast { id, level, message: message.into() });
        id
    }

    /// Dismissing an unknown or already expired id is a no-op.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
