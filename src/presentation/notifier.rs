use gloo_timers::callback::Timeout;
use leptos::*;

use crate::{
    application::ports::Notifier,
    domain::{
        logging::{LogComponent, get_logger},
        notifications::{AlertLevel, ToastQueue},
    },
};

/// Toasts held in a Leptos signal, each dismissed after `ttl_ms`.
#[derive(Clone, Copy)]
pub struct LeptosNotifier {
    toasts: RwSignal<ToastQueue>,
    ttl_ms: u32,
}

impl LeptosNotifier {
    pub fn new(ttl_ms: u32) -> Self {
        Self { toasts: create_rw_signal(ToastQueue::new()), ttl_ms }
    }

    pub fn toasts(&self) -> RwSignal<ToastQueue> {
        self.toasts
    }

    /// Close button; a later expiry of the same id is a no-op.
    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|queue| {
            queue.dismiss(id);
        });
    }
}

impl Notifier for LeptosNotifier {
    fn notify(&self, level: AlertLevel, message: &str) {
        let mut id = 0;
        self.toasts.update(|queue| id = queue.push(level, message));

        let toasts = self.toasts;
        Timeout::new(self.ttl_ms, move || {
            toasts.update(|queue| {
                queue.dismiss(id);
            });
        })
        .forget();
    }

    fn alert(&self, message: &str) {
        let shown = web_sys::window().map(|window| window.alert_with_message(message));
        if !matches!(shown, Some(Ok(()))) {
            get_logger().warn(
                LogComponent::Presentation("Notifier"),
                &format!("Alert could not be shown: {}", message),
            );
        }
    }
}
