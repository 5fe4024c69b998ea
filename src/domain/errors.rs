/// Dashboard-wide error type. Two failure families reach the user: transport/parse
/// problems and domain failures reported by the backend inside a JSON `error` field.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// The request never produced a response (offline, CORS, aborted).
    Network(String),
    /// A GET endpoint answered with a non-2xx status.
    Http { status: u16, status_text: String },
    /// The body was not JSON or did not have the expected shape.
    Parse(String),
    /// Well-formed JSON carrying an `error` field.
    Api(String),
    Validation(ValidationError),
    /// Drawing surface missing or unusable.
    Rendering(String),
}

impl AppError {
    /// Bare message without the category prefix, used in notifications.
    pub fn detail(&self) -> String {
        match self {
            AppError::Network(msg)
            | AppError::Parse(msg)
            | AppError::Api(msg)
            | AppError::Rendering(msg) => msg.clone(),
            AppError::Http { status, status_text } => format!("HTTP {} {}", status, status_text),
            AppError::Validation(e) => e.to_string(),
        }
    }

    pub fn is_domain_failure(&self) -> bool {
        matches!(self, AppError::Api(_))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network Error: {}", msg),
            AppError::Http { status, status_text } => {
                write!(f, "HTTP Error: {} {}", status, status_text)
            }
            AppError::Parse(msg) => write!(f, "Parse Error: {}", msg),
            AppError::Api(msg) => write!(f, "API Error: {}", msg),
            AppError::Validation(e) => write!(f, "Validation Error: {}", e),
            AppError::Rendering(msg) => write!(f, "Rendering Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Client-side guard failures on the prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    LowAboveHigh,
    OpenOutsideRange,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::LowAboveHigh => write!(f, "Low price cannot be greater than High price!"),
            ValidationError::OpenOutsideRange => {
                write!(f, "Open price must be between Low and High prices!")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        AppError::Validation(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Parse(error.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
