pub mod analytics;
pub mod chart;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod notifications;
pub mod prediction;
