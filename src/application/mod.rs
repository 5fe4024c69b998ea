pub mod chart_service;
pub mod ports;
pub mod prediction_flow;
pub mod price_overview;
pub mod request_generation;

pub use chart_service::*;
pub use ports::*;
pub use prediction_flow::*;
pub use price_overview::*;
pub use request_generation::*;
