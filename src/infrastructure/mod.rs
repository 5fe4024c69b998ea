pub mod http;
pub mod rendering;
pub mod services;

pub use http::{GlooHttpClient, HttpDashboardApi};
pub use rendering::CanvasSurface;
pub use services::{BrowserTimeProvider, ConsoleLogger};
