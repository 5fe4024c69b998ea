//! Seams between the application layer and the browser.

use crate::domain::analytics::{CorrelationMap, HistoricalSeries, PriceAnalysis};
use crate::domain::chart::{ChartName, ChartSurface};
use crate::domain::errors::AppError;
use crate::domain::notifications::AlertLevel;
use crate::domain::prediction::{PredictionRequest, PredictionResult};

/// Backend endpoints. Each call is a single request: no retry, no timeout.
#[allow(async_fn_in_trait)]
pub trait DashboardApi {
    async fn historical_data(&self) -> Result<HistoricalSeries, AppError>;

    async fn correlation_data(&self) -> Result<CorrelationMap, AppError>;

    async fn price_analysis(&self) -> Result<PriceAnalysis, AppError>;

    /// Resolves to `AppError::Api` when the body carries an `error` field.
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, AppError>;
}

/// User-facing feedback.
pub trait Notifier {
    /// Transient, auto-expiring toast.
    fn notify(&self, level: AlertLevel, message: &str);

    /// Blocking modal message.
    fn alert(&self, message: &str);
}

/// Produces the drawing surface for a named chart.
pub trait SurfaceFactory {
    fn surface(&self, name: ChartName) -> Result<Box<dyn ChartSurface>, AppError>;
}

impl<F> SurfaceFactory for F
where
    F: Fn(ChartName) -> Result<Box<dyn ChartSurface>, AppError>,
{
    fn surface(&self, name: ChartName) -> Result<Box<dyn ChartSurface>, AppError> {
        self(name)
    }
}
