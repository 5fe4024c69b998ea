#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;
use gold_dashboard_wasm::application::{DashboardApi, Notifier};
use gold_dashboard_wasm::domain::analytics::{CorrelationMap, HistoricalSeries, PriceAnalysis};
use gold_dashboard_wasm::domain::chart::{ChartName, ChartSpec, ChartSurface};
use gold_dashboard_wasm::domain::errors::AppError;
use gold_dashboard_wasm::domain::notifications::AlertLevel;
use gold_dashboard_wasm::domain::prediction::{PredictionRequest, PredictionResult};

pub enum Reply<T> {
    Ready(Result<T, AppError>),
    Pending(oneshot::Receiver<T>),
}

async fn resolve<T>(reply: Option<Reply<T>>) -> Result<T, AppError> {
    match reply {
        Some(Reply::Ready(result)) => result,
        Some(Reply::Pending(rx)) => rx.await.map_err(|_| AppError::Network("cancelled".into())),
        None => Err(AppError::Network("no reply queued".into())),
    }
}

/// Scripted backend; each call pops the next queued reply.
#[derive(Default)]
pub struct MockApi {
    pub historical: RefCell<VecDeque<Reply<HistoricalSeries>>>,
    pub correlation: RefCell<VecDeque<Reply<CorrelationMap>>>,
    pub analysis: RefCell<VecDeque<Reply<PriceAnalysis>>>,
    pub predictions: RefCell<VecDeque<Reply<PredictionResult>>>,
    pub predict_calls: RefCell<Vec<PredictionRequest>>,
    pub historical_calls: RefCell<usize>,
}

impl MockApi {
    pub fn with_historical(self, reply: Result<HistoricalSeries, AppError>) -> Self {
        self.historical.borrow_mut().push_back(Reply::Ready(reply));
        self
    }

    pub fn with_correlation(self, reply: Result<CorrelationMap, AppError>) -> Self {
        self.correlation.borrow_mut().push_back(Reply::Ready(reply));
        self
    }

    pub fn with_prediction(self, reply: Result<PredictionResult, AppError>) -> Self {
        self.predictions.borrow_mut().push_back(Reply::Ready(reply));
        self
    }

    pub fn pending_historical(&self) -> oneshot::Sender<HistoricalSeries> {
        let (tx, rx) = oneshot::channel();
        self.historical.borrow_mut().push_back(Reply::Pending(rx));
        tx
    }
}

impl DashboardApi for MockApi {
    async fn historical_data(&self) -> Result<HistoricalSeries, AppError> {
        *self.historical_calls.borrow_mut() += 1;
        let reply = self.historical.borrow_mut().pop_front();
        resolve(reply).await
    }

    async fn correlation_data(&self) -> Result<CorrelationMap, AppError> {
        let reply = self.correlation.borrow_mut().pop_front();
        resolve(reply).await
    }

    async fn price_analysis(&self) -> Result<PriceAnalysis, AppError> {
        let reply = self.analysis.borrow_mut().pop_front();
        resolve(reply).await
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, AppError> {
        self.predict_calls.borrow_mut().push(request.clone());
        let reply = self.predictions.borrow_mut().pop_front();
        resolve(reply).await
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub toasts: RefCell<Vec<(AlertLevel, String)>>,
    pub alerts: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn levels(&self) -> Vec<AlertLevel> {
        self.toasts.borrow().iter().map(|(level, _)| *level).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: AlertLevel, message: &str) {
        self.toasts.borrow_mut().push((level, message.to_string()));
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Draw(ChartName, Vec<f64>),
    Clear(ChartName),
}

pub type SurfaceLog = Rc<RefCell<Vec<SurfaceEvent>>>;

pub struct RecordingSurface {
    name: ChartName,
    log: SurfaceLog,
}

impl ChartSurface for RecordingSurface {
    fn draw(&mut self, spec: &ChartSpec) -> Result<(), AppError> {
        self.log.borrow_mut().push(SurfaceEvent::Draw(self.name, spec.dataset.values.clone()));
        Ok(())
    }

    fn clear(&mut self) {
        self.log.borrow_mut().push(SurfaceEvent::Clear(self.name));
    }
}

/// Surface factory recording every draw and clear into `log`.
pub fn recording_surfaces(
    log: &SurfaceLog,
) -> impl Fn(ChartName) -> Result<Box<dyn ChartSurface>, AppError> + 'static {
    let log = Rc::clone(log);
    move |name| Ok(Box::new(RecordingSurface { name, log: Rc::clone(&log) }) as Box<dyn ChartSurface>)
}

pub fn series(len: usize) -> HistoricalSeries {
    HistoricalSeries {
        dates: (0..len).map(|i| format!("2024-01-{:03}", i)).collect(),
        prices: (0..len).map(|i| 1800.0 + i as f64).collect(),
        volume: (0..len).map(|i| 1000.0 + i as f64).collect(),
    }
}

pub fn sample_prediction() -> PredictionResult {
    PredictionResult {
        prediction: 1800.0,
        confidence_lower: 1750.0,
        confidence_upper: 1850.0,
        model: "Random Forest".to_string(),
        timestamp: "2024-01-15T14:30:00".to_string(),
    }
}
