use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    application::{
        ports::{DashboardApi, Notifier, SurfaceFactory},
        request_generation::{RequestGeneration, RequestTicket},
    },
    config::DashboardConfig,
    domain::{
        analytics::{CorrelationMap, HistoricalSeries, Histogram},
        chart::{ChartHandle, ChartName, ChartRegistry, ChartSpec, presets},
        errors::AppError,
        logging::{LogComponent, get_logger},
        notifications::AlertLevel,
    },
};

pub const HISTORICAL_LOAD_FAILED: &str = "Error loading historical data";

/// Owns the four dashboard charts and applies server snapshots to them.
#[derive(Debug)]
pub struct ChartManager {
    registry: ChartRegistry,
    period_requests: RequestGeneration,
    price_window: usize,
    volume_window: usize,
    histogram_bins: usize,
}

impl ChartManager {
    /// Build every dashboard chart empty. Fails if any surface is unavailable.
    pub fn create(config: &DashboardConfig, surfaces: &dyn SurfaceFactory) -> Result<Self, AppError> {
        let mut registry = ChartRegistry::new();
        for name in ChartName::DASHBOARD {
            let spec = presets::dashboard_preset(name).ok_or_else(|| {
                AppError::Rendering(format!("{} is not a dashboard chart", name))
            })?;
            let handle = ChartHandle::create(name, spec, surfaces.surface(name)?)?;
            registry.insert(handle);
        }

        get_logger().info(
            LogComponent::Application("ChartManager"),
            &format!("📊 Initialized {} charts", registry.len()),
        );

        Ok(Self {
            registry,
            period_requests: RequestGeneration::new(),
            price_window: config.price_window,
            volume_window: config.volume_window,
            histogram_bins: config.histogram_bins,
        })
    }

    pub fn chart(&self, name: ChartName) -> Option<&ChartSpec> {
        self.registry.get(name).map(ChartHandle::spec)
    }

    /// Price: trailing price window; volume: trailing volume window;
    /// distribution: histogram over every price.
    pub fn apply_historical(&mut self, series: &HistoricalSeries) -> Result<(), AppError> {
        let (dates, prices) = series.price_window(self.price_window);
        self.registry.update(ChartName::Price, dates, prices)?;

        let (dates, volume) = series.volume_window(self.volume_window);
        self.registry.update(ChartName::Volume, dates, volume)?;

        self.update_distribution(&series.prices)
    }

    pub fn update_distribution(&mut self, prices: &[f64]) -> Result<(), AppError> {
        let histogram = Histogram::build(prices, self.histogram_bins);
        let values = histogram.values();
        self.registry.update(ChartName::Distribution, histogram.labels, values)
    }

    /// Bars in payload order, no sorting.
    pub fn apply_correlation(&mut self, map: &CorrelationMap) -> Result<(), AppError> {
        self.registry.update(ChartName::Correlation, map.currencies(), map.coefficients())
    }

    /// Issue a ticket for a period refresh; any earlier ticket becomes stale.
    pub fn begin_period_change(&mut self) -> RequestTicket {
        self.period_requests.issue()
    }

    /// Re-slice the price chart to the trailing `days`. Returns `false` when
    /// `ticket` was superseded and the series was discarded.
    pub fn apply_period(
        &mut self,
        ticket: RequestTicket,
        days: usize,
        series: &HistoricalSeries,
    ) -> Result<bool, AppError> {
        if !self.period_requests.is_current(ticket) {
            return Ok(false);
        }
        let (dates, prices) = series.price_window(days);
        self.registry.update(ChartName::Price, dates, prices)?;
        Ok(true)
    }

    pub fn destroy(mut self) {
        self.registry.destroy_all();
    }
}

/// Async front of [`ChartManager`]: fetches and applies snapshots.
///
/// Single-threaded; the manager is never borrowed across an await point.
pub struct ChartController<A, N> {
    manager: Rc<RefCell<ChartManager>>,
    api: Rc<A>,
    notifier: Rc<N>,
}

impl<A, N> Clone for ChartController<A, N> {
    fn clone(&self) -> Self {
        Self {
            manager: Rc::clone(&self.manager),
            api: Rc::clone(&self.api),
            notifier: Rc::clone(&self.notifier),
        }
    }
}

impl<A: DashboardApi, N: Notifier> ChartController<A, N> {
    /// Create the dashboard charts, then load historical and correlation data.
    /// Load failures are reported, not returned.
    pub async fn initialize(
        config: &DashboardConfig,
        api: Rc<A>,
        notifier: Rc<N>,
        surfaces: &dyn SurfaceFactory,
    ) -> Result<Self, AppError> {
        let manager = ChartManager::create(config, surfaces)?;
        let controller = Self { manager: Rc::new(RefCell::new(manager)), api, notifier };

        let _ = futures::join!(
            controller.load_historical_data(),
            controller.load_correlation_data()
        );

        Ok(controller)
    }

    pub fn manager(&self) -> Rc<RefCell<ChartManager>> {
        Rc::clone(&self.manager)
    }

    /// Snapshot of a chart's current spec; `None` while the manager is busy.
    pub fn chart_spec(&self, name: ChartName) -> Option<ChartSpec> {
        let manager = self.manager.try_borrow().ok()?;
        manager.chart(name).cloned()
    }

    /// On failure: logged and a warning toast; charts keep their data.
    pub async fn load_historical_data(&self) -> Result<(), AppError> {
        let result = match self.api.historical_data().await {
            Ok(series) => self.manager.borrow_mut().apply_historical(&series),
            Err(e) => Err(e),
        };

        match &result {
            Ok(()) => get_logger().debug(
                LogComponent::Application("ChartManager"),
                "✅ Historical charts refreshed",
            ),
            Err(e) => {
                get_logger().error(
                    LogComponent::Application("ChartManager"),
                    &format!("❌ Error loading historical data: {}", e),
                );
                self.notifier.notify(AlertLevel::Warning, HISTORICAL_LOAD_FAILED);
            }
        }
        result
    }

    /// On failure: logged only.
    pub async fn load_correlation_data(&self) -> Result<(), AppError> {
        let result = match self.api.correlation_data().await {
            Ok(map) => self.manager.borrow_mut().apply_correlation(&map),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            get_logger().warn(
                LogComponent::Application("ChartManager"),
                &format!("⚠️ Error loading correlation data: {}", e),
            );
        }
        result
    }

    /// Fresh fetch on every call; a response overtaken by a newer period
    /// request is dropped. Returns whether the price chart changed.
    pub async fn update_period(&self, days: usize) -> Result<bool, AppError> {
        let ticket = self.manager.borrow_mut().begin_period_change();

        let series = match self.api.historical_data().await {
            Ok(series) => series,
            Err(e) => {
                get_logger().warn(
                    LogComponent::Application("ChartManager"),
                    &format!("⚠️ Period refresh ({} days) failed: {}", days, e),
                );
                return Err(e);
            }
        };

        let applied = self.manager.borrow_mut().apply_period(ticket, days, &series)?;
        if !applied {
            crate::log_debug!(
                LogComponent::Application("ChartManager"),
                "Discarded stale {}-day period response",
                days
            );
        }
        Ok(applied)
    }
}
