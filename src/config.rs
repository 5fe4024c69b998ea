use serde::Deserialize;

use crate::domain::analytics::HISTOGRAM_BINS;
use crate::domain::logging::LogLevel;

/// Backend endpoints the dashboard talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    HistoricalData,
    CorrelationData,
    PriceAnalysis,
    Predict,
}

/// Runtime configuration. Every field has a default, so a partial JSON
/// override object is enough.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix for endpoint paths; empty means same origin.
    pub api_base_url: String,
    pub historical_data_path: String,
    pub correlation_data_path: String,
    pub price_analysis_path: String,
    pub predict_path: String,
    /// Trailing points shown by the price chart on load.
    pub price_window: usize,
    /// Trailing points shown by the volume chart.
    pub volume_window: usize,
    pub histogram_bins: usize,
    pub toast_ttl_ms: u32,
    /// Period selector choices in days.
    pub periods: Vec<usize>,
    pub log_level: LogLevel,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            historical_data_path: "/api/historical-data".to_string(),
            correlation_data_path: "/api/correlation-data".to_string(),
            price_analysis_path: "/api/price-analysis".to_string(),
            predict_path: "/api/predict".to_string(),
            price_window: 90,
            volume_window: 30,
            histogram_bins: HISTOGRAM_BINS,
            toast_ttl_ms: 5000,
            periods: vec![7, 30, 90],
            log_level: LogLevel::Info,
        }
    }
}

impl DashboardConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn endpoint_path(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::HistoricalData => &self.historical_data_path,
            Endpoint::CorrelationData => &self.correlation_data_path,
            Endpoint::PriceAnalysis => &self.price_analysis_path,
            Endpoint::Predict => &self.predict_path,
        }
    }

    /// Absolute (or origin-relative) URL for `endpoint`.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        let path = self.endpoint_path(endpoint);
        if path.starts_with("http") || self.api_base_url.is_empty() {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_origin_paths_by_default() {
        let config = DashboardConfig::default();
        assert_eq!(config.endpoint_url(Endpoint::Predict), "/api/predict");
    }

    #[test]
    fn base_url_joins_without_double_slash() {
        let config = DashboardConfig::default().with_base_url("https://gold.example.com/");
        assert_eq!(
            config.endpoint_url(Endpoint::HistoricalData),
            "https://gold.example.com/api/historical-data"
        );
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"price_window": 120, "log_level": "debug"}"#).unwrap();
        assert_eq!(config.price_window, 120);
        assert_eq!(config.volume_window, 30);
        assert_eq!(config.log_level, LogLevel::Debug);
    }
}
