//! Visual presets for the dashboard charts and the prediction range chart.

use super::entities::{ChartConfig, ChartSpec, Dataset};
use super::value_objects::{AxisRange, ChartKind, ChartName, Fill, Rgba, ValueFormat};
use crate::domain::prediction::PredictionResult;

pub const GOLD: Rgba = Rgba::opaque(255, 215, 0);
pub const RED: Rgba = Rgba::opaque(220, 53, 69);
pub const GREEN: Rgba = Rgba::opaque(40, 167, 69);
const BLUE: Rgba = Rgba::opaque(54, 162, 235);
const PURPLE: Rgba = Rgba::opaque(153, 102, 255);
const WHITE: Rgba = Rgba::opaque(255, 255, 255);

const CORRELATION_PALETTE: [&str; 8] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#FF6384", "#C9CBCF",
];

pub const RANGE_LABELS: [&str; 3] = ["Lower Bound", "Predicted Price", "Upper Bound"];

/// Empty spec for one of the four dashboard charts.
pub fn dashboard_preset(name: ChartName) -> Option<ChartSpec> {
    match name {
        ChartName::Price => Some(price_trend()),
        ChartName::Correlation => Some(correlation()),
        ChartName::Volume => Some(volume()),
        ChartName::Distribution => Some(distribution()),
        ChartName::Prediction => None,
    }
}

pub fn price_trend() -> ChartSpec {
    let mut config = ChartConfig::new(ChartKind::Line);
    config.y_format = ValueFormat::DollarFixed;
    config.tooltip_format = ValueFormat::DollarFixed;

    let mut dataset = Dataset::new("Gold Price (USD)");
    dataset.fills = vec![Fill::Solid(GOLD.with_alpha(0.1))];
    dataset.borders = vec![GOLD];
    dataset.border_width = 3.0;
    dataset.fill_area = true;

    ChartSpec::new(config, dataset)
}

pub fn correlation() -> ChartSpec {
    let mut config = ChartConfig::new(ChartKind::Bar);
    config.show_legend = false;
    config.y_range = AxisRange::fixed(-1.0, 1.0);

    let mut dataset = Dataset::new("Correlation with USD");
    dataset.fills = CORRELATION_PALETTE
        .iter()
        .filter_map(|hex| Rgba::from_hex(hex))
        .map(Fill::Solid)
        .collect();
    dataset.borders = vec![WHITE];
    dataset.border_width = 2.0;

    ChartSpec::new(config, dataset)
}

pub fn volume() -> ChartSpec {
    bar_series("Trading Volume", BLUE)
}

pub fn distribution() -> ChartSpec {
    bar_series("Frequency", PURPLE)
}

fn bar_series(label: &str, color: Rgba) -> ChartSpec {
    let config = ChartConfig::new(ChartKind::Bar);
    let mut dataset = Dataset::new(label);
    dataset.fills = vec![Fill::Solid(color.with_alpha(0.6))];
    dataset.borders = vec![color];
    ChartSpec::new(config, dataset)
}

/// Three-bar range chart: lower bound, point estimate, upper bound.
pub fn prediction_range(result: &PredictionResult) -> ChartSpec {
    let mut config = ChartConfig::new(ChartKind::Bar);
    config.title = Some("Prediction Range Visualization".to_string());
    config.show_legend = false;
    config.show_x_grid = false;
    config.y_format = ValueFormat::Currency;
    config.tooltip_format = ValueFormat::Currency;
    config.bar_percentage = 0.7;

    let mut dataset = Dataset::new("Price Range (USD)");
    dataset.fills = [RED, GOLD, GREEN]
        .into_iter()
        .map(|c| Fill::VerticalGradient { top: c.with_alpha(0.8), bottom: c.with_alpha(0.3) })
        .collect();
    dataset.borders = vec![RED, GOLD, GREEN];
    dataset.border_width = 2.0;

    let mut spec = ChartSpec::new(config, dataset);
    spec.set_data(
        RANGE_LABELS.iter().map(|l| l.to_string()).collect(),
        vec![result.confidence_lower, result.prediction, result.confidence_upper],
    );
    spec
}
