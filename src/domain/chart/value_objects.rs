use derive_more::{Constructor, Display};
use strum::{AsRefStr, EnumIter, EnumString};

use crate::domain::formatting::{format_currency, format_number, to_fixed};

/// Value Object - Logical chart name; doubles as the canvas element id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr)]
pub enum ChartName {
    #[display(fmt = "priceChart")]
    #[strum(serialize = "priceChart")]
    Price,
    #[display(fmt = "correlationChart")]
    #[strum(serialize = "correlationChart")]
    Correlation,
    #[display(fmt = "volumeChart")]
    #[strum(serialize = "volumeChart")]
    Volume,
    #[display(fmt = "distributionChart")]
    #[strum(serialize = "distributionChart")]
    Distribution,
    #[display(fmt = "predictionChart")]
    #[strum(serialize = "predictionChart")]
    Prediction,
}

impl ChartName {
    /// Charts owned by the dashboard chart manager.
    pub const DASHBOARD: [ChartName; 4] = [
        ChartName::Price,
        ChartName::Correlation,
        ChartName::Volume,
        ChartName::Distribution,
    ];

    pub fn canvas_id(&self) -> &str {
        self.as_ref()
    }
}

/// Value Object - Chart type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ChartKind {
    #[display(fmt = "line")]
    Line,
    #[display(fmt = "bar")]
    Bar,
}

/// Value Object - CSS colour with alpha
#[derive(Debug, Clone, Copy, PartialEq, Constructor)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#RRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        Some(Self::opaque(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Value Object - How a bar or line area is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    /// Top-to-bottom gradient across the plot height.
    VerticalGradient { top: Rgba, bottom: Rgba },
}

/// Value Object - Formatter applied to axis ticks and tooltips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueFormat {
    #[default]
    Plain,
    /// `$1234.50`: two decimals, no grouping.
    DollarFixed,
    /// Full currency formatting (`$1,234.50`).
    Currency,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Plain => plain_number(value),
            ValueFormat::DollarFixed => format!("${}", to_fixed(value, 2)),
            ValueFormat::Currency => format_currency(value),
        }
    }
}

/// Short grouped number for default ticks: integers without decimals,
/// fractions up to two places.
fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number(value, 0)
    } else {
        let text = format_number(value, 2);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Value Object - Value axis bounds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub begin_at_zero: bool,
}

impl AxisRange {
    pub fn fixed(min: f64, max: f64) -> Self {
        Self { min: Some(min), max: Some(max), begin_at_zero: true }
    }
}
