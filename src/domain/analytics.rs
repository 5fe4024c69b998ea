//! Server snapshots consumed by the charts and the price overview cards.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::formatting::{format_currency, format_number, format_signed_currency, to_fixed};

pub const HISTOGRAM_BINS: usize = 20;

/// `GET /api/historical-data`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct HistoricalSeries {
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
    pub volume: Vec<f64>,
}

impl HistoricalSeries {
    /// Trailing `days` points of `(dates, prices)`.
    pub fn price_window(&self, days: usize) -> (Vec<String>, Vec<f64>) {
        (trailing(&self.dates, days).to_vec(), trailing(&self.prices, days).to_vec())
    }

    /// Trailing `days` points of `(dates, volume)`.
    pub fn volume_window(&self, days: usize) -> (Vec<String>, Vec<f64>) {
        (trailing(&self.dates, days).to_vec(), trailing(&self.volume, days).to_vec())
    }
}

/// Last `count` elements. A count of zero keeps the whole slice.
pub fn trailing<T>(values: &[T], count: usize) -> &[T] {
    if count == 0 {
        return values;
    }
    &values[values.len().saturating_sub(count)..]
}

/// `GET /api/correlation-data`: currency code to coefficient, in payload order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorrelationMap {
    entries: Vec<(String, f64)>,
}

impl CorrelationMap {
    pub fn from_entries(entries: Vec<(String, f64)>) -> Self {
        let mut map = Self::default();
        for (code, value) in entries {
            map.insert(code, value);
        }
        map
    }

    /// A repeated key keeps its first position and takes the latest value.
    fn insert(&mut self, code: String, value: f64) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == code) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((code, value)),
        }
    }

    pub fn currencies(&self) -> Vec<String> {
        self.entries.iter().map(|(code, _)| code.clone()).collect()
    }

    pub fn coefficients(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, value)| *value).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for CorrelationMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CorrelationVisitor;

        impl<'de> Visitor<'de> for CorrelationVisitor {
            type Value = CorrelationMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping currency codes to numbers")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = CorrelationMap::default();
                while let Some((code, value)) = access.next_entry::<String, f64>()? {
                    if !value.is_finite() {
                        return Err(de::Error::custom(format!("non-finite coefficient for {code}")));
                    }
                    map.insert(code, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(CorrelationVisitor)
    }
}

/// `GET /api/price-analysis`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceAnalysis {
    pub current_price: f64,
    pub price_change_24h: f64,
    pub volatility: f64,
    pub avg_price_30d: f64,
    #[serde(default)]
    pub price_change_7d: Option<f64>,
    #[serde(default)]
    pub price_change_30d: Option<f64>,
    #[serde(default)]
    pub min_price_30d: Option<f64>,
    #[serde(default)]
    pub max_price_30d: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn card_class(self) -> &'static str {
        match self {
            Trend::Up => "info-card bg-success",
            Trend::Down => "info-card bg-danger",
        }
    }
}

/// Text for the overview cards, ready to bind.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceOverview {
    pub current_price: String,
    pub price_change_24h: String,
    pub volatility: String,
    pub avg_price_30d: String,
    pub trend: Trend,
    pub range_30d: Option<String>,
}

impl From<&PriceAnalysis> for PriceOverview {
    fn from(analysis: &PriceAnalysis) -> Self {
        let range_30d = match (analysis.min_price_30d, analysis.max_price_30d) {
            (Some(min), Some(max)) => {
                Some(format!("{} – {}", format_currency(min), format_currency(max)))
            }
            _ => None,
        };
        Self {
            current_price: format_currency(analysis.current_price),
            price_change_24h: format_signed_currency(analysis.price_change_24h),
            volatility: format_number(analysis.volatility, 2),
            avg_price_30d: format_currency(analysis.avg_price_30d),
            trend: if analysis.price_change_24h >= 0.0 { Trend::Up } else { Trend::Down },
            range_30d,
        }
    }
}

/// Price distribution over equal-width buckets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Histogram {
    pub labels: Vec<String>,
    pub counts: Vec<u32>,
}

impl Histogram {
    /// Bucket `prices` into `bins` buckets spanning `[min, max]`.
    ///
    /// Non-finite prices are ignored. No prices (or zero bins) gives an empty
    /// histogram; identical prices give one bucket `$v-$v` holding all of them.
    pub fn build(prices: &[f64], bins: usize) -> Self {
        let finite: Vec<f64> = prices.iter().copied().filter(|p| p.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return Self::default();
        }

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max == min {
            return Self {
                labels: vec![bucket_label(min, max)],
                counts: vec![finite.len() as u32],
            };
        }

        let bin_size = (max - min) / bins as f64;
        let labels = (0..bins)
            .map(|i| {
                bucket_label(min + i as f64 * bin_size, min + (i + 1) as f64 * bin_size)
            })
            .collect();

        let mut counts = vec![0u32; bins];
        for price in finite {
            let index = (((price - min) / bin_size).floor() as usize).min(bins - 1);
            counts[index] += 1;
        }

        Self { labels, counts }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn values(&self) -> Vec<f64> {
        self.counts.iter().map(|&c| f64::from(c)).collect()
    }
}

fn bucket_label(lower: f64, upper: f64) -> String {
    format!("${}-${}", to_fixed(lower, 0), to_fixed(upper, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_windows() {
        let values = [1, 2, 3, 4, 5];
        assert_eq!(trailing(&values, 2), &[4, 5]);
        assert_eq!(trailing(&values, 10), &values);
        assert_eq!(trailing(&values, 0), &values);
    }

    #[test]
    fn correlation_keeps_payload_order() {
        let map: CorrelationMap =
            serde_json::from_str(r#"{"JPY": -0.4, "EUR": 0.9, "CAD": 0.1}"#).unwrap();
        assert_eq!(map.currencies(), vec!["JPY", "EUR", "CAD"]);
        assert_eq!(map.coefficients(), vec![-0.4, 0.9, 0.1]);
    }

    #[test]
    fn correlation_duplicate_key_keeps_first_position() {
        let map: CorrelationMap =
            serde_json::from_str(r#"{"EUR": 0.1, "GBP": 0.2, "EUR": 0.3}"#).unwrap();
        assert_eq!(map.currencies(), vec!["EUR", "GBP"]);
        assert_eq!(map.coefficients(), vec![0.3, 0.2]);
    }

    #[test]
    fn overview_trend_follows_change_sign() {
        let analysis = PriceAnalysis {
            current_price: 2034.5,
            price_change_24h: -12.25,
            volatility: 15.678,
            avg_price_30d: 2010.0,
            price_change_7d: None,
            price_change_30d: None,
            min_price_30d: None,
            max_price_30d: None,
        };
        let overview = PriceOverview::from(&analysis);
        assert_eq!(overview.current_price, "$2,034.50");
        assert_eq!(overview.price_change_24h, "-$12.25");
        assert_eq!(overview.volatility, "15.68");
        assert_eq!(overview.trend.card_class(), "info-card bg-danger");
    }
}
