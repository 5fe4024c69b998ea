//! Plot geometry for the 2D chart surface. No DOM access, so it is testable natively.

use crate::domain::chart::{AxisRange, ChartSpec};

pub const PADDING: f64 = 16.0;
pub const AXIS_LABEL_SPACE: f64 = 72.0;
pub const X_LABEL_SPACE: f64 = 28.0;
pub const TITLE_SPACE: f64 = 28.0;
pub const LEGEND_SPACE: f64 = 24.0;
const TARGET_TICKS: f64 = 5.0;
pub const MAX_TICKS: usize = 50;

/// Rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Resolved value axis: bounds plus tick positions.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueScale {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
}

impl ValueScale {
    /// Fit `values` into `range`. Fixed bounds win over data; `begin_at_zero`
    /// pulls the nearer bound to zero. A flat series is widened by 1% of its
    /// magnitude (at least 0.01) on each side. At most [`MAX_TICKS`] + 1 ticks.
    pub fn fit(values: &[f64], range: &AxisRange) -> Self {
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let (data_min, data_max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        let (mut lo, mut hi) = if data_min.is_finite() { (data_min, data_max) } else { (0.0, 1.0) };

        if range.begin_at_zero {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        let fixed_min = range.min.is_some();
        let fixed_max = range.max.is_some();
        lo = range.min.unwrap_or(lo);
        hi = range.max.unwrap_or(hi);

        if hi <= lo {
            let pad = lo.abs().max(1.0) * 0.01;
            lo -= pad;
            hi = (lo + 2.0 * pad).min(f64::MAX);
        }

        // Divide before subtracting so ±f64::MAX spans stay finite.
        let step = nice_step(hi / TARGET_TICKS - lo / TARGET_TICKS);
        let snapped_min = (lo / step).floor() * step;
        let snapped_max = (hi / step).ceil() * step;
        let min = if fixed_min || !snapped_min.is_finite() { lo } else { snapped_min };
        let max = if fixed_max || !snapped_max.is_finite() { hi } else { snapped_max };

        let first = (min / step).ceil();
        let last = (max / step + 1e-9).floor();
        let ticks = if last >= first {
            let count = (last - first).min(MAX_TICKS as f64) as usize;
            (0..=count)
                .map(|i| (first + i as f64) * step)
                .filter(|tick| tick.is_finite())
                .map(|tick| if tick.abs() < step * 1e-9 { 0.0 } else { tick })
                .collect()
        } else {
            Vec::new()
        };

        Self { min, max, ticks }
    }

    /// Canvas y for `value` inside `plot`; larger values sit higher.
    pub fn y(&self, value: f64, plot: &Rect) -> f64 {
        let span = self.max / 2.0 - self.min / 2.0;
        plot.bottom() - (value / 2.0 - self.min / 2.0) / span * plot.height
    }
}

/// Round `raw` up to 1, 2, 2.5, 5 or 10 times a power of ten.
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 2.5 {
        2.5
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Area left for data after reserving room for axis labels, title and legend.
pub fn plot_area(width: f64, height: f64, spec: &ChartSpec) -> Rect {
    let mut top = PADDING;
    if spec.config.title.is_some() {
        top += TITLE_SPACE;
    }
    if spec.config.show_legend {
        top += LEGEND_SPACE;
    }
    let x = PADDING + AXIS_LABEL_SPACE;
    Rect {
        x,
        y: top,
        width: (width - x - PADDING).max(0.0),
        height: (height - top - PADDING - X_LABEL_SPACE).max(0.0),
    }
}

/// Width of one category slot.
pub fn slot_width(plot: &Rect, count: usize) -> f64 {
    if count == 0 { 0.0 } else { plot.width / count as f64 }
}

/// Horizontal centre of category `index`.
pub fn slot_center(plot: &Rect, count: usize, index: usize) -> f64 {
    plot.x + slot_width(plot, count) * (index as f64 + 0.5)
}

/// Bar rectangles, one per value, growing from the zero line (or the axis
/// edge when zero is out of range). Non-finite values get no bar.
pub fn bar_rects(values: &[f64], scale: &ValueScale, plot: &Rect, bar_percentage: f64) -> Vec<Option<Rect>> {
    let count = values.len();
    let bar_width = slot_width(plot, count) * bar_percentage.clamp(0.0, 1.0);
    let base = scale.y(0.0f64.clamp(scale.min, scale.max), plot);

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            if !value.is_finite() {
                return None;
            }
            let top = scale.y(value.clamp(scale.min, scale.max), plot);
            Some(Rect {
                x: slot_center(plot, count, i) - bar_width / 2.0,
                y: top.min(base),
                width: bar_width,
                height: (top - base).abs(),
            })
        })
        .collect()
}

/// Line vertices; non-finite values break the line.
pub fn line_points(values: &[f64], scale: &ValueScale, plot: &Rect) -> Vec<Option<(f64, f64)>> {
    let count = values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| value.is_finite().then(|| (slot_center(plot, count, i), scale.y(value, plot))))
        .collect()
}

/// Category under the pointer, if the pointer is inside the plot.
pub fn hit_index(plot: &Rect, count: usize, x: f64, y: f64) -> Option<usize> {
    if count == 0 || !plot.contains(x, y) {
        return None;
    }
    let index = ((x - plot.x) / slot_width(plot, count)).floor() as usize;
    Some(index.min(count - 1))
}

/// Tooltip text for the pointer at `(x, y)` on a `width` x `height` canvas.
pub fn tooltip_at(spec: &ChartSpec, width: f64, height: f64, x: f64, y: f64) -> Option<String> {
    let plot = plot_area(width, height, spec);
    hit_index(&plot, spec.point_count(), x, y).and_then(|index| spec.tooltip(index))
}

/// At most `max_labels` evenly spaced label indices, first one always included.
pub fn label_indices(count: usize, max_labels: usize) -> Vec<usize> {
    if count == 0 || max_labels == 0 {
        return Vec::new();
    }
    let stride = count.div_ceil(max_labels).max(1);
    (0..count).step_by(stride).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot() -> Rect {
        Rect { x: 0.0, y: 0.0, width: 300.0, height: 100.0 }
    }

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(0.7), 1.0);
        assert_eq!(nice_step(1.3), 2.0);
        assert_eq!(nice_step(23.0), 25.0);
        assert_eq!(nice_step(42.0), 50.0);
        assert_eq!(nice_step(0.0), 1.0);
    }

    #[test]
    fn fixed_bounds_are_kept() {
        let scale = ValueScale::fit(&[0.2, -0.4], &AxisRange::fixed(-1.0, 1.0));
        assert_eq!((scale.min, scale.max), (-1.0, 1.0));
        assert_eq!(scale.ticks.first(), Some(&-1.0));
        assert_eq!(scale.ticks.last(), Some(&1.0));
        assert!(scale.ticks.contains(&0.0));
    }

    #[test]
    fn begin_at_zero_includes_zero() {
        let range = AxisRange { begin_at_zero: true, ..AxisRange::default() };
        let scale = ValueScale::fit(&[1750.0, 1850.0], &range);
        assert_eq!(scale.min, 0.0);
        assert!(scale.max >= 1850.0);
    }

    #[test]
    fn flat_series_is_widened() {
        let scale = ValueScale::fit(&[5.0, 5.0], &AxisRange::default());
        assert!(scale.min < 5.0 && scale.max > 5.0);
        let empty = ValueScale::fit(&[], &AxisRange::default());
        assert!(empty.max > empty.min);
    }

    #[test]
    fn extreme_magnitudes_still_produce_a_bounded_axis() {
        for values in [[1e17, 1e17], [-1e308, 1e308], [f64::MAX, f64::MAX], [-f64::MAX, f64::MAX]] {
            let scale = ValueScale::fit(&values, &AxisRange::default());
            assert!(scale.min.is_finite() && scale.max.is_finite(), "{:?}", values);
            assert!(scale.max > scale.min, "{:?}", values);
            assert!(!scale.ticks.is_empty() && scale.ticks.len() <= MAX_TICKS + 1, "{:?}", values);
            assert!(scale.ticks.iter().all(|t| t.is_finite()));
            let mid = scale.y(values[0], &plot());
            assert!((0.0..=100.0).contains(&mid), "{:?} -> {}", values, mid);
        }
    }

    #[test]
    fn fixed_range_below_float_precision_is_bounded() {
        let scale = ValueScale::fit(&[1e17], &AxisRange::fixed(1e17, 1e17 + 64.0));
        assert!(scale.ticks.len() <= MAX_TICKS + 1);
    }

    #[test]
    fn bars_grow_from_zero_line() {
        let scale = ValueScale { min: -1.0, max: 1.0, ticks: vec![] };
        let rects = bar_rects(&[1.0, -0.5, f64::NAN], &scale, &plot(), 0.5);
        let up = rects[0].expect("bar");
        let down = rects[1].expect("bar");
        assert_eq!(up, Rect { x: 25.0, y: 0.0, width: 50.0, height: 50.0 });
        assert_eq!(down.y, 50.0);
        assert_eq!(down.height, 25.0);
        assert!(rects[2].is_none());
    }

    #[test]
    fn line_points_are_slot_centred() {
        let scale = ValueScale { min: 0.0, max: 10.0, ticks: vec![] };
        let points = line_points(&[0.0, 10.0, f64::INFINITY], &scale, &plot());
        assert_eq!(points[0], Some((50.0, 100.0)));
        assert_eq!(points[1], Some((150.0, 0.0)));
        assert_eq!(points[2], None);
    }

    #[test]
    fn hit_test() {
        assert_eq!(hit_index(&plot(), 3, 10.0, 50.0), Some(0));
        assert_eq!(hit_index(&plot(), 3, 299.0, 50.0), Some(2));
        assert_eq!(hit_index(&plot(), 3, 300.0, 50.0), Some(2));
        assert_eq!(hit_index(&plot(), 3, 310.0, 50.0), None);
        assert_eq!(hit_index(&plot(), 0, 10.0, 50.0), None);
    }

    #[test]
    fn tooltip_follows_pointer() {
        use crate::domain::chart::{ChartConfig, ChartKind, Dataset, ValueFormat};

        let mut config = ChartConfig::new(ChartKind::Bar);
        config.show_legend = false;
        config.tooltip_format = ValueFormat::Currency;
        let mut spec = ChartSpec::new(config, Dataset::new("Price Range (USD)"));
        spec.set_data(
            vec!["Lower Bound".into(), "Predicted Price".into(), "Upper Bound".into()],
            vec![1750.0, 1800.0, 1850.0],
        );

        let plot = plot_area(400.0, 300.0, &spec);
        let middle = slot_center(&plot, 3, 1);
        assert_eq!(
            tooltip_at(&spec, 400.0, 300.0, middle, plot.y + 10.0).as_deref(),
            Some("Predicted Price: $1,800.00")
        );
        assert_eq!(tooltip_at(&spec, 400.0, 300.0, 1.0, 1.0), None);
    }

    #[test]
    fn label_thinning() {
        assert_eq!(label_indices(5, 10), vec![0, 1, 2, 3, 4]);
        assert_eq!(label_indices(90, 10), vec![0, 9, 18, 27, 36, 45, 54, 63, 72, 81]);
        assert!(label_indices(0, 10).is_empty());
    }
}
