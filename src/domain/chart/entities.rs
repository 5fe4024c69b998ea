use std::collections::HashMap;

use super::value_objects::{AxisRange, ChartKind, ChartName, Fill, Rgba, ValueFormat};
use crate::domain::errors::AppError;
use crate::domain::logging::{LogComponent, get_logger};

/// One series of values plus its paint.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
    /// Per-point fills, cycled when shorter than `values`.
    pub fills: Vec<Fill>,
    /// Per-point borders, cycled like `fills`.
    pub borders: Vec<Rgba>,
    pub border_width: f64,
    /// Line charts only: paint the area under the line with `fills[0]`.
    pub fill_area: bool,
}

impl Dataset {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values: Vec::new(),
            fills: Vec::new(),
            borders: Vec::new(),
            border_width: 1.0,
            fill_area: false,
        }
    }

    pub fn fill_at(&self, index: usize) -> Option<Fill> {
        cycled(&self.fills, index).copied()
    }

    pub fn border_at(&self, index: usize) -> Option<Rgba> {
        cycled(&self.borders, index).copied()
    }
}

fn cycled<T>(items: &[T], index: usize) -> Option<&T> {
    if items.is_empty() { None } else { items.get(index % items.len()) }
}

/// Static presentation options of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub title: Option<String>,
    pub show_legend: bool,
    pub y_range: AxisRange,
    pub y_format: ValueFormat,
    pub tooltip_format: ValueFormat,
    pub show_x_grid: bool,
    /// Fraction of each category slot a bar occupies.
    pub bar_percentage: f64,
}

impl ChartConfig {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            title: None,
            show_legend: true,
            y_range: AxisRange::default(),
            y_format: ValueFormat::Plain,
            tooltip_format: ValueFormat::Plain,
            show_x_grid: true,
            bar_percentage: 0.9,
        }
    }
}

/// Everything needed to draw one chart: options, category labels, data.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub config: ChartConfig,
    pub labels: Vec<String>,
    pub dataset: Dataset,
}

impl ChartSpec {
    pub fn new(config: ChartConfig, dataset: Dataset) -> Self {
        Self { config, labels: Vec::new(), dataset }
    }

    pub fn set_data(&mut self, labels: Vec<String>, values: Vec<f64>) {
        self.labels = labels;
        self.dataset.values = values;
    }

    pub fn point_count(&self) -> usize {
        self.labels.len().max(self.dataset.values.len())
    }

    /// Tooltip text for the point at `index`.
    pub fn tooltip(&self, index: usize) -> Option<String> {
        let value = *self.dataset.values.get(index)?;
        let text = self.config.tooltip_format.format(value);
        Some(match self.labels.get(index) {
            Some(label) => format!("{}: {}", label, text),
            None => text,
        })
    }
}

/// Drawing target a chart renders into.
pub trait ChartSurface {
    fn draw(&mut self, spec: &ChartSpec) -> Result<(), AppError>;

    /// Release the surface; the canvas is left blank.
    fn clear(&mut self);
}

/// A live chart instance: its current spec bound to a surface.
pub struct ChartHandle {
    name: ChartName,
    spec: ChartSpec,
    surface: Box<dyn ChartSurface>,
}

impl std::fmt::Debug for ChartHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartHandle").field("name", &self.name).field("spec", &self.spec).finish()
    }
}

impl ChartHandle {
    /// Create and draw the initial (possibly empty) state.
    pub fn create(
        name: ChartName,
        spec: ChartSpec,
        mut surface: Box<dyn ChartSurface>,
    ) -> Result<Self, AppError> {
        surface.draw(&spec)?;
        Ok(Self { name, spec, surface })
    }

    pub fn name(&self) -> ChartName {
        self.name
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    /// Replace labels and values, then redraw.
    pub fn update(&mut self, labels: Vec<String>, values: Vec<f64>) -> Result<(), AppError> {
        self.spec.set_data(labels, values);
        self.redraw()
    }

    pub fn redraw(&mut self) -> Result<(), AppError> {
        self.surface.draw(&self.spec)
    }

    pub fn destroy(mut self) {
        get_logger().debug(
            LogComponent::Domain("Chart"),
            &format!("Destroying chart {}", self.name),
        );
        self.surface.clear();
    }
}

/// Chart instances keyed by name, owned by whoever created them.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: HashMap<ChartName, ChartHandle>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handle`, destroying any instance previously under its name.
    pub fn insert(&mut self, handle: ChartHandle) {
        if let Some(previous) = self.charts.insert(handle.name(), handle) {
            previous.destroy();
        }
    }

    pub fn get(&self, name: ChartName) -> Option<&ChartHandle> {
        self.charts.get(&name)
    }

    pub fn update(
        &mut self,
        name: ChartName,
        labels: Vec<String>,
        values: Vec<f64>,
    ) -> Result<(), AppError> {
        match self.charts.get_mut(&name) {
            Some(handle) => handle.update(labels, values),
            None => Err(AppError::Rendering(format!("chart {} is not initialized", name))),
        }
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn destroy_all(&mut self) {
        for (_, handle) in self.charts.drain() {
            handle.destroy();
        }
    }
}
