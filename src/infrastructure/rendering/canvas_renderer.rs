use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::layout::{self, PADDING, Rect, ValueScale};
use crate::domain::{
    chart::{ChartKind, ChartName, ChartSpec, ChartSurface, Fill, Rgba},
    errors::AppError,
    logging::LogComponent,
};

const GRID_COLOR: &str = "rgba(0, 0, 0, 0.1)";
const TEXT_COLOR: &str = "#666666";
const TITLE_COLOR: &str = "#333333";
const LABEL_FONT: &str = "12px Arial";
const TITLE_FONT: &str = "bold 16px Arial";
const MAX_X_LABELS: usize = 10;

/// Canvas 2D chart surface bound to one `<canvas>` element by id.
pub struct CanvasSurface {
    canvas_id: String,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up `canvas_id` and acquire its 2D context.
    pub fn new(canvas_id: &str) -> Result<Self, AppError> {
        let (canvas, context) = get_canvas_context(canvas_id)?;
        Ok(Self { canvas_id: canvas_id.to_string(), canvas, context })
    }

    pub fn for_chart(name: ChartName) -> Result<Self, AppError> {
        Self::new(name.canvas_id())
    }

    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn render(&self, spec: &ChartSpec) -> Result<(), JsValue> {
        let (width, height) = self.size();
        let ctx = &self.context;
        ctx.clear_rect(0.0, 0.0, width, height);

        let plot = layout::plot_area(width, height, spec);
        let scale = ValueScale::fit(&spec.dataset.values, &spec.config.y_range);

        self.render_title(spec, width)?;
        self.render_legend(spec)?;
        self.render_value_axis(spec, &scale, &plot)?;
        if spec.config.show_x_grid {
            self.render_category_grid(spec, &plot);
        }

        match spec.config.kind {
            ChartKind::Bar => self.render_bars(spec, &scale, &plot)?,
            ChartKind::Line => self.render_line(spec, &scale, &plot)?,
        }

        self.render_category_labels(spec, &plot)?;
        Ok(())
    }

    fn render_title(&self, spec: &ChartSpec, width: f64) -> Result<(), JsValue> {
        let Some(title) = &spec.config.title else {
            return Ok(());
        };
        let ctx = &self.context;
        ctx.set_fill_style_str(TITLE_COLOR);
        ctx.set_font(TITLE_FONT);
        ctx.set_text_align("center");
        ctx.set_text_baseline("top");
        ctx.fill_text(title, width / 2.0, PADDING)
    }

    fn render_legend(&self, spec: &ChartSpec) -> Result<(), JsValue> {
        if !spec.config.show_legend {
            return Ok(());
        }
        let ctx = &self.context;
        let top = if spec.config.title.is_some() { PADDING + layout::TITLE_SPACE } else { PADDING };
        let x = PADDING + layout::AXIS_LABEL_SPACE;

        if let Some(fill) = spec.dataset.fill_at(0) {
            self.apply_fill(fill, top, top + 12.0)?;
            ctx.fill_rect(x, top, 36.0, 12.0);
        }
        if let Some(border) = spec.dataset.border_at(0) {
            ctx.set_stroke_style_str(&border.css());
            ctx.set_line_width(1.0);
            ctx.stroke_rect(x, top, 36.0, 12.0);
        }

        ctx.set_fill_style_str(TEXT_COLOR);
        ctx.set_font(LABEL_FONT);
        ctx.set_text_align("left");
        ctx.set_text_baseline("middle");
        ctx.fill_text(&spec.dataset.label, x + 44.0, top + 6.0)
    }

    fn render_value_axis(&self, spec: &ChartSpec, scale: &ValueScale, plot: &Rect) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.set_font(LABEL_FONT);
        ctx.set_text_align("right");
        ctx.set_text_baseline("middle");
        ctx.set_line_width(1.0);

        for &tick in &scale.ticks {
            let y = scale.y(tick, plot);
            ctx.set_stroke_style_str(GRID_COLOR);
            ctx.begin_path();
            ctx.move_to(plot.x, y);
            ctx.line_to(plot.right(), y);
            ctx.stroke();

            ctx.set_fill_style_str(TEXT_COLOR);
            ctx.fill_text(&spec.config.y_format.format(tick), plot.x - 8.0, y)?;
        }
        Ok(())
    }

    fn render_category_grid(&self, spec: &ChartSpec, plot: &Rect) {
        let ctx = &self.context;
        let count = spec.point_count();
        ctx.set_stroke_style_str(GRID_COLOR);
        ctx.set_line_width(1.0);
        for i in layout::label_indices(count, MAX_X_LABELS) {
            let x = layout::slot_center(plot, count, i);
            ctx.begin_path();
            ctx.move_to(x, plot.y);
            ctx.line_to(x, plot.bottom());
            ctx.stroke();
        }
    }

    fn render_bars(&self, spec: &ChartSpec, scale: &ValueScale, plot: &Rect) -> Result<(), JsValue> {
        let ctx = &self.context;
        let rects = layout::bar_rects(&spec.dataset.values, scale, plot, spec.config.bar_percentage);

        for (i, rect) in rects.iter().enumerate() {
            let Some(rect) = rect else { continue };
            if let Some(fill) = spec.dataset.fill_at(i) {
                self.apply_fill(fill, plot.y, plot.bottom())?;
                ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
            }
            if let Some(border) = spec.dataset.border_at(i) {
                ctx.set_stroke_style_str(&border.css());
                ctx.set_line_width(spec.dataset.border_width);
                ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
            }
        }
        Ok(())
    }

    fn render_line(&self, spec: &ChartSpec, scale: &ValueScale, plot: &Rect) -> Result<(), JsValue> {
        let ctx = &self.context;
        let points: Vec<(f64, f64)> =
            layout::line_points(&spec.dataset.values, scale, plot).into_iter().flatten().collect();
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Ok(());
        };

        if spec.dataset.fill_area {
            if let Some(fill) = spec.dataset.fill_at(0) {
                let base = scale.y(scale.min.max(0.0f64.min(scale.max)), plot);
                self.apply_fill(fill, plot.y, plot.bottom())?;
                ctx.begin_path();
                ctx.move_to(first.0, base);
                for &(x, y) in &points {
                    ctx.line_to(x, y);
                }
                ctx.line_to(last.0, base);
                ctx.close_path();
                ctx.fill();
            }
        }

        let border = spec.dataset.border_at(0).unwrap_or(Rgba::opaque(0, 0, 0));
        ctx.set_stroke_style_str(&border.css());
        ctx.set_line_width(spec.dataset.border_width);
        ctx.begin_path();
        ctx.move_to(first.0, first.1);
        for &(x, y) in points.iter().skip(1) {
            ctx.line_to(x, y);
        }
        ctx.stroke();
        Ok(())
    }

    fn render_category_labels(&self, spec: &ChartSpec, plot: &Rect) -> Result<(), JsValue> {
        let ctx = &self.context;
        let count = spec.point_count();
        ctx.set_fill_style_str(TEXT_COLOR);
        ctx.set_font(LABEL_FONT);
        ctx.set_text_align("center");
        ctx.set_text_baseline("top");
        for i in layout::label_indices(count, MAX_X_LABELS) {
            if let Some(label) = spec.labels.get(i) {
                ctx.fill_text(label, layout::slot_center(plot, count, i), plot.bottom() + 8.0)?;
            }
        }
        Ok(())
    }

    fn apply_fill(&self, fill: Fill, top: f64, bottom: f64) -> Result<(), JsValue> {
        match fill {
            Fill::Solid(color) => self.context.set_fill_style_str(&color.css()),
            Fill::VerticalGradient { top: from, bottom: to } => {
                let gradient = self.context.create_linear_gradient(0.0, top, 0.0, bottom);
                gradient.add_color_stop(0.0, &from.css())?;
                gradient.add_color_stop(1.0, &to.css())?;
                self.context.set_fill_style_canvas_gradient(&gradient);
            }
        }
        Ok(())
    }
}

impl ChartSurface for CanvasSurface {
    fn draw(&mut self, spec: &ChartSpec) -> Result<(), AppError> {
        crate::log_trace!(
            LogComponent::Infrastructure("CanvasSurface"),
            "Drawing {} points on #{}",
            spec.point_count(),
            self.canvas_id
        );
        self.render(spec).map_err(|e| {
            AppError::Rendering(format!("Failed to draw #{}: {:?}", self.canvas_id, e))
        })
    }

    fn clear(&mut self) {
        let (width, height) = self.size();
        self.context.clear_rect(0.0, 0.0, width, height);
    }
}

/// Get canvas element and its 2D context
fn get_canvas_context(canvas_id: &str) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), AppError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| AppError::Rendering("Document not available".to_string()))?;

    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| AppError::Rendering(format!("Canvas #{} not found", canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| AppError::Rendering(format!("#{} is not a canvas", canvas_id)))?;

    let context = canvas
        .get_context("2d")
        .map_err(|_| AppError::Rendering("Failed to get 2D context".to_string()))?
        .ok_or_else(|| AppError::Rendering("2D context unavailable".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| AppError::Rendering("Failed to cast to 2D context".to_string()))?;

    Ok((canvas, context))
}
