use crate::domain::{
    chart::{ChartName, ChartSurface},
    errors::AppError,
};
use crate::infrastructure::rendering::CanvasSurface;

/// Surface factory over the page's `<canvas id="...">` elements.
pub fn canvas_surface(name: ChartName) -> Result<Box<dyn ChartSurface>, AppError> {
    Ok(Box::new(CanvasSurface::for_chart(name)?))
}
