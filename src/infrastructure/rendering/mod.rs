pub mod canvas_renderer;
pub mod layout;

pub use canvas_renderer::CanvasSurface;
