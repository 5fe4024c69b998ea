pub mod notifier;
pub mod surfaces;

pub use notifier::LeptosNotifier;
pub use surfaces::canvas_surface;
