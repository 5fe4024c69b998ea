//! Chart model: specs, live handles and the registry that owns them.

pub mod entities;
pub mod presets;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
