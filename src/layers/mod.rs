pub mod layer;
pub mod marker;
pub mod registry;
pub mod selector;

pub use layer::MapLayer;
pub use marker::MapMarker;
pub use registry::MarkerRegistry;
pub use selector::LevelSelector;
