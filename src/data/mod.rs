pub mod map_def;
pub mod mapping;
mod schema;

pub use map_def::{LayerDef, MapDef, MarkerDef};
pub use mapping::MapMapping;
