//! # raidmap
//!
//! An in-game overlay map engine: renders a zoomable, multi-level 2D map
//! synchronized to the player's 3D position and overlays dynamic markers
//! (player position, corpses of other players) on top of static per-map
//! artwork.
//!
//! The engine owns the viewport/coordinate-transform math and the dynamic
//! marker lifecycle. The host game process (world events), the static map
//! artwork, and the GUI widget toolkit are external collaborators: world
//! state comes in through the [`world::WorldQuery`] trait, and draw state
//! goes out as an ordered [`render::SceneNode`] list each frame.

pub mod animation;
pub mod core;
pub mod data;
pub mod dynamic;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod render;
pub mod screen;
pub mod view;
pub mod world;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    geo::{Point, WorldPosition},
    viewport::Viewport,
};

pub use crate::data::{LayerDef, MapDef, MapMapping, MarkerDef};

pub use crate::layers::{
    layer::MapLayer, marker::MapMarker, registry::MarkerRegistry, selector::LevelSelector,
};

pub use crate::dynamic::{
    categories::{CategoryVisibility, MarkerCategory},
    corpse::CorpseMarkerProvider,
    provider::DynamicMarkerProvider,
};

pub use crate::input::events::InputEvent;

pub use crate::render::scene::SceneNode;
pub use crate::screen::MapScreen;
pub use crate::view::MapView;
pub use crate::world::{
    events::{EntityId, WorldEvent, WorldQuery},
    scope::EventScope,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("asset not found: {0}")]
    AssetNotFound(String),

    #[error("malformed asset {name}: {violation}")]
    MalformedAsset {
        name: String,
        violation: SchemaViolation,
    },

    #[error("no viewport attached: {0}")]
    MissingViewport(String),
}

/// Schema-level failure detail for map/layer/marker definitions. Missing
/// fields, wrong types, and duplicate names stay distinguishable so load
/// errors can be reported precisely.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaViolation {
    #[error("invalid JSON: {0}")]
    Syntax(String),

    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("field `{field}` has wrong type, expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("duplicate {kind} name `{name}`")]
    DuplicateName { kind: &'static str, name: String },
}

/// Error type alias for convenience
pub type Error = MapError;
