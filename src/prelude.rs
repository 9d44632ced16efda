//! Prelude module for common raidmap types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use raidmap::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    constants,
    geo::{Color, Point, WorldPosition},
    transform,
    viewport::Viewport,
};

pub use crate::animation::{Animated, EasingFunction, Lerp, Tween};

pub use crate::data::{LayerDef, MapDef, MapMapping, MarkerDef};

pub use crate::layers::{
    layer::MapLayer,
    marker::MapMarker,
    registry::MarkerRegistry,
    selector::LevelSelector,
};

pub use crate::dynamic::{
    categories::{CategoryVisibility, MarkerCategory},
    corpse::CorpseMarkerProvider,
    provider::DynamicMarkerProvider,
};

pub use crate::input::events::{InputEvent, KeyCode};

pub use crate::render::scene::SceneNode;

pub use crate::screen::MapScreen;
pub use crate::view::MapView;

pub use crate::world::{
    events::{EntityId, WorldEvent, WorldQuery},
    scope::EventScope,
};

pub use crate::{Error as MapError, Result, SchemaViolation};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
