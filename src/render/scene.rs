//! Flattens the view into an ordered list of draw commands.
//!
//! The host renderer consumes `SceneNode`s in list order: map layers first
//! (bottom floor to top), then markers in insertion order. Positions are
//! screen pixels relative to the mask center, already through the
//! map-to-screen transform, so the host applies no transform of its own.

use crate::core::constants::MARKER_SIZE;
use crate::core::geo::{Color, Point};
use crate::core::transform;
use crate::view::MapView;

/// One textured quad to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub image: String,
    /// Screen position of the quad center, pixels from the mask center.
    pub position: Point,
    /// Unscaled quad size in pixels.
    pub size: Point,
    /// Scale applied on top of `size`. Layers carry the displayed zoom;
    /// markers carry glyph scale times zoom, which cancels to roughly one.
    pub scale: f64,
    /// Rotation in degrees (markers only; layer art is pre-rotated).
    pub rotation: f64,
    /// Multiplicative tint. Inactive-level dimming rides in here.
    pub tint: Color,
}

/// Builds the draw list for the current frame. Empty when no map is
/// loaded.
pub fn build_scene(view: &MapView) -> Vec<SceneNode> {
    let Some(viewport) = view.viewport() else {
        return Vec::new();
    };
    let Some(def) = view.map_def() else {
        return Vec::new();
    };

    let zoom = viewport.displayed_zoom();
    let world_size = transform::bounding_rectangle(&def.bounds);
    let map_size = transform::rotated_bounding_rectangle(world_size, def.coordinate_rotation);

    let mut nodes = Vec::new();

    let mut layers: Vec<_> = view.layers().iter().filter(|l| l.is_active()).collect();
    layers.sort_by_key(|l| l.draw_index());
    for layer in layers {
        nodes.push(SceneNode {
            image: layer.image().to_string(),
            position: viewport.map_to_screen(Point::ZERO),
            size: map_size,
            scale: zoom,
            rotation: 0.0,
            tint: Color::fade(layer.fade()),
        });
    }

    for marker in view.markers().iter().filter(|m| m.is_visible()) {
        nodes.push(SceneNode {
            image: marker.image().to_string(),
            position: viewport.map_to_screen(marker.position()),
            size: Point::new(MARKER_SIZE.0, MARKER_SIZE.1),
            scale: marker.scale() * zoom,
            rotation: marker.rotation(),
            tint: marker.color(),
        });
    }

    nodes
}
