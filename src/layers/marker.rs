//! A live, mutable map marker: one glyph over the map artwork.
//!
//! Markers store their map-space position and let the viewport apply zoom
//! and pan at draw time. Only the glyph scale lives here, because it is
//! inverse-tweened against zoom so the glyph's on-screen size never
//! changes.

use crate::animation::{Animated, EasingFunction};
use crate::core::geo::{Color, Point};
use crate::dynamic::categories::MarkerCategory;

#[derive(Debug, Clone)]
pub struct MapMarker {
    key: String,
    category: MarkerCategory,
    image: String,
    text: String,
    color: Color,
    /// Map-space position (pre-rotated), independent of zoom/pan.
    position: Point,
    /// Glyph rotation in degrees.
    rotation: f64,
    /// Inverse of zoom, tweened alongside it.
    scale: Animated<f64>,
    /// Hidden when pinned to a layer that is not the selected level.
    visible: bool,
    layer: Option<String>,
}

impl MapMarker {
    pub fn new(
        key: impl Into<String>,
        category: MarkerCategory,
        image: impl Into<String>,
        text: impl Into<String>,
        color: Color,
        position: Point,
        initial_scale: f64,
    ) -> Self {
        Self {
            key: key.into(),
            category,
            image: image.into(),
            text: text.into(),
            color,
            position,
            rotation: 0.0,
            scale: Animated::new(initial_scale),
            visible: true,
            layer: None,
        }
    }

    /// Pins the marker to a layer so it hides on other levels.
    pub fn with_layer(mut self, layer: Option<String>) -> Self {
        self.layer = layer;
        self
    }

    /// Moves the marker and points its glyph.
    pub fn move_to(&mut self, position: Point, rotation: f64) {
        self.position = position;
        self.rotation = rotation;
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Tweens the glyph scale; called with `1 / zoom` whenever zoom
    /// changes so glyph pixel size stays constant.
    pub fn set_scale(&mut self, scale: f64, duration: f64) {
        self.scale
            .animate_to(scale, duration, EasingFunction::EaseOutQuad);
    }

    /// Layer-selection notification: markers pinned to `layer_name` show
    /// only while that layer sits at the selected level.
    pub fn on_layer_select(&mut self, layer_name: &str, on_selected_level: bool) {
        if self.layer.as_deref() == Some(layer_name) {
            self.visible = on_selected_level;
        }
    }

    pub fn tick(&mut self, dt: f64) {
        self.scale.tick(dt);
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn category(&self) -> MarkerCategory {
        self.category
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Displayed glyph scale (interpolated while a zoom tween runs).
    pub fn scale(&self) -> f64 {
        self.scale.value()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn layer(&self) -> Option<&str> {
        self.layer.as_deref()
    }
}
