//! Zoom/pan state for the map content inside the screen mask.
//!
//! All positions handled here are map-space (pre-rotated) coordinates;
//! screen position is `map_pos * zoom + anchor`, where the anchor is the
//! map origin's offset from the mask center. Markers store map-space
//! positions and the viewport applies zoom/pan at draw time.

use crate::animation::{Animated, EasingFunction};
use crate::core::constants::{
    MOMENTUM_DECAY, MOMENTUM_MIN_SPEED, ZOOM_MAX_SCALER, ZOOM_SCALER, ZOOM_TWEEN_SECS,
};
use crate::core::geo::Point;
use crate::core::transform;

const ZOOM_EPSILON: f64 = 1e-9;

/// Lower bound for the fitted zoom, so a degenerate mask or map can never
/// produce a zero zoom (and infinite inverse marker scales).
const ZOOM_MIN_FLOOR: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct Viewport {
    /// Visible window size in screen pixels.
    mask_size: Point,
    /// Rotated footprint of the loaded map's content.
    map_size: Point,
    /// Fixed per map; used for world→map conversion and the zoom fit.
    rotation: f64,
    zoom_min: f64,
    zoom_max: f64,
    /// Target zoom. The displayed scale tweens toward it.
    zoom: f64,
    scale: Animated<f64>,
    anchor: Animated<Point>,
    /// Running shift target, tracked outside the tween so repeated shifts
    /// during an in-flight animation compose instead of reading a stale
    /// interpolated value.
    immediate_anchor: Point,
    /// Drag-release velocity in pixels/second.
    momentum: Point,
}

impl Viewport {
    pub fn new(mask_size: Point) -> Self {
        Self {
            mask_size,
            map_size: Point::ZERO,
            rotation: 0.0,
            zoom_min: 1.0,
            zoom_max: 1.0,
            zoom: 1.0,
            scale: Animated::new(1.0),
            anchor: Animated::new(Point::ZERO),
            immediate_anchor: Point::ZERO,
            momentum: Point::ZERO,
        }
    }

    /// Configures zoom bounds for a newly loaded map: `zoom_min` fits the
    /// whole rotated map inside the mask, `zoom_max` is a fixed multiple
    /// of it.
    pub fn fit_map(&mut self, world_size: Point, rotation: f64) {
        self.rotation = rotation;
        self.map_size = transform::rotated_bounding_rectangle(world_size, rotation);

        if self.map_size.x > 0.0 && self.map_size.y > 0.0 {
            self.zoom_min = (self.mask_size.x / self.map_size.x)
                .min(self.mask_size.y / self.map_size.y)
                .max(ZOOM_MIN_FLOOR);
        } else {
            self.zoom_min = 1.0;
        }
        self.zoom_max = ZOOM_MAX_SCALER * self.zoom_min;

        // force the initial set_zoom after a reload to take effect
        self.zoom = 0.0;
        self.scale.set(self.zoom_min);
        self.anchor.set(Point::ZERO);
        self.immediate_anchor = Point::ZERO;
        self.momentum = Point::ZERO;
    }

    /// Requests a zoom change, clamped to `[zoom_min, zoom_max]`.
    ///
    /// Returns false (and starts no animation) when the clamped target
    /// equals the current zoom. On true, the caller is responsible for
    /// inverse-scaling marker glyphs with the same duration.
    pub fn set_zoom(&mut self, target: f64, duration: f64) -> bool {
        let target = target.clamp(self.zoom_min, self.zoom_max);

        // already there
        if (target - self.zoom).abs() < ZOOM_EPSILON {
            return false;
        }

        self.zoom = target;
        self.stop_momentum();
        self.scale
            .animate_to(target, duration, EasingFunction::EaseOutQuad);
        true
    }

    /// Pans the map by `delta` screen pixels. Zero delta is a no-op.
    pub fn shift(&mut self, delta: Point, duration: f64) {
        if delta.is_zero() {
            return;
        }

        self.stop_momentum();

        // pick up any anchor movement momentum applied since the last shift
        if !self.anchor.is_animating() {
            self.immediate_anchor = self.anchor.value();
        }

        self.immediate_anchor = self.immediate_anchor.add(&delta);
        self.anchor
            .animate_to(self.immediate_anchor, duration, EasingFunction::EaseOutQuad);
    }

    /// Pans so that the given map-space coordinate lands on the mask center.
    pub fn shift_to_coordinate(&mut self, coord: Point, duration: f64) {
        let current_center = self.anchor_target().multiply(1.0 / self.zoom);
        let delta = coord
            .negate()
            .subtract(&current_center)
            .multiply(self.zoom);
        self.shift(delta, duration);
    }

    /// Converts a scroll signal at `pointer` (screen pixels, relative to
    /// the mask center) into a pivot-preserving zoom: the map coordinate
    /// under the pointer stays fixed. The shift is issued before the zoom
    /// so both tweens start in the same frame.
    ///
    /// Returns whether the zoom changed.
    pub fn on_scroll(&mut self, scroll_delta: f64, pointer: Point) -> bool {
        let pivot = pointer
            .subtract(&self.anchor_target())
            .multiply(1.0 / self.zoom);

        let zoom_delta = scroll_delta * self.zoom * ZOOM_SCALER;
        let zoom_new = (self.zoom + zoom_delta).clamp(self.zoom_min, self.zoom_max);
        let actual_delta = zoom_new - self.zoom;
        if actual_delta.abs() < ZOOM_EPSILON {
            return false;
        }

        self.shift(pivot.multiply(-actual_delta), ZOOM_TWEEN_SECS);
        self.set_zoom(zoom_new, ZOOM_TWEEN_SECS)
    }

    /// A drag gesture started; any coasting pan stops under the pointer.
    pub fn begin_drag(&mut self) {
        self.stop_momentum();
    }

    /// Immediate pan from pointer dragging.
    pub fn drag(&mut self, delta: Point) {
        self.shift(delta, 0.0);
    }

    /// Hands the viewport a release velocity (pixels/second) to coast on.
    /// Any subsequent zoom or shift cancels it.
    pub fn end_drag(&mut self, velocity: Point) {
        self.momentum = velocity;
    }

    fn stop_momentum(&mut self) {
        self.momentum = Point::ZERO;
    }

    /// Advances tweens and momentum. Called once per host frame.
    pub fn tick(&mut self, dt: f64) {
        self.scale.tick(dt);
        self.anchor.tick(dt);

        if !self.momentum.is_zero() {
            self.immediate_anchor = self.anchor.value().add(&self.momentum.multiply(dt));
            self.anchor.set(self.immediate_anchor);

            let decay = (-MOMENTUM_DECAY * dt).exp();
            self.momentum = self.momentum.multiply(decay);
            if self.momentum.length() < MOMENTUM_MIN_SPEED {
                self.momentum = Point::ZERO;
            }
        }
    }

    /// Where the anchor will settle after in-flight shifts.
    pub fn anchor_target(&self) -> Point {
        if self.anchor.is_animating() {
            self.immediate_anchor
        } else {
            self.anchor.value()
        }
    }

    /// Screen position (relative to mask center) of a map coordinate, at
    /// the displayed zoom.
    pub fn map_to_screen(&self, map_pos: Point) -> Point {
        map_pos.multiply(self.scale.value()).add(&self.anchor.value())
    }

    /// Map coordinate under a screen position, at the displayed zoom.
    pub fn screen_to_map(&self, screen_pos: Point) -> Point {
        screen_pos
            .subtract(&self.anchor.value())
            .multiply(1.0 / self.scale.value())
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// The interpolated zoom currently on screen.
    pub fn displayed_zoom(&self) -> f64 {
        self.scale.value()
    }

    pub fn zoom_min(&self) -> f64 {
        self.zoom_min
    }

    pub fn zoom_max(&self) -> f64 {
        self.zoom_max
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn mask_size(&self) -> Point {
        self.mask_size
    }

    pub fn is_animating(&self) -> bool {
        self.scale.is_animating() || self.anchor.is_animating() || !self.momentum.is_zero()
    }
}
