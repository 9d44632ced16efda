//! A live map layer: one floor's artwork plus its show/fade state.

use crate::core::constants::FADE_PER_LEVEL;
use crate::data::LayerDef;

#[derive(Debug, Clone)]
pub struct MapLayer {
    name: String,
    level: i32,
    height_bounds: (f64, f64),
    image: String,
    /// Draw order slot, assigned at map load after sorting by level.
    draw_index: usize,
    active: bool,
    /// Grayscale multiplier: 1.0 at the selected level, dimmed below it.
    fade: f32,
}

impl MapLayer {
    pub fn from_def(def: &LayerDef) -> Self {
        Self {
            name: def.name.clone(),
            level: def.level,
            height_bounds: def.height_bounds,
            image: def.image.clone(),
            draw_index: 0,
            active: false,
            fade: 1.0,
        }
    }

    /// Reacts to a level selection: layers at or below the selected level
    /// show, dimmed by their level distance; layers above it hide.
    pub fn on_level_select(&mut self, level: i32) {
        self.active = self.level <= level;
        self.fade = FADE_PER_LEVEL.powi(level - self.level);
    }

    /// Whether a world height falls inside this floor's height range.
    pub fn contains_height(&self, height: f64) -> bool {
        height > self.height_bounds.0 && height < self.height_bounds.1
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn fade(&self) -> f32 {
        self.fade
    }

    pub fn draw_index(&self) -> usize {
        self.draw_index
    }

    pub(crate) fn set_draw_index(&mut self, index: usize) {
        self.draw_index = index;
    }
}
