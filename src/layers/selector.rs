//! Level selection: which floors show, which fade, and which hide.

use crate::layers::layer::MapLayer;
use crate::layers::registry::MarkerRegistry;

/// State machine over the selected level. Starts unset; the view resolves
/// it to the map's default level right after load.
#[derive(Debug, Default)]
pub struct LevelSelector {
    selected: Option<i32>,
    /// Distinct levels present in the loaded map, sorted ascending.
    levels: Vec<i32>,
}

impl LevelSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets for a newly loaded map.
    pub fn reset(&mut self, layers: &[MapLayer]) {
        self.selected = None;
        self.levels = layers.iter().map(|l| l.level()).collect();
        self.levels.sort_unstable();
        self.levels.dedup();
    }

    /// Selects a level: fades layers by level distance and notifies every
    /// live marker of layer-selection membership. No-op when the level is
    /// already selected. Returns whether the selection changed.
    pub fn select_by_level(
        &mut self,
        level: i32,
        layers: &mut [MapLayer],
        markers: &mut MarkerRegistry,
    ) -> bool {
        if self.selected == Some(level) {
            return false;
        }
        self.selected = Some(level);

        for layer in layers.iter_mut() {
            layer.on_level_select(level);
        }

        for layer in layers.iter() {
            markers.notify_layer_select(layer.name(), layer.level() == level);
        }

        true
    }

    /// Selects the level of the first layer whose height bounds contain
    /// `height`. When no layer matches, the prior selection is left
    /// unchanged (best-effort fallback, not an error).
    pub fn select_by_world_height(
        &mut self,
        height: f64,
        layers: &mut [MapLayer],
        markers: &mut MarkerRegistry,
    ) -> bool {
        let matched = layers
            .iter()
            .find(|l| l.contains_height(height))
            .map(|l| l.level());

        match matched {
            Some(level) => self.select_by_level(level, layers, markers),
            None => {
                log::debug!("no layer contains height {height}, keeping level {:?}", self.selected);
                false
            }
        }
    }

    pub fn selected_level(&self) -> Option<i32> {
        self.selected
    }

    pub fn levels(&self) -> &[i32] {
        &self.levels
    }
}
