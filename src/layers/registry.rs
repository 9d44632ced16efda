//! The set of active visual markers, keyed by a stable identifier.
//!
//! The registry holds at most one marker per key. Its size always equals
//! the number of keys whose governing visibility predicate currently
//! holds; callers re-evaluate eagerly on every predicate-affecting event
//! (entity unregister, category toggle, map change), never lazily at
//! render time.

use crate::core::geo::Point;
use crate::dynamic::categories::MarkerCategory;
use crate::layers::marker::MapMarker;
use crate::prelude::HashMap;

#[derive(Debug, Default)]
pub struct MarkerRegistry {
    markers: HashMap<String, MapMarker>,
    /// Insertion order, for stable draw order.
    order: Vec<String>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self {
            markers: HashMap::default(),
            order: Vec::new(),
        }
    }

    /// Inserts a marker under its key. Idempotent: a second add for an
    /// existing key is a no-op, preferred over signaling an error.
    pub fn add(&mut self, marker: MapMarker) -> bool {
        let key = marker.key().to_string();
        if self.markers.contains_key(&key) {
            log::debug!("marker {key} already present, ignoring duplicate add");
            return false;
        }
        self.order.push(key.clone());
        self.markers.insert(key, marker);
        true
    }

    /// Removes and disposes the marker if present; no-op otherwise.
    pub fn remove(&mut self, key: &str) -> Option<MapMarker> {
        let removed = self.markers.remove(key);
        if removed.is_some() {
            self.order.retain(|k| k != key);
        }
        removed
    }

    /// Moves a marker in place. Silent no-op when the key is absent.
    pub fn update_position(&mut self, key: &str, position: Point, rotation: f64) {
        match self.markers.get_mut(key) {
            Some(marker) => marker.move_to(position, rotation),
            None => log::debug!("update for absent marker {key} dropped"),
        }
    }

    /// Removes every marker whose category matches. Category is assigned
    /// at creation time and never re-evaluated. Returns the removed keys.
    pub fn remove_category(&mut self, category: MarkerCategory) -> Vec<String> {
        let keys: Vec<String> = self
            .order
            .iter()
            .filter(|k| {
                self.markers
                    .get(*k)
                    .map(|m| m.category() == category)
                    .unwrap_or(false)
            })
            .cloned()
            .collect();

        for key in &keys {
            self.markers.remove(key);
        }
        self.order.retain(|k| !keys.contains(k));
        keys
    }

    /// Tweens every glyph to the given scale. Called with `1 / zoom` on
    /// every zoom change so marker screen size stays zoom-invariant.
    pub fn set_marker_scale(&mut self, scale: f64, duration: f64) {
        for marker in self.markers.values_mut() {
            marker.set_scale(scale, duration);
        }
    }

    /// Fans out a layer-selection notification to every live marker.
    pub fn notify_layer_select(&mut self, layer_name: &str, on_selected_level: bool) {
        for marker in self.markers.values_mut() {
            marker.on_layer_select(layer_name, on_selected_level);
        }
    }

    pub fn tick(&mut self, dt: f64) {
        for marker in self.markers.values_mut() {
            marker.tick(dt);
        }
    }

    pub fn get(&self, key: &str) -> Option<&MapMarker> {
        self.markers.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut MapMarker> {
        self.markers.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.markers.contains_key(key)
    }

    /// Markers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &MapMarker> {
        self.order.iter().filter_map(|k| self.markers.get(k))
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Color;

    fn marker(key: &str, category: MarkerCategory) -> MapMarker {
        MapMarker::new(
            key,
            category,
            "markers/skull.png",
            key,
            Color::WHITE,
            Point::ZERO,
            1.0,
        )
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut registry = MarkerRegistry::new();
        assert!(registry.add(marker("a", MarkerCategory::OtherCorpse)));
        assert!(!registry.add(marker("a", MarkerCategory::OtherCorpse)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut registry = MarkerRegistry::new();
        assert!(registry.remove("missing").is_none());
    }

    #[test]
    fn test_update_absent_is_silent() {
        let mut registry = MarkerRegistry::new();
        registry.update_position("missing", Point::new(1.0, 1.0), 0.0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_category_only_matches() {
        let mut registry = MarkerRegistry::new();
        registry.add(marker("a", MarkerCategory::FriendlyCorpse));
        registry.add(marker("b", MarkerCategory::KilledCorpse));
        registry.add(marker("c", MarkerCategory::FriendlyCorpse));

        let removed = registry.remove_category(MarkerCategory::FriendlyCorpse);
        assert_eq!(removed.len(), 2);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("b"));
    }

    #[test]
    fn test_iteration_order_is_stable() {
        let mut registry = MarkerRegistry::new();
        registry.add(marker("c", MarkerCategory::OtherCorpse));
        registry.add(marker("a", MarkerCategory::OtherCorpse));
        registry.add(marker("b", MarkerCategory::OtherCorpse));

        let keys: Vec<&str> = registry.iter().map(|m| m.key()).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_set_marker_scale_fans_out() {
        let mut registry = MarkerRegistry::new();
        registry.add(marker("a", MarkerCategory::OtherCorpse));
        registry.add(marker("b", MarkerCategory::OtherCorpse));
        registry.set_marker_scale(0.25, 0.0);
        for m in registry.iter() {
            assert_eq!(m.scale(), 0.25);
        }
    }
}
