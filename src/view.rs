//! The map view: one loaded map's viewport, layers, level selection, and
//! live markers, composed behind the operations the screen and the dynamic
//! marker providers drive.

use crate::core::constants::{PLAYER_MARKER_KEY, POSITION_TWEEN_SECS};
use crate::core::geo::{Color, Point, WorldPosition};
use crate::core::transform;
use crate::core::viewport::Viewport;
use crate::data::{MapDef, MarkerDef};
use crate::dynamic::categories::{CategoryVisibility, MarkerCategory};
use crate::layers::layer::MapLayer;
use crate::layers::marker::MapMarker;
use crate::layers::registry::MarkerRegistry;
use crate::layers::selector::LevelSelector;
use crate::MapError;

const PLAYER_MARKER_IMAGE: &str = "markers/arrow.png";

/// Everything owned for the lifetime of "map is loaded".
struct LoadedMap {
    def: MapDef,
    viewport: Viewport,
    /// Sorted by level so index doubles as draw order.
    layers: Vec<MapLayer>,
    selector: LevelSelector,
}

pub struct MapView {
    mask_size: Point,
    loaded: Option<LoadedMap>,
    markers: MarkerRegistry,
    visibility: CategoryVisibility,
}

impl MapView {
    pub fn new(mask_size: Point) -> Self {
        Self {
            mask_size,
            loaded: None,
            markers: MarkerRegistry::new(),
            visibility: CategoryVisibility::new(),
        }
    }

    /// Loads a map: resets the viewport to fit the rotated bounds,
    /// instantiates layers (sorted by level for draw order) and static
    /// markers, and selects the map's default level. Any previously loaded
    /// map and its markers are torn down first.
    pub fn load_map(&mut self, def: MapDef) {
        self.markers.clear();

        let mut viewport = Viewport::new(self.mask_size);
        let world_size = transform::bounding_rectangle(&def.bounds);
        viewport.fit_map(world_size, def.coordinate_rotation);

        let mut layers: Vec<MapLayer> = def.layers.iter().map(MapLayer::from_def).collect();
        layers.sort_by_key(|l| l.level());
        for (i, layer) in layers.iter_mut().enumerate() {
            layer.set_draw_index(i);
        }

        let mut selector = LevelSelector::new();
        selector.reset(&layers);

        let default_level = def.default_level;
        let center = transform::world_to_map(
            {
                let mid = transform::midpoint(&def.bounds);
                WorldPosition::new(mid.x, 0.0, mid.y)
            },
            def.coordinate_rotation,
        );

        self.loaded = Some(LoadedMap {
            def,
            viewport,
            layers,
            selector,
        });

        // establish baseline scale, then center the whole map
        self.set_zoom(self.zoom_min(), 0.0);
        if let Some(loaded) = &mut self.loaded {
            loaded.viewport.shift_to_coordinate(center, 0.0);
        }

        self.select_level(default_level);

        let static_markers: Vec<(String, MarkerDef)> = self
            .loaded
            .as_ref()
            .map(|l| l.def.static_markers.clone())
            .unwrap_or_default();
        for (name, marker_def) in &static_markers {
            self.add_marker(name, marker_def);
        }

        if let Some(loaded) = &self.loaded {
            log::info!(
                "loaded map {} with {} layers, zoom [{:.3}, {:.3}]",
                loaded.def.display_name,
                loaded.layers.len(),
                loaded.viewport.zoom_min(),
                loaded.viewport.zoom_max(),
            );
        }
    }

    /// Tears down the loaded map and every marker. The view falls back to
    /// the "no map loaded" state.
    pub fn unload_map(&mut self) {
        self.loaded = None;
        self.markers.clear();
    }

    pub fn has_map(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn map_def(&self) -> Option<&MapDef> {
        self.loaded.as_ref().map(|l| &l.def)
    }

    pub fn layers(&self) -> &[MapLayer] {
        self.loaded.as_ref().map(|l| l.layers.as_slice()).unwrap_or(&[])
    }

    pub fn selected_level(&self) -> Option<i32> {
        self.loaded.as_ref().and_then(|l| l.selector.selected_level())
    }

    pub fn levels(&self) -> &[i32] {
        self.loaded.as_ref().map(|l| l.selector.levels()).unwrap_or(&[])
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.loaded.as_ref().map(|l| &l.viewport)
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    // --- marker operations -------------------------------------------------

    /// Instantiates a marker for `key` unless one already exists
    /// (idempotent add). With no map attached the operation is dropped with
    /// a warning, not an error; callers recover by re-adding once a map is
    /// shown (rescan-on-attach).
    pub fn add_marker(&mut self, key: &str, def: &MarkerDef) -> bool {
        let Some(loaded) = &mut self.loaded else {
            log::warn!("{}", MapError::MissingViewport(format!("dropping marker {key}")));
            return false;
        };

        if self.markers.contains(key) {
            return false;
        }

        let rotation = loaded.viewport.rotation();
        let position = transform::world_to_map(def.position, rotation);
        let zoom = loaded.viewport.zoom();

        let mut marker = MapMarker::new(
            key,
            def.category,
            def.image.clone(),
            def.text.clone(),
            def.color,
            position,
            1.0 / zoom,
        )
        .with_layer(def.layer.clone());

        // apply the current level selection to the newcomer
        if let Some(level) = loaded.selector.selected_level() {
            for layer in &loaded.layers {
                marker.on_layer_select(layer.name(), layer.level() == level);
            }
        }

        self.markers.add(marker)
    }

    /// Removes and disposes the marker if present; no-op otherwise.
    pub fn remove_marker(&mut self, key: &str) -> bool {
        self.markers.remove(key).is_some()
    }

    pub fn marker(&self, key: &str) -> Option<&MapMarker> {
        self.markers.get(key)
    }

    /// Moves an existing marker to a world position. Silent no-op when the
    /// key is absent or no map is loaded.
    pub fn move_marker(&mut self, key: &str, position: WorldPosition, rotation: f64) {
        let Some(loaded) = &self.loaded else {
            return;
        };
        let map_pos = transform::world_to_map(position, loaded.viewport.rotation());
        self.markers.update_position(key, map_pos, rotation);
    }

    // --- category visibility ----------------------------------------------

    pub fn is_category_visible(&self, category: MarkerCategory) -> bool {
        self.visibility.is_visible(category)
    }

    /// Flips a category flag. Turning a category off immediately removes
    /// every marker already assigned to it; turning it on is completed by
    /// the providers' rescan, which the screen triggers. Returns whether
    /// the flag changed.
    pub fn set_category_visible(&mut self, category: MarkerCategory, visible: bool) -> bool {
        if !self.visibility.set_visible(category, visible) {
            return false;
        }
        if !visible {
            let removed = self.markers.remove_category(category);
            log::debug!("category {category} hidden, removed {} markers", removed.len());
        }
        true
    }

    // --- level selection ---------------------------------------------------

    pub fn select_level(&mut self, level: i32) -> bool {
        let Some(loaded) = &mut self.loaded else {
            return false;
        };
        loaded
            .selector
            .select_by_level(level, &mut loaded.layers, &mut self.markers)
    }

    pub fn select_level_by_height(&mut self, height: f64) -> bool {
        let Some(loaded) = &mut self.loaded else {
            return false;
        };
        loaded
            .selector
            .select_by_world_height(height, &mut loaded.layers, &mut self.markers)
    }

    // --- viewport operations -----------------------------------------------

    /// Zooms toward `target`, inverse-scaling every marker glyph with the
    /// same duration so glyph screen size stays constant.
    pub fn set_zoom(&mut self, target: f64, duration: f64) -> bool {
        let Some(loaded) = &mut self.loaded else {
            return false;
        };
        if !loaded.viewport.set_zoom(target, duration) {
            return false;
        }
        self.markers
            .set_marker_scale(1.0 / loaded.viewport.zoom(), duration);
        true
    }

    pub fn shift(&mut self, delta: Point, duration: f64) {
        if let Some(loaded) = &mut self.loaded {
            loaded.viewport.shift(delta, duration);
        }
    }

    pub fn shift_to_coordinate(&mut self, coord: Point, duration: f64) {
        if let Some(loaded) = &mut self.loaded {
            loaded.viewport.shift_to_coordinate(coord, duration);
        }
    }

    /// Pivot-preserving scroll zoom; keeps the marker scale invariant in
    /// the same frame as the zoom tween.
    pub fn on_scroll(&mut self, delta: f64, pointer: Point) -> bool {
        let Some(loaded) = &mut self.loaded else {
            return false;
        };
        if !loaded.viewport.on_scroll(delta, pointer) {
            return false;
        }
        self.markers.set_marker_scale(
            1.0 / loaded.viewport.zoom(),
            crate::core::constants::ZOOM_TWEEN_SECS,
        );
        true
    }

    pub fn begin_drag(&mut self) {
        if let Some(loaded) = &mut self.loaded {
            loaded.viewport.begin_drag();
        }
    }

    pub fn drag(&mut self, delta: Point) {
        if let Some(loaded) = &mut self.loaded {
            loaded.viewport.drag(delta);
        }
    }

    pub fn end_drag(&mut self, velocity: Point) {
        if let Some(loaded) = &mut self.loaded {
            loaded.viewport.end_drag(velocity);
        }
    }

    /// Recenters on the player marker with the standard pan tween.
    pub fn center_on_player(&mut self) {
        let Some(position) = self.marker(PLAYER_MARKER_KEY).map(|m| m.position()) else {
            return;
        };
        self.shift_to_coordinate(position, POSITION_TWEEN_SECS);
    }

    // --- per-frame and session flow ----------------------------------------

    /// Synchronizes the view to the local player while a session is live:
    /// keeps the reserved player marker at the converted position with the
    /// heading negated, selects layers by world height, and recenters.
    /// Called on every position update.
    pub fn show_in_raid(&mut self, position: WorldPosition, yaw_degrees: f64) {
        let Some(loaded) = &self.loaded else {
            log::warn!(
                "{}",
                MapError::MissingViewport("cannot track player".to_string())
            );
            return;
        };
        let rotation = loaded.viewport.rotation();

        if !self.markers.contains(PLAYER_MARKER_KEY) {
            self.add_marker(
                PLAYER_MARKER_KEY,
                &MarkerDef {
                    category: MarkerCategory::Player,
                    image: PLAYER_MARKER_IMAGE.to_string(),
                    text: PLAYER_MARKER_KEY.to_string(),
                    color: Color::CYAN,
                    position,
                    layer: None,
                },
            );
        }

        // negated heading, rotated into map space
        let map_pos = transform::world_to_map(position, rotation);
        self.markers
            .update_position(PLAYER_MARKER_KEY, map_pos, -(yaw_degrees + rotation));

        self.select_level_by_height(position.height());
        self.shift_to_coordinate(map_pos, 0.0);
    }

    /// Advances viewport and marker tweens. Called once per host frame.
    pub fn tick(&mut self, dt: f64) {
        if let Some(loaded) = &mut self.loaded {
            loaded.viewport.tick(dt);
        }
        self.markers.tick(dt);
    }

    fn zoom_min(&self) -> f64 {
        self.loaded
            .as_ref()
            .map(|l| l.viewport.zoom_min())
            .unwrap_or(1.0)
    }
}
