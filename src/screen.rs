//! The map screen: the view, its dynamic marker providers, and the
//! world-event subscription, wired through a single facade the host embeds.
//!
//! Event flow is gated on visibility. Showing the screen opens the
//! subscription scope and lets providers rescan; hiding closes the scope
//! so no callback ever touches a torn-down view.

use crate::core::geo::{Point, WorldPosition};
use crate::data::MapDef;
use crate::dynamic::categories::MarkerCategory;
use crate::dynamic::corpse::CorpseMarkerProvider;
use crate::dynamic::provider::DynamicMarkerProvider;
use crate::input::{InputEvent, KeyCode};
use crate::render::{build_scene, SceneNode};
use crate::view::MapView;
use crate::world::{EventScope, WorldEvent, WorldQuery};

pub struct MapScreen {
    view: MapView,
    providers: Vec<Box<dyn DynamicMarkerProvider>>,
    scope: Option<EventScope>,
}

impl MapScreen {
    /// An empty screen with no providers registered.
    pub fn new(mask_size: Point) -> Self {
        Self {
            view: MapView::new(mask_size),
            providers: Vec::new(),
            scope: None,
        }
    }

    /// The standard screen: corpse markers enabled.
    pub fn with_default_providers(mask_size: Point) -> Self {
        let mut screen = Self::new(mask_size);
        screen.add_provider(Box::new(CorpseMarkerProvider::new()));
        screen
    }

    pub fn add_provider(&mut self, provider: Box<dyn DynamicMarkerProvider>) {
        self.providers.push(provider);
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut MapView {
        &mut self.view
    }

    /// Whether world events are currently being delivered.
    pub fn is_visible(&self) -> bool {
        self.scope.as_ref().map(|s| s.is_active()).unwrap_or(false)
    }

    /// Makes the screen visible: opens the world-event subscription and
    /// lets every provider catch up on entities that changed while hidden.
    pub fn show(&mut self, world: &dyn WorldQuery) {
        if self.is_visible() {
            return;
        }
        self.scope = Some(EventScope::subscribe("world-events"));
        for provider in &mut self.providers {
            provider.on_view_attached(&mut self.view, world);
        }
    }

    /// Hides the screen. The subscription scope closes here, so the
    /// unsubscribe is symmetric with `show` even on early returns.
    pub fn hide(&mut self) {
        if self.scope.take().is_none() {
            return;
        }
        for provider in &mut self.providers {
            provider.on_view_detached(&mut self.view);
        }
    }

    /// Loads a map into the view and lets providers re-create their
    /// markers on it.
    pub fn load_map(&mut self, def: MapDef, world: &dyn WorldQuery) {
        self.view.load_map(def);
        for provider in &mut self.providers {
            provider.on_map_changed(&mut self.view, world);
        }
    }

    /// Delivers a world event. Dropped unless the subscription scope is
    /// open.
    pub fn handle_world_event(&mut self, event: WorldEvent, world: &dyn WorldQuery) {
        if !self.is_visible() {
            return;
        }
        for provider in &mut self.providers {
            provider.on_world_event(event, &mut self.view, world);
        }
    }

    /// Routes pointer and key input into viewport operations.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Scroll { delta, position } => {
                self.view.on_scroll(delta, position);
            }
            InputEvent::DragStart { .. } => self.view.begin_drag(),
            InputEvent::Drag { delta } => self.view.drag(delta),
            InputEvent::DragEnd { velocity } => self.view.end_drag(velocity),
            InputEvent::KeyPress { key } => {
                if key == KeyCode::CenterOnPlayer {
                    self.view.center_on_player();
                }
            }
        }
    }

    /// Flips a category's visibility. Hiding removes the category's
    /// markers right away; showing asks providers to re-add whatever is
    /// still warranted.
    pub fn set_category_visible(
        &mut self,
        category: MarkerCategory,
        visible: bool,
        world: &dyn WorldQuery,
    ) {
        if !self.view.set_category_visible(category, visible) {
            return;
        }
        if visible {
            for provider in &mut self.providers {
                provider.rescan(&mut self.view, world);
            }
        }
    }

    /// Per-frame player sync while a session runs.
    pub fn show_in_raid(&mut self, position: WorldPosition, yaw_degrees: f64) {
        self.view.show_in_raid(position, yaw_degrees);
    }

    /// The session ended: the subscription closes like on `hide`,
    /// providers drop their session state, and the player marker goes
    /// away.
    pub fn on_session_end(&mut self) {
        self.hide();
        for provider in &mut self.providers {
            provider.on_session_end(&mut self.view);
        }
        self.view
            .remove_marker(crate::core::constants::PLAYER_MARKER_KEY);
    }

    pub fn tick(&mut self, dt: f64) {
        self.view.tick(dt);
    }

    pub fn scene(&self) -> Vec<SceneNode> {
        build_scene(&self.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LayerDef;
    use crate::world::EntityId;

    struct IdleWorld;

    impl WorldQuery for IdleWorld {
        fn session_active(&self) -> bool {
            false
        }
        fn entities(&self) -> Vec<EntityId> {
            Vec::new()
        }
        fn is_allied(&self, _: EntityId) -> bool {
            false
        }
        fn is_tracked_boss(&self, _: EntityId) -> bool {
            false
        }
        fn was_killed_by_local_player(&self, _: EntityId) -> bool {
            false
        }
        fn has_corpse(&self, _: EntityId) -> bool {
            false
        }
        fn position(&self, _: EntityId) -> Option<WorldPosition> {
            None
        }
        fn display_name(&self, _: EntityId) -> String {
            String::new()
        }
    }

    fn test_def() -> MapDef {
        MapDef {
            display_name: "Test".to_string(),
            bounds: vec![Point::new(-400.0, -300.0), Point::new(400.0, 300.0)],
            coordinate_rotation: 0.0,
            default_level: 0,
            layers: vec![LayerDef {
                name: "Ground".to_string(),
                level: 0,
                height_bounds: (-100.0, 100.0),
                image: "ground.png".to_string(),
            }],
            static_markers: vec![],
        }
    }

    #[test]
    fn test_show_hide_symmetry() {
        let mut screen = MapScreen::with_default_providers(Point::new(800.0, 600.0));
        assert!(!screen.is_visible());

        screen.show(&IdleWorld);
        assert!(screen.is_visible());
        // a second show is a no-op, not a double subscribe
        screen.show(&IdleWorld);

        screen.hide();
        assert!(!screen.is_visible());
        screen.hide();
    }

    #[test]
    fn test_events_dropped_while_hidden() {
        let mut screen = MapScreen::with_default_providers(Point::new(800.0, 600.0));
        screen.load_map(test_def(), &IdleWorld);

        screen.handle_world_event(WorldEvent::EntityUnregistered(EntityId(1)), &IdleWorld);
        assert!(screen.view().markers().is_empty());
    }

    #[test]
    fn test_input_routing_scroll_and_recenter() {
        let mut screen = MapScreen::new(Point::new(800.0, 600.0));
        screen.load_map(test_def(), &IdleWorld);
        screen.show_in_raid(WorldPosition::new(100.0, 0.0, 50.0), 0.0);

        // pan away, then recenter on the player via key press
        screen.handle_input(InputEvent::Drag {
            delta: Point::new(40.0, -25.0),
        });
        screen.handle_input(InputEvent::KeyPress {
            key: KeyCode::CenterOnPlayer,
        });
        screen.tick(10.0);

        let viewport = screen.view().viewport().unwrap();
        let player_screen = viewport.map_to_screen(Point::new(100.0, 50.0));
        assert!(player_screen.approx_eq(&Point::ZERO, 1e-6));
    }

    #[test]
    fn test_session_end_closes_subscription() {
        let mut screen = MapScreen::with_default_providers(Point::new(800.0, 600.0));
        screen.load_map(test_def(), &IdleWorld);
        screen.show(&IdleWorld);
        assert!(screen.is_visible());

        screen.on_session_end();
        assert!(!screen.is_visible());
    }

    #[test]
    fn test_session_end_removes_player_marker() {
        let mut screen = MapScreen::with_default_providers(Point::new(800.0, 600.0));
        screen.load_map(test_def(), &IdleWorld);
        screen.show_in_raid(WorldPosition::new(0.0, 0.0, 0.0), 0.0);
        assert!(screen.view().markers().len() == 1);

        screen.on_session_end();
        assert!(screen.view().markers().is_empty());
    }
}
