//! Corpse markers: a skull glyph wherever an entity died this session.
//!
//! Tracks entities that leave the world with a corpse behind and keeps one
//! marker per corpse, categorized once at death by the dead entity's
//! relationship to the local player. The registry stays authoritative;
//! this provider only decides which corpses deserve a marker right now.

use crate::core::geo::WorldPosition;
use crate::data::MarkerDef;
use crate::dynamic::categories::MarkerCategory;
use crate::dynamic::provider::DynamicMarkerProvider;
use crate::prelude::HashMap;
use crate::view::MapView;
use crate::world::{EntityId, WorldEvent, WorldQuery};

const CORPSE_MARKER_IMAGE: &str = "markers/skull.png";

/// One corpse we know about: where it fell and what it was.
#[derive(Debug, Clone)]
struct TrackedCorpse {
    key: String,
    category: MarkerCategory,
    position: WorldPosition,
    name: String,
}

#[derive(Debug, Default)]
pub struct CorpseMarkerProvider {
    corpses: HashMap<EntityId, TrackedCorpse>,
}

impl CorpseMarkerProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of corpses currently tracked (not necessarily shown).
    pub fn tracked(&self) -> usize {
        self.corpses.len()
    }

    /// Relationship to the local player, frozen at death. Precedence:
    /// allied beats everything, a boss the player killed beats a plain
    /// kill, and an untouched boss still gets its own category.
    fn categorize(world: &dyn WorldQuery, entity: EntityId) -> MarkerCategory {
        if world.is_allied(entity) {
            MarkerCategory::FriendlyCorpse
        } else if world.is_tracked_boss(entity) {
            if world.was_killed_by_local_player(entity) {
                MarkerCategory::KilledBossCorpse
            } else {
                MarkerCategory::BossCorpse
            }
        } else if world.was_killed_by_local_player(entity) {
            MarkerCategory::KilledCorpse
        } else {
            MarkerCategory::OtherCorpse
        }
    }

    /// Starts tracking an entity's corpse and shows its marker when the
    /// category is visible. Idempotent per entity.
    fn track(&mut self, view: &mut MapView, world: &dyn WorldQuery, entity: EntityId) {
        if !world.has_corpse(entity) {
            return;
        }
        let Some(position) = world.position(entity) else {
            log::debug!("corpse of {entity} has no position, skipping");
            return;
        };

        let corpse = self.corpses.entry(entity).or_insert_with(|| TrackedCorpse {
            key: format!("corpse/{}", entity.0),
            category: Self::categorize(world, entity),
            position,
            name: world.display_name(entity),
        });

        if view.is_category_visible(corpse.category) {
            view.add_marker(&corpse.key, &Self::marker_def(corpse));
        }
    }

    fn marker_def(corpse: &TrackedCorpse) -> MarkerDef {
        MarkerDef {
            category: corpse.category,
            image: CORPSE_MARKER_IMAGE.to_string(),
            text: corpse.name.clone(),
            color: corpse.category.color(),
            position: corpse.position,
            layer: None,
        }
    }
}

impl DynamicMarkerProvider for CorpseMarkerProvider {
    fn on_view_attached(&mut self, view: &mut MapView, world: &dyn WorldQuery) {
        self.rescan(view, world);
    }

    fn on_map_changed(&mut self, view: &mut MapView, world: &dyn WorldQuery) {
        // the view destroyed all markers on load; bring back the corpses
        // that still exist
        self.corpses.retain(|entity, _| world.has_corpse(*entity));
        let entities: Vec<EntityId> = self.corpses.keys().copied().collect();
        for entity in entities {
            self.track(view, world, entity);
        }
    }

    fn on_session_end(&mut self, view: &mut MapView) {
        for corpse in self.corpses.values() {
            view.remove_marker(&corpse.key);
        }
        self.corpses.clear();
    }

    fn on_world_event(&mut self, event: WorldEvent, view: &mut MapView, world: &dyn WorldQuery) {
        if let WorldEvent::EntityUnregistered(entity) = event {
            self.track(view, world, entity);
        }
    }

    fn rescan(&mut self, view: &mut MapView, world: &dyn WorldQuery) {
        if !world.session_active() {
            return;
        }
        // a re-enabled category restores only corpses that still exist;
        // track() checks has_corpse before doing anything
        for entity in world.entities() {
            self.track(view, world, entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Point;
    use crate::data::{LayerDef, MapDef};
    use crate::prelude::HashSet;

    #[derive(Default)]
    struct FakeWorld {
        active: bool,
        entities: Vec<EntityId>,
        allied: HashSet<EntityId>,
        bosses: HashSet<EntityId>,
        killed: HashSet<EntityId>,
        corpses: HashSet<EntityId>,
    }

    impl FakeWorld {
        fn with_corpse(mut self, entity: EntityId) -> Self {
            self.active = true;
            self.entities.push(entity);
            self.corpses.insert(entity);
            self
        }
    }

    impl WorldQuery for FakeWorld {
        fn session_active(&self) -> bool {
            self.active
        }
        fn entities(&self) -> Vec<EntityId> {
            self.entities.clone()
        }
        fn is_allied(&self, entity: EntityId) -> bool {
            self.allied.contains(&entity)
        }
        fn is_tracked_boss(&self, entity: EntityId) -> bool {
            self.bosses.contains(&entity)
        }
        fn was_killed_by_local_player(&self, entity: EntityId) -> bool {
            self.killed.contains(&entity)
        }
        fn has_corpse(&self, entity: EntityId) -> bool {
            self.corpses.contains(&entity)
        }
        fn position(&self, _entity: EntityId) -> Option<WorldPosition> {
            Some(WorldPosition::new(10.0, 0.0, 20.0))
        }
        fn display_name(&self, entity: EntityId) -> String {
            format!("{entity}")
        }
    }

    fn loaded_view() -> MapView {
        let mut view = MapView::new(Point::new(800.0, 600.0));
        view.load_map(MapDef {
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
        });
        view
    }

    #[test]
    fn test_categorize_precedence() {
        let id = EntityId(1);
        let mut world = FakeWorld::default().with_corpse(id);

        assert_eq!(
            CorpseMarkerProvider::categorize(&world, id),
            MarkerCategory::OtherCorpse
        );

        world.bosses.insert(id);
        assert_eq!(
            CorpseMarkerProvider::categorize(&world, id),
            MarkerCategory::BossCorpse
        );

        world.killed.insert(id);
        assert_eq!(
            CorpseMarkerProvider::categorize(&world, id),
            MarkerCategory::KilledBossCorpse
        );

        // allied wins over everything else
        world.allied.insert(id);
        assert_eq!(
            CorpseMarkerProvider::categorize(&world, id),
            MarkerCategory::FriendlyCorpse
        );
    }

    #[test]
    fn test_killed_without_boss() {
        let id = EntityId(2);
        let mut world = FakeWorld::default().with_corpse(id);
        world.killed.insert(id);
        assert_eq!(
            CorpseMarkerProvider::categorize(&world, id),
            MarkerCategory::KilledCorpse
        );
    }

    #[test]
    fn test_unregister_with_corpse_adds_marker() {
        let id = EntityId(7);
        let mut world = FakeWorld::default().with_corpse(id);
        world.killed.insert(id);

        let mut view = loaded_view();
        let mut provider = CorpseMarkerProvider::new();

        provider.on_world_event(WorldEvent::EntityUnregistered(id), &mut view, &world);
        assert!(view.markers().contains("corpse/7"));

        // delivering the event again does not duplicate
        provider.on_world_event(WorldEvent::EntityUnregistered(id), &mut view, &world);
        assert_eq!(view.markers().len(), 1);
    }

    #[test]
    fn test_unregister_without_corpse_is_ignored() {
        let id = EntityId(8);
        let mut world = FakeWorld::default();
        world.active = true;
        world.entities.push(id);

        let mut view = loaded_view();
        let mut provider = CorpseMarkerProvider::new();

        provider.on_world_event(WorldEvent::EntityUnregistered(id), &mut view, &world);
        assert!(view.markers().is_empty());
        assert_eq!(provider.tracked(), 0);
    }

    #[test]
    fn test_hidden_category_tracks_without_marker() {
        // OtherCorpse starts hidden by default
        let id = EntityId(3);
        let world = FakeWorld::default().with_corpse(id);

        let mut view = loaded_view();
        let mut provider = CorpseMarkerProvider::new();

        provider.on_world_event(WorldEvent::EntityUnregistered(id), &mut view, &world);
        assert!(view.markers().is_empty());
        assert_eq!(provider.tracked(), 1);

        // re-enabling the category plus a rescan surfaces the marker
        view.set_category_visible(MarkerCategory::OtherCorpse, true);
        provider.rescan(&mut view, &world);
        assert!(view.markers().contains("corpse/3"));
    }

    #[test]
    fn test_map_change_restores_existing_corpses() {
        let id = EntityId(4);
        let gone = EntityId(5);
        let mut world = FakeWorld::default().with_corpse(id);
        world.killed.insert(id);
        world.killed.insert(gone);
        world.entities.push(gone);
        world.corpses.insert(gone);

        let mut view = loaded_view();
        let mut provider = CorpseMarkerProvider::new();
        provider.rescan(&mut view, &world);
        assert_eq!(view.markers().len(), 2);

        // corpse 5 despawns before the map switches
        world.corpses.remove(&gone);
        view.load_map(MapDef {
            display_name: "Other".to_string(),
            bounds: vec![Point::new(-100.0, -100.0), Point::new(100.0, 100.0)],
            coordinate_rotation: 0.0,
            default_level: 0,
            layers: vec![LayerDef {
                name: "Ground".to_string(),
                level: 0,
                height_bounds: (-100.0, 100.0),
                image: "ground.png".to_string(),
            }],
            static_markers: vec![],
        });
        provider.on_map_changed(&mut view, &world);

        assert!(view.markers().contains("corpse/4"));
        assert!(!view.markers().contains("corpse/5"));
        assert_eq!(provider.tracked(), 1);
    }

    #[test]
    fn test_session_end_clears_everything() {
        let id = EntityId(6);
        let mut world = FakeWorld::default().with_corpse(id);
        world.killed.insert(id);

        let mut view = loaded_view();
        let mut provider = CorpseMarkerProvider::new();
        provider.rescan(&mut view, &world);
        assert!(view.markers().contains("corpse/6"));

        provider.on_session_end(&mut view);
        assert!(view.markers().is_empty());
        assert_eq!(provider.tracked(), 0);
    }
}
