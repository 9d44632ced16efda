//! Provider interface for markers that track live world state.
//!
//! Providers own the "which entities deserve a marker" policy; the view
//! owns the markers themselves. The screen drives providers through the
//! lifecycle hooks below, always handing them the view and a world query
//! so they never hold references across frames.

use crate::view::MapView;
use crate::world::{WorldEvent, WorldQuery};

pub trait DynamicMarkerProvider {
    /// The view became visible with a subscription scope open. Providers
    /// scan here so entities that changed while the screen was hidden are
    /// picked up (rescan-on-attach).
    fn on_view_attached(&mut self, view: &mut MapView, world: &dyn WorldQuery);

    /// The view is hiding; its subscription scope is about to close.
    fn on_view_detached(&mut self, _view: &mut MapView) {}

    /// A different map was loaded. The view has already destroyed all
    /// markers, so providers re-create the ones still warranted.
    fn on_map_changed(&mut self, view: &mut MapView, world: &dyn WorldQuery);

    /// The session ended. Providers drop all session-scoped state.
    fn on_session_end(&mut self, view: &mut MapView);

    /// A world event arrived through the live subscription scope.
    fn on_world_event(&mut self, event: WorldEvent, view: &mut MapView, world: &dyn WorldQuery);

    /// Re-evaluates every known entity against current visibility flags,
    /// adding markers that became warranted. Triggered when a category is
    /// re-enabled.
    fn rescan(&mut self, view: &mut MapView, world: &dyn WorldQuery);
}
