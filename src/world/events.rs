//! The host game's entity/event model, consumed behind a capability trait.

use serde::{Deserialize, Serialize};

use crate::core::geo::WorldPosition;

/// Stable handle to a world entity for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Discrete world events delivered by the host while a subscription scope
/// is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldEvent {
    EntityRegistered(EntityId),
    EntityUnregistered(EntityId),
}

/// Capabilities the host exposes for querying world state.
///
/// `has_corpse` is an explicit capability here; probing the host's private
/// state for it is not portable.
pub trait WorldQuery {
    /// Whether a live session (raid) is in progress.
    fn session_active(&self) -> bool;

    /// Every entity that has existed this session, for start-in-progress
    /// scans.
    fn entities(&self) -> Vec<EntityId>;

    fn is_allied(&self, entity: EntityId) -> bool;

    /// Whether the entity is a tracked special entity (boss).
    fn is_tracked_boss(&self, entity: EntityId) -> bool;

    fn was_killed_by_local_player(&self, entity: EntityId) -> bool;

    fn has_corpse(&self, entity: EntityId) -> bool;

    fn position(&self, entity: EntityId) -> Option<WorldPosition>;

    fn display_name(&self, entity: EntityId) -> String;
}
