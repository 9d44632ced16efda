pub mod events;
pub mod scope;

pub use events::{EntityId, WorldEvent, WorldQuery};
pub use scope::EventScope;
