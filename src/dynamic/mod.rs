pub mod categories;
pub mod corpse;
pub mod provider;
