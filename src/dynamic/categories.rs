//! The closed set of marker categories and their visibility table.
//!
//! Categories group markers for collective show/hide. A marker's category is
//! assigned once at creation time and never re-evaluated, even if the
//! underlying relationship (e.g. who killed whom) changes later.

use serde::{Deserialize, Serialize};

use crate::core::geo::Color;
use crate::prelude::HashMap;

/// Marker grouping tag. A closed enumeration rather than free-form strings,
/// so visibility lookups cannot fall through to the wrong flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerCategory {
    /// The local player's own position marker.
    Player,
    /// Static extraction-point markers from the map definition.
    Extraction,
    /// Static spawn-point markers from the map definition.
    Spawn,
    /// Corpse of an entity grouped with the local player.
    FriendlyCorpse,
    /// Corpse of an entity the local player killed.
    KilledCorpse,
    /// Corpse of a tracked boss the local player killed.
    KilledBossCorpse,
    /// Corpse of a tracked boss nobody in the group touched.
    BossCorpse,
    /// Any other corpse.
    OtherCorpse,
}

impl MarkerCategory {
    /// Display label, matching the host UI's toggle names.
    pub fn label(&self) -> &'static str {
        match self {
            MarkerCategory::Player => "Player",
            MarkerCategory::Extraction => "Extraction",
            MarkerCategory::Spawn => "Spawn",
            MarkerCategory::FriendlyCorpse => "Friendly Corpse",
            MarkerCategory::KilledCorpse => "Killed Corpse",
            MarkerCategory::KilledBossCorpse => "Killed Boss Corpse",
            MarkerCategory::BossCorpse => "Boss Corpse",
            MarkerCategory::OtherCorpse => "Other Corpse",
        }
    }

    /// Parses the display label back into a category. Used by the map
    /// definition loader for static marker entries.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Player" => Some(MarkerCategory::Player),
            "Extraction" => Some(MarkerCategory::Extraction),
            "Spawn" => Some(MarkerCategory::Spawn),
            "Friendly Corpse" => Some(MarkerCategory::FriendlyCorpse),
            "Killed Corpse" => Some(MarkerCategory::KilledCorpse),
            "Killed Boss Corpse" => Some(MarkerCategory::KilledBossCorpse),
            "Boss Corpse" => Some(MarkerCategory::BossCorpse),
            "Other Corpse" => Some(MarkerCategory::OtherCorpse),
            _ => None,
        }
    }

    /// Default glyph color per category.
    pub fn color(&self) -> Color {
        match self {
            MarkerCategory::Player => Color::CYAN,
            MarkerCategory::Extraction => Color::rgb(0.0, 0.8, 0.0),
            MarkerCategory::Spawn => Color::WHITE,
            MarkerCategory::FriendlyCorpse => Color::BLUE,
            MarkerCategory::KilledCorpse => Color::RED,
            MarkerCategory::KilledBossCorpse => Color::MAGENTA,
            MarkerCategory::BossCorpse => Color::MAGENTA,
            MarkerCategory::OtherCorpse => Color::WHITE,
        }
    }
}

impl std::fmt::Display for MarkerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Explicit category → visible-flag table.
///
/// Categories not present in the table are visible; toggles write through
/// `set_visible`.
#[derive(Debug, Clone)]
pub struct CategoryVisibility {
    flags: HashMap<MarkerCategory, bool>,
}

impl CategoryVisibility {
    pub fn new() -> Self {
        let mut flags = HashMap::default();
        // Boss and unaffiliated corpses start hidden; the rest start shown.
        flags.insert(MarkerCategory::BossCorpse, false);
        flags.insert(MarkerCategory::OtherCorpse, false);
        Self { flags }
    }

    pub fn is_visible(&self, category: MarkerCategory) -> bool {
        self.flags.get(&category).copied().unwrap_or(true)
    }

    /// Returns true when the flag actually changed.
    pub fn set_visible(&mut self, category: MarkerCategory, visible: bool) -> bool {
        if self.is_visible(category) == visible {
            return false;
        }
        self.flags.insert(category, visible);
        true
    }
}

impl Default for CategoryVisibility {
    fn default() -> Self {
        Self::new()
    }
}
