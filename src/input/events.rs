use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Input events the map screen consumes. Positions are screen pixels
/// relative to the mask center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Scroll wheel or pinch zoom at a pointer position.
    Scroll { delta: f64, position: Point },
    /// Start of a drag operation.
    DragStart { position: Point },
    /// Drag in progress.
    Drag { delta: Point },
    /// End of a drag, with release velocity in pixels/second.
    DragEnd { velocity: Point },
    /// Discrete key press; drives debug/utility actions only.
    KeyPress { key: KeyCode },
}

/// Keys the map screen reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// Recenter the view on the player marker.
    CenterOnPlayer,
    Other(u32),
}

