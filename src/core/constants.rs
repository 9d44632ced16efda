//! Engine-wide magic numbers in one place, tuned against the host game's
//! map screen.

/// Per-level opacity multiplier applied to layers below the selected level.
pub const FADE_PER_LEVEL: f32 = 0.5;

/// Converts a scroll-wheel delta into a zoom delta proportional to the
/// current zoom, so zooming feels multiplicative rather than additive.
pub const ZOOM_SCALER: f64 = 1.75;

/// Duration of the zoom tween for scroll zooming, in seconds.
pub const ZOOM_TWEEN_SECS: f64 = 0.25;

/// Duration of the pan tween when recentering, in seconds.
pub const POSITION_TWEEN_SECS: f64 = 0.25;

/// `zoom_max` is this multiple of the computed `zoom_min`.
pub const ZOOM_MAX_SCALER: f64 = 10.0;

/// Marker glyph size in screen pixels. Glyphs are inverse-scaled against
/// zoom so this stays their on-screen size.
pub const MARKER_SIZE: (f64, f64) = (16.0, 16.0);

/// Exponential decay rate for drag-release momentum, per second.
pub const MOMENTUM_DECAY: f64 = 6.0;

/// Momentum below this speed (pixels/second) is dropped.
pub const MOMENTUM_MIN_SPEED: f64 = 1.0;

/// Reserved registry key for the local player's marker.
pub const PLAYER_MARKER_KEY: &str = "player";
