pub mod interpolation;
pub mod tweening;

pub use interpolation::{EasingFunction, Lerp};
pub use tweening::{Animated, Tween};
