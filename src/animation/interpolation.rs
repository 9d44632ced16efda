use crate::core::geo::Point;

/// Easing functions for tweened transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingFunction {
    Linear,
    #[default]
    EaseOutQuad,
    EaseInOutQuad,
    EaseOutCubic,
}

impl EasingFunction {
    /// Applies the easing curve to a progress value in [0, 1].
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseOutQuad => t * (2.0 - t),
            EasingFunction::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            EasingFunction::EaseOutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
        }
    }
}

/// Values that can be linearly interpolated by the tween engine.
pub trait Lerp: Copy {
    fn lerp(start: Self, end: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(start: Self, end: Self, t: f64) -> Self {
        start + (end - start) * t
    }
}

impl Lerp for f32 {
    fn lerp(start: Self, end: Self, t: f64) -> Self {
        start + (end - start) * t as f32
    }
}

impl Lerp for Point {
    fn lerp(start: Self, end: Self, t: f64) -> Self {
        Point::new(
            f64::lerp(start.x, end.x, t),
            f64::lerp(start.y, end.y, t),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            EasingFunction::Linear,
            EasingFunction::EaseOutQuad,
            EasingFunction::EaseInOutQuad,
            EasingFunction::EaseOutCubic,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_easing_clamps_progress() {
        assert_eq!(EasingFunction::Linear.apply(-0.5), 0.0);
        assert_eq!(EasingFunction::Linear.apply(1.5), 1.0);
    }

    #[test]
    fn test_lerp_point() {
        let mid = Point::lerp(Point::new(0.0, 10.0), Point::new(10.0, 20.0), 0.5);
        assert_eq!(mid, Point::new(5.0, 15.0));
    }
}
