//! Cancellable, time-bounded interpolations driven by the host's per-frame
//! tick. Starting a new tween on the same target always supersedes any
//! in-flight one (last-writer-wins, no queueing).

use crate::animation::interpolation::{EasingFunction, Lerp};

/// A single in-flight interpolation between two values.
#[derive(Debug, Clone)]
pub struct Tween<T: Lerp> {
    start: T,
    end: T,
    duration: f64,
    elapsed: f64,
    easing: EasingFunction,
}

impl<T: Lerp> Tween<T> {
    pub fn new(start: T, end: T, duration: f64, easing: EasingFunction) -> Self {
        Self {
            start,
            end,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Advances by `dt` seconds and returns the interpolated value.
    pub fn tick(&mut self, dt: f64) -> T {
        self.elapsed += dt;
        T::lerp(self.start, self.end, self.easing.apply(self.progress()))
    }

    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn target(&self) -> T {
        self.end
    }
}

/// A value with an optional in-flight tween toward a target.
///
/// `value()` is the displayed (interpolated) value; `target()` is where the
/// value will settle. Setting with duration 0 applies immediately.
#[derive(Debug, Clone)]
pub struct Animated<T: Lerp> {
    current: T,
    tween: Option<Tween<T>>,
}

impl<T: Lerp> Animated<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: value,
            tween: None,
        }
    }

    /// Starts a tween from the current displayed value to `target`,
    /// cancelling any in-flight tween. Duration 0 snaps immediately.
    pub fn animate_to(&mut self, target: T, duration: f64, easing: EasingFunction) {
        if duration <= 0.0 {
            self.current = target;
            self.tween = None;
            return;
        }
        self.tween = Some(Tween::new(self.current, target, duration, easing));
    }

    /// Snaps to `value`, cancelling any in-flight tween.
    pub fn set(&mut self, value: T) {
        self.current = value;
        self.tween = None;
    }

    /// Advances the in-flight tween, if any, by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        if let Some(tween) = &mut self.tween {
            self.current = tween.tick(dt);
            if tween.is_finished() {
                self.tween = None;
            }
        }
    }

    /// The displayed (interpolated) value.
    pub fn value(&self) -> T {
        self.current
    }

    /// Where the value will settle: the tween target, or the current value
    /// when nothing is in flight.
    pub fn target(&self) -> T {
        self.tween.as_ref().map(|t| t.target()).unwrap_or(self.current)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }
}
