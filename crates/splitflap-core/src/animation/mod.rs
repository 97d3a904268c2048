#![forbid(unsafe_code)]

//! Flip animation primitives.
//!
//! The engine only decides *what* to animate: it hands the host a
//! [`FlipSchedule`] listing each leaf's start offset, duration, easing and
//! rotation. Hosts without their own animation system can execute that
//! schedule with a [`FlipSequence`], which reports a single completion once
//! every leaf has finished.

pub mod group;
pub mod leaf;
pub mod schedule;

pub use group::FlipSequence;
pub use leaf::LeafAnimation;
pub use schedule::{FlipSchedule, Leaf, ScheduledLeaf};

use web_time::Duration;

/// A time-driven animation.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current eased progress in `0.0..=1.0`.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}

/// Timing curve applied to linear progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    #[default]
    Linear,
    /// Slow start; used by the falling top leaf.
    EaseIn,
    /// Slow finish; used by the landing bottom leaf.
    EaseOut,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Rotation about the flap hinge, in degrees.
///
/// 0° is flat and facing the viewer; ±90° is edge-on and invisible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub from_degrees: f32,
    pub to_degrees: f32,
}

impl Rotation {
    #[must_use]
    pub const fn new(from_degrees: f32, to_degrees: f32) -> Self {
        Self {
            from_degrees,
            to_degrees,
        }
    }

    /// Angle at eased progress `value`.
    #[must_use]
    pub fn at(&self, value: f32) -> f32 {
        self.from_degrees + (self.to_degrees - self.from_degrees) * value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints_are_fixed() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn ease_in_lags_and_ease_out_leads() {
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
    }

    #[test]
    fn easing_clamps() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseOut.apply(3.0), 1.0);
    }

    #[test]
    fn rotation_interpolates() {
        let r = Rotation::new(0.0, -90.0);
        assert_eq!(r.at(0.0), 0.0);
        assert_eq!(r.at(0.5), -45.0);
        assert_eq!(r.at(1.0), -90.0);
    }
}
