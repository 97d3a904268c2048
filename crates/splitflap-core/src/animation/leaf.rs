//! A single delayed leaf rotation.

use web_time::Duration;

use super::schedule::ScheduledLeaf;
use super::{Animation, Easing, Rotation};

/// Executes one [`ScheduledLeaf`]: waits out its start offset, then eases
/// from 0.0 to 1.0 over its duration.
///
/// Before the start offset the leaf holds its starting angle; after the end
/// it holds its final angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafAnimation {
    delay: Duration,
    duration: Duration,
    easing: Easing,
    rotation: Rotation,
    elapsed: Duration,
}

impl LeafAnimation {
    #[must_use]
    pub fn new(delay: Duration, duration: Duration, easing: Easing, rotation: Rotation) -> Self {
        Self {
            delay,
            duration,
            easing,
            rotation,
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn from_schedule(entry: &ScheduledLeaf) -> Self {
        Self::new(entry.start_offset, entry.duration, entry.easing, entry.rotation)
    }

    /// Whether the start offset has passed.
    #[inline]
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.elapsed >= self.delay
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Current hinge angle in degrees.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.rotation.at(self.value())
    }

    fn linear_progress(&self) -> f32 {
        if !self.has_started() {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let run = self.elapsed - self.delay;
        (run.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

impl Animation for LeafAnimation {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.delay.saturating_add(self.duration)
    }

    fn value(&self) -> f32 {
        if self.is_complete() {
            return 1.0;
        }
        self.easing.apply(self.linear_progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
