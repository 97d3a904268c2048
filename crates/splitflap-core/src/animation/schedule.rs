//! The two-leaf schedule of a single visual flip.
//!
//! A mechanical flap does not move both leaves at once: the upper leaf falls
//! first, then the lower leaf lands. For a rotation of duration `d`:
//!
//! | leaf   | start   | duration | easing  | rotation    |
//! |--------|---------|----------|---------|-------------|
//! | top    | 0       | 3/4 · d  | ease-in | 0° → -90°   |
//! | bottom | 3/4 · d | 1/4 · d  | ease-out| 90° → 0°    |
//!
//! The top leaf is the *front* (old token) surface of the top half; the
//! bottom leaf is the *back* (new token) surface of the bottom half.

use web_time::Duration;

use super::{Easing, Rotation};
use crate::buffer::SurfaceRef;

/// Which leaf of the flip an entry drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Leaf {
    Top,
    Bottom,
}

/// One timed leaf animation within a flip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledLeaf {
    pub leaf: Leaf,
    pub surface: SurfaceRef,
    pub start_offset: Duration,
    pub duration: Duration,
    pub easing: Easing,
    pub rotation: Rotation,
}

impl ScheduledLeaf {
    /// Offset at which this leaf finishes.
    #[inline]
    #[must_use]
    pub fn end(&self) -> Duration {
        self.start_offset.saturating_add(self.duration)
    }
}

/// Ordered leaf schedule for one flip step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipSchedule {
    entries: [ScheduledLeaf; 2],
}

impl FlipSchedule {
    /// Split `total` three-quarters / one-quarter between the leaves.
    ///
    /// Any `total` is accepted, including `Duration::MAX`; the leaves always
    /// sum to exactly `total`.
    #[must_use]
    pub fn for_rotation(total: Duration, top_front: SurfaceRef, bottom_back: SurfaceRef) -> Self {
        let bottom = total / 4;
        let top = total - bottom;
        Self {
            entries: [
                ScheduledLeaf {
                    leaf: Leaf::Top,
                    surface: top_front,
                    start_offset: Duration::ZERO,
                    duration: top,
                    easing: Easing::EaseIn,
                    rotation: Rotation::new(0.0, -90.0),
                },
                ScheduledLeaf {
                    leaf: Leaf::Bottom,
                    surface: bottom_back,
                    start_offset: top,
                    duration: bottom,
                    easing: Easing::EaseOut,
                    rotation: Rotation::new(90.0, 0.0),
                },
            ],
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[ScheduledLeaf] {
        &self.entries
    }

    #[must_use]
    pub fn top(&self) -> &ScheduledLeaf {
        &self.entries[0]
    }

    #[must_use]
    pub fn bottom(&self) -> &ScheduledLeaf {
        &self.entries[1]
    }

    /// Time from the start of the flip to the end of its last leaf.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.entries
            .iter()
            .map(ScheduledLeaf::end)
            .max()
            .unwrap_or(Duration::ZERO)
    }
}
