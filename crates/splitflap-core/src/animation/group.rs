#![forbid(unsafe_code)]

//! Flip sequence: shared lifecycle for the leaves of one flip.
//!
//! A [`FlipSequence`] holds the [`LeafAnimation`]s built from a
//! [`FlipSchedule`] and drives them on one clock. The sequence itself
//! implements [`Animation`], reporting the average progress of its leaves,
//! and is complete only once every leaf is complete. That single edge is the
//! "flip finished" signal a host forwards to the engine.
//!
//! # Invariants
//!
//! 1. Each member is keyed by its [`Leaf`]; inserting an existing leaf
//!    replaces it.
//! 2. All members share the sequence clock: a tick advances every member that
//!    has not yet completed.
//! 3. `overall_progress()` returns the mean of all members' `value()`.
//! 4. An empty sequence has progress 0.0 and is immediately complete.
//! 5. `is_complete()` is true iff every member is complete.

use web_time::Duration;

use super::leaf::LeafAnimation;
use super::schedule::{FlipSchedule, Leaf};
use super::Animation;
use crate::buffer::SurfaceRef;

#[derive(Debug, Clone)]
struct SequenceMember {
    leaf: Leaf,
    surface: SurfaceRef,
    animation: LeafAnimation,
}

/// The running leaves of a single flip.
#[derive(Debug, Clone, Default)]
pub struct FlipSequence {
    members: Vec<SequenceMember>,
}

impl FlipSequence {
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Build a sequence executing every entry of `schedule`.
    #[must_use]
    pub fn from_schedule(schedule: &FlipSchedule) -> Self {
        let mut sequence = Self::new();
        for entry in schedule.entries() {
            sequence.insert(entry.leaf, entry.surface, LeafAnimation::from_schedule(entry));
        }
        sequence
    }

    /// Insert a leaf, replacing any existing member for the same leaf.
    pub fn insert(&mut self, leaf: Leaf, surface: SurfaceRef, animation: LeafAnimation) {
        if let Some(existing) = self.members.iter_mut().find(|m| m.leaf == leaf) {
            existing.surface = surface;
            existing.animation = animation;
        } else {
            self.members.push(SequenceMember {
                leaf,
                surface,
                animation,
            });
        }
    }

    /// Drop every member animating `surface`. Returns `true` if any matched.
    pub fn remove_surface(&mut self, surface: SurfaceRef) -> bool {
        let len_before = self.members.len();
        self.members.retain(|m| m.surface != surface);
        self.members.len() < len_before
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn all_complete(&self) -> bool {
        self.members.iter().all(|m| m.animation.is_complete())
    }

    /// Average progress across all leaves (0.0–1.0).
    #[must_use]
    pub fn overall_progress(&self) -> f32 {
        if self.members.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.members.iter().map(|m| m.animation.value()).sum();
        sum / self.members.len() as f32
    }

    #[must_use]
    pub fn get(&self, leaf: Leaf) -> Option<&LeafAnimation> {
        self.members
            .iter()
            .find(|m| m.leaf == leaf)
            .map(|m| &m.animation)
    }

    /// The animation currently driving `surface`, if any.
    #[must_use]
    pub fn on_surface(&self, surface: SurfaceRef) -> Option<&LeafAnimation> {
        self.members
            .iter()
            .find(|m| m.surface == surface)
            .map(|m| &m.animation)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Leaf, SurfaceRef, &LeafAnimation)> {
        self.members
            .iter()
            .map(|m| (m.leaf, m.surface, &m.animation))
    }
}

impl Animation for FlipSequence {
    fn tick(&mut self, dt: Duration) {
        for member in &mut self.members {
            if !member.animation.is_complete() {
                member.animation.tick(dt);
            }
        }
    }

    fn is_complete(&self) -> bool {
        self.all_complete()
    }

    fn value(&self) -> f32 {
        self.overall_progress()
    }

    fn reset(&mut self) {
        for member in &mut self.members {
            member.animation.reset();
        }
    }
}
