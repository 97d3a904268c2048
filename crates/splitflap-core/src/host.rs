//! Capabilities the engine consumes from its surroundings.
//!
//! - [`FlapHost`] is the rendering layer: it paints tokens on surfaces,
//!   restacks them, and runs timed flips, reporting each completion back
//!   through [`FlapEngine::flip_finished`](crate::engine::FlapEngine::flip_finished).
//! - [`FlapSource`] is what a container consults when it builds a row of
//!   flaps: how many, which alphabet, which style, how fast.

use std::sync::Arc;

use web_time::Duration;

use crate::alphabet::Alphabet;
use crate::animation::FlipSchedule;
use crate::buffer::SurfaceRef;
use crate::engine::FlipTicket;
use crate::style::FlapStyle;
use crate::token::Token;

/// Rendering backend for a single flap.
///
/// All calls arrive on the thread that drives the engine; the engine never
/// calls back into the host re-entrantly.
pub trait FlapHost {
    /// Configure a surface's appearance. Called once per surface when the
    /// engine is created.
    fn apply_style(&mut self, surface: SurfaceRef, style: &FlapStyle);

    /// Set the token drawn on `surface`.
    fn paint(&mut self, surface: SurfaceRef, token: &Token);

    /// Remove any running or held animation from `surface`, returning it to
    /// its resting transform.
    fn clear_animations(&mut self, surface: SurfaceRef);

    /// Draw `surface` above the other surfaces of the flap.
    fn raise(&mut self, surface: SurfaceRef);

    /// Start the flip described by `schedule`. When its last leaf finishes
    /// the host must call `FlapEngine::flip_finished` with `ticket`.
    fn schedule(&mut self, ticket: FlipTicket, schedule: &FlipSchedule);
}

/// Default rotation duration for a flap.
pub const DEFAULT_ROTATION: Duration = Duration::from_millis(200);

/// Per-flap configuration supplied to a container of flaps.
pub trait FlapSource {
    /// Number of flaps to lay out.
    fn flap_count(&self) -> usize;

    /// Alphabet for the flap at `index`.
    fn alphabet_for(&self, index: usize) -> Arc<Alphabet>;

    /// Style for the flap at `index`.
    fn style_for(&self, _index: usize) -> FlapStyle {
        FlapStyle::default()
    }

    /// Rotation duration for the flap at `index`. Zero disables animation.
    fn duration_for(&self, _index: usize) -> Duration {
        DEFAULT_ROTATION
    }
}
