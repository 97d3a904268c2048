//! Deterministic in-memory host.
//!
//! [`LabHost`] implements [`FlapHost`] without a display: it tracks each
//! surface's token, hinge angle and stacking order, runs scheduled flips as
//! [`FlipSequence`]s on a virtual clock, and records every host call. Tests
//! and terminal front-ends drive it with [`LabHost::advance`] and forward the
//! returned ticket to [`FlapEngine::flip_finished`].
//!
//! Leaf semantics follow a perspective flip:
//! - a leaf waiting on its start offset holds its starting angle;
//! - the top leaf holds its final angle after it lands, until cleared;
//! - a surface rotated edge-on (±90°) is invisible.

use web_time::Duration;

use crate::animation::{Animation, FlipSchedule, FlipSequence, Leaf};
use crate::buffer::{Half, Phase, SurfaceRef};
use crate::engine::{FlapEngine, FlipTicket};
use crate::host::FlapHost;
use crate::style::FlapStyle;
use crate::token::Token;

const EDGE_ON_DEGREES: f32 = 89.99;

/// One recorded host call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Styled(SurfaceRef),
    Painted(SurfaceRef, Token),
    Cleared(SurfaceRef),
    Raised(SurfaceRef),
    Scheduled(FlipTicket, Duration),
}

#[derive(Debug, Clone, Default)]
struct SurfaceState {
    token: Option<Token>,
    style: Option<FlapStyle>,
    held_angle: f32,
}

/// In-memory flap host on a virtual clock.
#[derive(Debug, Clone)]
pub struct LabHost {
    surfaces: [SurfaceState; 4],
    stack: Vec<SurfaceRef>,
    in_flight: Option<(FlipTicket, FlipSequence)>,
    scheduled: Vec<(FlipTicket, Duration)>,
    events: Vec<HostEvent>,
    now: Duration,
}

impl Default for LabHost {
    fn default() -> Self {
        Self::new()
    }
}

fn slot(surface: SurfaceRef) -> usize {
    match (surface.half, surface.phase) {
        (Half::Top, Phase::Tic) => 0,
        (Half::Bottom, Phase::Tic) => 1,
        (Half::Top, Phase::Tac) => 2,
        (Half::Bottom, Phase::Tac) => 3,
    }
}

impl LabHost {
    #[must_use]
    pub fn new() -> Self {
        Self {
            surfaces: Default::default(),
            stack: SurfaceRef::ALL.to_vec(),
            in_flight: None,
            scheduled: Vec::new(),
            events: Vec::new(),
            now: Duration::ZERO,
        }
    }

    /// Virtual time elapsed since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    /// Every flip ever scheduled, with its total duration.
    #[must_use]
    pub fn scheduled(&self) -> &[(FlipTicket, Duration)] {
        &self.scheduled
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    #[must_use]
    pub fn in_flight(&self) -> Option<FlipTicket> {
        self.in_flight.as_ref().map(|(ticket, _)| *ticket)
    }

    /// Progress of the running flip (0.0–1.0), if any.
    #[must_use]
    pub fn progress(&self) -> Option<f32> {
        self.in_flight.as_ref().map(|(_, seq)| seq.value())
    }

    #[must_use]
    pub fn token(&self, surface: SurfaceRef) -> Option<&Token> {
        self.surfaces[slot(surface)].token.as_ref()
    }

    #[must_use]
    pub fn style(&self, surface: SurfaceRef) -> Option<&FlapStyle> {
        self.surfaces[slot(surface)].style.as_ref()
    }

    /// Current hinge angle of `surface` in degrees.
    #[must_use]
    pub fn angle(&self, surface: SurfaceRef) -> f32 {
        self.in_flight
            .as_ref()
            .and_then(|(_, seq)| seq.on_surface(surface))
            .map_or(self.surfaces[slot(surface)].held_angle, |leaf| leaf.angle())
    }

    /// Surfaces from bottom-most to top-most.
    #[must_use]
    pub fn stacking(&self) -> &[SurfaceRef] {
        &self.stack
    }

    /// Token an observer sees on `half`: the top-most surface of that half
    /// that is not edge-on.
    #[must_use]
    pub fn visible(&self, half: Half) -> Option<&Token> {
        self.stack
            .iter()
            .rev()
            .filter(|s| s.half == half)
            .find(|s| self.angle(**s).abs() < EDGE_ON_DEGREES)
            .and_then(|s| self.token(*s))
    }

    /// Advance virtual time. Returns the ticket of a flip that completed.
    pub fn advance(&mut self, dt: Duration) -> Option<FlipTicket> {
        self.now = self.now.saturating_add(dt);
        let (_, sequence) = self.in_flight.as_mut()?;
        sequence.tick(dt);
        if sequence.is_complete() {
            self.land()
        } else {
            None
        }
    }

    /// Complete the running flip immediately.
    pub fn finish_now(&mut self) -> Option<FlipTicket> {
        let (_, sequence) = self.in_flight.as_mut()?;
        sequence.tick(Duration::MAX);
        self.land()
    }

    /// Step `engine` on this host in `frame` increments until it is idle.
    ///
    /// Returns the number of frames used, or `None` if `max_frames` passed
    /// without settling (a stalled or never-ending chain).
    pub fn run_until_idle(
        &mut self,
        engine: &mut FlapEngine,
        frame: Duration,
        max_frames: usize,
    ) -> Option<usize> {
        for frames in 0..max_frames {
            if !engine.is_animating() {
                return Some(frames);
            }
            if let Some(ticket) = self.advance(frame) {
                engine.flip_finished(self, ticket);
            }
        }
        (!engine.is_animating()).then_some(max_frames)
    }

    fn land(&mut self) -> Option<FlipTicket> {
        let (ticket, sequence) = self.in_flight.take()?;
        for (leaf, surface, animation) in sequence.iter() {
            // The bottom leaf is removed on completion and rests flat; the
            // top leaf stays down until the next step clears it.
            self.surfaces[slot(surface)].held_angle = match leaf {
                Leaf::Top => animation.angle(),
                Leaf::Bottom => 0.0,
            };
        }
        Some(ticket)
    }
}

impl FlapHost for LabHost {
    fn apply_style(&mut self, surface: SurfaceRef, style: &FlapStyle) {
        self.surfaces[slot(surface)].style = Some(style.clone());
        self.events.push(HostEvent::Styled(surface));
    }

    fn paint(&mut self, surface: SurfaceRef, token: &Token) {
        self.surfaces[slot(surface)].token = Some(token.clone());
        self.events.push(HostEvent::Painted(surface, token.clone()));
    }

    fn clear_animations(&mut self, surface: SurfaceRef) {
        self.surfaces[slot(surface)].held_angle = 0.0;
        if let Some((_, sequence)) = self.in_flight.as_mut() {
            sequence.remove_surface(surface);
            if sequence.is_empty() {
                self.in_flight = None;
            }
        }
        self.events.push(HostEvent::Cleared(surface));
    }

    fn raise(&mut self, surface: SurfaceRef) {
        self.stack.retain(|s| *s != surface);
        self.stack.push(surface);
        self.events.push(HostEvent::Raised(surface));
    }

    fn schedule(&mut self, ticket: FlipTicket, schedule: &FlipSchedule) {
        self.in_flight = Some((ticket, FlipSequence::from_schedule(schedule)));
        self.scheduled.push((ticket, schedule.total()));
        self.events.push(HostEvent::Scheduled(ticket, schedule.total()));
    }
}
