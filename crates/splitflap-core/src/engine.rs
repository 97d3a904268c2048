#![forbid(unsafe_code)]

//! Flap rotation engine.
//!
//! [`FlapEngine`] rolls a flap through its alphabet one token at a time until
//! the requested token is shown. Each step is a double-buffered flip: the
//! next token is painted on the hidden surfaces, the host animates the top
//! leaf then the bottom leaf, and the host's completion report drives the
//! next step.
//!
//! # States
//!
//! - `Idle`: nothing pending; the displayed token is stable.
//! - `Animating`: one flip is in flight, identified by a [`FlipTicket`].
//! - `Chaining`: a flip just landed; the engine is deciding whether to settle
//!   or start the next step. Transient within [`FlapEngine::flip_finished`].
//!
//! # Invariants
//!
//! 1. At most one flip is in flight; step N+1 is painted only after step N's
//!    completion is reported.
//! 2. A request is pending iff a flip is in flight.
//! 3. Every completion handed to [`FlapEngine::display_token`] is invoked
//!    exactly once: when superseded, when its target is shown, or when a halt
//!    lands.
//! 4. The phase toggles exactly once per landed or immediate flip.
//! 5. Completions run after the engine has finished mutating its state.
//!
//! # Failure Modes
//!
//! - Unknown target token: treated as a halt (settle at the current token).
//! - Completion report with a stale ticket: ignored, [`StepOutcome::Ignored`].
//! - A host that never reports completion leaves the engine `Animating`
//!   indefinitely. There is no internal timeout.
//! - Dropping an engine with a request pending invokes that request's
//!   completion; the displayed token is whatever last landed.

use std::sync::Arc;

use web_time::Duration;

use crate::alphabet::Alphabet;
use crate::animation::FlipSchedule;
use crate::buffer::{BufferPair, Half, Phase, Slot, SurfaceRef};
use crate::error::{FlapError, Result};
use crate::generator::TokenGenerator;
use crate::host::FlapHost;
use crate::request::{Completion, PendingRequest, RequestSlot};
use crate::style::FlapStyle;
use crate::token::Token;

#[cfg(feature = "tracing")]
use crate::logging::{debug, trace, warn};
#[cfg(not(feature = "tracing"))]
use crate::{debug, trace, warn};

/// Identifies one scheduled visual flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlipTicket(u64);

impl FlipTicket {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Observable engine state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FlapState {
    #[default]
    Idle,
    Animating,
    Chaining,
}

/// Result of reporting a flip completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The ticket was not the in-flight flip.
    Ignored,
    /// The token landed and another step was started.
    Advanced(Token),
    /// The landed token is the requested target.
    Settled(Token),
    /// A halt request stopped the chain at the landed token.
    Halted(Token),
}

#[derive(Debug)]
struct InFlight {
    ticket: FlipTicket,
    token: Token,
    rotation: Duration,
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn log_unknown(token: &Token) {
    warn!(message = "flap.unknown_token", token = %token);
}

/// Convert caller-supplied seconds into a rotation duration.
///
/// Zero disables animation. Negative, NaN and infinite values are rejected.
pub fn rotation_duration(seconds: f64) -> Result<Duration> {
    if seconds == 0.0 {
        return Ok(Duration::ZERO);
    }
    Duration::try_from_secs_f64(seconds).map_err(|_| FlapError::InvalidDuration { seconds })
}

/// The rotation state machine of one flap.
#[derive(Debug)]
pub struct FlapEngine {
    generator: TokenGenerator,
    top: BufferPair,
    bottom: BufferPair,
    phase: Phase,
    state: FlapState,
    request: RequestSlot,
    in_flight: Option<InFlight>,
    next_ticket: u64,
    steps_taken: u64,
}

impl FlapEngine {
    /// Create an engine showing `alphabet.first()`, unanimated.
    ///
    /// `style` is passed straight to the host for each surface.
    pub fn new<H: FlapHost + ?Sized>(
        alphabet: Arc<Alphabet>,
        style: &FlapStyle,
        host: &mut H,
    ) -> Self {
        for surface in SurfaceRef::ALL {
            host.apply_style(surface, style);
        }
        let first = alphabet.first().clone();
        let mut engine = Self {
            generator: TokenGenerator::new(alphabet),
            top: BufferPair::new(Half::Top, Phase::Tic),
            bottom: BufferPair::new(Half::Bottom, Phase::Tic),
            phase: Phase::Tic,
            state: FlapState::Idle,
            request: RequestSlot::new(),
            in_flight: None,
            next_ticket: 0,
            steps_taken: 0,
        };
        engine.show_immediately(host, first);
        engine
    }

    /// The alphabet this flap rolls through.
    #[must_use]
    pub fn tokens(&self) -> &Alphabet {
        self.generator.alphabet()
    }

    /// The token fully shown by the last landed or immediate flip.
    #[must_use]
    pub fn displayed(&self) -> &Token {
        self.generator.current()
    }

    #[must_use]
    pub fn state(&self) -> FlapState {
        self.state
    }

    /// Buffer identity currently visible.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Target of the pending request; `None` when idle or halting.
    #[must_use]
    pub fn target(&self) -> Option<&Token> {
        self.request.pending().and_then(PendingRequest::target)
    }

    /// Ticket of the flip in flight.
    #[must_use]
    pub fn in_flight(&self) -> Option<FlipTicket> {
        self.in_flight.as_ref().map(|f| f.ticket)
    }

    /// Token being flipped in, if any.
    #[must_use]
    pub fn incoming(&self) -> Option<&Token> {
        self.in_flight.as_ref().map(|f| &f.token)
    }

    /// Number of animated flips that have landed.
    #[must_use]
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    #[must_use]
    pub fn buffers(&self, half: Half) -> &BufferPair {
        match half {
            Half::Top => &self.top,
            Half::Bottom => &self.bottom,
        }
    }

    /// Request that `target` be displayed.
    ///
    /// - `rotation` zero: paint `target` at once and invoke `on_complete`
    ///   before returning. A `None` target resets to the alphabet's first
    ///   token; an unknown target leaves the current token. A flip in flight
    ///   is abandoned and the request it was serving is completed first.
    /// - `rotation` positive while idle: start rolling toward `target`.
    /// - `rotation` positive while animating: replace the pending request and
    ///   invoke the replaced completion immediately. The in-flight flip keeps
    ///   running; the chain then heads for the new target.
    ///
    /// A `None` or unknown target with a positive rotation is a halt: the
    /// chain stops at the token the in-flight flip lands on, or at once when
    /// idle.
    pub fn display_token<H: FlapHost + ?Sized>(
        &mut self,
        host: &mut H,
        target: Option<Token>,
        rotation: Duration,
        on_complete: Option<Completion>,
    ) {
        if rotation.is_zero() {
            self.display_immediately(host, target, on_complete);
            return;
        }

        let target = self.resolve_target(target);
        debug!(
            message = "flap.request",
            target = ?target.as_ref().map(Token::as_str),
            rotation_us = u64::try_from(rotation.as_micros()).unwrap_or(u64::MAX),
            animating = self.in_flight.is_some()
        );

        if self.in_flight.is_some() {
            let superseded = self
                .request
                .set_pending(PendingRequest::new(target, rotation, on_complete));
            debug!(
                message = "flap.supersede",
                had_completion = superseded.is_some()
            );
            if let Some(done) = superseded {
                done();
            }
            return;
        }

        let Some(target) = target else {
            debug!(message = "flap.halt", token = %self.displayed(), steps = 0u64);
            if let Some(done) = on_complete {
                done();
            }
            return;
        };

        let leftover = self
            .request
            .set_pending(PendingRequest::new(Some(target), rotation, on_complete));
        let next = self.generator.next(self.displayed());
        self.begin_step(host, next, rotation);
        if let Some(done) = leftover {
            done();
        }
    }

    /// Report that the flip identified by `ticket` has visually finished.
    ///
    /// Toggles the phase, then either settles (invoking the pending
    /// completion) or paints and schedules the next step.
    pub fn flip_finished<H: FlapHost + ?Sized>(
        &mut self,
        host: &mut H,
        ticket: FlipTicket,
    ) -> StepOutcome {
        let flight = match self.in_flight.take() {
            Some(flight) if flight.ticket == ticket => flight,
            other => {
                warn!(
                    message = "flap.stale_completion",
                    ticket = ticket.get(),
                    in_flight = ?other.as_ref().map(|f| f.ticket.get())
                );
                self.in_flight = other;
                return StepOutcome::Ignored;
            }
        };

        self.flip_buffers();
        self.generator.set_current(&flight.token);
        self.steps_taken += 1;
        self.state = FlapState::Chaining;

        let landed = flight.token;
        let (target, rotation) = match self.request.pending() {
            Some(request) => (request.target().cloned(), request.rotation()),
            None => (None, flight.rotation),
        };

        match target {
            Some(target) if target == landed => {
                let done = self.settle();
                debug!(message = "flap.settle", token = %landed, steps = self.steps_taken);
                if let Some(done) = done {
                    done();
                }
                StepOutcome::Settled(landed)
            }
            Some(_) => {
                let next = self.generator.next(&landed);
                self.begin_step(host, next, rotation);
                StepOutcome::Advanced(landed)
            }
            None => {
                let done = self.settle();
                debug!(message = "flap.halt", token = %landed, steps = self.steps_taken);
                if let Some(done) = done {
                    done();
                }
                StepOutcome::Halted(landed)
            }
        }
    }

    fn resolve_target(&self, target: Option<Token>) -> Option<Token> {
        match target {
            Some(token) if self.tokens().contains(&token) => Some(token),
            Some(token) => {
                log_unknown(&token);
                None
            }
            None => None,
        }
    }

    fn display_immediately<H: FlapHost + ?Sized>(
        &mut self,
        host: &mut H,
        target: Option<Token>,
        on_complete: Option<Completion>,
    ) {
        let token = match target {
            None => self.tokens().first().clone(),
            Some(token) if self.tokens().contains(&token) => token,
            Some(token) => {
                log_unknown(&token);
                self.displayed().clone()
            }
        };

        let abandoned = self.in_flight.take();
        if abandoned.is_some() {
            for surface in SurfaceRef::ALL {
                host.clear_animations(surface);
            }
            debug!(
                message = "flap.abandon",
                ticket = ?abandoned.as_ref().map(|f| f.ticket.get())
            );
        }
        let superseded = self
            .request
            .take()
            .and_then(PendingRequest::into_completion);

        self.show_immediately(host, token);
        self.state = FlapState::Idle;
        debug!(message = "flap.immediate", token = %self.displayed());

        if let Some(done) = superseded {
            done();
        }
        if let Some(done) = on_complete {
            done();
        }
    }

    fn settle(&mut self) -> Option<Completion> {
        self.state = FlapState::Idle;
        self.request
            .take()
            .and_then(PendingRequest::into_completion)
    }

    fn paint_back<H: FlapHost + ?Sized>(&mut self, host: &mut H, token: &Token) {
        for pair in [&mut self.top, &mut self.bottom] {
            pair.paint(Slot::Back, token.clone());
            host.paint(pair.surface(Slot::Back), token);
        }
    }

    fn flip_buffers(&mut self) {
        self.top.swap_visible();
        self.bottom.swap_visible();
        self.phase.toggle();
        debug_assert_eq!(self.top.visible_phase(), self.phase);
        debug_assert_eq!(self.bottom.visible_phase(), self.phase);
    }

    fn show_immediately<H: FlapHost + ?Sized>(&mut self, host: &mut H, token: Token) {
        let top_back = self.top.surface(Slot::Back);
        let bottom_back = self.bottom.surface(Slot::Back);
        let top_front = self.top.surface(Slot::Front);

        self.paint_back(host, &token);
        host.clear_animations(top_back);
        host.clear_animations(bottom_back);
        host.clear_animations(top_front);
        host.raise(top_back);
        host.raise(bottom_back);

        self.flip_buffers();
        self.generator.set_current(&token);
    }

    fn begin_step<H: FlapHost + ?Sized>(&mut self, host: &mut H, token: Token, rotation: Duration) {
        let top_back = self.top.surface(Slot::Back);
        let bottom_back = self.bottom.surface(Slot::Back);
        let top_front = self.top.surface(Slot::Front);

        self.paint_back(host, &token);
        host.clear_animations(top_back);
        host.clear_animations(bottom_back);
        host.clear_animations(top_front);
        // The old top leaf must fall over the new one; the new bottom leaf
        // lands over the old one.
        host.raise(top_front);
        host.raise(bottom_back);

        let ticket = FlipTicket::from_raw(self.next_ticket);
        self.next_ticket += 1;
        let schedule = FlipSchedule::for_rotation(rotation, top_front, bottom_back);
        trace!(
            message = "flap.step",
            token = %token,
            ticket = ticket.get(),
            rotation_us = u64::try_from(rotation.as_micros()).unwrap_or(u64::MAX)
        );

        self.in_flight = Some(InFlight {
            ticket,
            token,
            rotation,
        });
        self.state = FlapState::Animating;
        host.schedule(ticket, &schedule);
    }
}
