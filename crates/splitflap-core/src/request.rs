//! Pending-request slot and the completion contract.
//!
//! # Invariants
//!
//! 1. The slot holds at most one [`PendingRequest`].
//! 2. Replacing a request hands the superseded completion back to the
//!    caller, which must invoke it. Nothing is replaced silently.
//! 3. A stored completion leaves the slot exactly once: either through
//!    [`RequestSlot::set_pending`] (superseded) or [`RequestSlot::take`]
//!    (settled).
//! 4. Dropping a slot invokes the pending completion, except while the
//!    thread is unwinding, where it is logged and dropped.

use std::fmt;

use web_time::Duration;

use crate::token::Token;

#[cfg(feature = "tracing")]
use crate::logging::{debug, warn};
#[cfg(not(feature = "tracing"))]
use crate::{debug, warn};

/// Caller notification fired once a request is settled or superseded.
pub type Completion = Box<dyn FnOnce() + 'static>;

/// A request to rotate to `target`.
///
/// A `None` target is a halt: the flap stops at whatever token the in-flight
/// step lands on.
pub struct PendingRequest {
    target: Option<Token>,
    rotation: Duration,
    on_complete: Option<Completion>,
}

impl PendingRequest {
    #[must_use]
    pub fn new(target: Option<Token>, rotation: Duration, on_complete: Option<Completion>) -> Self {
        Self {
            target,
            rotation,
            on_complete,
        }
    }

    #[must_use]
    pub fn target(&self) -> Option<&Token> {
        self.target.as_ref()
    }

    #[must_use]
    pub fn rotation(&self) -> Duration {
        self.rotation
    }

    #[must_use]
    pub fn is_halt(&self) -> bool {
        self.target.is_none()
    }

    /// Consume the request, returning its completion.
    #[must_use]
    pub fn into_completion(self) -> Option<Completion> {
        self.on_complete
    }
}

impl fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingRequest")
            .field("target", &self.target)
            .field("rotation", &self.rotation)
            .field("has_completion", &self.on_complete.is_some())
            .finish()
    }
}

/// Holds the single live request of a flap.
#[derive(Debug, Default)]
pub struct RequestSlot {
    pending: Option<PendingRequest>,
}

impl RequestSlot {
    #[must_use]
    pub fn new() -> Self {
        Self { pending: None }
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingRequest> {
        self.pending.as_ref()
    }

    /// Store `request`, returning the completion of the request it replaced.
    #[must_use = "a superseded completion must be invoked"]
    pub fn set_pending(&mut self, request: PendingRequest) -> Option<Completion> {
        self.pending
            .replace(request)
            .and_then(PendingRequest::into_completion)
    }

    /// Remove and return the live request.
    pub fn take(&mut self) -> Option<PendingRequest> {
        self.pending.take()
    }
}

impl Drop for RequestSlot {
    fn drop(&mut self) {
        let Some(done) = self.pending.take().and_then(PendingRequest::into_completion) else {
            return;
        };
        if std::thread::panicking() {
            warn!(message = "flap.dropped_completion", unwinding = true);
            return;
        }
        debug!(message = "flap.dropped_completion", unwinding = false);
        done();
    }
}
