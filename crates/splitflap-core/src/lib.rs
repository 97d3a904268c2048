#![forbid(unsafe_code)]

//! Core: split-flap tokens, double-buffered flap surfaces, and the rotation
//! engine that chains visual flips until a requested token is shown.
//!
//! The engine never touches pixels. It talks to the rendering layer through
//! [`host::FlapHost`] and is driven forward by the host reporting flip
//! completions via [`engine::FlapEngine::flip_finished`].

pub mod alphabet;
pub mod animation;
pub mod buffer;
pub mod engine;
pub mod error;
pub mod generator;
pub mod host;
pub mod lab;
pub mod logging;
pub mod request;
pub mod style;
pub mod token;

pub use alphabet::Alphabet;
pub use buffer::{BufferPair, Half, Phase, Slot, SurfaceRef};
pub use engine::{FlapEngine, FlapState, FlipTicket, StepOutcome, rotation_duration};
pub use error::{FlapError, Result};
pub use generator::TokenGenerator;
pub use host::{FlapHost, FlapSource};
pub use request::{Completion, PendingRequest, RequestSlot};
pub use style::FlapStyle;
pub use token::Token;
