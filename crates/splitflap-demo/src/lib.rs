#![forbid(unsafe_code)]

//! Terminal departure board built on `splitflap-core`.
//!
//! A [`board::Board`] owns one engine and one lab host per flap, lays the
//! flaps out in a row, and cycles through words from the command line.

pub mod board;
pub mod cli;
pub mod error;
pub mod events;
pub mod render;
pub mod source;

pub use cli::{Cli, run, run_from_env};
pub use error::{DemoError, Result};
