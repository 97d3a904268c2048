//! Machine-readable board events, one JSON object per line.

use std::io::Write;

use serde::{Deserialize, Serialize};
use splitflap_core::StepOutcome;
use web_time::Duration;

use crate::board::TileStep;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BoardEvent {
    Request {
        t_ms: u64,
        text: String,
        animated: bool,
    },
    Landed {
        t_ms: u64,
        flap: usize,
        token: String,
    },
    Settled {
        t_ms: u64,
        flap: usize,
        token: String,
    },
    Halted {
        t_ms: u64,
        flap: usize,
        token: String,
    },
    TextComplete {
        t_ms: u64,
        text: String,
    },
}

impl BoardEvent {
    /// Translate a tile step; stale reports produce nothing.
    #[must_use]
    pub fn from_step(at: Duration, step: &TileStep) -> Option<Self> {
        let t_ms = millis(at);
        let flap = step.flap;
        match &step.outcome {
            StepOutcome::Ignored => None,
            StepOutcome::Advanced(token) => Some(Self::Landed {
                t_ms,
                flap,
                token: token.to_string(),
            }),
            StepOutcome::Settled(token) => Some(Self::Settled {
                t_ms,
                flap,
                token: token.to_string(),
            }),
            StepOutcome::Halted(token) => Some(Self::Halted {
                t_ms,
                flap,
                token: token.to_string(),
            }),
        }
    }

    pub fn request(at: Duration, text: &str, animated: bool) -> Self {
        Self::Request {
            t_ms: millis(at),
            text: text.to_owned(),
            animated,
        }
    }

    pub fn text_complete(at: Duration, text: &str) -> Self {
        Self::TextComplete {
            t_ms: millis(at),
            text: text.to_owned(),
        }
    }

    /// Write as a single JSON line.
    pub fn write_line(&self, out: &mut impl Write) -> Result<()> {
        serde_json::to_writer(&mut *out, self)?;
        out.write_all(b"\n")?;
        Ok(())
    }
}

fn millis(at: Duration) -> u64 {
    u64::try_from(at.as_millis()).unwrap_or(u64::MAX)
}
