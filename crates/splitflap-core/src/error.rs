use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlapError>;

/// Configuration errors rejected at construction or call time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlapError {
    #[error("alphabet must contain at least one token")]
    EmptyAlphabet,

    #[error("duplicate token in alphabet: {token:?}")]
    DuplicateToken { token: String },

    #[error("rotation duration must be a finite, non-negative number of seconds (got {seconds})")]
    InvalidDuration { seconds: f64 },

    #[error("unknown alphabet preset: {name}")]
    UnknownPreset { name: String },
}

impl FlapError {
    #[must_use]
    pub fn duplicate(token: impl Into<String>) -> Self {
        Self::DuplicateToken {
            token: token.into(),
        }
    }
}
