//! Cursor over a shared alphabet.

use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::token::Token;

/// Produces successive tokens from an [`Alphabet`], remembering where it is.
///
/// Tokens outside the alphabet have no predecessor: [`TokenGenerator::next`]
/// answers them with [`TokenGenerator::first`], and
/// [`TokenGenerator::set_current`] ignores them.
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    alphabet: Arc<Alphabet>,
    cursor: usize,
}

impl TokenGenerator {
    #[must_use]
    pub fn new(alphabet: Arc<Alphabet>) -> Self {
        Self {
            alphabet,
            cursor: 0,
        }
    }

    #[must_use]
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    #[inline]
    #[must_use]
    pub fn first(&self) -> &Token {
        self.alphabet.first()
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> &Token {
        &self.alphabet.as_slice()[self.cursor]
    }

    /// Move the cursor to `token`. Returns `false` (cursor unchanged) if the
    /// token is not in the alphabet.
    pub fn set_current(&mut self, token: &Token) -> bool {
        match self.alphabet.position(token) {
            Some(index) => {
                self.cursor = index;
                true
            }
            None => false,
        }
    }

    /// The token after `current` in cyclic order.
    #[must_use]
    pub fn next(&self, current: &Token) -> Token {
        self.alphabet
            .successor(current)
            .unwrap_or_else(|| self.alphabet.first())
            .clone()
    }

    /// Step the cursor forward and return the new current token.
    pub fn advance(&mut self) -> &Token {
        self.cursor = (self.cursor + 1) % self.alphabet.len();
        self.current()
    }
}
