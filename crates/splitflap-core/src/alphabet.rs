//! Ordered, cyclic token alphabets.
//!
//! # Invariants
//!
//! 1. An alphabet is never empty; [`Alphabet::first`] is always defined.
//! 2. Tokens are unique; each maps to exactly one position.
//! 3. [`Alphabet::successor`] wraps from the last token to the first, so
//!    applying it `len()` times to any member returns that member.
//!
//! # Failure Modes
//!
//! - Empty input: [`FlapError::EmptyAlphabet`].
//! - Repeated token: [`FlapError::DuplicateToken`].
//! - Token outside the alphabet: `position` / `successor` return `None`.

use ahash::AHashMap;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{FlapError, Result};
use crate::token::Token;

const DIGITS: &str = "0123456789";
const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Names accepted by [`Alphabet::preset`].
pub const PRESET_NAMES: [&str; 4] = [
    "numeric",
    "alphabetic",
    "alphanumeric",
    "alphanumeric-and-space",
];

/// A non-empty ordered sequence of unique tokens, read cyclically.
#[derive(Debug, Clone)]
pub struct Alphabet {
    tokens: Vec<Token>,
    positions: AHashMap<Token, usize>,
}

impl Alphabet {
    /// Build an alphabet from tokens in display order.
    pub fn new<I, T>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        let tokens: Vec<Token> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            return Err(FlapError::EmptyAlphabet);
        }
        let mut positions = AHashMap::with_capacity(tokens.len());
        for (index, token) in tokens.iter().enumerate() {
            if positions.insert(token.clone(), index).is_some() {
                return Err(FlapError::duplicate(token.as_str()));
            }
        }
        Ok(Self { tokens, positions })
    }

    /// One token per grapheme cluster of `symbols`.
    pub fn from_graphemes(symbols: &str) -> Result<Self> {
        Self::new(symbols.graphemes(true))
    }

    /// `0` through `9`.
    #[must_use]
    pub fn numeric() -> Self {
        Self::builtin(DIGITS)
    }

    /// `A` through `Z`.
    #[must_use]
    pub fn alphabetic() -> Self {
        Self::builtin(LETTERS)
    }

    /// `A` through `Z`, then `0` through `9`.
    #[must_use]
    pub fn alphanumeric() -> Self {
        Self::builtin(&format!("{LETTERS}{DIGITS}"))
    }

    /// A leading blank, then [`Alphabet::alphanumeric`].
    ///
    /// Starting on the blank lets a fresh board look empty.
    #[must_use]
    pub fn alphanumeric_and_space() -> Self {
        Self::builtin(&format!(" {LETTERS}{DIGITS}"))
    }

    /// Look up a preset by name (see [`PRESET_NAMES`]).
    pub fn preset(name: &str) -> Result<Self> {
        match name {
            "numeric" => Ok(Self::numeric()),
            "alphabetic" => Ok(Self::alphabetic()),
            "alphanumeric" => Ok(Self::alphanumeric()),
            "alphanumeric-and-space" => Ok(Self::alphanumeric_and_space()),
            other => Err(FlapError::UnknownPreset {
                name: other.to_string(),
            }),
        }
    }

    // Presets are ASCII with no repeats, so construction cannot fail.
    fn builtin(symbols: &str) -> Self {
        let tokens: Vec<Token> = symbols.chars().map(Token::from).collect();
        let positions = tokens
            .iter()
            .enumerate()
            .map(|(index, token)| (token.clone(), index))
            .collect();
        Self { tokens, positions }
    }

    /// The designated starting token.
    #[inline]
    #[must_use]
    pub fn first(&self) -> &Token {
        &self.tokens[0]
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, token: &Token) -> bool {
        self.positions.contains_key(token)
    }

    #[inline]
    #[must_use]
    pub fn position(&self, token: &Token) -> Option<usize> {
        self.positions.get(token).copied()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// The token after `token`, wrapping past the end.
    #[must_use]
    pub fn successor(&self, token: &Token) -> Option<&Token> {
        let index = self.position(token)?;
        Some(&self.tokens[(index + 1) % self.tokens.len()])
    }

    /// Number of single steps needed to roll from `from` to `to`.
    ///
    /// Equal tokens need a full revolution (`len()` steps), since a rotation
    /// always advances at least once. `None` if either token is unknown.
    #[must_use]
    pub fn distance(&self, from: &Token, to: &Token) -> Option<usize> {
        let start = self.position(from)?;
        let end = self.position(to)?;
        let len = self.tokens.len();
        let forward = (end + len - start) % len;
        Some(if forward == 0 { len } else { forward })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl Eq for Alphabet {}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Alphabet {
        Alphabet::new(["A", "B", "C"]).unwrap()
    }

    #[test]
    fn empty_is_rejected() {
        let err = Alphabet::new(Vec::<&str>::new()).unwrap_err();
        assert_eq!(err, FlapError::EmptyAlphabet);
    }

    #[test]
    fn duplicates_are_rejected() {
        let err = Alphabet::new(["A", "B", "A"]).unwrap_err();
        assert_eq!(err, FlapError::duplicate("A"));
    }

    #[test]
    fn successor_wraps() {
        let a = abc();
        assert_eq!(a.successor(&"A".into()), Some(&Token::from("B")));
        assert_eq!(a.successor(&"C".into()), Some(&Token::from("A")));
        assert_eq!(a.successor(&"Z".into()), None);
    }

    #[test]
    fn single_token_alphabet_is_its_own_successor() {
        let a = Alphabet::new(["X"]).unwrap();
        assert_eq!(a.successor(&"X".into()), Some(&Token::from("X")));
        assert_eq!(a.distance(&"X".into(), &"X".into()), Some(1));
    }

    #[test]
    fn distance_counts_forward_steps() {
        let a = abc();
        assert_eq!(a.distance(&"A".into(), &"C".into()), Some(2));
        assert_eq!(a.distance(&"C".into(), &"A".into()), Some(1));
        assert_eq!(a.distance(&"B".into(), &"B".into()), Some(3));
        assert_eq!(a.distance(&"B".into(), &"?".into()), None);
    }

    #[test]
    fn graphemes_split_clusters() {
        let a = Alphabet::from_graphemes("e\u{301}xy").unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(a.first().as_str(), "e\u{301}");
    }

    #[test]
    fn presets() {
        assert_eq!(Alphabet::numeric().len(), 10);
        assert_eq!(Alphabet::alphabetic().len(), 26);
        assert_eq!(Alphabet::alphanumeric().len(), 36);
        let spaced = Alphabet::alphanumeric_and_space();
        assert_eq!(spaced.len(), 37);
        assert_eq!(spaced.first().as_str(), " ");
        for name in PRESET_NAMES {
            assert!(Alphabet::preset(name).is_ok(), "preset {name}");
        }
        assert!(matches!(
            Alphabet::preset("klingon"),
            Err(FlapError::UnknownPreset { .. })
        ));
    }
}
