//! Property-based invariant tests for alphabets and the token generator.
//!
//! 1. Applying `successor` `len()` times returns the starting token.
//! 2. `TokenGenerator::next` agrees with `Alphabet::successor` for members.
//! 3. `TokenGenerator::next` maps non-members to `first()`.
//! 4. `distance` counts exactly the successor steps to the target.
//! 5. Construction rejects any input containing a repeat.

use std::sync::Arc;

use proptest::prelude::*;
use splitflap_core::{Alphabet, FlapError, Token, TokenGenerator};

// ── Strategies ────────────────────────────────────────────────────────────

fn alphabet_strategy() -> impl Strategy<Value = Alphabet> {
    proptest::collection::btree_set("[A-Za-z0-9]{1,2}", 1..24).prop_map(|set| {
        Alphabet::new(set.into_iter().collect::<Vec<String>>()).expect("unique, non-empty")
    })
}

fn alphabet_and_index() -> impl Strategy<Value = (Alphabet, usize)> {
    alphabet_strategy().prop_flat_map(|a| {
        let len = a.len();
        (Just(a), 0..len)
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Cyclic closure
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn successor_cycle_closes((alphabet, index) in alphabet_and_index()) {
        let start = alphabet.get(index).unwrap().clone();
        let mut token = start.clone();
        for _ in 0..alphabet.len() {
            token = alphabet.successor(&token).unwrap().clone();
        }
        prop_assert_eq!(token, start);
    }

    #[test]
    fn generator_matches_alphabet((alphabet, index) in alphabet_and_index()) {
        let token = alphabet.get(index).unwrap().clone();
        let expected = alphabet.successor(&token).unwrap().clone();
        let generator = TokenGenerator::new(Arc::new(alphabet));
        prop_assert_eq!(generator.next(&token), expected);
    }

    #[test]
    fn generator_advance_walks_whole_alphabet((alphabet, index) in alphabet_and_index()) {
        let len = alphabet.len();
        let start = alphabet.get(index).unwrap().clone();
        let mut generator = TokenGenerator::new(Arc::new(alphabet));
        prop_assert!(generator.set_current(&start));
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..len {
            seen.insert(generator.advance().clone());
        }
        prop_assert_eq!(seen.len(), len);
        prop_assert_eq!(generator.current(), &start);
    }

    #[test]
    fn unknown_token_maps_to_first(alphabet in alphabet_strategy()) {
        // Three characters never appear in a 1-2 character alphabet.
        let stranger = Token::from("???");
        let first = alphabet.first().clone();
        let generator = TokenGenerator::new(Arc::new(alphabet));
        prop_assert_eq!(generator.next(&stranger), first);
    }

    #[test]
    fn distance_matches_successor_steps(
        (alphabet, from) in alphabet_and_index(),
        to_seed in any::<usize>(),
    ) {
        let to = to_seed % alphabet.len();
        let from_token = alphabet.get(from).unwrap().clone();
        let to_token = alphabet.get(to).unwrap().clone();
        let distance = alphabet.distance(&from_token, &to_token).unwrap();

        let mut token = from_token;
        let mut steps = 0;
        loop {
            token = alphabet.successor(&token).unwrap().clone();
            steps += 1;
            if token == to_token {
                break;
            }
        }
        prop_assert_eq!(distance, steps);
        prop_assert!(distance >= 1 && distance <= alphabet.len());
    }

    #[test]
    fn repeats_are_rejected(
        tokens in proptest::collection::vec("[a-c]", 2..10),
    ) {
        let unique: std::collections::BTreeSet<_> = tokens.iter().collect();
        let result = Alphabet::new(tokens.clone());
        if unique.len() < tokens.len() {
            prop_assert!(
                matches!(result, Err(FlapError::DuplicateToken { .. })),
                "expected duplicate error"
            );
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
