//! Property tests for the board container.
//!
//! 1. Every `set_text` completion fires exactly once, even when superseded.
//! 2. After settling, the board shows the last text, padded or truncated.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use splitflap_core::Alphabet;
use splitflap_demo::board::Board;
use splitflap_demo::source::UniformSource;
use web_time::Duration;

fn word() -> impl Strategy<Value = String> {
    "[A-Z0-9 ]{0,6}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn board_completions_fire_once(
        flaps in 1usize..5,
        requests in prop::collection::vec((word(), any::<bool>(), 0u64..120), 1..6),
    ) {
        let source = UniformSource::new(flaps, Alphabet::alphanumeric_and_space())
            .with_rotation(Duration::from_millis(20));
        let mut board = Board::new(&source);
        let counts = Rc::new(RefCell::new(vec![0u32; requests.len()]));

        for (index, (text, animated, gap_ms)) in requests.iter().enumerate() {
            let slot = Rc::clone(&counts);
            board.set_text(
                text,
                *animated,
                Some(Box::new(move || slot.borrow_mut()[index] += 1)),
            );
            board.tick(Duration::from_millis(*gap_ms));
            prop_assert!(counts.borrow().iter().all(|&n| n <= 1));
        }

        let mut frames = 0;
        while !board.is_settled() {
            board.tick(Duration::from_millis(5));
            frames += 1;
            prop_assert!(frames < 100_000);
        }
        prop_assert!(counts.borrow().iter().all(|&n| n == 1));

        let last = &requests[requests.len() - 1].0;
        let mut expected: String = last.chars().take(flaps).collect();
        while expected.chars().count() < flaps {
            expected.push(' ');
        }
        prop_assert_eq!(board.text(), expected);
    }
}
