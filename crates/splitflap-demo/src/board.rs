//! A row of flaps showing one word.
//!
//! [`Board::set_text`] requests one token per flap and fires its own
//! completion once every flap has settled (or been superseded by a later
//! `set_text`). Because each flap's completion runs exactly once, so does
//! the board's.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use splitflap_core::lab::LabHost;
use splitflap_core::{Completion, FlapEngine, FlapSource, FlapStyle, Half, StepOutcome, Token};
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;
use web_time::Duration;

/// One flap and the host that renders it.
#[derive(Debug)]
pub struct Tile {
    engine: FlapEngine,
    host: LabHost,
    rotation: Duration,
    style: FlapStyle,
}

impl Tile {
    #[must_use]
    pub fn engine(&self) -> &FlapEngine {
        &self.engine
    }

    #[must_use]
    pub fn style(&self) -> &FlapStyle {
        &self.style
    }

    /// Token currently seen on `half`.
    #[must_use]
    pub fn visible(&self, half: Half) -> Option<&Token> {
        self.host.visible(half)
    }

    /// Progress of the running flip, if any.
    #[must_use]
    pub fn progress(&self) -> Option<f32> {
        self.host.progress()
    }
}

/// Outcome of a landed flip on one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileStep {
    pub flap: usize,
    pub outcome: StepOutcome,
}

/// A horizontal row of flaps.
#[derive(Debug)]
pub struct Board {
    tiles: Vec<Tile>,
    elapsed: Duration,
}

impl Board {
    /// Build one tile per flap described by `source`.
    pub fn new(source: &dyn FlapSource) -> Self {
        let tiles = (0..source.flap_count())
            .map(|index| {
                let style = source.style_for(index);
                let mut host = LabHost::new();
                let engine = FlapEngine::new(source.alphabet_for(index), &style, &mut host);
                Tile {
                    engine,
                    host,
                    rotation: source.duration_for(index),
                    style,
                }
            })
            .collect();
        Self {
            tiles,
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Virtual time driven through [`Board::tick`].
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether no flap is animating.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.tiles.iter().all(|t| !t.engine.is_animating())
    }

    /// The tokens currently displayed, left to right.
    #[must_use]
    pub fn text(&self) -> String {
        self.tiles
            .iter()
            .map(|t| t.engine.displayed().as_str())
            .collect()
    }

    /// Show `text`, one grapheme per flap.
    ///
    /// Short text is padded with each flap's first token; long text is
    /// truncated. `animated = false` snaps every flap synchronously.
    pub fn set_text(&mut self, text: &str, animated: bool, on_complete: Option<Completion>) {
        let tokens = layout(text, self.tiles.len(), |i| {
            self.tiles[i].engine.tokens().first().clone()
        });
        debug!(message = "board.set_text", text, animated, flaps = self.tiles.len());

        let remaining = Rc::new(Cell::new(self.tiles.len()));
        let finish = Rc::new(RefCell::new(on_complete));
        if self.tiles.is_empty() {
            if let Some(done) = finish.borrow_mut().take() {
                done();
            }
            return;
        }

        for (tile, token) in self.tiles.iter_mut().zip(tokens) {
            let remaining = Rc::clone(&remaining);
            let finish = Rc::clone(&finish);
            let flap_done: Completion = Box::new(move || {
                remaining.set(remaining.get() - 1);
                if remaining.get() == 0
                    && let Some(done) = finish.borrow_mut().take()
                {
                    done();
                }
            });
            let rotation = if animated { tile.rotation } else { Duration::ZERO };
            tile.engine
                .display_token(&mut tile.host, Some(token), rotation, Some(flap_done));
        }
    }

    /// Advance every flap by `dt`, landing any flips that finish.
    pub fn tick(&mut self, dt: Duration) -> Vec<TileStep> {
        self.elapsed = self.elapsed.saturating_add(dt);
        let mut steps = Vec::new();
        for (flap, tile) in self.tiles.iter_mut().enumerate() {
            if let Some(ticket) = tile.host.advance(dt) {
                let outcome = tile.engine.flip_finished(&mut tile.host, ticket);
                steps.push(TileStep { flap, outcome });
            }
        }
        steps
    }
}

/// Split `text` into exactly `count` tokens, padding with `blank(index)`.
fn layout(text: &str, count: usize, blank: impl Fn(usize) -> Token) -> Vec<Token> {
    let mut tokens: Vec<Token> = text.graphemes(true).take(count).map(Token::from).collect();
    while tokens.len() < count {
        tokens.push(blank(tokens.len()));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::UniformSource;
    use splitflap_core::Alphabet;

    fn board(count: usize) -> Board {
        let source = UniformSource::new(count, Alphabet::alphanumeric_and_space());
        Board::new(&source)
    }

    fn settle(board: &mut Board) -> usize {
        let mut frames = 0;
        while !board.is_settled() {
            board.tick(Duration::from_millis(16));
            frames += 1;
            assert!(frames < 10_000, "board never settled");
        }
        frames
    }

    #[test]
    fn starts_on_first_token() {
        let board = board(3);
        assert_eq!(board.len(), 3);
        assert!(board.is_settled());
        assert_eq!(board.text(), "   ");
    }

    #[test]
    fn immediate_text_completes_synchronously() {
        let mut board = board(4);
        let fired = Rc::new(Cell::new(0));
        let hits = Rc::clone(&fired);
        board.set_text("H B1", false, Some(Box::new(move || hits.set(hits.get() + 1))));
        assert_eq!(fired.get(), 1);
        assert_eq!(board.text(), "H B1");
        assert!(board.is_settled());
    }

    #[test]
    fn animated_text_fires_once_after_every_flap() {
        let mut board = board(3);
        let fired = Rc::new(Cell::new(0));
        let hits = Rc::clone(&fired);
        board.set_text("ABC", true, Some(Box::new(move || hits.set(hits.get() + 1))));
        assert_eq!(fired.get(), 0);
        assert!(!board.is_settled());

        settle(&mut board);
        assert_eq!(fired.get(), 1);
        assert_eq!(board.text(), "ABC");
        assert_eq!(board.tiles()[2].visible(Half::Top).map(Token::as_str), Some("C"));
    }

    #[test]
    fn pads_and_truncates() {
        let mut board = board(3);
        board.set_text("A", false, None);
        assert_eq!(board.text(), "A  ");
        board.set_text("WXYZ", false, None);
        assert_eq!(board.text(), "WXY");
    }

    #[test]
    fn superseded_text_still_completes() {
        let mut board = board(2);
        let order = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&order);
        let second = Rc::clone(&order);
        board.set_text("ZZ", true, Some(Box::new(move || first.borrow_mut().push("first"))));
        board.tick(Duration::from_millis(50));
        board.set_text("BB", true, Some(Box::new(move || second.borrow_mut().push("second"))));
        assert_eq!(*order.borrow(), vec!["first"]);

        settle(&mut board);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
        assert_eq!(board.text(), "BB");
    }

    #[test]
    fn empty_board_completes_immediately() {
        let mut board = board(0);
        assert!(board.is_empty());
        let fired = Rc::new(Cell::new(false));
        let hit = Rc::clone(&fired);
        board.set_text("HELLO", true, Some(Box::new(move || hit.set(true))));
        assert!(fired.get());
    }

    #[test]
    fn tick_reports_landings() {
        let mut board = board(1);
        board.set_text("A", true, None);
        assert!(board.tick(Duration::from_millis(100)).is_empty());
        let steps = board.tick(Duration::from_millis(100));
        assert_eq!(steps, vec![TileStep { flap: 0, outcome: StepOutcome::Settled("A".into()) }]);
        assert_eq!(board.elapsed(), Duration::from_millis(200));
    }
}
