//! Drawing a board as boxed terminal tiles.
//!
//! Each flap is five rows tall: a top border, the top half, the split
//! line, the bottom half, and a bottom border. The halves show whatever
//! the host currently has facing the viewer, so a mid-flip flap shows the
//! outgoing token on one half and the incoming token on the other.

use std::io::Write;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use splitflap_core::style::Rgba;
use splitflap_core::{Half, Token};
use unicode_width::UnicodeWidthStr;

use crate::board::{Board, Tile};
use crate::error::Result;

/// Rows per tile.
pub const TILE_ROWS: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Border,
    Glyph,
}

/// Inner glyph width: the widest token the tile can show.
fn glyph_width(tile: &Tile) -> usize {
    tile.engine()
        .tokens()
        .iter()
        .map(Token::width)
        .max()
        .unwrap_or(1)
        .max(1)
}

fn centered(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text).min(width);
    let left = (width - used) / 2;
    let right = width - used - left;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

fn tile_rows(tile: &Tile) -> [Vec<(Part, String)>; 5] {
    let width = glyph_width(tile);
    let bar = "─".repeat(width + 2);
    let half = |h: Half| {
        let glyph = tile.visible(h).map_or("", Token::as_str);
        vec![
            (Part::Border, "│".to_owned()),
            (Part::Glyph, format!(" {} ", centered(glyph, width))),
            (Part::Border, "│".to_owned()),
        ]
    };
    [
        vec![(Part::Border, format!("┌{bar}┐"))],
        half(Half::Top),
        vec![(Part::Border, format!("├{bar}┤"))],
        half(Half::Bottom),
        vec![(Part::Border, format!("└{bar}┘"))],
    ]
}

/// Plain-text rendering, one string per terminal row.
#[must_use]
pub fn render_lines(board: &Board) -> Vec<String> {
    let mut lines = vec![String::new(); usize::from(TILE_ROWS)];
    for (index, tile) in board.tiles().iter().enumerate() {
        for (line, row) in lines.iter_mut().zip(tile_rows(tile)) {
            if index > 0 {
                line.push(' ');
            }
            for (_, text) in row {
                line.push_str(&text);
            }
        }
    }
    lines
}

fn color(rgba: Rgba) -> Color {
    if rgba.a() == 0 {
        Color::Reset
    } else {
        Color::Rgb {
            r: rgba.r(),
            g: rgba.g(),
            b: rgba.b(),
        }
    }
}

/// Draws a board at a fixed origin using crossterm commands.
#[derive(Debug)]
pub struct TerminalRenderer<W: Write> {
    out: W,
    origin: (u16, u16),
    color: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, origin: (u16, u16), color: bool) -> Self {
        Self { out, origin, color }
    }

    /// Clear the screen and hide the cursor.
    pub fn begin(&mut self) -> Result<()> {
        queue!(self.out, Hide, Clear(ClearType::All))?;
        self.out.flush()?;
        Ok(())
    }

    pub fn draw(&mut self, board: &Board) -> Result<()> {
        let (x0, y0) = self.origin;
        let mut x = x0;
        for tile in board.tiles() {
            let style = tile.style();
            let mut tile_width = 0u16;
            for (dy, row) in (0u16..).zip(tile_rows(tile)) {
                queue!(self.out, MoveTo(x, y0 + dy))?;
                let mut width = 0usize;
                for (part, text) in row {
                    if self.color {
                        let fg = match part {
                            Part::Border => style.split_line_color(),
                            Part::Glyph => style.foreground_color(),
                        };
                        queue!(
                            self.out,
                            SetForegroundColor(color(fg)),
                            SetBackgroundColor(color(style.background_color()))
                        )?;
                    }
                    width += UnicodeWidthStr::width(text.as_str());
                    queue!(self.out, Print(text))?;
                }
                tile_width = tile_width.max(u16::try_from(width).unwrap_or(u16::MAX));
            }
            if self.color {
                queue!(self.out, ResetColor)?;
            }
            x = x.saturating_add(tile_width).saturating_add(1);
        }
        self.out.flush()?;
        Ok(())
    }

    /// Restore the cursor below the board.
    pub fn finish(&mut self) -> Result<()> {
        let (_, y0) = self.origin;
        queue!(self.out, ResetColor, MoveTo(0, y0 + TILE_ROWS), Show)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
