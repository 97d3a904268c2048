use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;

use clap::Parser;
use splitflap_core::{Alphabet, rotation_duration};
use tracing::info;
use tracing_subscriber::EnvFilter;
use unicode_segmentation::UnicodeSegmentation;
use web_time::Duration;

use crate::board::Board;
use crate::error::{DemoError, Result};
use crate::events::BoardEvent;
use crate::render::TerminalRenderer;
use crate::source::UniformSource;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "splitflap-demo",
    about = "Departure-board demo: cycles words across a row of split flaps",
    version
)]
pub struct Cli {
    /// Words to show in turn, space separated.
    #[arg(long, value_delimiter = ' ', default_value = "H B 1 A")]
    pub words: Vec<String>,

    /// Alphabet preset: numeric, alphabetic, alphanumeric, alphanumeric-and-space.
    #[arg(long, default_value = "alphanumeric-and-space")]
    pub tokens: String,

    /// Seconds per flip. Zero snaps without animating.
    #[arg(long, default_value_t = 0.2)]
    pub duration: f64,

    #[arg(long = "frame-ms", default_value_t = 16)]
    pub frame_ms: u64,

    /// Number of flaps; defaults to the longest word.
    #[arg(long)]
    pub flaps: Option<usize>,

    /// Passes over the word list.
    #[arg(long, default_value_t = 1)]
    pub cycles: usize,

    /// Hold time after each word settles.
    #[arg(long = "pause-ms", default_value_t = 1000)]
    pub pause_ms: u64,

    /// Give up on a word after this many frames.
    #[arg(long = "max-frames", default_value_t = 100_000)]
    pub max_frames: usize,

    /// Emit JSON-line events instead of drawing.
    #[arg(long)]
    pub json: bool,

    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Log as JSON on stderr.
    #[arg(long = "log-json")]
    pub log_json: bool,
}

/// What a run showed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub shown: Vec<String>,
    pub frames: usize,
}

/// Validated run settings.
#[derive(Debug)]
struct Plan {
    words: Vec<String>,
    source: UniformSource,
    frame: Duration,
    pause: Duration,
    animated: bool,
}

impl Plan {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let words: Vec<String> = cli
            .words
            .iter()
            .filter(|w| !w.is_empty())
            .map(|w| w.to_uppercase())
            .collect();
        if words.is_empty() {
            return Err(DemoError::invalid("--words needs at least one word"));
        }
        if cli.frame_ms == 0 {
            return Err(DemoError::invalid("--frame-ms must be positive"));
        }
        if cli.cycles == 0 {
            return Err(DemoError::invalid("--cycles must be positive"));
        }
        let alphabet = Alphabet::preset(&cli.tokens)?;
        let rotation = rotation_duration(cli.duration)?;
        let flaps = cli.flaps.unwrap_or_else(|| {
            words
                .iter()
                .map(|w| w.graphemes(true).count())
                .max()
                .unwrap_or(0)
        });
        if flaps == 0 {
            return Err(DemoError::invalid("--flaps must be positive"));
        }
        let words = words
            .iter()
            .cycle()
            .take(words.len().saturating_mul(cli.cycles))
            .cloned()
            .collect();
        Ok(Self {
            words,
            source: UniformSource::new(flaps, alphabet).with_rotation(rotation),
            frame: Duration::from_millis(cli.frame_ms),
            pause: Duration::from_millis(cli.pause_ms),
            animated: !rotation.is_zero(),
        })
    }
}

enum Sink<'a, W: Write> {
    Json(&'a mut W),
    Terminal(TerminalRenderer<&'a mut W>),
}

impl<W: Write> Sink<'_, W> {
    fn begin(&mut self) -> Result<()> {
        match self {
            Self::Json(_) => Ok(()),
            Self::Terminal(renderer) => renderer.begin(),
        }
    }

    fn event(&mut self, event: &BoardEvent) -> Result<()> {
        match self {
            Self::Json(out) => event.write_line(out),
            Self::Terminal(_) => Ok(()),
        }
    }

    fn frame(&mut self, board: &Board) -> Result<()> {
        match self {
            Self::Json(_) => Ok(()),
            Self::Terminal(renderer) => renderer.draw(board),
        }
    }

    fn finish(&mut self) -> Result<()> {
        match self {
            Self::Json(out) => Ok(out.flush()?),
            Self::Terminal(renderer) => renderer.finish(),
        }
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_json);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let realtime = !cli.json;
    let summary = play(&cli, &mut out, realtime)?;
    info!(
        message = "demo.done",
        words = summary.shown.len(),
        frames = summary.frames
    );
    Ok(())
}

const DEFAULT_LOG_FILTER: &str = "warn";

fn init_logging(json: bool) {
    // A subscriber may already be installed by an embedding process.
    if json {
        let _ = splitflap_core::logging::init_json_logging(DEFAULT_LOG_FILTER);
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Drive a board through every word, writing to `out`.
///
/// With `realtime` the loop sleeps one frame per tick and holds each word
/// for the pause; otherwise time is purely virtual.
pub fn play<W: Write>(cli: &Cli, out: &mut W, realtime: bool) -> Result<Summary> {
    let plan = Plan::from_cli(cli)?;
    let mut board = Board::new(&plan.source);
    let mut sink = if cli.json {
        Sink::Json(out)
    } else {
        Sink::Terminal(TerminalRenderer::new(out, (0, 0), !cli.no_color))
    };

    sink.begin()?;
    let result = show_words(&plan, &mut board, &mut sink, realtime, cli.max_frames);
    let finished = sink.finish();
    let summary = result?;
    finished?;
    Ok(summary)
}

fn show_words<W: Write>(
    plan: &Plan,
    board: &mut Board,
    sink: &mut Sink<'_, W>,
    realtime: bool,
    max_frames: usize,
) -> Result<Summary> {
    let mut summary = Summary {
        shown: Vec::with_capacity(plan.words.len()),
        frames: 0,
    };
    for word in &plan.words {
        let done = Rc::new(Cell::new(false));
        let flag = Rc::clone(&done);
        sink.event(&BoardEvent::request(board.elapsed(), word, plan.animated))?;
        board.set_text(word, plan.animated, Some(Box::new(move || flag.set(true))));
        sink.frame(board)?;

        let mut frames = 0;
        while !done.get() {
            if frames >= max_frames {
                return Err(DemoError::Stalled { frames });
            }
            for step in board.tick(plan.frame) {
                if let Some(event) = BoardEvent::from_step(board.elapsed(), &step) {
                    sink.event(&event)?;
                }
            }
            sink.frame(board)?;
            if realtime {
                std::thread::sleep(plan.frame);
            }
            frames += 1;
        }

        let text = board.text();
        sink.event(&BoardEvent::text_complete(board.elapsed(), &text))?;
        summary.frames += frames;
        summary.shown.push(text);

        board.tick(plan.pause);
        if realtime {
            std::thread::sleep(plan.pause);
        }
    }
    Ok(summary)
}
