//! ferrite entrypoint: terminal glue around the core crates.
//!
//! Everything here is deliberately thin. The loop is synchronous and
//! single-threaded: read one terminal event, decode it, dispatch it, redraw
//! if the dispatch reported dirty state, repeat. All editing semantics live
//! behind `core_actions::dispatch`; all drawing decisions (what the rows and
//! status line contain) live in `core-render`. This file only owns raw mode,
//! colors, and the write calls.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event},
    execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use core_actions::dispatch;
use core_config::Config;
use core_input::decode_key;
use core_render::{Frame, Row, StatusLine, Tier, compose_frame};
use core_state::{MessageKind, Session};
use core_text::LineBuffer;

const LOG_FILE: &str = "ferrite.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "ferrite", version, about = "A minimal modal terminal editor")]
struct Args {
    /// File to edit; a missing file starts an empty document created on save.
    pub path: PathBuf,
    /// Optional configuration file with runtime knobs.
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

/// Raw mode + alternate screen, restored on drop. The panic hook performs
/// the same restoration so a panic never leaves the terminal unusable.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen).context("entering alternate screen")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        previous(panic_info);
    }));
}

/// Logging goes to a file: the terminal belongs to the editor.
fn configure_logging(filter: &str) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .with_context(|| format!("opening {LOG_FILE}"))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

fn text_height(rows: u16, config: &Config) -> usize {
    rows.saturating_sub(config.viewport.reserved_rows).max(1) as usize
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = core_config::load_from(args.config.clone())?;
    let _log_guard = configure_logging(&config.log.filter)?;
    install_panic_hook();
    info!(
        target: "runtime",
        path = %args.path.display(),
        filter = config.log.filter.as_str(),
        "startup"
    );

    let buffer = LineBuffer::open(&args.path).context("opening file")?;
    let (_cols, rows) = terminal::size().context("querying terminal size")?;
    let mut session = Session::new(buffer, text_height(rows, &config));

    let _terminal = TerminalGuard::enter()?;
    let mut stdout = io::stdout();
    draw(&mut stdout, &compose_frame(&session)).context("drawing frame")?;

    while session.running {
        match event::read().context("reading terminal event")? {
            Event::Key(key) => {
                let Some(input) = decode_key(&key) else {
                    continue;
                };
                let result = dispatch(input, &mut session);
                if result.quit {
                    break;
                }
                if result.dirty {
                    draw(&mut stdout, &compose_frame(&session)).context("drawing frame")?;
                }
            }
            Event::Resize(_cols, rows) => {
                session.resize(text_height(rows, &config));
                draw(&mut stdout, &compose_frame(&session)).context("drawing frame")?;
            }
            _ => {}
        }
    }

    info!(target: "runtime", "shutdown");
    Ok(())
}

fn draw(stdout: &mut impl Write, frame: &Frame) -> io::Result<()> {
    queue!(stdout, Hide, MoveTo(0, 0), Clear(ClearType::All))?;
    for (idx, row) in frame.rows.iter().enumerate() {
        queue!(stdout, MoveTo(0, idx as u16))?;
        draw_row(stdout, row)?;
    }
    queue!(stdout, MoveTo(0, frame.rows.len() as u16))?;
    draw_status(stdout, &frame.status)?;
    queue!(stdout, MoveTo(frame.cursor_col, frame.cursor_row), Show)?;
    stdout.flush()
}

fn draw_row(stdout: &mut impl Write, row: &Row) -> io::Result<()> {
    match row {
        Row::Filler => {
            queue!(
                stdout,
                SetForegroundColor(Color::DarkGrey),
                Print("~"),
                ResetColor
            )
        }
        Row::Text(spans) => {
            for span in spans {
                match span.tier {
                    Tier::Plain => queue!(stdout, Print(span.text.as_str()))?,
                    Tier::Match => queue!(
                        stdout,
                        SetForegroundColor(Color::Black),
                        SetBackgroundColor(Color::DarkCyan),
                        Print(span.text.as_str()),
                        ResetColor
                    )?,
                    Tier::CurrentMatch => queue!(
                        stdout,
                        SetForegroundColor(Color::Black),
                        SetBackgroundColor(Color::Yellow),
                        Print(span.text.as_str()),
                        ResetColor
                    )?,
                }
            }
            Ok(())
        }
    }
}

fn draw_status(stdout: &mut impl Write, status: &StatusLine) -> io::Result<()> {
    match status {
        StatusLine::Empty => Ok(()),
        StatusLine::ModeBanner(banner) => queue!(
            stdout,
            SetForegroundColor(Color::Yellow),
            Print(*banner),
            ResetColor
        ),
        StatusLine::CommandEcho(echo) => queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            Print(echo.as_str()),
            SetAttribute(Attribute::Reset)
        ),
        StatusLine::SearchBanner(banner) => queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            SetForegroundColor(Color::Cyan),
            Print(banner.as_str()),
            ResetColor,
            SetAttribute(Attribute::Reset)
        ),
        StatusLine::Message { kind, text } => match kind {
            MessageKind::Info => queue!(stdout, Print(text.as_str())),
            MessageKind::Error => queue!(
                stdout,
                SetForegroundColor(Color::Red),
                Print(text.as_str()),
                ResetColor
            ),
        },
    }
}
