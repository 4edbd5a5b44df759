//! Session state: document, viewport, cursor, mode, and the small pieces of
//! interaction state (command accumulator, active search, status message).
//!
//! The session is an owned value threaded by reference through dispatch,
//! rendering, and the binary's event loop. Nothing here is ambient or
//! static, which keeps multiple independent sessions possible and tests
//! deterministic.

use core_model::{CursorCandidate, Viewport};
use core_search::SearchState;
use core_text::{BufferPosition, LineBuffer, WindowPosition};
use tracing::debug;

/// Current modal interpretation context for input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation and mode-entry keys.
    #[default]
    Normal,
    /// Printable input mutates the buffer at the cursor.
    Insert,
    /// Keys accumulate into the command line until Enter dispatches it.
    Command,
    /// Navigating/replacing the active search's matches.
    FindReplace,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
            Mode::FindReplace => "FIND",
        }
    }
}

/// The command-line accumulator. Holds the raw text typed after `:`,
/// without the colon itself.
#[derive(Debug, Default, Clone)]
pub struct CommandLine {
    buf: String,
}

impl CommandLine {
    pub fn push(&mut self, ch: char) {
        self.buf.push(ch);
    }

    pub fn backspace(&mut self) {
        self.buf.pop();
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Severity of an ephemeral status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

/// A transient status-line message (e.g. save confirmation or failure).
/// Replaced by the next message and cleared by the next mode banner that
/// needs the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

/// Everything one editing session owns.
pub struct Session {
    pub buffer: LineBuffer,
    pub viewport: Viewport,
    pub cursor: WindowPosition,
    pub mode: Mode,
    pub command_line: CommandLine,
    pub search: Option<SearchState>,
    pub status: Option<StatusMessage>,
    pub running: bool,
}

impl Session {
    /// Start a session over `buffer` with `text_height` usable text rows.
    pub fn new(buffer: LineBuffer, text_height: usize) -> Self {
        debug!(
            target: "session",
            path = %buffer.path().display(),
            lines = buffer.num_lines(),
            text_height,
            "session start"
        );
        Self {
            buffer,
            viewport: Viewport::new(text_height),
            cursor: WindowPosition::origin(),
            mode: Mode::Normal,
            command_line: CommandLine::default(),
            search: None,
            status: None,
            running: true,
        }
    }

    /// The cursor resolved into buffer space.
    pub fn buffer_cursor(&self) -> BufferPosition {
        core_model::to_buffer_position(&self.viewport, self.cursor)
    }

    /// Route a candidate through the coordinate mapper and store the clamped
    /// result. Every cursor-affecting operation funnels through here.
    pub fn set_cursor(&mut self, candidate: CursorCandidate) {
        self.cursor = core_model::set_cursor(&self.buffer, &mut self.viewport, candidate);
    }

    /// Re-legalize the stored cursor against the current document shape.
    /// Called after mutations that may have shortened or removed lines.
    pub fn reclamp_cursor(&mut self) {
        self.set_cursor(self.cursor.into());
    }

    pub fn move_cursor(&mut self, row_delta: isize, col_delta: isize) {
        self.cursor = core_model::move_cursor(
            &self.buffer,
            &mut self.viewport,
            self.cursor,
            row_delta,
            col_delta,
        );
    }

    /// Place the cursor on a buffer position, scrolling the viewport when the
    /// target is outside the visible band (search-result jumps).
    pub fn jump_to(&mut self, target: BufferPosition) {
        self.cursor = core_model::scroll_to_match(&self.buffer, &mut self.viewport, target);
    }

    /// React to a terminal resize: adopt the new text height and re-legalize.
    pub fn resize(&mut self, text_height: usize) {
        self.viewport.height = text_height.max(1);
        self.reclamp_cursor();
    }

    /// Clear interaction state when falling back to Normal mode.
    pub fn cancel_to_normal(&mut self) {
        self.command_line.clear();
        self.search = None;
        self.mode = Mode::Normal;
    }
}
