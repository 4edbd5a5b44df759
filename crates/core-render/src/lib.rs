//! Backend-agnostic frame composition.
//!
//! The renderer turns a session into a [`Frame`]: one [`Row`] per viewport
//! row, a composed status line, and the cursor's screen position. No escape
//! sequences or terminal writes happen here; the binary owns those. Keeping
//! composition pure makes the three-tier search highlighting and the tilde
//! filler rows directly assertable in tests.

use core_state::{Mode, Session};

mod status;
pub use status::{StatusLine, compose_status};

/// Highlight tier for a span of row text. In find/replace mode the current
/// match, the other matches, and plain text must be visually distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Plain,
    Match,
    CurrentMatch,
}

/// A run of characters sharing one tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tier: Tier,
}

impl Span {
    fn new(text: impl Into<String>, tier: Tier) -> Self {
        Self {
            text: text.into(),
            tier,
        }
    }
}

/// One viewport row: either buffer text or the filler marker shown past the
/// end of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Text(Vec<Span>),
    Filler,
}

/// Everything the terminal driver needs to redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<Row>,
    pub status: StatusLine,
    /// 0-based screen coordinates of the cursor.
    pub cursor_row: u16,
    pub cursor_col: u16,
}

/// Compose the visible frame for the session's current state.
pub fn compose_frame(session: &Session) -> Frame {
    let viewport = &session.viewport;
    let highlighting = session.mode == Mode::FindReplace;
    let mut rows = Vec::with_capacity(viewport.height);
    for window_row in 1..=viewport.height {
        let y = viewport.offset + window_row - 1;
        match session.buffer.line(y) {
            Some(line) => rows.push(compose_row(session, y, line, highlighting)),
            None => rows.push(Row::Filler),
        }
    }
    Frame {
        rows,
        status: compose_status(session),
        cursor_row: (session.cursor.y.saturating_sub(1)) as u16,
        cursor_col: session.cursor.x as u16,
    }
}

fn compose_row(session: &Session, y: usize, line: &str, highlighting: bool) -> Row {
    let search = match (&session.search, highlighting) {
        (Some(search), true) => search,
        _ => return Row::Text(vec![Span::new(line, Tier::Plain)]),
    };
    let mut spans = Vec::new();
    let mut consumed = 0usize;
    for (idx, m) in search.matches().iter().enumerate() {
        if m.start.y != y {
            continue;
        }
        if m.start.x > consumed {
            spans.push(Span::new(slice_chars(line, consumed, m.start.x), Tier::Plain));
        }
        let tier = if idx == search.current_index() {
            Tier::CurrentMatch
        } else {
            Tier::Match
        };
        spans.push(Span::new(slice_chars(line, m.start.x, m.end.x), tier));
        consumed = m.end.x;
    }
    let total = line.chars().count();
    if consumed < total || spans.is_empty() {
        spans.push(Span::new(slice_chars(line, consumed, total), Tier::Plain));
    }
    Row::Text(spans)
}

/// Slice by character columns, staying on UTF-8 boundaries.
fn slice_chars(s: &str, start: usize, end: usize) -> &str {
    let mut indices = s.char_indices().map(|(i, _)| i);
    let from = indices.clone().nth(start).unwrap_or(s.len());
    let to = indices.nth(end).unwrap_or(s.len());
    &s[from..to]
}
