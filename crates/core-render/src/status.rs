//! Status line composition.
//!
//! Composition is separated from terminal styling: this module decides *what*
//! the status line says, the binary decides colors and attributes per
//! variant. Priority: an active mode banner wins; the ephemeral message is
//! only shown while in Normal mode, where the line is otherwise empty.

use core_state::{MessageKind, Mode, Session};

/// What the status line should show this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    /// Nothing to say (Normal mode, no pending message).
    Empty,
    /// `-- INSERT --` style banner.
    ModeBanner(&'static str),
    /// The live command accumulator, colon included.
    CommandEcho(String),
    /// The quoted active needle while navigating matches.
    SearchBanner(String),
    /// An ephemeral message surfaced from the last command.
    Message { kind: MessageKind, text: String },
}

impl StatusLine {
    /// Plain-text rendition (what lands on screen, before styling).
    pub fn text(&self) -> String {
        match self {
            StatusLine::Empty => String::new(),
            StatusLine::ModeBanner(banner) => (*banner).to_string(),
            StatusLine::CommandEcho(echo) => echo.clone(),
            StatusLine::SearchBanner(banner) => banner.clone(),
            StatusLine::Message { text, .. } => text.clone(),
        }
    }
}

pub fn compose_status(session: &Session) -> StatusLine {
    match session.mode {
        Mode::Insert => StatusLine::ModeBanner("-- INSERT --"),
        Mode::Command => StatusLine::CommandEcho(format!(":{}", session.command_line.as_str())),
        Mode::FindReplace => {
            let needle = session
                .search
                .as_ref()
                .map(|s| s.needle())
                .unwrap_or_default();
            StatusLine::SearchBanner(format!("\"{needle}\""))
        }
        Mode::Normal => match &session.status {
            Some(message) => StatusLine::Message {
                kind: message.kind,
                text: message.text.clone(),
            },
            None => StatusLine::Empty,
        },
    }
}
