//! Modal input interpretation: one decoded event in, session mutations out.
//!
//! The dispatcher is the only place that reads [`core_state::Mode`] to decide
//! what an event means. It calls into the coordinate mapper for cursor
//! legality, the line buffer for mutation, and the search engine in
//! find/replace mode; it never touches the terminal.

use core_events::InputEvent;
use core_state::Session;

pub mod dispatcher;

pub use dispatcher::command_parser::{CommandParser, ParsedCommand};

/// Result of dispatching a single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// A render is needed.
    pub dirty: bool,
    /// The session asked to end; the event loop should exit.
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }

    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }

    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }
}

/// Route one event through the session. See [`dispatcher`] for the per-mode
/// breakdown.
pub fn dispatch(event: InputEvent, session: &mut Session) -> DispatchResult {
    dispatcher::dispatch(event, session)
}
