//! Event routing, decomposed per mode:
//! * `normal` - navigation and mode-entry keys
//! * `insert` - text mutation at the cursor
//! * `command` - accumulator editing and command execution
//! * `find_replace` - match navigation and replacement
//! * `command_parser` - pure classification of accumulated command text
//!
//! Two event classes are handled before mode logic sees them: arrow keys
//! move the cursor in every mode without leaving it, and Escape always
//! cancels back to Normal, clearing the accumulator and any active search.

use core_events::InputEvent;
use core_state::{Mode, Session};
use tracing::trace;

use crate::DispatchResult;

mod command;
pub mod command_parser;
mod find_replace;
mod insert;
mod normal;

/// Apply one decoded event to the session.
pub fn dispatch(event: InputEvent, session: &mut Session) -> DispatchResult {
    trace!(target: "dispatch", mode = session.mode.name(), event = ?event);

    match event {
        InputEvent::ArrowUp => return moved(session, -1, 0),
        InputEvent::ArrowDown => return moved(session, 1, 0),
        InputEvent::ArrowLeft => return moved(session, 0, -1),
        InputEvent::ArrowRight => return moved(session, 0, 1),
        InputEvent::Escape => {
            session.cancel_to_normal();
            return DispatchResult::dirty();
        }
        _ => {}
    }

    match session.mode {
        Mode::Normal => normal::handle(event, session),
        Mode::Insert => insert::handle(event, session),
        Mode::Command => command::handle(event, session),
        Mode::FindReplace => find_replace::handle(event, session),
    }
}

fn moved(session: &mut Session, row_delta: isize, col_delta: isize) -> DispatchResult {
    session.move_cursor(row_delta, col_delta);
    DispatchResult::dirty()
}
