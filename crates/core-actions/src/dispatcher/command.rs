//! Command mode: accumulator editing and execution.
//!
//! Dispatching a command leaves the session in Command mode; quit and the
//! find/replace entries are the transitions out, Escape (handled a level up)
//! is the cancel path.

use core_search::SearchState;
use core_state::{Mode, Session, StatusMessage};
use core_events::InputEvent;
use tracing::{debug, warn};

use super::command_parser::{CommandParser, ParsedCommand};
use crate::DispatchResult;

pub(crate) fn handle(event: InputEvent, session: &mut Session) -> DispatchResult {
    match event {
        InputEvent::Printable(ch) => {
            session.command_line.push(ch);
            DispatchResult::dirty()
        }
        InputEvent::Backspace => {
            session.command_line.backspace();
            DispatchResult::dirty()
        }
        InputEvent::Enter => execute(session),
        _ => DispatchResult::clean(),
    }
}

fn execute(session: &mut Session) -> DispatchResult {
    let parsed = CommandParser::parse(session.command_line.as_str());
    session.command_line.clear();
    debug!(target: "dispatch.command", command = ?parsed);

    match parsed {
        ParsedCommand::Quit => {
            session.running = false;
            DispatchResult::quit()
        }
        ParsedCommand::Write => {
            write(session);
            DispatchResult::dirty()
        }
        ParsedCommand::WriteQuit => {
            // A failed save aborts the quit; the session keeps running with
            // the document intact and the failure on the status line.
            if write(session) {
                session.running = false;
                DispatchResult::quit()
            } else {
                DispatchResult::dirty()
            }
        }
        ParsedCommand::Find { needle } => start_search(session, needle, None),
        ParsedCommand::Replace {
            needle,
            replacement,
        } => start_search(session, needle, Some(replacement)),
        ParsedCommand::Malformed { reason } => {
            debug!(target: "dispatch.command", reason, "malformed command ignored");
            DispatchResult::dirty()
        }
        ParsedCommand::Unknown(text) => {
            debug!(target: "dispatch.command", text = text.as_str(), "unknown command ignored");
            DispatchResult::dirty()
        }
    }
}

/// Save the buffer; surfaces the result on the status line and reports
/// success. Never touches the in-memory document on failure.
fn write(session: &mut Session) -> bool {
    match session.buffer.save() {
        Ok(()) => {
            session.status = Some(StatusMessage::info(format!(
                "\"{}\" {}L written",
                session.buffer.path().display(),
                session.buffer.num_lines()
            )));
            true
        }
        Err(err) => {
            warn!(target: "dispatch.command", error = %err, "save failed");
            session.status = Some(StatusMessage::error(err.to_string()));
            false
        }
    }
}

fn start_search(
    session: &mut Session,
    needle: String,
    replacement: Option<String>,
) -> DispatchResult {
    match SearchState::find(&session.buffer, &needle, replacement) {
        Some(search) => {
            session.jump_to(search.current().start);
            session.search = Some(search);
            session.mode = Mode::FindReplace;
        }
        None => {
            // Zero matches: fall back to Normal instead of entering a dead
            // find/replace state.
            session.status = Some(StatusMessage::info(format!("no match: {needle}")));
            session.mode = Mode::Normal;
        }
    }
    DispatchResult::dirty()
}
