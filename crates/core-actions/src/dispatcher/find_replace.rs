//! FindReplace mode: navigating matches and applying replacements.
//!
//! The mode only exists while `session.search` is `Some`; the search engine
//! owns match validity across replacements, and exhaustion drops the state
//! and falls back to Normal mode.

use core_events::InputEvent;
use core_search::ReplaceOutcome;
use core_state::{Mode, Session, StatusMessage};

use crate::DispatchResult;

pub(crate) fn handle(event: InputEvent, session: &mut Session) -> DispatchResult {
    debug_assert!(session.search.is_some(), "FindReplace mode without search");
    match event {
        InputEvent::Printable('n') => {
            let target = match session.search.as_mut() {
                Some(search) => {
                    search.next_match();
                    search.current().start
                }
                None => return DispatchResult::clean(),
            };
            session.jump_to(target);
            DispatchResult::dirty()
        }
        InputEvent::Enter => replace_current(session),
        InputEvent::Printable('a') => replace_all(session),
        InputEvent::Printable(':') => {
            session.command_line.clear();
            session.mode = Mode::Command;
            DispatchResult::dirty()
        }
        _ => DispatchResult::clean(),
    }
}

fn replace_current(session: &mut Session) -> DispatchResult {
    let Some(search) = session.search.as_mut() else {
        return DispatchResult::clean();
    };
    // Enter only replaces when the command supplied a replacement.
    if search.replacement().is_none() {
        return DispatchResult::clean();
    }
    let next = match search.replace_current(&mut session.buffer) {
        ReplaceOutcome::Advanced => Some(search.current().start),
        ReplaceOutcome::Exhausted => None,
    };
    match next {
        Some(target) => session.jump_to(target),
        None => {
            session.search = None;
            session.mode = Mode::Normal;
            session.reclamp_cursor();
        }
    }
    DispatchResult::dirty()
}

fn replace_all(session: &mut Session) -> DispatchResult {
    let Some(search) = session.search.as_mut() else {
        return DispatchResult::clean();
    };
    if search.replacement().is_none() {
        return DispatchResult::clean();
    }
    let count = search.replace_all(&mut session.buffer);
    session.search = None;
    session.mode = Mode::Normal;
    session.status = Some(StatusMessage::info(format!("{count} replaced")));
    session.reclamp_cursor();
    DispatchResult::dirty()
}
