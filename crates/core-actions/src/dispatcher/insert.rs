//! Insert mode: the cursor position is resolved to buffer space, the buffer
//! mutates, and the returned position goes back through the coordinate
//! mapper (a line split at the bottom row scrolls the viewport here).

use core_events::InputEvent;
use core_state::Session;

use crate::DispatchResult;

pub(crate) fn handle(event: InputEvent, session: &mut Session) -> DispatchResult {
    match event {
        InputEvent::Printable(ch) => insert(session, ch),
        InputEvent::Enter => insert(session, '\n'),
        InputEvent::Backspace => {
            let pos = session.buffer_cursor();
            let new_pos = session.buffer.delete_char(pos);
            let candidate = core_model::window_candidate(&session.viewport, new_pos);
            session.set_cursor(candidate);
            DispatchResult::dirty()
        }
        _ => DispatchResult::clean(),
    }
}

fn insert(session: &mut Session, ch: char) -> DispatchResult {
    let pos = session.buffer_cursor();
    let new_pos = session.buffer.insert_char(pos, ch);
    let candidate = core_model::window_candidate(&session.viewport, new_pos);
    session.set_cursor(candidate);
    DispatchResult::dirty()
}
