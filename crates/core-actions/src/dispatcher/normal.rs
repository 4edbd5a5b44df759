//! Normal mode: navigation and mode entry.

use core_events::InputEvent;
use core_model::CursorCandidate;
use core_state::{Mode, Session};

use crate::DispatchResult;

pub(crate) fn handle(event: InputEvent, session: &mut Session) -> DispatchResult {
    let InputEvent::Printable(ch) = event else {
        // Enter and Backspace have no meaning in Normal mode.
        return DispatchResult::clean();
    };
    match ch {
        'i' => {
            session.mode = Mode::Insert;
            DispatchResult::dirty()
        }
        ':' => {
            session.command_line.clear();
            session.mode = Mode::Command;
            DispatchResult::dirty()
        }
        'o' => {
            // Open a line below the cursor and start inserting on it.
            let y = session.buffer_cursor().y;
            session.buffer.insert_line(y);
            session.set_cursor(CursorCandidate::new(0, session.cursor.y as isize + 1));
            session.mode = Mode::Insert;
            DispatchResult::dirty()
        }
        'O' => {
            // Open a line above: lines shift down, so the cursor's window row
            // now holds the new empty line.
            let y = session.buffer_cursor().y;
            session.buffer.insert_line(y - 1);
            session.set_cursor(CursorCandidate::new(0, session.cursor.y as isize));
            DispatchResult::dirty()
        }
        '0' => {
            session.set_cursor(CursorCandidate::new(0, session.cursor.y as isize));
            DispatchResult::dirty()
        }
        '$' => {
            // One past the last character, the append position.
            let len = session.buffer.line_len(session.buffer_cursor().y);
            session.set_cursor(CursorCandidate::new(len as isize, session.cursor.y as isize));
            DispatchResult::dirty()
        }
        'G' => {
            session.cursor = core_model::jump_end_of_file(
                &session.buffer,
                &mut session.viewport,
                session.cursor,
            );
            DispatchResult::dirty()
        }
        _ => DispatchResult::clean(),
    }
}
