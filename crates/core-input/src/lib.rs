//! Terminal input decoding: crossterm key events to [`InputEvent`]s.
//!
//! This is the only library crate that touches crossterm. Key releases and
//! unsupported key codes decode to `None` and are dropped by the caller;
//! repeats count as presses so held arrows keep moving the cursor. Non-key
//! terminal events (resize, focus, mouse) are not handled here; the binary
//! deals with the ones it cares about before decoding.

use core_events::InputEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

/// Translate one crossterm key event. `None` means "nothing for the editor".
pub fn decode_key(event: &KeyEvent) -> Option<InputEvent> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    // Control-chords are not part of the input language; shifted characters
    // arrive pre-translated in `KeyCode::Char`.
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let decoded = match event.code {
        KeyCode::Char(c) => InputEvent::Printable(c),
        KeyCode::Tab => InputEvent::Printable('\t'),
        KeyCode::Enter => InputEvent::Enter,
        KeyCode::Backspace => InputEvent::Backspace,
        KeyCode::Esc => InputEvent::Escape,
        KeyCode::Up => InputEvent::ArrowUp,
        KeyCode::Down => InputEvent::ArrowDown,
        KeyCode::Left => InputEvent::ArrowLeft,
        KeyCode::Right => InputEvent::ArrowRight,
        _ => {
            trace!(target: "input", code = ?event.code, "ignored key");
            return None;
        }
    };
    Some(decoded)
}
