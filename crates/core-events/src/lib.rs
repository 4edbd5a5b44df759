//! Input event types consumed by the mode state machine.
//!
//! The decoder in `core-input` translates raw terminal events into these
//! tagged variants, so mode logic never inspects byte sequences or performs
//! look-ahead reads. Escape is a plain event here; arrow keys are their own
//! variants rather than an escape-prefixed sequence.

/// One decoded input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A printable character, including space and tab.
    Printable(char),
    Enter,
    Backspace,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl InputEvent {
    /// True for the four arrow variants, which move the cursor in every mode.
    pub fn is_arrow(self) -> bool {
        matches!(
            self,
            InputEvent::ArrowUp
                | InputEvent::ArrowDown
                | InputEvent::ArrowLeft
                | InputEvent::ArrowRight
        )
    }
}
