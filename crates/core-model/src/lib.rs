//! Coordinate mapping between window space and buffer space.
//!
//! Window coordinates and buffer coordinates share units but are shifted by
//! the viewport offset, and every buffer mutation can invalidate both. This
//! crate is the single source of truth for "where is the cursor allowed to
//! be": [`set_cursor`] is the sole gate enforcing the position invariant and
//! is called after every cursor-affecting operation (typing, deleting, line
//! open, arrow movement, end-of-file jump, search-result jump).
//!
//! Invariants after any public call here:
//! * `1 <= viewport.offset <= max(1, num_lines - height + 1)`.
//! * The returned window position resolves to a buffer position with
//!   `1 <= y <= num_lines` and `0 <= x <= line_len(y)`.
//!
//! Only this crate converts between [`WindowPosition`] and
//! [`BufferPosition`]; keeping the conversion in one place is what prevents
//! the two same-shaped spaces from being mixed.

use core_text::{BufferPosition, LineBuffer, WindowPosition};

/// The visible vertical window into the buffer.
///
/// `offset` is the 1-based buffer line number shown on window row 1.
/// `height` is the number of usable text rows (terminal rows minus the rows
/// reserved for the status line).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub offset: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self {
            offset: 1,
            height: height.max(1),
        }
    }

    /// Largest legal offset: scrolling stops once the last document line is
    /// the bottom visible row. Short documents never scroll.
    pub fn max_offset(&self, num_lines: usize) -> usize {
        if num_lines > self.height {
            num_lines - self.height + 1
        } else {
            1
        }
    }

    /// True if buffer line `y` is inside the visible band.
    pub fn contains(&self, y: usize) -> bool {
        y >= self.offset && y < self.offset + self.height
    }
}

/// An unclamped cursor request. Components are signed so callers can express
/// overflow in any direction and leave the clamping to [`set_cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorCandidate {
    pub x: isize,
    pub y: isize,
}

impl CursorCandidate {
    pub fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }
}

impl From<WindowPosition> for CursorCandidate {
    fn from(pos: WindowPosition) -> Self {
        Self {
            x: pos.x as isize,
            y: pos.y as isize,
        }
    }
}

/// Pure window-to-buffer translation: `y = window.y + offset - 1`, same `x`.
pub fn to_buffer_position(viewport: &Viewport, pos: WindowPosition) -> BufferPosition {
    BufferPosition::new(pos.x, pos.y + viewport.offset - 1)
}

/// Express a buffer position as a cursor candidate under the current offset.
/// The result may lie outside the window (e.g. one row past the bottom after
/// a line split) and must go through [`set_cursor`].
pub fn window_candidate(viewport: &Viewport, pos: BufferPosition) -> CursorCandidate {
    CursorCandidate::new(
        pos.x as isize,
        pos.y as isize - viewport.offset as isize + 1,
    )
}

/// Clamp a candidate into a legal window position, scrolling the viewport
/// when the candidate overflows it.
///
/// Clamping steps, in order:
/// 1. left overflow (`x < 0`): wrap to the end of the buffer line above when
///    one exists, else clamp to column 0;
/// 2. top overflow (`y < 1`): scroll up one row, offset floored at 1;
/// 3. past end-of-file: pull `y` back onto the last buffer line;
/// 4. bottom overflow (`y > height`): clamp to the last row and scroll down,
///    offset capped at [`Viewport::max_offset`];
/// 5. right overflow: clamp `x` to the resolved line's length (`x` may sit
///    one past the last character, never beyond).
pub fn set_cursor(
    buffer: &LineBuffer,
    viewport: &mut Viewport,
    candidate: CursorCandidate,
) -> WindowPosition {
    // Mutations may have shrunk the document since the offset was last set;
    // re-validate it before resolving anything against it.
    viewport.offset = viewport.offset.clamp(1, viewport.max_offset(buffer.num_lines()));

    let mut x = candidate.x;
    let mut y = candidate.y;

    if x < 0 {
        // Wrap onto the end of the line above, unless already on buffer
        // line 1. The row decrement may push y to 0; step 2 absorbs it.
        if y + viewport.offset as isize > 2 {
            y -= 1;
            let above = (y + viewport.offset as isize - 1) as usize;
            x = buffer.line_len(above) as isize;
        } else {
            x = 0;
        }
    }

    if y < 1 {
        viewport.offset = viewport.offset.saturating_sub(1).max(1);
        y = 1;
    }

    let last_row = buffer.num_lines() as isize - viewport.offset as isize + 1;
    if y > last_row {
        y = last_row;
    }

    if y > viewport.height as isize {
        y = viewport.height as isize;
        viewport.offset = (viewport.offset + 1).min(viewport.max_offset(buffer.num_lines()));
    }

    let line = y as usize + viewport.offset - 1;
    let len = buffer.line_len(line) as isize;
    if x > len {
        x = len;
    }

    WindowPosition::new(x as usize, y as usize)
}

/// Delta wrapper over [`set_cursor`].
pub fn move_cursor(
    buffer: &LineBuffer,
    viewport: &mut Viewport,
    current: WindowPosition,
    row_delta: isize,
    col_delta: isize,
) -> WindowPosition {
    let candidate = CursorCandidate::new(
        current.x as isize + col_delta,
        current.y as isize + row_delta,
    );
    set_cursor(buffer, viewport, candidate)
}

/// Jump to the end of the file: the last line becomes the bottom visible row
/// (top row for documents shorter than the viewport) with the cursor on it.
/// The column is carried over and right-clamped as usual.
pub fn jump_end_of_file(
    buffer: &LineBuffer,
    viewport: &mut Viewport,
    current: WindowPosition,
) -> WindowPosition {
    viewport.offset = viewport.max_offset(buffer.num_lines());
    let row = buffer.num_lines() as isize - viewport.offset as isize + 1;
    set_cursor(buffer, viewport, CursorCandidate::new(current.x as isize, row))
}

/// Place the cursor on a search match, re-anchoring the viewport at the match
/// line when it lies outside the visible band.
pub fn scroll_to_match(
    buffer: &LineBuffer,
    viewport: &mut Viewport,
    start: BufferPosition,
) -> WindowPosition {
    if !viewport.contains(start.y) {
        viewport.offset = start.y.min(viewport.max_offset(buffer.num_lines()));
    }
    let candidate = window_candidate(viewport, start);
    set_cursor(buffer, viewport, candidate)
}
