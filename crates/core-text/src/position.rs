//! Coordinate types shared across the workspace.
//!
//! Two spaces use the same `(x, y)` shape and are easy to mix up, so they are
//! distinct types. `core-model` is the only crate that converts between them;
//! everything else should hold whichever type matches the space it works in.
//!
//! Conventions:
//! * `x` is a 0-based character column. `x == line_len` is legal and means
//!   "after the last character" (append position).
//! * `y` is 1-based. For a `BufferPosition` it is the absolute line number in
//!   the document; for a `WindowPosition` it is the row inside the visible
//!   viewport, row 1 being the top visible line.

/// Absolute location inside the full document.
///
/// A *resolved* buffer position satisfies `1 <= y <= num_lines` and
/// `0 <= x <= line_len(y)`. Positions handed to `LineBuffer` mutation methods
/// must be resolved; the coordinate mapper in `core-model` is the sole gate
/// producing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferPosition {
    pub x: usize,
    pub y: usize,
}

impl BufferPosition {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Location inside the currently visible viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPosition {
    pub x: usize,
    pub y: usize,
}

impl WindowPosition {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Top-left of the viewport (column 0, row 1).
    pub fn origin() -> Self {
        Self { x: 0, y: 1 }
    }
}
