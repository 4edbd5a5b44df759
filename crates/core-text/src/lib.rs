//! Line-oriented text buffer.
//!
//! The document is an ordered sequence of [`Line`]s plus the source path it
//! was opened from. Invariants:
//! * `num_lines() >= 1` at all times; an empty or brand-new file is a single
//!   zero-length line.
//! * A line never contains a line terminator; `'\n'` exists only as the
//!   split/join boundary between lines.
//! * `Line::len()` always equals the line's character count.
//!
//! Columns are character offsets, not bytes. Unicode-aware column *width* is
//! out of scope, but char offsets keep every slice on a UTF-8 boundary so
//! multi-byte content cannot panic the buffer.
//!
//! Every mutation may change `num_lines()` and individual line lengths.
//! Callers holding cached positions or match ranges must re-validate them
//! afterwards; the coordinate mapper in `core-model` is the gate for cursor
//! positions and `core-search` re-shifts its own ranges.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

mod position;
pub use position::{BufferPosition, WindowPosition};

/// File I/O failures raised by [`LineBuffer::open`] and [`LineBuffer::save`].
///
/// Never fatal: the session surfaces these on the status line and keeps the
/// in-memory document untouched.
#[derive(Debug, Error)]
pub enum TextError {
    #[error("failed to read {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One document line: the text plus its cached character length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    text: String,
    len: usize,
}

impl Line {
    fn new(text: String) -> Self {
        let len = text.chars().count();
        Self { text, len }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Character count (never includes a terminator).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte offset of character column `col`, clamped to the end of the line.
    fn byte_at(&self, col: usize) -> usize {
        self.text
            .char_indices()
            .nth(col)
            .map_or(self.text.len(), |(idx, _)| idx)
    }

    fn insert(&mut self, col: usize, ch: char) {
        let at = self.byte_at(col);
        self.text.insert(at, ch);
        self.len += 1;
    }

    fn remove(&mut self, col: usize) {
        let at = self.byte_at(col);
        self.text.remove(at);
        self.len -= 1;
    }

    /// Split at character column `col`; `self` keeps the head, the tail is
    /// returned as a new line.
    fn split_off(&mut self, col: usize) -> Line {
        let at = self.byte_at(col);
        let tail = self.text.split_off(at);
        let tail = Line::new(tail);
        self.len -= tail.len;
        tail
    }

    fn append(&mut self, other: Line) {
        self.text.push_str(&other.text);
        self.len += other.len;
    }

    fn splice(&mut self, start_col: usize, end_col: usize, replacement: &str) {
        debug_assert!(start_col <= end_col && end_col <= self.len);
        let start = self.byte_at(start_col);
        let end = self.byte_at(end_col);
        self.text.replace_range(start..end, replacement);
        self.len = self.len - (end_col - start_col) + replacement.chars().count();
    }
}

/// The document: an ordered sequence of mutable lines and the path they came
/// from. All mutation goes through the methods below.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    lines: Vec<Line>,
    path: PathBuf,
}

impl LineBuffer {
    /// Load `path` into lines. A missing file yields a new single-empty-line
    /// document bound to that path; any other read failure is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TextError> {
        let path = path.into();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(source) if source.kind() == io::ErrorKind::NotFound => String::new(),
            Err(source) => return Err(TextError::Open { path, source }),
        };
        Ok(Self::from_content(path, &content))
    }

    /// Build a document from in-memory content (tests, new files).
    pub fn from_content(path: impl Into<PathBuf>, content: &str) -> Self {
        let mut lines: Vec<Line> = content.lines().map(|l| Line::new(l.to_string())).collect();
        if lines.is_empty() {
            lines.push(Line::default());
        }
        Self {
            lines,
            path: path.into(),
        }
    }

    /// Build a document from explicit line contents (test convenience).
    pub fn from_lines(path: impl Into<PathBuf>, lines: &[&str]) -> Self {
        let mut lines: Vec<Line> = lines.iter().map(|l| Line::new((*l).to_string())).collect();
        if lines.is_empty() {
            lines.push(Line::default());
        }
        Self {
            lines,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// Line content by 1-based line number.
    pub fn line(&self, y: usize) -> Option<&str> {
        self.lines.get(y.wrapping_sub(1)).map(Line::as_str)
    }

    /// Character length of line `y` (1-based); 0 for out-of-range lines so
    /// clamping callers need no separate existence check.
    pub fn line_len(&self, y: usize) -> usize {
        self.lines.get(y.wrapping_sub(1)).map_or(0, Line::len)
    }

    fn line_mut(&mut self, y: usize) -> &mut Line {
        debug_assert!((1..=self.lines.len()).contains(&y), "unresolved line {y}");
        &mut self.lines[y - 1]
    }

    /// Insert `ch` at `pos`. A `'\n'` splits the line at `pos.x` instead of
    /// inserting a literal character. Returns the resulting cursor position:
    /// one column right on a normal insert, start of the new line on a split.
    pub fn insert_char(&mut self, pos: BufferPosition, ch: char) -> BufferPosition {
        debug_assert!(pos.x <= self.line_len(pos.y), "unresolved column {}", pos.x);
        if ch == '\n' {
            let tail = self.line_mut(pos.y).split_off(pos.x);
            self.lines.insert(pos.y, tail);
            BufferPosition::new(0, pos.y + 1)
        } else {
            self.line_mut(pos.y).insert(pos.x, ch);
            BufferPosition::new(pos.x + 1, pos.y)
        }
    }

    /// Delete the character immediately before `pos` (backspace semantics).
    ///
    /// At column 0 of a non-first line the current line is merged into the end
    /// of the previous one and the returned position sits at the join point.
    /// At the very start of the document this is a no-op.
    pub fn delete_char(&mut self, pos: BufferPosition) -> BufferPosition {
        if pos.x == 0 {
            if pos.y <= 1 {
                return pos;
            }
            let removed = self.lines.remove(pos.y - 1);
            let prev = self.line_mut(pos.y - 1);
            let join = prev.len();
            prev.append(removed);
            BufferPosition::new(join, pos.y - 1)
        } else {
            self.line_mut(pos.y).remove(pos.x - 1);
            BufferPosition::new(pos.x - 1, pos.y)
        }
    }

    /// Insert a new empty line immediately after buffer line `after_y`,
    /// shifting all subsequent lines down. `after_y == 0` inserts before the
    /// first line (open-above at the top of the file).
    pub fn insert_line(&mut self, after_y: usize) {
        debug_assert!(after_y <= self.lines.len());
        self.lines.insert(after_y.min(self.lines.len()), Line::default());
    }

    /// Replace the character range `[start_x, end_x)` of line `y` with
    /// `replacement` (which must not contain a line terminator). Used by the
    /// find/replace engine; an empty replacement degrades to a delete.
    pub fn splice(&mut self, y: usize, start_x: usize, end_x: usize, replacement: &str) {
        debug_assert!(!replacement.contains('\n'));
        self.line_mut(y).splice(start_x, end_x, replacement);
    }

    /// Serialize all lines back to the source path, one per line, each
    /// terminated by a newline.
    pub fn save(&self) -> Result<(), TextError> {
        let write = |path: &Path| -> io::Result<()> {
            let mut file = io::BufWriter::new(fs::File::create(path)?);
            for line in &self.lines {
                file.write_all(line.as_str().as_bytes())?;
                file.write_all(b"\n")?;
            }
            file.flush()
        };
        write(&self.path).map_err(|source| TextError::Save {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(lines: &[&str]) -> LineBuffer {
        LineBuffer::from_lines("test.txt", lines)
    }

    #[test]
    fn empty_content_is_one_empty_line() {
        let b = LineBuffer::from_content("new.txt", "");
        assert_eq!(b.num_lines(), 1);
        assert_eq!(b.line(1), Some(""));
        assert_eq!(b.line_len(1), 0);
    }

    #[test]
    fn trailing_newline_does_not_add_a_line() {
        let b = LineBuffer::from_content("t", "abc\ndef\n");
        assert_eq!(b.num_lines(), 2);
        assert_eq!(b.line(2), Some("def"));
    }

    #[test]
    fn insert_mid_line_advances_cursor() {
        // ["abc", "def"], insert 'X' at (1,1) -> "aXbc", cursor (2,1)
        let mut b = buf(&["abc", "def"]);
        let pos = b.insert_char(BufferPosition::new(1, 1), 'X');
        assert_eq!(b.line(1), Some("aXbc"));
        assert_eq!(pos, BufferPosition::new(2, 1));
        assert_eq!(b.num_lines(), 2);
    }

    #[test]
    fn insert_at_append_column() {
        let mut b = buf(&["ab"]);
        let pos = b.insert_char(BufferPosition::new(2, 1), 'c');
        assert_eq!(b.line(1), Some("abc"));
        assert_eq!(pos, BufferPosition::new(3, 1));
    }

    #[test]
    fn newline_splits_line() {
        let mut b = buf(&["abcd"]);
        let pos = b.insert_char(BufferPosition::new(2, 1), '\n');
        assert_eq!(b.line(1), Some("ab"));
        assert_eq!(b.line(2), Some("cd"));
        assert_eq!(pos, BufferPosition::new(0, 2));
        assert_eq!(b.num_lines(), 2);
    }

    #[test]
    fn newline_at_line_end_opens_empty_line() {
        let mut b = buf(&["ab"]);
        let pos = b.insert_char(BufferPosition::new(2, 1), '\n');
        assert_eq!(b.line(1), Some("ab"));
        assert_eq!(b.line(2), Some(""));
        assert_eq!(pos, BufferPosition::new(0, 2));
    }

    #[test]
    fn delete_at_document_start_is_noop() {
        // ["abc"], delete at (0,1) -> unchanged
        let mut b = buf(&["abc"]);
        let pos = b.delete_char(BufferPosition::new(0, 1));
        assert_eq!(b.line(1), Some("abc"));
        assert_eq!(pos, BufferPosition::new(0, 1));
        assert_eq!(b.num_lines(), 1);
    }

    #[test]
    fn delete_at_column_zero_merges_lines() {
        // ["ab", "cd"], delete at (0,2) -> ["abcd"], cursor (2,1)
        let mut b = buf(&["ab", "cd"]);
        let pos = b.delete_char(BufferPosition::new(0, 2));
        assert_eq!(b.num_lines(), 1);
        assert_eq!(b.line(1), Some("abcd"));
        assert_eq!(pos, BufferPosition::new(2, 1));
    }

    #[test]
    fn delete_mid_line_removes_previous_char() {
        let mut b = buf(&["abc"]);
        let pos = b.delete_char(BufferPosition::new(2, 1));
        assert_eq!(b.line(1), Some("ac"));
        assert_eq!(pos, BufferPosition::new(1, 1));
    }

    #[test]
    fn line_count_changes_by_exactly_one() {
        let mut b = buf(&["aa", "bb"]);
        b.insert_line(1);
        assert_eq!(b.num_lines(), 3);
        assert_eq!(b.line(2), Some(""));
        b.insert_line(0);
        assert_eq!(b.num_lines(), 4);
        assert_eq!(b.line(1), Some(""));
        // character edits leave the count alone
        b.insert_char(BufferPosition::new(0, 2), 'x');
        b.delete_char(BufferPosition::new(1, 2));
        assert_eq!(b.num_lines(), 4);
        // merge removes exactly one
        b.delete_char(BufferPosition::new(0, 3));
        assert_eq!(b.num_lines(), 3);
    }

    #[test]
    fn splice_shrinks_and_grows() {
        let mut b = buf(&["foo bar baz"]);
        b.splice(1, 4, 7, "x");
        assert_eq!(b.line(1), Some("foo x baz"));
        b.splice(1, 4, 5, "longer");
        assert_eq!(b.line(1), Some("foo longer baz"));
        b.splice(1, 0, 4, "");
        assert_eq!(b.line(1), Some("longer baz"));
    }

    #[test]
    fn multibyte_columns_stay_on_boundaries() {
        let mut b = buf(&["héllo"]);
        assert_eq!(b.line_len(1), 5);
        let pos = b.insert_char(BufferPosition::new(2, 1), 'x');
        assert_eq!(b.line(1), Some("héxllo"));
        assert_eq!(pos, BufferPosition::new(3, 1));
        b.delete_char(BufferPosition::new(2, 1));
        assert_eq!(b.line(1), Some("hxllo"));
    }
}
