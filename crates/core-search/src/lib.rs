//! Literal find/replace over a line buffer.
//!
//! The engine scans every document line for non-overlapping occurrences of a
//! literal needle and keeps them as an owned, indexable list in document
//! order with an explicit current index. Needles never match across a line
//! boundary; search is strictly within single lines.
//!
//! Replacement mutates the buffer through [`LineBuffer::splice`] and keeps
//! the remaining ranges valid itself: subsequent matches on the same line are
//! shifted by the signed length delta, matches on later lines are untouched.
//! Any *other* buffer mutation invalidates the whole state; callers drop the
//! `SearchState` instead of patching it.

use core_text::{BufferPosition, LineBuffer};
use tracing::debug;

/// One located occurrence of the needle: a half-open buffer-position interval
/// `[start, end)`, always within a single line (`start.y == end.y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRange {
    pub start: BufferPosition,
    pub end: BufferPosition,
}

impl MatchRange {
    fn new(y: usize, start_x: usize, len: usize) -> Self {
        Self {
            start: BufferPosition::new(start_x, y),
            end: BufferPosition::new(start_x + len, y),
        }
    }

    /// True if `(y, x)` falls inside the half-open interval.
    pub fn contains(&self, y: usize, x: usize) -> bool {
        y == self.start.y && x >= self.start.x && x < self.end.x
    }
}

/// Outcome of a single replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// The current index now names the next match in document order.
    Advanced,
    /// No further match exists; the engine is spent and the caller should
    /// drop it and return to Normal mode.
    Exhausted,
}

/// Active search: needle, optional replacement, and the ordered match list.
#[derive(Debug, Clone)]
pub struct SearchState {
    needle: String,
    replacement: Option<String>,
    matches: Vec<MatchRange>,
    current: usize,
}

impl SearchState {
    /// Scan `buffer` for `needle`. Returns `None` when there are zero matches
    /// so the caller falls back to Normal mode instead of entering a dead
    /// search state; the needle must be non-empty.
    pub fn find(
        buffer: &LineBuffer,
        needle: impl Into<String>,
        replacement: Option<String>,
    ) -> Option<Self> {
        let needle = needle.into();
        if needle.is_empty() {
            return None;
        }
        let needle_chars = needle.chars().count();
        let mut matches = Vec::new();
        for y in 1..=buffer.num_lines() {
            let line = buffer.line(y).unwrap_or_default();
            // match_indices yields non-overlapping byte offsets in ascending
            // order; translate each to a character column.
            for (byte_idx, _) in line.match_indices(needle.as_str()) {
                let col = line[..byte_idx].chars().count();
                matches.push(MatchRange::new(y, col, needle_chars));
            }
        }
        debug!(
            target: "search",
            needle = needle.as_str(),
            matches = matches.len(),
            "scan"
        );
        if matches.is_empty() {
            return None;
        }
        Some(Self {
            needle,
            replacement,
            matches,
            current: 0,
        })
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn replacement(&self) -> Option<&str> {
        self.replacement.as_deref()
    }

    pub fn matches(&self) -> &[MatchRange] {
        &self.matches
    }

    /// The designated current match. The list is never empty while the state
    /// is alive, so this always exists.
    pub fn current(&self) -> MatchRange {
        self.matches[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Advance to the successor in document order, wrapping to the first
    /// match after the last.
    pub fn next_match(&mut self) {
        self.current = (self.current + 1) % self.matches.len();
    }

    /// Replace the text at the current match, shift the surviving same-line
    /// ranges, and advance. With no replacement set this is delete-only via
    /// an empty string; callers gate on [`Self::replacement`] for the
    /// interactive path.
    pub fn replace_current(&mut self, buffer: &mut LineBuffer) -> ReplaceOutcome {
        let replacement = self.replacement.clone().unwrap_or_default();
        let rep_chars = replacement.chars().count() as isize;
        let cur = self.matches.remove(self.current);
        let needle_chars = (cur.end.x - cur.start.x) as isize;
        let delta = rep_chars - needle_chars;

        buffer.splice(cur.start.y, cur.start.x, cur.end.x, &replacement);

        // Later matches on the same line slide by the length delta; later
        // lines keep their columns. Earlier matches are untouched by
        // construction (document order).
        for m in &mut self.matches[self.current..] {
            if m.start.y != cur.start.y {
                break;
            }
            m.start.x = (m.start.x as isize + delta) as usize;
            m.end.x = (m.end.x as isize + delta) as usize;
        }

        debug!(
            target: "search",
            line = cur.start.y,
            col = cur.start.x,
            remaining = self.matches.len(),
            "replace"
        );
        if self.current < self.matches.len() {
            ReplaceOutcome::Advanced
        } else {
            ReplaceOutcome::Exhausted
        }
    }

    /// Replace every remaining match, rewinding to the first so occurrences
    /// before the current index are not skipped. Returns the number of
    /// replacements performed; the state is spent afterwards.
    pub fn replace_all(&mut self, buffer: &mut LineBuffer) -> usize {
        self.current = 0;
        let mut count = 0;
        while !self.matches.is_empty() {
            self.replace_current(buffer);
            count += 1;
        }
        count
    }
}
