//! End-to-end modal flows: decoded events replayed through the dispatcher.

use core_actions::{DispatchResult, dispatch};
use core_events::InputEvent;
use core_state::{MessageKind, Mode, Session};
use core_text::{LineBuffer, WindowPosition};
use pretty_assertions::assert_eq;
use std::path::Path;

fn session(lines: &[&str], height: usize) -> Session {
    session_at("test.txt", lines, height)
}

fn session_at(path: impl AsRef<Path>, lines: &[&str], height: usize) -> Session {
    Session::new(LineBuffer::from_lines(path.as_ref(), lines), height)
}

fn feed(session: &mut Session, events: &[InputEvent]) -> DispatchResult {
    let mut last = DispatchResult::clean();
    for &event in events {
        last = dispatch(event, session);
        if last.quit {
            break;
        }
    }
    last
}

fn typed(text: &str) -> Vec<InputEvent> {
    text.chars().map(InputEvent::Printable).collect()
}

/// `:` plus the command text plus Enter.
fn command(text: &str) -> Vec<InputEvent> {
    let mut events = vec![InputEvent::Printable(':')];
    events.extend(typed(text));
    events.push(InputEvent::Enter);
    events
}

fn lines(session: &Session) -> Vec<&str> {
    (1..=session.buffer.num_lines())
        .map(|y| session.buffer.line(y).unwrap())
        .collect()
}

#[test]
fn i_enters_insert_and_escape_leaves() {
    let mut s = session(&["abc"], 5);
    feed(&mut s, &typed("i"));
    assert_eq!(s.mode, Mode::Insert);
    feed(&mut s, &[InputEvent::Escape]);
    assert_eq!(s.mode, Mode::Normal);
}

#[test]
fn insert_advances_cursor_through_the_mapper() {
    // ["abc", "def"], insert 'X' at buffer (1,1) -> "aXbc", cursor (2,1)
    let mut s = session(&["abc", "def"], 5);
    feed(&mut s, &[InputEvent::ArrowRight]);
    feed(&mut s, &typed("iX"));
    assert_eq!(lines(&s), vec!["aXbc", "def"]);
    assert_eq!(s.cursor, WindowPosition::new(2, 1));
    assert_eq!(s.mode, Mode::Insert);
}

#[test]
fn backspace_at_document_start_is_a_noop() {
    let mut s = session(&["abc"], 5);
    feed(&mut s, &typed("i"));
    feed(&mut s, &[InputEvent::Backspace]);
    assert_eq!(lines(&s), vec!["abc"]);
    assert_eq!(s.cursor, WindowPosition::new(0, 1));
}

#[test]
fn backspace_at_column_zero_joins_lines() {
    // ["ab", "cd"] with the cursor at (0,2) -> ["abcd"], cursor at the join
    let mut s = session(&["ab", "cd"], 5);
    feed(&mut s, &[InputEvent::ArrowDown]);
    feed(&mut s, &typed("i"));
    feed(&mut s, &[InputEvent::Backspace]);
    assert_eq!(lines(&s), vec!["abcd"]);
    assert_eq!(s.cursor, WindowPosition::new(2, 1));
}

#[test]
fn enter_in_insert_splits_the_line() {
    let mut s = session(&["abcd"], 5);
    feed(&mut s, &[InputEvent::ArrowRight, InputEvent::ArrowRight]);
    feed(&mut s, &typed("i"));
    feed(&mut s, &[InputEvent::Enter]);
    assert_eq!(lines(&s), vec!["ab", "cd"]);
    assert_eq!(s.cursor, WindowPosition::new(0, 2));
}

#[test]
fn split_at_the_bottom_row_scrolls_the_viewport() {
    let mut s = session(&["a", "b"], 2);
    feed(&mut s, &[InputEvent::ArrowDown]);
    feed(&mut s, &typed("i"));
    feed(&mut s, &[InputEvent::Enter]);
    assert_eq!(lines(&s), vec!["a", "", "b"]);
    assert_eq!(s.viewport.offset, 2);
    assert_eq!(s.buffer_cursor().y, 3);
    assert_eq!(s.cursor.y, 2);
}

#[test]
fn arrows_move_without_leaving_insert() {
    let mut s = session(&["one", "two"], 5);
    feed(&mut s, &typed("i"));
    feed(&mut s, &[InputEvent::ArrowDown, InputEvent::ArrowRight]);
    assert_eq!(s.mode, Mode::Insert);
    assert_eq!(s.cursor, WindowPosition::new(1, 2));
}

#[test]
fn o_opens_below_and_enters_insert() {
    let mut s = session(&["abc", "def"], 5);
    feed(&mut s, &typed("o"));
    assert_eq!(lines(&s), vec!["abc", "", "def"]);
    assert_eq!(s.cursor, WindowPosition::new(0, 2));
    assert_eq!(s.mode, Mode::Insert);
}

#[test]
fn capital_o_opens_above_and_stays_normal() {
    let mut s = session(&["abc", "def"], 5);
    feed(&mut s, &[InputEvent::ArrowDown]);
    feed(&mut s, &typed("O"));
    assert_eq!(lines(&s), vec!["abc", "", "def"]);
    // same window row, now the fresh empty line
    assert_eq!(s.cursor, WindowPosition::new(0, 2));
    assert_eq!(s.mode, Mode::Normal);
}

#[test]
fn zero_and_dollar_jump_within_the_line() {
    let mut s = session(&["abcdef"], 5);
    feed(&mut s, &typed("$"));
    assert_eq!(s.cursor, WindowPosition::new(6, 1));
    // '$' lands on the append position, usable directly from insert mode
    feed(&mut s, &typed("iX"));
    assert_eq!(lines(&s), vec!["abcdefX"]);
    feed(&mut s, &[InputEvent::Escape]);
    feed(&mut s, &typed("0"));
    assert_eq!(s.cursor.x, 0);
}

#[test]
fn g_jumps_to_end_of_file_scrolling_the_viewport() {
    let mut s = session(&["1", "2", "3", "4", "5", "6", "7"], 3);
    feed(&mut s, &typed("G"));
    assert_eq!(s.viewport.offset, 5);
    assert_eq!(s.cursor.y, 3);
    assert_eq!(s.buffer_cursor().y, 7);
}

#[test]
fn quit_bang_stops_the_session() {
    let mut s = session(&["abc"], 5);
    let res = feed(&mut s, &command("q!"));
    assert!(res.quit);
    assert!(!s.running);
}

#[test]
fn write_saves_and_stays_in_command_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let mut s = session_at(&path, &["hello", "world"], 5);
    let res = feed(&mut s, &command("w"));
    assert!(!res.quit);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\nworld\n");
    // dispatch does not auto-return to Normal; Escape is the way out
    assert_eq!(s.mode, Mode::Command);
    let status = s.status.as_ref().unwrap();
    assert_eq!(status.kind, MessageKind::Info);
    assert!(status.text.contains("2L"));
}

#[test]
fn write_quit_saves_then_stops() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let mut s = session_at(&path, &["bye"], 5);
    let res = feed(&mut s, &command("wq"));
    assert!(res.quit);
    assert!(!s.running);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "bye\n");
}

#[test]
fn failed_write_quit_keeps_the_session_alive() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();
    let mut s = session_at(blocker.join("out.txt"), &["data"], 5);
    let res = feed(&mut s, &command("wq"));
    assert!(!res.quit);
    assert!(s.running);
    assert_eq!(s.status.as_ref().unwrap().kind, MessageKind::Error);
    assert_eq!(lines(&s), vec!["data"]);
}

#[test]
fn unknown_commands_are_silently_ignored() {
    let mut s = session(&["abc"], 5);
    feed(&mut s, &command("frobnicate"));
    assert_eq!(s.mode, Mode::Command);
    assert_eq!(lines(&s), vec!["abc"]);
    assert!(s.command_line.is_empty());
    assert!(s.running);
}

#[test]
fn command_backspace_edits_the_accumulator_and_escape_cancels() {
    let mut s = session(&["abc"], 5);
    feed(&mut s, &typed(":wx"));
    feed(&mut s, &[InputEvent::Backspace]);
    assert_eq!(s.command_line.as_str(), "w");
    feed(&mut s, &[InputEvent::Escape]);
    assert_eq!(s.mode, Mode::Normal);
    assert!(s.command_line.is_empty());
}

#[test]
fn find_enters_find_replace_at_the_first_match() {
    // ["foo bar", "bar baz"]: matches (1,4) then (2,0), wrapping navigation
    let mut s = session(&["foo bar", "bar baz"], 5);
    feed(&mut s, &command("find bar"));
    assert_eq!(s.mode, Mode::FindReplace);
    assert_eq!(s.buffer_cursor().x, 4);
    assert_eq!(s.buffer_cursor().y, 1);
    feed(&mut s, &typed("n"));
    assert_eq!(s.buffer_cursor().y, 2);
    assert_eq!(s.buffer_cursor().x, 0);
    feed(&mut s, &typed("n"));
    assert_eq!(s.buffer_cursor().y, 1);
    assert_eq!(s.buffer_cursor().x, 4);
}

#[test]
fn find_scrolls_to_an_offscreen_match() {
    let mut s = session(&["a", "b", "c", "d", "e", "needle f"], 3);
    feed(&mut s, &command("find needle"));
    assert_eq!(s.mode, Mode::FindReplace);
    assert_eq!(s.buffer_cursor().y, 6);
    assert!(s.viewport.contains(6));
}

#[test]
fn find_with_no_match_falls_back_to_normal() {
    let mut s = session(&["nothing here"], 5);
    feed(&mut s, &command("find zzz"));
    assert_eq!(s.mode, Mode::Normal);
    assert!(s.search.is_none());
    assert!(s.status.as_ref().unwrap().text.contains("no match"));
}

#[test]
fn escape_clears_find_replace_state() {
    let mut s = session(&["foo bar"], 5);
    feed(&mut s, &command("find bar"));
    assert!(s.search.is_some());
    feed(&mut s, &[InputEvent::Escape]);
    assert_eq!(s.mode, Mode::Normal);
    assert!(s.search.is_none());
}

#[test]
fn enter_without_replacement_does_nothing() {
    let mut s = session(&["foo bar"], 5);
    feed(&mut s, &command("find bar"));
    let res = feed(&mut s, &[InputEvent::Enter]);
    assert!(!res.dirty);
    assert_eq!(s.mode, Mode::FindReplace);
    assert_eq!(lines(&s), vec!["foo bar"]);
}

#[test]
fn replace_one_advances_then_exhausts_to_normal() {
    let mut s = session(&["foo bar", "bar baz"], 5);
    feed(&mut s, &command("replace bar baz"));
    assert_eq!(s.mode, Mode::FindReplace);
    feed(&mut s, &[InputEvent::Enter]);
    assert_eq!(lines(&s), vec!["foo baz", "bar baz"]);
    assert_eq!(s.mode, Mode::FindReplace);
    assert_eq!(s.buffer_cursor().y, 2);
    feed(&mut s, &[InputEvent::Enter]);
    assert_eq!(lines(&s), vec!["foo baz", "baz baz"]);
    assert_eq!(s.mode, Mode::Normal);
    assert!(s.search.is_none());
}

#[test]
fn replace_all_finishes_in_normal_mode() {
    // "replace bar baz" over ["foo bar", "bar baz"] -> ["foo baz", "baz baz"]
    let mut s = session(&["foo bar", "bar baz"], 5);
    feed(&mut s, &command("replace bar baz"));
    feed(&mut s, &typed("a"));
    assert_eq!(lines(&s), vec!["foo baz", "baz baz"]);
    assert_eq!(s.mode, Mode::Normal);
    assert!(s.search.is_none());
    assert!(s.status.as_ref().unwrap().text.contains("2 replaced"));
}

#[test]
fn malformed_replace_is_a_noop() {
    let mut s = session(&["foo bar"], 5);
    feed(&mut s, &command("replace bar"));
    assert_eq!(s.mode, Mode::Command);
    assert!(s.search.is_none());
    assert_eq!(lines(&s), vec!["foo bar"]);
}

#[test]
fn colon_reaches_command_mode_from_find_replace() {
    let mut s = session(&["foo bar"], 5);
    feed(&mut s, &command("find bar"));
    feed(&mut s, &typed(":"));
    assert_eq!(s.mode, Mode::Command);
    let res = feed(&mut s, &command_tail("q!"));
    assert!(res.quit);
}

/// Command text plus Enter, for when `:` was already pressed.
fn command_tail(text: &str) -> Vec<InputEvent> {
    let mut events = typed(text);
    events.push(InputEvent::Enter);
    events
}
