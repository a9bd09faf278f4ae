use crate::common::harness::EditorTestHarness;
use notavi::input::Key;

fn harness_with(lines: &[&str], width: u16, height: u16) -> EditorTestHarness {
    let mut harness = EditorTestHarness::new(width, height).unwrap();
    harness.type_text(&lines.join("\n")).unwrap();
    harness.send_keys(&vec![Key::ArrowUp; lines.len()]).unwrap();
    harness.send_key(Key::Home).unwrap();
    harness
}

#[test]
fn test_incremental_search_moves_cursor_and_highlights() {
    let mut harness = harness_with(&["alpha", "the foo line", "omega"], 40, 10);
    assert_eq!(harness.cursor_position(), (0, 0));

    harness.send_key(Key::Ctrl('f')).unwrap();
    assert_eq!(harness.message_bar(), "Search:  (Use ESC/Arrows/Enter)");

    harness.type_text("foo").unwrap();
    assert_eq!(harness.message_bar(), "Search: foo (Use ESC/Arrows/Enter)");
    assert_eq!(harness.cursor_position(), (4, 1));

    // The match row is scrolled to the top of the screen
    assert_eq!(harness.screen_row(0), "the foo line");
    assert_eq!(harness.screen_cursor_position(), (4, 0));
    assert!(harness.cell_is_coloured(0, 4));
    assert!(harness.cell_is_coloured(0, 6));
    assert!(!harness.cell_is_coloured(0, 7));
}

#[test]
fn test_escape_restores_cursor_and_scroll() {
    let lines: Vec<String> = (0..40).map(|i| format!("row {i}")).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let mut harness = harness_with(&refs, 40, 10);
    harness.send_key(Key::ArrowDown).unwrap();
    harness.send_key(Key::ArrowRight).unwrap();

    harness.send_key(Key::Ctrl('f')).unwrap();
    harness.type_text("row 30").unwrap();
    assert_eq!(harness.cursor_position(), (0, 30));
    assert_eq!(harness.screen_row(0), "row 30");

    harness.send_key(Key::Escape).unwrap();
    assert_eq!(harness.cursor_position(), (1, 1));
    assert_eq!(harness.screen_row(0), "row 0");
    assert_eq!(harness.message_bar(), "");
    assert!(!harness.cell_is_coloured(0, 0));
}

#[test]
fn test_arrows_step_through_matches_with_wraparound() {
    let mut harness = harness_with(&["foo 1", "bar", "foo 2", "foo 3"], 40, 10);
    harness.send_key(Key::Ctrl('f')).unwrap();
    harness.type_text("foo").unwrap();
    assert_eq!(harness.cursor_position(), (0, 0));

    harness.send_key(Key::ArrowDown).unwrap();
    assert_eq!(harness.cursor_position(), (0, 2));
    harness.send_key(Key::ArrowRight).unwrap();
    assert_eq!(harness.cursor_position(), (0, 3));
    harness.send_key(Key::ArrowDown).unwrap();
    assert_eq!(harness.cursor_position(), (0, 0));

    harness.send_key(Key::ArrowUp).unwrap();
    assert_eq!(harness.cursor_position(), (0, 3));
    harness.send_key(Key::ArrowLeft).unwrap();
    assert_eq!(harness.cursor_position(), (0, 2));
}

#[test]
fn test_enter_keeps_match_and_clears_highlight() {
    let mut harness = harness_with(&["a", "b needle"], 40, 10);
    harness.send_key(Key::Ctrl('f')).unwrap();
    harness.type_text("needle").unwrap();
    harness.send_key(Key::Enter).unwrap();

    assert_eq!(harness.cursor_position(), (2, 1));
    assert_eq!(harness.message_bar(), "");
    assert!(!harness.cell_is_coloured(0, 2));

    // Back in normal mode: keys edit again
    harness.type_text("X").unwrap();
    harness.assert_buffer_content("a\nb Xneedle");
}

#[test]
fn test_search_without_match_leaves_cursor() {
    let mut harness = harness_with(&["abc", "def"], 40, 10);
    harness.send_key(Key::ArrowDown).unwrap();
    harness.send_key(Key::Ctrl('f')).unwrap();
    harness.type_text("zzz").unwrap();
    assert_eq!(harness.cursor_position(), (0, 1));
    harness.send_key(Key::Escape).unwrap();
    assert_eq!(harness.cursor_position(), (0, 1));
}

#[test]
fn test_match_after_tab_places_cursor_on_rendered_column() {
    let mut harness = harness_with(&["\tkey = 1"], 40, 10);
    harness.send_key(Key::Ctrl('f')).unwrap();
    harness.type_text("key").unwrap();
    assert_eq!(harness.cursor_position(), (1, 0));
    assert_eq!(harness.screen_cursor_position(), (8, 0));
    assert!(harness.cell_is_coloured(0, 8));
}
