use crate::common::harness::EditorTestHarness;
use notavi::input::Key;
use tempfile::TempDir;

fn harness_with_lines(count: usize, width: u16, height: u16) -> (EditorTestHarness, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("lines.txt");
    let content: String = (0..count).map(|i| format!("line {i}\n")).collect();
    std::fs::write(&path, content).unwrap();

    let mut harness = EditorTestHarness::new(width, height).unwrap();
    harness.open_file(&path).unwrap();
    (harness, temp_dir)
}

#[test]
fn test_moving_down_scrolls_viewport() {
    let (mut harness, _dir) = harness_with_lines(50, 40, 12);
    for _ in 0..15 {
        harness.send_key(Key::ArrowDown).unwrap();
    }

    // 10 text rows: row 15 is the last visible one
    assert_eq!(harness.editor().viewport().rowoff, 6);
    assert_eq!(harness.screen_row(0), "line 6");
    assert_eq!(harness.screen_row(9), "line 15");
    assert_eq!(harness.screen_cursor_position(), (0, 9));
    assert!(harness.status_bar().ends_with("16/50"));

    for _ in 0..10 {
        harness.send_key(Key::ArrowUp).unwrap();
    }
    assert_eq!(harness.screen_row(0), "line 5");
    assert_eq!(harness.screen_cursor_position(), (0, 0));
}

#[test]
fn test_long_row_scrolls_horizontally() {
    let mut harness = EditorTestHarness::new(20, 6).unwrap();
    let long: String = (0..100).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
    harness.type_text(&long).unwrap();

    assert_eq!(harness.editor().viewport().coloff, 81);
    assert_eq!(harness.screen_cursor_position(), (19, 0));
    assert_eq!(harness.screen_row(0), &long[81..]);

    harness.send_key(Key::Home).unwrap();
    assert_eq!(harness.editor().viewport().coloff, 0);
    assert_eq!(harness.screen_row(0), &long[..20]);
}

#[test]
fn test_page_down_and_page_up() {
    let (mut harness, _dir) = harness_with_lines(50, 40, 12);

    harness.send_key(Key::PageDown).unwrap();
    assert_eq!(harness.cursor_position(), (0, 19));
    assert_eq!(harness.screen_row(0), "line 10");

    harness.send_key(Key::PageDown).unwrap();
    assert_eq!(harness.cursor_position(), (0, 29));
    assert_eq!(harness.screen_row(0), "line 20");

    harness.send_key(Key::PageUp).unwrap();
    assert_eq!(harness.cursor_position(), (0, 10));
    assert_eq!(harness.screen_row(0), "line 10");

    harness.send_key(Key::PageUp).unwrap();
    assert_eq!(harness.cursor_position(), (0, 0));
    assert_eq!(harness.screen_row(0), "line 0");
}

#[test]
fn test_page_down_stops_past_last_row() {
    let (mut harness, _dir) = harness_with_lines(5, 40, 12);
    harness.send_key(Key::PageDown).unwrap();
    assert_eq!(harness.cursor_position(), (0, 5));
    assert_eq!(harness.screen_row(5), "~");
}

#[test]
fn test_resize_moves_bars() {
    let (mut harness, _dir) = harness_with_lines(50, 40, 12);
    harness.resize(60, 6).unwrap();

    assert_eq!(harness.editor().viewport().screen_rows, 4);
    assert_eq!(harness.screen_row(3), "line 3");
    assert!(harness.status_bar().ends_with("1/50"));
    assert!(harness.status_bar_is_inverse());

    for _ in 0..6 {
        harness.send_key(Key::ArrowDown).unwrap();
    }
    assert_eq!(harness.screen_row(0), "line 3");
    assert_eq!(harness.screen_cursor_position(), (0, 3));
}
