use crate::common::harness::EditorTestHarness;
use notavi::config::Config;
use notavi::input::Key;

#[test]
fn test_quit_with_clean_buffer() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.send_key(Key::Ctrl('q')).unwrap();
    assert!(harness.editor().should_quit());
}

/// Unsaved changes need three consecutive Ctrl-Q presses
#[test]
fn test_quit_with_unsaved_changes_warns_first() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("draft").unwrap();

    harness.send_key(Key::Ctrl('q')).unwrap();
    assert!(!harness.editor().should_quit());
    assert_eq!(
        harness.message_bar(),
        "WARNING!!! File has unsaved changes. Press Ctrl-Q 2 more times to quit."
    );

    harness.send_key(Key::Ctrl('q')).unwrap();
    assert!(!harness.editor().should_quit());
    assert!(harness.message_bar().contains("Press Ctrl-Q 1 more times"));

    harness.send_key(Key::Ctrl('q')).unwrap();
    assert!(harness.editor().should_quit());
}

#[test]
fn test_any_other_key_rearms_quit_warning() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("draft").unwrap();

    harness.send_key(Key::Ctrl('q')).unwrap();
    harness.send_key(Key::Ctrl('q')).unwrap();
    harness.send_key(Key::Ctrl('l')).unwrap();
    harness.send_key(Key::Ctrl('q')).unwrap();
    harness.send_key(Key::Ctrl('q')).unwrap();
    assert!(!harness.editor().should_quit());

    harness.send_key(Key::Ctrl('q')).unwrap();
    assert!(harness.editor().should_quit());
}

#[test]
fn test_quit_times_from_config() {
    let config = Config {
        quit_times: 0,
        ..Config::default()
    };
    let mut harness = EditorTestHarness::with_config(config, 80, 24).unwrap();
    harness.type_text("draft").unwrap();
    harness.send_key(Key::Ctrl('q')).unwrap();
    assert!(harness.editor().should_quit());
}
