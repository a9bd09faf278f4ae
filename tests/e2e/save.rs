use crate::common::harness::EditorTestHarness;
use notavi::input::Key;
use tempfile::TempDir;

#[test]
fn test_save_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("doc.txt");
    std::fs::write(&path, "one\ntwo\n").unwrap();

    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.open_file(&path).unwrap();
    harness.type_text("zero ").unwrap();
    assert!(harness.status_bar().contains("(modified)"));

    harness.send_key(Key::Ctrl('s')).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "zero one\ntwo\n");
    assert_eq!(harness.message_bar(), "13 bytes written to disk");
    assert!(!harness.status_bar().contains("(modified)"));
}

#[test]
fn test_save_as_prompt_names_the_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("fresh.txt");

    let mut harness = EditorTestHarness::new(120, 24).unwrap();
    harness.type_text("hello").unwrap();
    harness.send_key(Key::Ctrl('s')).unwrap();
    assert_eq!(harness.message_bar(), "Save as:");

    harness.type_text(path.to_str().unwrap()).unwrap();
    assert!(harness.message_bar().ends_with("fresh.txt"));
    harness.send_key(Key::Enter).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    assert_eq!(harness.message_bar(), "6 bytes written to disk");
    assert_eq!(harness.editor().document().file_path(), Some(path.as_path()));
}

#[test]
fn test_save_as_edits_and_escape_aborts() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("hello").unwrap();
    harness.send_key(Key::Ctrl('s')).unwrap();
    harness.type_text("abc").unwrap();
    harness.send_key(Key::Backspace).unwrap();
    assert_eq!(harness.message_bar(), "Save as: ab");

    // Empty Enter does not confirm
    harness.send_key(Key::Backspace).unwrap();
    harness.send_key(Key::Backspace).unwrap();
    harness.send_key(Key::Enter).unwrap();
    assert_eq!(harness.message_bar(), "Save as:");

    harness.send_key(Key::Escape).unwrap();
    assert_eq!(harness.message_bar(), "Save aborted");
    assert!(harness.editor().document().file_path().is_none());

    // The prompt did not change the buffer
    harness.assert_buffer_content("hello");
}

#[test]
fn test_open_missing_file_then_save_creates_it() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("new.txt");

    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.open_file(&path).unwrap();
    let shown: String = path.display().to_string().chars().take(20).collect();
    assert!(harness.status_bar().starts_with(&shown));
    assert!(harness.status_bar().contains(" - 0 lines"));

    harness.type_text("content").unwrap();
    harness.send_key(Key::Ctrl('s')).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "content\n");
}

#[cfg(unix)]
#[test]
fn test_readonly_file_is_not_saved() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("locked.txt");
    std::fs::write(&path, "keep\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o444)).unwrap();

    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.open_file(&path).unwrap();
    harness.type_text("x").unwrap();
    harness.send_key(Key::Ctrl('s')).unwrap();

    assert_eq!(harness.message_bar(), "Can't save! File is read-only");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep\n");
    assert!(harness.status_bar().contains("(modified)"));
}
