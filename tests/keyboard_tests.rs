use keytemper::geometry::Keyboard;
use std::fs;

#[test]
fn keyboard_round_trips_through_json() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("board.json");

    let board = Keyboard::standard();
    fs::write(&path, serde_json::to_string_pretty(&board).unwrap()).unwrap();

    let loaded = Keyboard::load_from_file(&path).expect("load");
    assert_eq!(loaded.key_count(), board.key_count());
    assert_eq!(loaded.fingers, board.fingers);
    assert_eq!(loaded.home_keys, board.home_keys);
    assert_eq!(loaded.mask, board.mask);
}

#[test]
fn mismatched_tables_fail_to_load() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("board.json");

    let mut board = Keyboard::standard();
    board.fingers.pop();
    fs::write(&path, serde_json::to_string(&board).unwrap()).unwrap();

    assert!(Keyboard::load_from_file(&path).is_err());
}

#[test]
fn malformed_json_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("board.json");
    fs::write(&path, "{ not json").unwrap();

    let err = Keyboard::load_from_file(&path).unwrap_err();
    assert!(matches!(err, keytemper::KeytemperError::Json(_)));
}
