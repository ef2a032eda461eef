use std::io::Cursor;
use std::path::PathBuf;

use crate::app::AppError;
use crate::cli::PlantFieldArgs;
use crate::dispatch::{confirm, parse_at, plant_input, plant_patch, read_push_input};

fn unique_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::now_v7()));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn fields() -> PlantFieldArgs {
    PlantFieldArgs {
        watering_frequency: Some("1x sehari".to_string()),
        watering_day: None,
        fertilizing_frequency: None,
        fertilizing_day: Some("Rabu".to_string()),
        location: Some(String::new()),
        notes: None,
        photo_uri: None,
    }
}

#[test]
fn parse_at_accepts_rfc3339_with_offset() {
    assert_eq!(parse_at(None).expect("none is fine"), None);
    let utc = parse_at(Some("2025-03-05T01:00:00Z")).expect("utc parses");
    let jakarta = parse_at(Some("2025-03-05T08:00:00+07:00")).expect("offset parses");
    assert_eq!(utc, jakarta);
    assert!(matches!(
        parse_at(Some("yesterday")),
        Err(AppError::InvalidArgument(_))
    ));
}

#[test]
fn confirm_accepts_only_yes_answers() {
    for (answer, expected) in [
        ("y\n", true),
        ("YES\n", true),
        ("n\n", false),
        ("\n", false),
        ("", false),
    ] {
        let mut input = Cursor::new(answer.as_bytes().to_vec());
        let mut out = Vec::new();
        let accepted = confirm("Delete?", &mut input, &mut out).expect("prompt should work");
        assert_eq!(accepted, expected, "answer {answer:?}");
        assert_eq!(String::from_utf8(out).expect("utf8"), "Delete? [y/N] ");
    }
}

#[test]
fn plant_field_args_map_onto_input_and_patch() {
    let input = plant_input("Fern".to_string(), fields());
    assert_eq!(input.name, "Fern");
    assert_eq!(input.watering_frequency.as_deref(), Some("1x sehari"));
    assert_eq!(input.fertilizing_day.as_deref(), Some("Rabu"));

    let patch = plant_patch(None, fields());
    assert!(patch.name.is_none());
    assert_eq!(patch.location.as_deref(), Some(""));
}

#[test]
fn push_input_is_read_from_file() {
    let dir = unique_dir("leafy-main-push");
    let path = dir.join("message.json");
    std::fs::write(&path, r#"{"notification":{"title":"t"}}"#).expect("write message");
    let raw = read_push_input(Some(&path)).expect("file should be readable");
    assert!(raw.contains("\"title\""));

    let missing = read_push_input(Some(&dir.join("absent.json")));
    assert!(matches!(missing, Err(AppError::Io(_))));
    let _ = std::fs::remove_dir_all(dir);
}
