//! Tests for the public construction and inspection API.
//!
//! These exercise the crate the way an embedding collaborator would: symbols
//! in, structured records out.

use chordspace_theory::{
    build_chord, build_scale, parse_chord_symbol, QualityTable, ScaleTable, TheoryError,
};

#[test]
fn chord_from_symbols() {
    let chord = build_chord("C", "maj7", &QualityTable::default()).unwrap();
    let description = chord.describe();
    assert_eq!(description.notes, vec!["C", "E", "G", "B"]);
    assert_eq!(description.pitch_classes, vec![0, 4, 7, 11]);
    assert_eq!(description.quality, "maj7");
    assert_eq!(description.bass, "C");
}

#[test]
fn inversion_changes_voicing_not_membership() {
    let chord = build_chord("C", "maj", &QualityTable::default()).unwrap();
    let first = chord.invert(1);
    let description = first.describe();
    assert_eq!(description.bass, "E");
    assert_eq!(description.notes, vec!["E", "G", "C"]);
    assert_eq!(description.pitch_classes, vec![0, 4, 7]);
}

#[test]
fn scale_from_symbols() {
    let c_major = build_scale("C", "major", &ScaleTable::default()).unwrap();
    let dorian = c_major.mode(1);
    let description = dorian.describe();
    assert_eq!(description.tonic, "D");
    assert_eq!(description.degrees, vec!["D", "E", "F", "G", "A", "B", "C"]);
    assert_eq!(description.pitch_classes, vec![0, 2, 4, 5, 7, 9, 11]);
}

#[test]
fn descriptions_serialize_for_renderers() {
    let chord = parse_chord_symbol("F#m7/A", &QualityTable::default()).unwrap();
    let json = serde_json::to_string(&chord.describe()).unwrap();
    assert!(json.contains("\"quality\":\"m7\""));
    assert!(json.contains("\"inversion\":1"));

    let scale = build_scale("Bb", "mixolydian", &ScaleTable::default()).unwrap();
    let json = serde_json::to_string(&scale.describe()).unwrap();
    assert!(json.contains("\"tonic\":\"Bb\""));
}

#[test]
fn construction_errors_carry_codes() {
    let table = QualityTable::default();
    let errors = [
        build_chord("X", "maj", &table).unwrap_err(),
        build_chord("C", "nope", &table).unwrap_err(),
        build_scale("C", "nope", &ScaleTable::default()).unwrap_err(),
        parse_chord_symbol("C/F#", &table).unwrap_err(),
    ];
    let codes: Vec<&str> = errors.iter().map(TheoryError::code).collect();
    assert_eq!(codes, vec!["THEORY_003", "THEORY_004", "THEORY_005", "THEORY_006"]);
}
