use visual_core::*;

const TABLE_JSON: &str = r#"{
    "default": "intro",
    "sections": [
        { "id": "intro", "preset": "tesseract", "intensity": 0.4, "speed": 1.0, "hue": 210, "rgbOffset": 0.002 },
        { "id": "work", "preset": "24-cell", "form": "icositetrachoron", "intensity": 0.7, "chaos": 0.3,
          "speed": 1.4, "hue": 30, "rgbOffset": 0.005, "moireIntensity": 0.2, "rotationPulse": 0.25, "pinned": true }
    ]
}"#;

#[test]
fn loads_table_from_json() {
    let table = ProfileTable::from_json(TABLE_JSON).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.default_profile().id, "intro");
    let work = table.get("work").unwrap();
    assert!(work.pinned);
    assert_eq!(work.form.as_deref(), Some("icositetrachoron"));
    assert!((work.rotation_pulse - 0.25).abs() < 1e-6);
}

#[test]
fn omitted_optional_fields_default_to_zero() {
    let table = ProfileTable::from_json(TABLE_JSON).unwrap();
    let intro = table.get("intro").unwrap();
    assert_eq!(intro.chaos, 0.0);
    assert_eq!(intro.moire_intensity, 0.0);
    assert_eq!(intro.rotation_pulse, 0.0);
    assert!(intro.form.is_none());
    assert!(!intro.pinned);
}

#[test]
fn default_section_falls_back_to_first() {
    let json = r#"{ "sections": [
        { "id": "a", "preset": "p", "intensity": 0.1, "speed": 0.5, "hue": 0, "rgbOffset": 0.0 },
        { "id": "b", "preset": "q", "intensity": 0.2, "speed": 0.5, "hue": 90, "rgbOffset": 0.0 }
    ] }"#;
    let table = ProfileTable::from_json(json).unwrap();
    assert_eq!(table.default_profile().id, "a");
}

#[test]
fn rejects_out_of_range_values() {
    let json = r#"{ "sections": [
        { "id": "a", "preset": "p", "intensity": 1.5, "speed": 0.5, "hue": 0, "rgbOffset": 0.0 }
    ] }"#;
    match ProfileTable::from_json(json) {
        Err(OrchestratorError::InvalidProfile { section, field, .. }) => {
            assert_eq!(section, "a");
            assert_eq!(field, "intensity");
        }
        other => panic!("expected InvalidProfile, got {other:?}"),
    }
}

#[test]
fn rejects_duplicates_unknown_default_and_empty() {
    let dup = r#"{ "sections": [
        { "id": "a", "preset": "p", "intensity": 0.1, "speed": 0.5, "hue": 0, "rgbOffset": 0.0 },
        { "id": "a", "preset": "q", "intensity": 0.1, "speed": 0.5, "hue": 0, "rgbOffset": 0.0 }
    ] }"#;
    assert!(matches!(
        ProfileTable::from_json(dup),
        Err(OrchestratorError::DuplicateSection(id)) if id == "a"
    ));

    let bad_default = r#"{ "default": "zzz", "sections": [
        { "id": "a", "preset": "p", "intensity": 0.1, "speed": 0.5, "hue": 0, "rgbOffset": 0.0 }
    ] }"#;
    assert!(matches!(
        ProfileTable::from_json(bad_default),
        Err(OrchestratorError::UnknownDefault(id)) if id == "zzz"
    ));

    assert!(matches!(
        ProfileTable::from_json(r#"{ "sections": [] }"#),
        Err(OrchestratorError::EmptyProfileTable)
    ));
    assert!(matches!(
        ProfileTable::from_json("not json"),
        Err(OrchestratorError::ProfileParse(_))
    ));
}

#[test]
fn base_vector_wraps_hue() {
    let json = r#"{ "sections": [
        { "id": "a", "preset": "p", "intensity": 0.1, "speed": 0.5, "hue": 400, "rgbOffset": 0.0 }
    ] }"#;
    let table = ProfileTable::from_json(json).unwrap();
    assert!((table.default_profile().base_vector().hue - 40.0).abs() < 1e-4);
}
