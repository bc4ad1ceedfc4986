//! Integration tests for the capsule record

use capsule::error::ModelError;
use capsule::model::{Capsule, FixedClock, UnknownKeys, FIELDS, REQUIRED_FIELDS};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Map, Value};

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 11, 3, 16, 45, 12).unwrap())
}

fn as_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn test_capsule_creation() {
    let cap = Capsule::new("test-capsule-v1", "Test Capsule", "1.0.0", "education");

    assert_eq!(cap.capsule_id(), "test-capsule-v1");
    assert_eq!(cap.name(), "Test Capsule");
    assert_eq!(cap.version(), "1.0.0");
    assert_eq!(cap.domain_type(), "education");
}

#[test]
fn test_capsule_required_fields() {
    let cap = Capsule::builder()
        .capsule_id("required-test")
        .name("Required Test")
        .version("1.0.0")
        .domain_type("test")
        .build()
        .unwrap();
    assert_eq!(cap.capsule_id(), "required-test");

    let result = Capsule::builder()
        .name("Missing ID")
        .version("1.0.0")
        .domain_type("test")
        .build();
    assert_eq!(result.unwrap_err(), ModelError::MissingField("capsule_id"));
}

#[test]
fn test_capsule_optional_fields() {
    let cap = Capsule::builder()
        .capsule_id("optional-test")
        .name("Optional Test")
        .version("1.0.0")
        .domain_type("test")
        .description(Some("Test description".to_string()))
        .author(Some("Test Author".to_string()))
        .build()
        .unwrap();

    assert_eq!(cap.description(), Some("Test description"));
    assert_eq!(cap.author(), Some("Test Author"));
}

#[test]
fn test_capsule_timestamps_auto_generated() {
    let cap = Capsule::new("timestamp-test", "Timestamp Test", "1.0.0", "test");

    for stamp in [cap.created(), cap.updated()] {
        assert!(stamp.contains('T'));
        assert!(stamp.contains('+') || stamp.contains('Z'));
        let parsed = DateTime::parse_from_rfc3339(stamp).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }
    assert!(cap.created() <= cap.updated());
}

#[test]
fn test_capsule_to_dict() {
    let cap = Capsule::builder()
        .capsule_id("TCM_Herbs_v1")
        .name("TCM Materia Medica - Herbs")
        .version("1.0.0")
        .domain_type("tcm")
        .build_with_clock(&clock())
        .unwrap();

    let dict = cap.to_dict();

    assert_eq!(dict.len(), FIELDS.len());
    for field in FIELDS {
        assert!(dict.contains_key(field), "missing key {field}");
    }
    assert_eq!(dict["capsule_id"], json!("TCM_Herbs_v1"));
    assert_eq!(dict["name"], json!("TCM Materia Medica - Herbs"));
    assert_eq!(dict["version"], json!("1.0.0"));
    assert_eq!(dict["domain_type"], json!("tcm"));
    assert_eq!(dict["description"], Value::Null);
    assert_eq!(dict["author"], Value::Null);
    assert_eq!(dict["created"], json!("2025-11-03T16:45:12.000000+00:00"));
    assert_eq!(dict["updated"], json!("2025-11-03T16:45:12.000000+00:00"));
}

#[test]
fn test_capsule_from_dict() {
    let data = as_map(json!({
        "capsule_id": "from-dict-test",
        "name": "From Dict Test",
        "version": "2.0.0",
        "domain_type": "reference",
        "description": "Test description"
    }));

    let cap = Capsule::from_dict(&data).unwrap();

    assert_eq!(cap.capsule_id(), "from-dict-test");
    assert_eq!(cap.name(), "From Dict Test");
    assert_eq!(cap.version(), "2.0.0");
    assert_eq!(cap.domain_type(), "reference");
    assert_eq!(cap.description(), Some("Test description"));
    assert!(cap.author().is_none());
    assert!(!cap.created().is_empty());
}

#[test]
fn test_capsule_from_dict_missing_each_required_key() {
    let full = as_map(json!({
        "capsule_id": "x",
        "name": "X",
        "version": "1.0.0",
        "domain_type": "test"
    }));

    for field in REQUIRED_FIELDS {
        let mut data = full.clone();
        data.remove(field);
        let err = Capsule::from_dict(&data).unwrap_err();
        assert_eq!(err, ModelError::MissingField(field));
    }
}

#[test]
fn test_capsule_from_dict_null_timestamps_use_clock() {
    let data = as_map(json!({
        "capsule_id": "null-stamps",
        "name": "Null Stamps",
        "version": "1.0.0",
        "domain_type": "test",
        "created": null,
        "updated": null
    }));

    let cap = Capsule::from_dict_with(&data, UnknownKeys::Reject, &clock()).unwrap();

    assert_eq!(cap.created(), "2025-11-03T16:45:12.000000+00:00");
    assert_eq!(cap.updated(), "2025-11-03T16:45:12.000000+00:00");
}

#[test]
fn test_capsule_from_dict_unknown_key_policy() {
    let data = as_map(json!({
        "capsule_id": "x",
        "name": "X",
        "version": "1.0.0",
        "domain_type": "test",
        "files": []
    }));

    assert!(matches!(
        Capsule::from_dict(&data),
        Err(ModelError::UnknownFields(_))
    ));
    assert!(Capsule::from_dict_with(&data, UnknownKeys::Ignore, &clock()).is_ok());
}

#[test]
fn test_capsule_roundtrip() {
    let original = Capsule::builder()
        .capsule_id("roundtrip-test")
        .name("Roundtrip Test")
        .version("3.0.0")
        .domain_type("education")
        .author(Some("Test Author".to_string()))
        .build()
        .unwrap();

    let restored = Capsule::from_dict(&original.to_dict()).unwrap();

    assert_eq!(restored, original);
}

#[test]
fn test_capsule_json_text_roundtrip() {
    let original = Capsule::builder()
        .capsule_id("json-v1")
        .name("JSON")
        .version("0.9.0")
        .domain_type("reference")
        .description(Some("Stored as text".to_string()))
        .build_with_clock(&clock())
        .unwrap();

    let text = serde_json::to_string(&original).unwrap();
    let restored: Capsule = serde_json::from_str(&text).unwrap();

    assert_eq!(restored, original);
}
