use pretty_assertions::assert_eq;
use serde_json::json;
use watch_core::{validate_response, FormatError, HomeworkRecord, JsonKind, PollResponse};

#[test]
fn accepts_well_formed_payload_in_order() {
    let payload = json!({
        "homeworks": [
            {"homework_name": "Task2", "status": "reviewing", "id": 2},
            {"homework_name": "Task1", "status": "approved"}
        ],
        "current_date": 1_700_000_000
    });

    let response = validate_response(&payload).expect("valid payload");
    assert_eq!(
        response,
        PollResponse {
            homeworks: vec![
                HomeworkRecord::new("Task2", "reviewing"),
                HomeworkRecord::new("Task1", "approved"),
            ],
            checkpoint: 1_700_000_000,
        }
    );
    assert_eq!(response.newest().map(|hw| hw.name.as_str()), Some("Task2"));
}

#[test]
fn accepts_empty_homework_list() {
    let payload = json!({"homeworks": [], "current_date": 5});
    let response = validate_response(&payload).unwrap();
    assert!(response.homeworks.is_empty());
    assert!(response.newest().is_none());
    assert_eq!(response.checkpoint, 5);
}

#[test]
fn name_aliases_are_accepted_in_priority_order() {
    let payload = json!({
        "homeworks": [
            {"lesson_name": "Lesson", "status": "rejected"},
            {"name": "Plain", "status": "approved"},
            {"homework_name": "Primary", "lesson_name": "Secondary", "status": "approved"}
        ],
        "current_date": 0
    });
    let names: Vec<_> = validate_response(&payload)
        .unwrap()
        .homeworks
        .into_iter()
        .map(|hw| hw.name)
        .collect();
    assert_eq!(names, vec!["Lesson", "Plain", "Primary"]);
}

#[test]
fn unknown_status_passes_structural_validation() {
    let payload = json!({
        "homeworks": [{"homework_name": "Task1", "status": "archived"}],
        "current_date": 1
    });
    let response = validate_response(&payload).unwrap();
    assert_eq!(response.homeworks[0].status, "archived");
}

#[test]
fn rejects_non_object_payload() {
    let err = validate_response(&json!([1, 2])).unwrap_err();
    assert_eq!(
        err,
        FormatError::NotAnObject {
            observed: JsonKind::Array
        }
    );
}

#[test]
fn reports_missing_top_level_keys() {
    let err = validate_response(&json!({"current_date": 1})).unwrap_err();
    assert_eq!(
        err,
        FormatError::MissingKey {
            key: "homeworks",
            expected: JsonKind::Array
        }
    );

    let err = validate_response(&json!({"homeworks": []})).unwrap_err();
    assert_eq!(
        err,
        FormatError::MissingKey {
            key: "current_date",
            expected: JsonKind::Integer
        }
    );
}

#[test]
fn reports_wrong_top_level_types() {
    let err = validate_response(&json!({"homeworks": {}, "current_date": 1})).unwrap_err();
    assert_eq!(
        err,
        FormatError::WrongType {
            key: "homeworks",
            expected: JsonKind::Array,
            observed: JsonKind::Object
        }
    );

    let err = validate_response(&json!({"homeworks": [], "current_date": "1"})).unwrap_err();
    assert_eq!(
        err,
        FormatError::WrongType {
            key: "current_date",
            expected: JsonKind::Integer,
            observed: JsonKind::String
        }
    );

    let err = validate_response(&json!({"homeworks": [], "current_date": 1.5})).unwrap_err();
    assert!(matches!(
        err,
        FormatError::WrongType {
            observed: JsonKind::Float,
            ..
        }
    ));
}

#[test]
fn checkpoint_beyond_i64_is_out_of_range() {
    let err =
        validate_response(&json!({"homeworks": [], "current_date": u64::MAX})).unwrap_err();
    assert!(matches!(
        err,
        FormatError::OutOfRange {
            key: "current_date",
            ..
        }
    ));
}

#[test]
fn reports_entry_index_and_field() {
    let payload = json!({
        "homeworks": [
            {"homework_name": "ok", "status": "approved"},
            {"homework_name": "no status"}
        ],
        "current_date": 1
    });
    let err = validate_response(&payload).unwrap_err();
    assert_eq!(
        err,
        FormatError::MissingField {
            index: 1,
            field: "status",
            expected: JsonKind::String
        }
    );
    assert_eq!(
        err.to_string(),
        "homework #1 is missing field `status` (expected string)"
    );

    let payload = json!({"homeworks": [{"status": "approved"}], "current_date": 1});
    assert_eq!(
        validate_response(&payload).unwrap_err(),
        FormatError::MissingField {
            index: 0,
            field: "homework_name",
            expected: JsonKind::String
        }
    );

    let payload = json!({
        "homeworks": [{"lesson_name": 12, "status": "approved"}],
        "current_date": 1
    });
    assert_eq!(
        validate_response(&payload).unwrap_err(),
        FormatError::WrongFieldType {
            index: 0,
            field: "lesson_name",
            expected: JsonKind::String,
            observed: JsonKind::Integer
        }
    );

    let payload = json!({"homeworks": ["Task1"], "current_date": 1});
    assert_eq!(
        validate_response(&payload).unwrap_err(),
        FormatError::EntryNotAnObject {
            index: 0,
            observed: JsonKind::String
        }
    );
}
