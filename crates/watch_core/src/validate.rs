use std::fmt;

use serde_json::{Map, Value};

use crate::{Checkpoint, HomeworkRecord, PollResponse};

const HOMEWORKS_KEY: &str = "homeworks";
const CHECKPOINT_KEY: &str = "current_date";
/// Keys the assignment name has been published under, in lookup order.
const NAME_KEYS: [&str; 3] = ["homework_name", "lesson_name", "name"];
const STATUS_KEY: &str = "status";

/// Coarse JSON type used in validation diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Float,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "bool",
            JsonKind::Integer => "integer",
            JsonKind::Float => "float",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("response payload must be an object, got {observed}")]
    NotAnObject { observed: JsonKind },
    #[error("response is missing key `{key}` (expected {expected})")]
    MissingKey { key: &'static str, expected: JsonKind },
    #[error("response key `{key}` must be {expected}, got {observed}")]
    WrongType {
        key: &'static str,
        expected: JsonKind,
        observed: JsonKind,
    },
    #[error("response key `{key}` holds {value}, which does not fit a checkpoint")]
    OutOfRange { key: &'static str, value: String },
    #[error("homework #{index} must be an object, got {observed}")]
    EntryNotAnObject { index: usize, observed: JsonKind },
    #[error("homework #{index} is missing field `{field}` (expected {expected})")]
    MissingField {
        index: usize,
        field: &'static str,
        expected: JsonKind,
    },
    #[error("homework #{index} field `{field}` must be {expected}, got {observed}")]
    WrongFieldType {
        index: usize,
        field: &'static str,
        expected: JsonKind,
        observed: JsonKind,
    },
}

/// Checks the untyped payload against the expected response shape and builds
/// the typed [`PollResponse`].
///
/// Status codes are not checked against the verdict vocabulary here.
pub fn validate_response(raw: &Value) -> Result<PollResponse, FormatError> {
    let object = raw.as_object().ok_or(FormatError::NotAnObject {
        observed: JsonKind::of(raw),
    })?;

    let entries = match object.get(HOMEWORKS_KEY) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(FormatError::WrongType {
                key: HOMEWORKS_KEY,
                expected: JsonKind::Array,
                observed: JsonKind::of(other),
            })
        }
        None => {
            return Err(FormatError::MissingKey {
                key: HOMEWORKS_KEY,
                expected: JsonKind::Array,
            })
        }
    };
    let checkpoint = read_checkpoint(object)?;

    let homeworks = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| read_homework(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PollResponse {
        homeworks,
        checkpoint,
    })
}

fn read_checkpoint(object: &Map<String, Value>) -> Result<Checkpoint, FormatError> {
    let value = object.get(CHECKPOINT_KEY).ok_or(FormatError::MissingKey {
        key: CHECKPOINT_KEY,
        expected: JsonKind::Integer,
    })?;
    match JsonKind::of(value) {
        JsonKind::Integer => value
            .as_i64()
            .ok_or_else(|| FormatError::OutOfRange {
                key: CHECKPOINT_KEY,
                value: value.to_string(),
            }),
        observed => Err(FormatError::WrongType {
            key: CHECKPOINT_KEY,
            expected: JsonKind::Integer,
            observed,
        }),
    }
}

fn read_homework(index: usize, entry: &Value) -> Result<HomeworkRecord, FormatError> {
    let fields = entry.as_object().ok_or(FormatError::EntryNotAnObject {
        index,
        observed: JsonKind::of(entry),
    })?;

    let (name_key, name_value) = NAME_KEYS
        .iter()
        .find_map(|key| fields.get(*key).map(|value| (*key, value)))
        .ok_or(FormatError::MissingField {
            index,
            field: NAME_KEYS[0],
            expected: JsonKind::String,
        })?;
    let name = string_field(index, name_key, name_value)?;

    let status_value = fields.get(STATUS_KEY).ok_or(FormatError::MissingField {
        index,
        field: STATUS_KEY,
        expected: JsonKind::String,
    })?;
    let status = string_field(index, STATUS_KEY, status_value)?;

    Ok(HomeworkRecord::new(name, status))
}

fn string_field<'a>(
    index: usize,
    field: &'static str,
    value: &'a Value,
) -> Result<&'a str, FormatError> {
    value.as_str().ok_or(FormatError::WrongFieldType {
        index,
        field,
        expected: JsonKind::String,
        observed: JsonKind::of(value),
    })
}
