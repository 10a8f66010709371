//! Raw JSON edits back into records

use serde_json::Value;

use crate::record::{Field, Mode, Record};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    Parse(String),

    #[error("Invalid JSON structure: {0}")]
    Shape(#[from] ShapeError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("expected a JSON array of records")]
    NotAnArray,

    #[error("the array must contain at least one record")]
    EmptyArray,

    #[error("record {index} is not an object")]
    NotAnObject { index: usize },

    #[error("record {index} is missing '{field}'")]
    MissingField { index: usize, field: Field },

    #[error("record {index} has a non-string '{field}'")]
    NotAString { index: usize, field: Field },
}

/// Parse `text` as a non-empty array of records shaped for `mode`.
///
/// Keys outside the mode's shape are ignored.
pub fn parse(text: &str, mode: Mode) -> Result<Vec<Record>, ValidationError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ValidationError::Parse(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(ShapeError::NotAnArray.into());
    };
    if items.is_empty() {
        return Err(ShapeError::EmptyArray.into());
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| record_from_value(index, item, mode))
        .collect()
}

fn record_from_value(index: usize, item: &Value, mode: Mode) -> Result<Record, ValidationError> {
    let Some(object) = item.as_object() else {
        return Err(ShapeError::NotAnObject { index }.into());
    };

    let mut record = Record::blank(mode);
    for field in mode.fields() {
        let value = object
            .get(field.name())
            .ok_or(ShapeError::MissingField {
                index,
                field: *field,
            })?
            .as_str()
            .ok_or(ShapeError::NotAString {
                index,
                field: *field,
            })?;
        record.set(*field, value.to_string());
    }
    Ok(record)
}
