//! Small helpers for staged JSON validation.
//!
//! serde's derived errors collapse missing fields, wrong types, and
//! duplicate names into one string; map definitions need them kept apart,
//! so required fields are pulled out of a `serde_json::Value` explicitly.

use serde_json::Value;

use crate::SchemaViolation;

pub fn require<'a>(obj: &'a Value, field: &str) -> Result<&'a Value, SchemaViolation> {
    obj.get(field)
        .ok_or_else(|| SchemaViolation::MissingField(field.to_string()))
}

pub fn as_object<'a>(
    value: &'a Value,
    field: &str,
) -> Result<&'a serde_json::Map<String, Value>, SchemaViolation> {
    value.as_object().ok_or_else(|| SchemaViolation::WrongType {
        field: field.to_string(),
        expected: "object",
    })
}

pub fn as_array<'a>(value: &'a Value, field: &str) -> Result<&'a Vec<Value>, SchemaViolation> {
    value.as_array().ok_or_else(|| SchemaViolation::WrongType {
        field: field.to_string(),
        expected: "array",
    })
}

pub fn as_str<'a>(value: &'a Value, field: &str) -> Result<&'a str, SchemaViolation> {
    value.as_str().ok_or_else(|| SchemaViolation::WrongType {
        field: field.to_string(),
        expected: "string",
    })
}

pub fn as_f64(value: &Value, field: &str) -> Result<f64, SchemaViolation> {
    value.as_f64().ok_or_else(|| SchemaViolation::WrongType {
        field: field.to_string(),
        expected: "number",
    })
}

pub fn as_i32(value: &Value, field: &str) -> Result<i32, SchemaViolation> {
    value
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| SchemaViolation::WrongType {
            field: field.to_string(),
            expected: "integer",
        })
}

pub fn req_str(obj: &Value, field: &str) -> Result<String, SchemaViolation> {
    Ok(as_str(require(obj, field)?, field)?.to_string())
}

pub fn req_f64(obj: &Value, field: &str) -> Result<f64, SchemaViolation> {
    as_f64(require(obj, field)?, field)
}

pub fn req_i32(obj: &Value, field: &str) -> Result<i32, SchemaViolation> {
    as_i32(require(obj, field)?, field)
}
