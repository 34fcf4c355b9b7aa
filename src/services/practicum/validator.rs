use serde_json::Value;

use crate::modules::homework::{ApiResponse, HomeworkEntry};
use crate::services::practicum::ApiError;

/// Check a raw payload against the expected schema and re-type it.
///
/// Fails closed: anything other than an object carrying a `homeworks` array
/// and an integer `current_date` is a [`ApiError::Shape`]. Only the first
/// entry is tracked, so only it must be a `{homework_name, status}` object;
/// later entries pass through untouched.
pub fn validate(payload: Value) -> Result<ApiResponse, ApiError> {
    let mut object = match payload {
        Value::Object(object) => object,
        other => {
            return Err(ApiError::Shape(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            )))
        }
    };

    let homeworks = match object.remove("homeworks") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ApiError::Shape(format!(
                "'homeworks' must be a list, got {}",
                kind_of(&other)
            )))
        }
        None => return Err(ApiError::Shape("missing 'homeworks' key".to_string())),
    };

    let current_date = match object.get("current_date") {
        Some(Value::Number(n)) if n.is_u64() && n.as_i64().is_none() => {
            return Err(ApiError::Shape(format!(
                "'current_date' out of range: {}",
                n
            )))
        }
        Some(value) => value.as_i64().ok_or_else(|| {
            ApiError::Shape(format!(
                "'current_date' must be an integer, got {}",
                kind_of(value)
            ))
        })?,
        None => return Err(ApiError::Shape("missing 'current_date' key".to_string())),
    };

    let mut homeworks = homeworks.into_iter();
    let latest = homeworks
        .next()
        .map(|item| {
            serde_json::from_value::<HomeworkEntry>(item)
                .map_err(|e| ApiError::Shape(format!("homeworks[0]: {}", e)))
        })
        .transpose()?;

    Ok(ApiResponse {
        latest,
        older: homeworks.collect(),
        current_date,
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
