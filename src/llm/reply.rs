//! Parsing the model's reply into an [`ExtractionResult`]

use serde_json::{Map, Value};

use crate::models::{ExtractionResult, NOT_AVAILABLE};

use super::error::{ExtractionError, LlmResult};

/// Maximum reply length quoted back in error messages
const EXCERPT_CHARS: usize = 200;

/// Parse a reply that must be exactly one JSON object with the four keys
///
/// A single surrounding markdown code fence is tolerated; any other text
/// around the object is a malformed reply. String and number values are
/// kept as their text, `null` becomes `"N/A"`.
pub fn parse_extraction(reply: &str) -> LlmResult<ExtractionResult> {
    let body = strip_code_fence(reply);
    if body.is_empty() {
        return Err(ExtractionError::EmptyReply);
    }

    let value: Value = serde_json::from_str(body).map_err(|e| ExtractionError::MalformedReply {
        reason: e.to_string(),
        excerpt: excerpt(body),
    })?;

    let Value::Object(object) = value else {
        return Err(ExtractionError::NotAnObject {
            excerpt: excerpt(body),
        });
    };

    Ok(ExtractionResult {
        pick: field(&object, "Pick")?,
        odds: field(&object, "Odds")?,
        sport: field(&object, "Sport")?,
        unit: field(&object, "Unit")?,
    })
}

fn field(object: &Map<String, Value>, key: &'static str) -> LlmResult<String> {
    match object.get(key) {
        None => Err(ExtractionError::MissingField(key)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Null) => Ok(NOT_AVAILABLE.to_string()),
        Some(Value::Bool(_)) => Err(unsupported(key, "boolean")),
        Some(Value::Array(_)) => Err(unsupported(key, "array")),
        Some(Value::Object(_)) => Err(unsupported(key, "object")),
    }
}

fn unsupported(field: &'static str, kind: &'static str) -> ExtractionError {
    ExtractionError::UnsupportedValue { field, kind }
}

/// Remove one surrounding ```` ``` ```` or ```` ```json ```` fence, if present
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim()
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}
