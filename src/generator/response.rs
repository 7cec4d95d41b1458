//! Response payload decoding.
//!
//! Two service contracts are accepted. The primary one carries the text in a
//! top-level `completion` field; the alternate one nests it in
//! `choices[0].text`. Precedence is fixed: `completion` wins when it is a
//! non-empty string, otherwise the first choice is used. A well-formed object
//! that carries neither decodes to an empty result rather than an error.

use serde_json::Value;

use super::GenerationError;

/// Which part of the payload produced the text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShape {
    Completion(String),
    Choices(String),
    Empty,
}

impl ResponseShape {
    /// Classify a decoded JSON object
    pub fn classify(body: &Value) -> Self {
        let non_empty = |v: Option<&Value>| {
            v.and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        if let Some(text) = non_empty(body.get("completion")) {
            return ResponseShape::Completion(text);
        }

        let first_choice = body
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first());
        if let Some(text) = non_empty(first_choice.and_then(|c| c.get("text"))) {
            return ResponseShape::Choices(text);
        }

        ResponseShape::Empty
    }

    pub fn into_text(self) -> String {
        match self {
            ResponseShape::Completion(text) | ResponseShape::Choices(text) => text,
            ResponseShape::Empty => String::new(),
        }
    }
}

/// Decode a success body and pull out the generated text.
///
/// Fails only when the body is not JSON or not a JSON object.
pub fn extract_text(body: &[u8]) -> Result<ResponseShape, GenerationError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    if !value.is_object() {
        return Err(GenerationError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }

    Ok(ResponseShape::classify(&value))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
