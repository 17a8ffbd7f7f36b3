//! Decoding of generation-service responses.
//!
//! The canonical contract is a bare JSON array of `{front, back}` objects.
//! The legacy envelope `{status, data}` is still accepted; its `data` may be a
//! JSON string (possibly fenced as a markdown code block), an array, or an
//! object carrying a `flashcards` array.

use crate::error::{FlashcardError, Result};
use crate::models::Flashcard;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

lazy_static::lazy_static! {
    static ref CODE_FENCE: Regex =
        Regex::new(r"(?s)^```[A-Za-z0-9_+-]*[ \t]*\r?\n?(.*?)\r?\n?[ \t]*```$").unwrap();
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Strip a surrounding markdown code fence and any prose around the JSON payload.
pub fn clean_json_response(response: &str) -> String {
    let trimmed = response.trim();

    let unfenced = match CODE_FENCE.captures(trimmed) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()).trim(),
        None => trimmed,
    };

    if unfenced.starts_with('[') || unfenced.starts_with('{') {
        return unfenced.to_string();
    }

    // Prose around the payload: keep the outermost array or object.
    let start = unfenced.find(['[', '{']);
    if let Some(start) = start {
        let closer = if unfenced[start..].starts_with('[') { ']' } else { '}' };
        if let Some(end) = unfenced.rfind(closer)
            && end > start
        {
            return unfenced[start..=end].to_string();
        }
    }

    unfenced.to_string()
}

/// Decode a parsed response body from the generation service.
pub fn decode_generation_response(value: Value) -> Result<Vec<Flashcard>> {
    match value {
        Value::Array(_) => cards_from_value(value),
        Value::Object(ref map) if map.contains_key("status") || map.contains_key("data") => {
            decode_envelope(value)
        }
        other => Err(FlashcardError::UnexpectedShape(format!(
            "expected a flashcard array or a {{status, data}} envelope, got {}",
            describe(&other)
        ))),
    }
}

/// Decode flashcards carried as text, e.g. an LLM reply or an envelope's string payload.
pub fn decode_payload_text(text: &str) -> Result<Vec<Flashcard>> {
    let cleaned = clean_json_response(text);
    let value: Value = serde_json::from_str(&cleaned).map_err(|e| {
        FlashcardError::Parse(format!("{}\nRaw: {}\nCleaned: {}", e, text, cleaned))
    })?;
    decode_payload_value(value)
}

fn decode_envelope(value: Value) -> Result<Vec<Flashcard>> {
    let envelope: Envelope = serde_json::from_value(value)
        .map_err(|e| FlashcardError::UnexpectedShape(format!("malformed envelope: {}", e)))?;

    if envelope
        .status
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("error"))
    {
        return Err(FlashcardError::Backend(
            envelope
                .message
                .unwrap_or_else(|| "no message given".to_string()),
        ));
    }

    match envelope.data {
        Some(Value::String(text)) => decode_payload_text(&text),
        Some(Value::Null) | None => Err(FlashcardError::UnexpectedShape(
            "envelope carries no data".to_string(),
        )),
        Some(other) => decode_payload_value(other),
    }
}

fn decode_payload_value(value: Value) -> Result<Vec<Flashcard>> {
    match value {
        Value::Array(_) => cards_from_value(value),
        Value::Object(mut map) => match map.remove("flashcards") {
            Some(cards @ Value::Array(_)) => cards_from_value(cards),
            _ => Err(FlashcardError::UnexpectedShape(
                "payload object has no flashcards array".to_string(),
            )),
        },
        other => Err(FlashcardError::UnexpectedShape(format!(
            "payload is {}",
            describe(&other)
        ))),
    }
}

fn cards_from_value(value: Value) -> Result<Vec<Flashcard>> {
    serde_json::from_value(value).map_err(|e| FlashcardError::Parse(e.to_string()))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
