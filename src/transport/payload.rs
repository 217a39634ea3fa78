// src/transport/payload.rs
//! JSON payloads carried by `message`, `response` and `error` events

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::string::StringUtils;

pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    #[serde(default)]
    pub text: Option<String>,
}

impl ResponsePayload {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }

    /// Anything that is not `{ "text": string }` becomes an empty response.
    pub fn from_value(value: serde_json::Value) -> Self {
        Self {
            text: value.get("text").and_then(|v| v.as_str()).map(str::to_string),
        }
    }

    pub fn into_text(self) -> String {
        self.text.unwrap_or_default()
    }
}

/// Error events arrive either as a bare string or as `{ "message"?: string }`.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    Text(String),
    Object { message: Option<String> },
    Other(Value),
}

impl ErrorPayload {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => ErrorPayload::Text(text),
            Value::Object(map) => match map.get("message").cloned() {
                None | Some(Value::Null) => ErrorPayload::Object { message: None },
                Some(Value::String(message)) => ErrorPayload::Object { message: Some(message) },
                Some(_) => ErrorPayload::Other(Value::Object(map)),
            },
            other => ErrorPayload::Other(other),
        }
    }

    /// Single display string for the notification channel.
    /// Control characters are stripped; the text ends up on screen.
    pub fn display_message(&self) -> String {
        let text = match self {
            ErrorPayload::Text(text) => StringUtils::strip_control_chars(text),
            ErrorPayload::Object { message: Some(message) } => {
                StringUtils::strip_control_chars(message)
            }
            _ => String::new(),
        };
        if text.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            text
        }
    }
}

impl From<&str> for ErrorPayload {
    fn from(text: &str) -> Self {
        ErrorPayload::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_payload_shapes_normalize() {
        assert_eq!(ErrorPayload::from_value(json!("boom")).display_message(), "boom");
        assert_eq!(
            ErrorPayload::from_value(json!({ "message": "boom" })).display_message(),
            "boom"
        );
        assert_eq!(
            ErrorPayload::from_value(json!({})).display_message(),
            FALLBACK_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_error_payload_oddities_fall_back() {
        for value in [
            json!({ "message": "" }),
            json!({ "message": 42 }),
            json!(null),
            json!(["boom"]),
            json!(17),
        ] {
            assert_eq!(
                ErrorPayload::from_value(value.clone()).display_message(),
                FALLBACK_ERROR_MESSAGE,
                "payload {}",
                value
            );
        }
    }

    #[test]
    fn test_error_text_loses_control_characters() {
        let text = ErrorPayload::from_value(json!("bad \x1b]0;x\x07 news")).display_message();
        assert_eq!(text, "bad ]0;x news");

        let object = ErrorPayload::from_value(json!({ "message": "\x1b[2J" })).display_message();
        assert_eq!(object, "[2J");

        let only_controls = ErrorPayload::from_value(json!("\x1b\x07")).display_message();
        assert_eq!(only_controls, FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_response_payload_defaults_to_empty_text() {
        assert_eq!(ResponsePayload::from_value(json!({ "text": "hi" })).into_text(), "hi");
        assert_eq!(ResponsePayload::from_value(json!({})).into_text(), "");
        assert_eq!(ResponsePayload::from_value(json!(null)).into_text(), "");
        assert_eq!(ResponsePayload::from_value(json!({ "text": 3 })).into_text(), "");
    }

    #[test]
    fn test_message_payload_serializes_as_message_field() {
        let value = serde_json::to_value(MessagePayload { message: "I feel anxious".into() }).unwrap();
        assert_eq!(value, json!({ "message": "I feel anxious" }));
    }
}
