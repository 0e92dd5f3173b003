use serde::{Deserialize, Serialize};

/// The single paste record kept per user. Last write wins; there is no history.
///
/// Field names on the wire are capitalised to stay compatible with existing
/// mobile clients; lower-case keys are accepted on input.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    #[serde(rename = "Identifier", alias = "identifier")]
    pub identifier: String,
    #[serde(rename = "Text", alias = "text", default)]
    pub text: String,
    #[serde(rename = "Time", alias = "time", default)]
    pub time: i64,
}

impl Message {
    /// Creates a record stamped with the current unix time.
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Message {
            identifier: identifier.into(),
            text: text.into(),
            time: chrono::Utc::now().timestamp(),
        }
    }
}

/// Body accepted by `POST /copy`. `Time` is optional and defaults to now.
#[derive(Deserialize, Debug)]
pub struct CopyRequest {
    #[serde(rename = "Identifier", alias = "identifier", default)]
    pub identifier: String,
    #[serde(rename = "Text", alias = "text", default)]
    pub text: String,
    #[serde(rename = "Time", alias = "time", default)]
    pub time: Option<i64>,
}

impl CopyRequest {
    /// Converts the request into a record, rejecting an empty identifier.
    pub fn into_message(self) -> Result<Message, String> {
        if self.identifier.trim().is_empty() {
            return Err("paste record has no identifier".to_string());
        }
        let time = self.time.unwrap_or_else(|| chrono::Utc::now().timestamp());
        Ok(Message {
            identifier: self.identifier,
            text: self.text,
            time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serializes_with_capitalised_keys() {
        let message = Message {
            identifier: "u1".to_string(),
            text: "hello".to_string(),
            time: 1_400_000_000,
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Identifier": "u1", "Text": "hello", "Time": 1_400_000_000})
        );
    }

    #[test]
    fn test_copy_request_defaults_time_to_now() {
        let before = chrono::Utc::now().timestamp();
        let req: CopyRequest =
            serde_json::from_str(r#"{"identifier": "u1", "text": "hello"}"#).unwrap();
        let message = req.into_message().unwrap();
        assert_eq!(message.identifier, "u1");
        assert!(message.time >= before);
    }

    #[test]
    fn test_copy_request_keeps_explicit_time() {
        let req: CopyRequest =
            serde_json::from_str(r#"{"Identifier": "u1", "Text": "x", "Time": 42}"#).unwrap();
        assert_eq!(req.into_message().unwrap().time, 42);
    }

    #[test]
    fn test_copy_request_rejects_empty_identifier() {
        let req: CopyRequest = serde_json::from_str(r#"{"Text": "orphan"}"#).unwrap();
        assert!(req.into_message().is_err());
    }
}
