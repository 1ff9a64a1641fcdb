// src/models.rs

use crate::constants::USER_ID_PREFIX;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Ai,
}

/// How a renderer should interpret a message's text and video URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    PendingVideoGeneration,
    VideoReady,
    TextOnly,
    Error,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::PendingVideoGeneration => "pending_video_generation",
            MessageStatus::VideoReady => "video_ready",
            MessageStatus::TextOnly => "text_only",
            MessageStatus::Error => "error",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the conversation thread.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub status: MessageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// A message typed by the user. User messages are always `text_only`.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: new_message_id(USER_ID_PREFIX),
            sender: Sender::User,
            text: text.into(),
            status: MessageStatus::TextOnly,
            video_url: None,
            created_at: Utc::now(),
        }
    }

    /// A reply from the course assistant. `video_url` is only kept when the
    /// status says the video is ready.
    pub fn ai(
        id: impl Into<String>,
        text: impl Into<String>,
        status: MessageStatus,
        video_url: Option<String>,
    ) -> Self {
        let video_url = video_url.filter(|_| status == MessageStatus::VideoReady);
        Self {
            id: id.into(),
            sender: Sender::Ai,
            text: text.into(),
            status,
            video_url,
            created_at: Utc::now(),
        }
    }

    /// A client-side error reply with a freshly generated id.
    pub fn ai_error(id_prefix: &str, text: impl Into<String>) -> Self {
        Self::ai(new_message_id(id_prefix), text, MessageStatus::Error, None)
    }

    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Client-side ids: `<prefix>-<uuid v4>`.
pub fn new_message_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}

/// Body of `POST /courses/{courseId}/query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub question: String,
}

/// Success body of the query endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub message_id: String,
    pub interim_text: String,
    pub status: MessageStatus,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Failure body of the query endpoint. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The `message` field when it is a non-empty string.
    pub fn message_text(&self) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(|value| value.as_str())
            .filter(|text| !text.is_empty())
    }
}

/// Logs details of each API call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    /// `None` when no HTTP response came back.
    pub response_status: Option<u16>,
    pub response_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_is_text_only() {
        let msg = Message::user("What is ownership?");
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.status, MessageStatus::TextOnly);
        assert!(msg.id.starts_with("user-"));
        assert!(msg.video_url.is_none());
    }

    #[test]
    fn test_ai_message_drops_video_url_unless_ready() {
        let pending = Message::ai(
            "m1",
            "Working on it",
            MessageStatus::PendingVideoGeneration,
            Some("https://cdn.example.com/v.mp4".to_string()),
        );
        assert!(pending.video_url.is_none());

        let ready = Message::ai(
            "m2",
            "Here you go",
            MessageStatus::VideoReady,
            Some("https://cdn.example.com/v.mp4".to_string()),
        );
        assert_eq!(
            ready.video_url.as_deref(),
            Some("https://cdn.example.com/v.mp4")
        );
    }

    #[test]
    fn test_query_response_wire_format() {
        let body = json!({
            "messageId": "m1",
            "interimText": "Hi",
            "status": "pending_video_generation"
        });
        let parsed: QueryResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.message_id, "m1");
        assert_eq!(parsed.interim_text, "Hi");
        assert_eq!(parsed.status, MessageStatus::PendingVideoGeneration);
        assert!(parsed.video_url.is_none());
    }

    #[test]
    fn test_query_response_rejects_unknown_status() {
        let body = json!({ "messageId": "m1", "interimText": "Hi", "status": "done" });
        assert!(serde_json::from_value::<QueryResponse>(body).is_err());
    }

    #[test]
    fn test_error_body_message_text() {
        let body: ErrorBody = serde_json::from_value(json!({ "message": "boom" })).unwrap();
        assert_eq!(body.message_text(), Some("boom"));

        let empty: ErrorBody = serde_json::from_value(json!({ "message": "" })).unwrap();
        assert_eq!(empty.message_text(), None);

        let numeric: ErrorBody = serde_json::from_value(json!({ "message": 42 })).unwrap();
        assert_eq!(numeric.message_text(), None);

        let missing: ErrorBody = serde_json::from_value(json!({ "detail": "x" })).unwrap();
        assert_eq!(missing.message_text(), None);
    }

    #[test]
    fn test_message_serializes_camel_case() {
        let msg = Message::ai("m1", "Hi", MessageStatus::TextOnly, None);
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["sender"], "ai");
        assert_eq!(value["status"], "text_only");
        assert!(value.get("videoUrl").is_none());
        assert!(value.get("createdAt").is_some());
    }
}
