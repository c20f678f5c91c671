//! Core types: author, chat message, message handle, and the export record shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message author identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub username: String,
    /// Whether the author is a bot account (including this bot itself).
    pub is_bot: bool,
}

/// A single chat message as delivered by the platform. Read-only to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub author: Author,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub channel_id: String,
}

/// Handle to a message the bot sent, kept so the status reply can be edited later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHandle {
    pub channel_id: String,
    pub message_id: String,
}

/// Author projection inside an [`ExportRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportAuthor {
    pub id: String,
    pub username: String,
}

/// Serializable projection of a [`ChatMessage`] for export. No message id field;
/// the export is a flattened view for external consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub author: ExportAuthor,
    pub content: String,
    /// ISO-8601 UTC with millisecond precision and `Z` suffix.
    pub timestamp: String,
}

impl ExportRecord {
    /// Projects a chat message into its export shape.
    pub fn from_message(message: &ChatMessage) -> Self {
        Self {
            author: ExportAuthor {
                id: message.author.id.clone(),
                username: message.author.username.clone(),
            },
            content: message.content.clone(),
            timestamp: message
                .created_at
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_message() -> ChatMessage {
        ChatMessage {
            id: "1".to_string(),
            author: Author {
                id: "111".to_string(),
                username: "Alice".to_string(),
                is_bot: false,
            },
            content: "Hello there".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap(),
            channel_id: "channel-123".to_string(),
        }
    }

    #[test]
    fn test_export_record_projection() {
        let record = ExportRecord::from_message(&sample_message());
        assert_eq!(record.author.id, "111");
        assert_eq!(record.author.username, "Alice");
        assert_eq!(record.content, "Hello there");
        assert_eq!(record.timestamp, "2026-01-01T10:00:00.000Z");
    }

    #[test]
    fn test_export_record_drops_message_id() {
        let record = ExportRecord::from_message(&sample_message());
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("\"id\":\"1\""));
        assert!(json.contains("\"timestamp\""));
    }
}
