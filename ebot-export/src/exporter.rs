//! JSON export payload: canonical record array, delivery size cap, filename.

use chrono::{DateTime, SecondsFormat, Utc};
use ebot_core::{ChatMessage, ExportError, ExportRecord};

/// Maximum encoded payload the platform accepts as an attachment (8 MiB).
pub const MAX_EXPORT_BYTES: usize = 8 * 1024 * 1024;

/// Serializes the batch to a UTF-8 JSON array of
/// `{author:{id,username}, content, timestamp}` objects. An empty batch
/// serializes to `[]`. Payloads over [`MAX_EXPORT_BYTES`] fail with
/// [`ExportError::Oversize`] carrying the computed size; the caller must not
/// attempt delivery.
pub fn serialize_export(messages: &[ChatMessage]) -> Result<Vec<u8>, ExportError> {
    let records: Vec<ExportRecord> = messages.iter().map(ExportRecord::from_message).collect();

    let bytes = serde_json::to_vec(&records).map_err(|e| ExportError::Encode(e.to_string()))?;

    if bytes.len() > MAX_EXPORT_BYTES {
        return Err(ExportError::Oversize { size: bytes.len() });
    }

    Ok(bytes)
}

/// Deterministic attachment name: `messages-export-<channelId>-<timestamp>.json`
/// with `:` and `.` in the timestamp replaced by `-` so the name is safe for
/// filesystems and attachment APIs.
pub fn export_filename(channel_id: &str, now: DateTime<Utc>) -> String {
    let stamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("messages-export-{}-{}.json", channel_id, stamp)
}
