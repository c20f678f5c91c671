//! Transport seams: [`Bot`] for outbound messages and [`HistoryProvider`] for
//! paginated channel history. Implementations map to a chat platform (e.g. the
//! Discord REST client in ebot-discord); tests substitute mock implementations.

use crate::error::Result;
use crate::types::{ChatMessage, MessageHandle};
use async_trait::async_trait;

/// Fixed page cap of the history provider.
pub const PAGE_LIMIT: usize = 100;

/// Abstraction for replying to and editing messages and for delivering a file
/// attachment to a channel.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a reply to the given message and returns a handle for later edits
    /// (send status first, then edit it as the export progresses).
    async fn reply_to(&self, message: &ChatMessage, text: &str) -> Result<MessageHandle>;
    /// Edits an already-sent message.
    async fn edit_message(&self, handle: &MessageHandle, text: &str) -> Result<()>;
    /// Sends a named file attachment to the given channel.
    async fn send_file(&self, channel_id: &str, filename: &str, bytes: Vec<u8>) -> Result<()>;
}

/// Paginated channel-history provider. Pages are returned most-recent-first and
/// requested in strictly decreasing time order via the `before` cursor.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetches up to `limit` messages older than `before` (or the most recent
    /// ones when `before` is unset), newest first within the page.
    async fn fetch_page(
        &self,
        channel_id: &str,
        limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<ChatMessage>>;
}
