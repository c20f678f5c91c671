//! Paginated history fetch: walk pages backwards from the most recent message
//! until the cutoff boundary is crossed or history runs out.

use chrono::{DateTime, Utc};
use ebot_core::{ChatMessage, EbotError, ExportError, HistoryProvider, PAGE_LIMIT};
use tracing::{debug, info};

/// Collects every message in `channel_id` created at or after `cutoff`,
/// oldest first.
///
/// Stops on the first of: an empty page, a page whose oldest message is
/// strictly older than the cutoff, or a page shorter than the provider's page
/// cap. Relies on the provider contract that pages are newest-first and the
/// `before` cursor walks strictly backwards in time.
///
/// Any provider error aborts the loop; accumulated messages are discarded and
/// the raw cause is surfaced as [`ExportError::Fetch`].
pub async fn fetch_messages_in_range(
    provider: &dyn HistoryProvider,
    channel_id: &str,
    cutoff: DateTime<Utc>,
) -> Result<Vec<ChatMessage>, ExportError> {
    let mut collected: Vec<ChatMessage> = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = provider
            .fetch_page(channel_id, PAGE_LIMIT, cursor.as_deref())
            .await
            .map_err(|e| ExportError::Fetch(cause_text(e)))?;

        if page.is_empty() {
            break;
        }

        let page_len = page.len();
        // Oldest message of the unfiltered page; with a contract-honoring
        // provider this is simply the last entry.
        let Some(oldest) = page.iter().min_by_key(|m| m.created_at).cloned() else {
            break;
        };

        collected.extend(page.into_iter().filter(|m| m.created_at >= cutoff));

        debug!(
            channel_id = %channel_id,
            page_len,
            collected = collected.len(),
            oldest_at = %oldest.created_at,
            "step: history page processed"
        );

        // Boundary crossed: older pages cannot contain qualifying messages.
        if oldest.created_at < cutoff {
            break;
        }

        // A short page means no further history exists.
        if page_len < PAGE_LIMIT {
            break;
        }

        cursor = Some(oldest.id);
    }

    collected.sort_by_key(|m| m.created_at);

    info!(
        channel_id = %channel_id,
        count = collected.len(),
        "step: history fetch finished"
    );

    Ok(collected)
}

/// Unwraps the provider error down to its cause text so classification sees
/// the platform's wording ("Missing Permissions") rather than our framing.
fn cause_text(err: EbotError) -> String {
    match err {
        EbotError::Bot(cause) => cause,
        other => other.to_string(),
    }
}
