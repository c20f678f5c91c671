//! Polling event source: the runner periodically fetches the newest page of
//! each watched channel and delivers messages above the per-channel snowflake
//! cursor, oldest first. The first poll only primes the cursor so old history
//! is not replayed as commands.

use ebot_core::ChatMessage;

/// Splits a newest-first page into the messages newer than `cursor` (returned
/// oldest first, ready for serial dispatch) and the advanced cursor. Snowflake
/// ids are numeric and time-ordered; unparsable ids are skipped.
pub fn select_new_messages(
    page_newest_first: Vec<ChatMessage>,
    cursor: Option<u64>,
) -> (Vec<ChatMessage>, Option<u64>) {
    let newest_id = page_newest_first
        .iter()
        .filter_map(|m| m.id.parse::<u64>().ok())
        .max();

    let Some(cursor) = cursor else {
        // First poll: prime the cursor, deliver nothing.
        return (Vec::new(), newest_id);
    };

    let mut fresh: Vec<ChatMessage> = page_newest_first
        .into_iter()
        .filter(|m| m.id.parse::<u64>().map(|id| id > cursor).unwrap_or(false))
        .collect();
    fresh.reverse();

    let advanced = newest_id.map_or(cursor, |id| id.max(cursor));
    (fresh, Some(advanced))
}
