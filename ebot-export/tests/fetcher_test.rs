//! Integration tests for the paginated history-fetch loop: stop rules, the
//! inclusive/exclusive cutoff boundary, cursor progression, failure surfacing.


use chrono::{Duration, TimeZone, Utc};
use ebot_core::{ExportError, PAGE_LIMIT};
use ebot_export::fetch_messages_in_range;
use mock_transport::{message, page_newest_first, ScriptedProvider};

#[tokio::test]
async fn short_page_stops_after_one_request() {
    let cutoff = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let newer = cutoff + Duration::hours(12);
    let provider = ScriptedProvider::new(vec![Ok(vec![
        message("2", "second", newer + Duration::hours(1)),
        message("1", "first", newer),
    ])]);

    let batch = fetch_messages_in_range(&provider, "channel-123", cutoff)
        .await
        .unwrap();

    assert_eq!(batch.len(), 2);
    assert!(batch[0].created_at < batch[1].created_at);
    assert_eq!(provider.requested_cursors(), vec![None]);
}

#[tokio::test]
async fn full_page_advances_cursor_to_oldest_id() {
    let cutoff = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let first_page = page_newest_first(100, PAGE_LIMIT, cutoff + Duration::hours(1));
    let second_page = vec![message("5", "older", cutoff - Duration::hours(1))];
    let provider = ScriptedProvider::new(vec![Ok(first_page), Ok(second_page)]);

    let batch = fetch_messages_in_range(&provider, "channel-123", cutoff)
        .await
        .unwrap();

    // Second page's only message is older than the cutoff: filtered out, and
    // the boundary stop fires.
    assert_eq!(batch.len(), PAGE_LIMIT);
    assert_eq!(
        provider.requested_cursors(),
        vec![None, Some("100".to_string())]
    );
}

#[tokio::test]
async fn empty_channel_returns_empty_batch() {
    let cutoff = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let provider = ScriptedProvider::empty();

    let batch = fetch_messages_in_range(&provider, "channel-123", cutoff)
        .await
        .unwrap();

    assert!(batch.is_empty());
}

#[tokio::test]
async fn oldest_older_than_cutoff_stops_even_on_full_page() {
    let cutoff = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    // Full page whose oldest message precedes the cutoff: survivors are kept
    // but no further page is requested.
    let mut page = page_newest_first(100, PAGE_LIMIT - 1, cutoff + Duration::minutes(5));
    page.push(message("99", "too old", cutoff - Duration::minutes(1)));
    let provider = ScriptedProvider::new(vec![Ok(page)]);

    let batch = fetch_messages_in_range(&provider, "channel-123", cutoff)
        .await
        .unwrap();

    assert_eq!(batch.len(), PAGE_LIMIT - 1);
    assert_eq!(provider.requested_cursors(), vec![None]);
}

#[tokio::test]
async fn message_exactly_at_cutoff_is_included() {
    let cutoff = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    // Oldest of a full page sits exactly on the cutoff: it is included and the
    // loop keeps going (stop check is strictly-older).
    let page = page_newest_first(100, PAGE_LIMIT, cutoff);
    let provider = ScriptedProvider::new(vec![Ok(page)]);

    let batch = fetch_messages_in_range(&provider, "channel-123", cutoff)
        .await
        .unwrap();

    assert_eq!(batch.len(), PAGE_LIMIT);
    assert_eq!(batch[0].created_at, cutoff);
    // The boundary tie did not stop the loop; the follow-up (empty) page did.
    assert_eq!(provider.requested_cursors().len(), 2);
}

#[tokio::test]
async fn provider_failure_discards_partial_results() {
    let cutoff = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let first_page = page_newest_first(100, PAGE_LIMIT, cutoff + Duration::hours(1));
    let provider = ScriptedProvider::new(vec![Ok(first_page), Err("Missing Permissions".into())]);

    let err = fetch_messages_in_range(&provider, "channel-123", cutoff)
        .await
        .unwrap_err();

    match err {
        ExportError::Fetch(cause) => assert_eq!(cause, "Missing Permissions"),
        other => panic!("expected Fetch, got {:?}", other),
    }
}

#[tokio::test]
async fn duplicate_timestamps_neither_drop_nor_duplicate() {
    let cutoff = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let at = cutoff + Duration::hours(1);
    let provider = ScriptedProvider::new(vec![Ok(vec![
        message("3", "c", at),
        message("2", "b", at),
        message("1", "a", at - Duration::minutes(1)),
    ])]);

    let batch = fetch_messages_in_range(&provider, "channel-123", cutoff)
        .await
        .unwrap();

    assert_eq!(batch.len(), 3);
    let mut ids: Vec<&str> = batch.iter().map(|m| m.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn out_of_order_pages_still_terminate() {
    let cutoff = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    // Second page is newer than the first, violating the decreasing-time
    // contract. The loop still terminates (cursor always advances to the
    // requested page's oldest id) and the output is still ascending.
    let first = page_newest_first(100, PAGE_LIMIT, cutoff + Duration::hours(1));
    let second = page_newest_first(300, PAGE_LIMIT - 1, cutoff + Duration::hours(10));
    let provider = ScriptedProvider::new(vec![Ok(first), Ok(second)]);

    let batch = fetch_messages_in_range(&provider, "channel-123", cutoff)
        .await
        .unwrap();

    assert_eq!(batch.len(), PAGE_LIMIT + PAGE_LIMIT - 1);
    assert!(batch.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}
