//! Long-lived bot process: login, ready log, serial poll-and-dispatch loop.
//! Per-event failures are logged and never fatal; the loop keeps serving.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use ebot_core::{init_tracing, Bot, HistoryProvider, PAGE_LIMIT};
use ebot_export::CommandDispatcher;
use tracing::{error, info, warn};

use crate::config::DiscordConfig;
use crate::poller::select_new_messages;
use crate::rest::DiscordRestClient;

/// Runs the bot until the process is terminated. Initializes tracing, logs in
/// with the configured token, then polls the watched channels serially,
/// dispatching each new message in arrival order.
pub async fn run_bot(config: DiscordConfig) -> anyhow::Result<()> {
    init_tracing(config.log_file.as_deref())?;

    let client = Arc::new(DiscordRestClient::new(&config)?);
    let me = client.current_user().await?;
    info!(
        user_id = %me.id,
        username = %me.username,
        "Export bot is online. Logged in as {}",
        me.username
    );

    if config.watch_channels.is_empty() {
        warn!("WATCH_CHANNELS is empty; the bot will idle");
    }

    let bot: Arc<dyn Bot> = client.clone();
    let provider: Arc<dyn HistoryProvider> = client.clone();
    let dispatcher = CommandDispatcher::new(bot, provider.clone()).with_self_id(me.id);

    // Per-channel snowflake cursors; the only state across poll cycles.
    let mut cursors: HashMap<String, Option<u64>> = config
        .watch_channels
        .iter()
        .map(|c| (c.clone(), None))
        .collect();

    loop {
        for channel_id in &config.watch_channels {
            let page = match provider.fetch_page(channel_id, PAGE_LIMIT, None).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(channel_id = %channel_id, error = %e, "Poll fetch failed");
                    continue;
                }
            };

            let cursor = cursors.get(channel_id).copied().flatten();
            let (fresh, advanced) = select_new_messages(page, cursor);
            cursors.insert(channel_id.clone(), advanced);

            for message in &fresh {
                if let Err(e) = dispatcher.dispatch(message).await {
                    error!(
                        channel_id = %message.channel_id,
                        author_id = %message.author.id,
                        error = %e,
                        "Dispatch failed"
                    );
                }
            }
        }

        tokio::time::sleep(Duration::from_secs(config.poll_interval_secs)).await;
    }
}
