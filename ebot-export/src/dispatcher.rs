//! Command dispatch: routes inbound messages to the ping or export behavior,
//! owns the user-facing status messages and error translation. Stateless across
//! messages; each export invocation carries its own cursor and status handle.

use std::sync::Arc;

use chrono::Utc;
use ebot_core::{Bot, ChatMessage, ExportError, HistoryProvider, Result};
use tracing::{error, info, warn};

use crate::exporter::{export_filename, serialize_export};
use crate::fetcher::fetch_messages_in_range;
use crate::timerange::parse_time_range;

const PING_REPLY: &str = "Pong! Export bot is alive and listening.";
const USAGE_REPLY: &str = "Usage: !export <time range> (e.g. 7d, 24h, 30m)";
const INVALID_RANGE_REPLY: &str =
    "Invalid time range format. Use <number><d|h|m>, e.g. 7d, 24h or 30m.";
const FETCHING_REPLY: &str = "Fetching messages, this may take a moment...";
const EMPTY_REPLY: &str = "No messages found in the requested time range.";

/// Routes inbound chat messages. Owns the transport handles for the process
/// lifetime; per-invocation state lives on the stack of `dispatch`.
pub struct CommandDispatcher {
    bot: Arc<dyn Bot>,
    provider: Arc<dyn HistoryProvider>,
    /// The bot's own user id, used to ignore its own messages.
    self_id: Option<String>,
}

impl CommandDispatcher {
    pub fn new(bot: Arc<dyn Bot>, provider: Arc<dyn HistoryProvider>) -> Self {
        Self {
            bot,
            provider,
            self_id: None,
        }
    }

    /// Sets the bot's own user id (known after login) so its own messages are
    /// ignored even if the transport does not flag bot authors.
    pub fn with_self_id(mut self, self_id: String) -> Self {
        self.self_id = Some(self_id);
        self
    }

    /// Handles one inbound message. Never returns an error for user mistakes;
    /// unexpected failures are logged with author and channel context and
    /// reported to the user as a generic failure. Never crashes the process.
    pub async fn dispatch(&self, message: &ChatMessage) -> Result<()> {
        if self.is_own_message(message) {
            return Ok(());
        }

        // Exact and prefix matches are on the raw content; padded commands are
        // not commands.
        let content = message.content.as_str();

        if content == "!ping" {
            self.bot.reply_to(message, PING_REPLY).await?;
            return Ok(());
        }

        if content.starts_with("!export") {
            if let Err(e) = self.handle_export(message, content).await {
                error!(
                    author_id = %message.author.id,
                    author = %message.author.username,
                    channel_id = %message.channel_id,
                    error = %e,
                    "Export command failed"
                );
                let text = format!("Something went wrong: {}", e);
                if let Err(reply_err) = self.bot.reply_to(message, &text).await {
                    error!(
                        channel_id = %message.channel_id,
                        error = %reply_err,
                        "Failed to report export failure"
                    );
                }
            }
        }

        Ok(())
    }

    fn is_own_message(&self, message: &ChatMessage) -> bool {
        message.author.is_bot
            || self
                .self_id
                .as_deref()
                .is_some_and(|id| id == message.author.id)
    }

    /// The `!export <range>` flow: parse, status reply, fetch, serialize,
    /// attach. Terminal after one reply cycle.
    async fn handle_export(&self, message: &ChatMessage, content: &str) -> Result<()> {
        let mut tokens = content.split_whitespace();
        let _command = tokens.next();

        let Some(token) = tokens.next() else {
            self.bot.reply_to(message, USAGE_REPLY).await?;
            return Ok(());
        };

        let Some(range) = parse_time_range(token) else {
            self.bot.reply_to(message, INVALID_RANGE_REPLY).await?;
            return Ok(());
        };

        let cutoff = range.cutoff();
        info!(
            channel_id = %message.channel_id,
            token = %token,
            cutoff = %cutoff,
            "step: export started"
        );

        let status = self.bot.reply_to(message, FETCHING_REPLY).await?;

        let batch = match fetch_messages_in_range(
            self.provider.as_ref(),
            &message.channel_id,
            cutoff,
        )
        .await
        {
            Ok(batch) => batch,
            Err(ExportError::Fetch(cause)) => {
                warn!(
                    channel_id = %message.channel_id,
                    cause = %cause,
                    "step: export fetch failed"
                );
                let text = classify_fetch_failure(&cause);
                self.bot.reply_to(message, &text).await?;
                return Ok(());
            }
            Err(other) => return Err(other.into()),
        };

        if batch.is_empty() {
            self.bot.edit_message(&status, EMPTY_REPLY).await?;
            return Ok(());
        }

        let bytes = match serialize_export(&batch) {
            Ok(bytes) => bytes,
            Err(ExportError::Oversize { size }) => {
                let mib = size as f64 / (1024.0 * 1024.0);
                let text = format!(
                    "Export is too large to attach: {:.2} MiB exceeds the 8 MiB limit. \
                     Try a shorter time range.",
                    mib
                );
                self.bot.edit_message(&status, &text).await?;
                return Ok(());
            }
            Err(other) => return Err(other.into()),
        };

        let text = format!("Exported {} messages.", batch.len());
        self.bot.edit_message(&status, &text).await?;

        let filename = export_filename(&message.channel_id, Utc::now());
        self.bot
            .send_file(&message.channel_id, &filename, bytes)
            .await?;

        info!(
            channel_id = %message.channel_id,
            count = batch.len(),
            "step: export delivered"
        );

        Ok(())
    }
}

/// Translates a provider failure cause into a user-facing message. The policy
/// is substring matching on the platform's wording; keeping it in one place
/// means a typed provider error can replace it without touching the dispatcher
/// flow.
pub fn classify_fetch_failure(cause: &str) -> String {
    let lower = cause.to_lowercase();
    if lower.contains("missing permissions") {
        "The bot lacks permission to read message history in this channel.".to_string()
    } else if lower.contains("missing access") {
        "The bot cannot access this channel.".to_string()
    } else {
        format!("Failed to fetch messages: {}", cause)
    }
}
