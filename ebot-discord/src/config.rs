//! Minimal transport config: token, API URL, log path, watched channels.
//! Loaded from the environment: DISCORD_TOKEN, DISCORD_API_URL, LOG_FILE,
//! WATCH_CHANNELS (comma-separated channel ids), POLL_INTERVAL_SECS.

use anyhow::Result;
use std::env;

const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Discord transport configuration. One process, one token.
pub struct DiscordConfig {
    pub bot_token: String,
    /// Overrides the API base URL (e.g. for a local stub in tests).
    pub api_url: Option<String>,
    pub log_file: Option<String>,
    /// Channels the poller watches for commands.
    pub watch_channels: Vec<String>,
    pub poll_interval_secs: u64,
}

impl DiscordConfig {
    /// Loads from environment variables: DISCORD_TOKEN is required, the rest
    /// are optional.
    pub fn from_env() -> Result<Self> {
        let bot_token =
            env::var("DISCORD_TOKEN").map_err(|_| anyhow::anyhow!("DISCORD_TOKEN not set"))?;
        let api_url = env::var("DISCORD_API_URL").ok();
        let log_file = env::var("LOG_FILE").ok();
        let watch_channels = env::var("WATCH_CHANNELS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let poll_interval_secs = env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
        Ok(Self {
            bot_token,
            api_url,
            log_file,
            watch_channels,
            poll_interval_secs,
        })
    }

    /// Constructs with the given token, everything else default.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            api_url: None,
            log_file: None,
            watch_channels: Vec::new(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_token() {
        let config = DiscordConfig::with_token("test_token".to_string());
        assert_eq!(config.bot_token, "test_token");
        assert!(config.api_url.is_none());
        assert!(config.log_file.is_none());
        assert!(config.watch_channels.is_empty());
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
    }
}
