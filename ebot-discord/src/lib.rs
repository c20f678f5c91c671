//! # ebot-discord
//!
//! Discord transport layer: reqwest-based REST client implementing
//! [`ebot_core::Bot`] and [`ebot_core::HistoryProvider`], a snowflake-cursor
//! polling event source, minimal env config, and the long-lived runner.
//! Handles only Discord connectivity and dispatch; no export logic lives here.

mod config;
mod poller;
mod rest;
mod runner;

pub use config::DiscordConfig;
pub use poller::select_new_messages;
pub use rest::DiscordRestClient;
pub use runner::run_bot;
