//! # ebot-core
//!
//! Core types and traits for the chat-history export bot: [`Bot`], [`HistoryProvider`],
//! message and export-record types, error taxonomy, and tracing initialization.
//! Transport-agnostic; used by ebot-export and ebot-discord.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, HistoryProvider, PAGE_LIMIT};
pub use error::{EbotError, ExportError, Result};
pub use logger::init_tracing;
pub use types::{Author, ChatMessage, ExportAuthor, ExportRecord, MessageHandle};
