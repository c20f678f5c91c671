//! # ebot-export
//!
//! The export core: time-range token parsing, the paginated history-fetch loop,
//! JSON serialization with a delivery size cap, and the command dispatcher that
//! ties them to a [`ebot_core::Bot`] and [`ebot_core::HistoryProvider`].

pub mod dispatcher;
pub mod exporter;
pub mod fetcher;
pub mod timerange;

pub use dispatcher::{classify_fetch_failure, CommandDispatcher};
pub use exporter::{export_filename, serialize_export, MAX_EXPORT_BYTES};
pub use fetcher::fetch_messages_in_range;
pub use timerange::{parse_time_range, TimeRange, TimeUnit};
