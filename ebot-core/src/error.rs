use thiserror::Error;

#[derive(Error, Debug)]
pub enum EbotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Failures of one export invocation. Both variants are recovered at the
/// dispatcher and turned into a user-facing message; neither is fatal.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The history provider failed; carries the raw cause text so the
    /// dispatcher can classify it.
    #[error("Failed to fetch messages: {0}")]
    Fetch(String),

    /// Encoded payload exceeded the delivery size cap; carries the computed
    /// size in bytes.
    #[error("Export payload too large: {size} bytes")]
    Oversize { size: usize },

    /// The batch could not be encoded to JSON. Not expected for well-formed
    /// records; reported through the generic failure path.
    #[error("Failed to encode export: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, EbotError>;
