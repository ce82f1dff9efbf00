use std::path::PathBuf;

/// Errors that can occur while reading or emitting telegram payloads.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    /// Failed to read a payload file.
    #[error("failed to read payload {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An I/O error occurred while writing to the channel.
    #[error("telegram I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The channel accepted no bytes (closed or disconnected device).
    #[error("channel closed (write accepted no bytes)")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, TelegramError>;
