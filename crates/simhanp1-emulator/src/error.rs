use simhanp1_channel::ChannelError;
use simhanp1_telegram::TelegramError;

/// Errors that can abort an emulator run.
#[derive(Debug, thiserror::Error)]
pub enum EmulatorError {
    /// The serial channel failed to open.
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// A payload read or channel write failed mid-cycle.
    #[error(transparent)]
    Telegram(#[from] TelegramError),
}

pub type Result<T> = std::result::Result<T, EmulatorError>;
