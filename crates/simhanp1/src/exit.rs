use std::fmt;
use std::io;

use simhanp1_channel::ChannelError;
use simhanp1_emulator::EmulatorError;
use simhanp1_telegram::TelegramError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const CHANNEL_ERROR: i32 = 3;
pub const HEALTH_CHECK_FAILED: i32 = 30;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    CliError::new(code_for_io_kind(err.kind()), format!("{context}: {err}"))
}

fn code_for_io_kind(kind: io::ErrorKind) -> i32 {
    match kind {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::NotFound | io::ErrorKind::BrokenPipe => FAILURE,
        _ => INTERNAL,
    }
}

pub fn channel_error(context: &str, err: ChannelError) -> CliError {
    match err {
        ChannelError::Open { ref source, .. } => {
            let code = match source.kind() {
                serialport::ErrorKind::Io(kind) => code_for_io_kind(kind),
                serialport::ErrorKind::NoDevice => FAILURE,
                _ => CHANNEL_ERROR,
            };
            CliError::new(code, format!("{context}: {err}"))
        }
        ChannelError::Enumerate(_) => CliError::new(CHANNEL_ERROR, format!("{context}: {err}")),
        ChannelError::Io(source) => io_error(context, source),
    }
}

pub fn telegram_error(context: &str, err: TelegramError) -> CliError {
    match err {
        TelegramError::Read { .. } => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        TelegramError::Io(source) => io_error(context, source),
        TelegramError::ChannelClosed => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

pub fn emulator_error(context: &str, err: EmulatorError) -> CliError {
    match err {
        EmulatorError::Channel(err) => channel_error(context, err),
        EmulatorError::Telegram(err) => telegram_error(context, err),
    }
}
