//! Serial channel abstraction for the HAN P1 meter emulator.
//!
//! Wraps a platform serial device behind a small `Write`-implementing
//! handle. The emulator only ever transmits; reads are intentionally not
//! exposed even though the underlying port supports them.

mod config;
mod error;
mod serial;

pub use config::{SerialConfig, DEFAULT_BAUD_RATE, DEFAULT_DEVICE, DEFAULT_READ_TIMEOUT};
pub use error::{ChannelError, Result};
pub use serial::{available_ports, PortInfo, SerialChannel};
