use std::time::Duration;

/// Default serial device, matching the P1 port the original fixture used.
pub const DEFAULT_DEVICE: &str = "/dev/ttyS10";

/// Default baud rate. HAN P1 ports transmit at 115200.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default port timeout. The emulator never reads, but the timeout is
/// applied to the port so a wedged device cannot block forever.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Serial channel parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    /// Device name: a TTY path on Unix (`/dev/ttyUSB0`), a COM name on
    /// Windows (`COM6`).
    pub device: String,
    /// Symbol rate in baud.
    pub baud_rate: u32,
    /// Timeout applied to the opened port.
    pub read_timeout: Duration,
}

impl SerialConfig {
    /// Configuration for `device` with default baud rate and timeout.
    pub fn for_device(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            ..Self::default()
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}
