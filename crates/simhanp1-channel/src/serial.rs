use std::io::Write;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::debug;

use crate::config::SerialConfig;
use crate::error::{ChannelError, Result};

/// An open serial channel — implements `Write`.
///
/// P1 ports are transmit-only from the meter's point of view, so this
/// handle exposes only the write half of the underlying port. The port is
/// closed when the channel is dropped.
pub struct SerialChannel {
    inner: Box<dyn SerialPort>,
    device: String,
}

impl SerialChannel {
    /// Open the configured device with 8N1 framing and no flow control.
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let inner = serialport::new(config.device.as_str(), config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.read_timeout)
            .open()
            .map_err(|source| ChannelError::Open {
                device: config.device.clone(),
                source,
            })?;

        debug!(
            device = %config.device,
            baud_rate = config.baud_rate,
            "serial channel open"
        );

        Ok(Self {
            inner,
            device: config.device.clone(),
        })
    }

    /// The device name this channel was opened on.
    pub fn device(&self) -> &str {
        &self.device
    }
}

impl Write for SerialChannel {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl std::fmt::Debug for SerialChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialChannel")
            .field("device", &self.device)
            .finish()
    }
}

/// A serial port known to the host.
#[derive(Debug, Clone)]
pub struct PortInfo {
    /// Device name suitable for [`SerialConfig::device`].
    pub name: String,
    /// Coarse port kind (USB, PCI, Bluetooth, unknown).
    pub kind: &'static str,
}

/// Enumerate the serial ports visible on this host.
pub fn available_ports() -> Result<Vec<PortInfo>> {
    let ports = serialport::available_ports().map_err(ChannelError::Enumerate)?;
    Ok(ports
        .into_iter()
        .map(|port| PortInfo {
            name: port.port_name,
            kind: port_kind(&port.port_type),
        })
        .collect())
}

fn port_kind(port_type: &serialport::SerialPortType) -> &'static str {
    match port_type {
        serialport::SerialPortType::UsbPort(_) => "usb",
        serialport::SerialPortType::PciPort => "pci",
        serialport::SerialPortType::BluetoothPort => "bluetooth",
        serialport::SerialPortType::Unknown => "unknown",
    }
}
