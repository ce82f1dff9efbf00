use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use simhanp1_channel::{SerialChannel, SerialConfig};
use simhanp1_telegram::{PayloadFile, TelegramWriter};
use tracing::{debug, info};

use crate::error::Result;

/// Default pause between telegram writes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Granularity of stop-flag polling inside a wait.
const WAIT_SLICE: Duration = Duration::from_millis(25);

/// Emulator loop parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatorConfig {
    /// Pause after each telegram write.
    pub interval: Duration,
    /// Stop after this many complete cycles. `None` runs until cancelled.
    pub max_cycles: Option<u64>,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_cycles: None,
        }
    }
}

/// Result of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Completed first→wait→second→wait cycles.
    pub cycles: u64,
    /// Total payload bytes written to the channel.
    pub bytes_written: u64,
}

/// Drives the two-phase emission cycle onto a `Write` sink.
///
/// Generic over the sink so tests can observe the emitted stream in
/// memory; production wraps a [`SerialChannel`].
pub struct Emulator<T> {
    writer: TelegramWriter<T>,
    first: PayloadFile,
    second: PayloadFile,
    config: EmulatorConfig,
}

impl<T> std::fmt::Debug for Emulator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emulator")
            .field("first", &self.first)
            .field("second", &self.second)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Emulator<SerialChannel> {
    /// Open the serial channel and build an emulator over it.
    pub fn open(
        serial: &SerialConfig,
        first: PayloadFile,
        second: PayloadFile,
        config: EmulatorConfig,
    ) -> Result<Self> {
        let channel = SerialChannel::open(serial)?;
        info!(device = channel.device(), "emulator attached");
        Ok(Self::with_config(channel, first, second, config))
    }
}

impl<T: Write> Emulator<T> {
    /// Build an emulator over an already-open sink with default config.
    pub fn new(sink: T, first: PayloadFile, second: PayloadFile) -> Self {
        Self::with_config(sink, first, second, EmulatorConfig::default())
    }

    /// Build an emulator over an already-open sink.
    pub fn with_config(
        sink: T,
        first: PayloadFile,
        second: PayloadFile,
        config: EmulatorConfig,
    ) -> Self {
        Self {
            writer: TelegramWriter::new(sink),
            first,
            second,
            config,
        }
    }

    /// Run the emission cycle until `stop` is raised, the cycle bound is
    /// reached, or an emission fails.
    ///
    /// Payload files are re-read on every emission. Any failure aborts the
    /// run immediately; bytes already written stay written.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<CycleStats> {
        let mut stats = CycleStats::default();

        loop {
            if stop.load(Ordering::SeqCst) {
                break;
            }
            if let Some(max) = self.config.max_cycles {
                if stats.cycles >= max {
                    break;
                }
            }

            stats.bytes_written += Self::emit(&mut self.writer, &self.first)?;
            if !wait_interval(stop, self.config.interval) {
                break;
            }

            stats.bytes_written += Self::emit(&mut self.writer, &self.second)?;
            if !wait_interval(stop, self.config.interval) {
                break;
            }

            stats.cycles += 1;
            debug!(cycle = stats.cycles, "cycle complete");
        }

        Ok(stats)
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &T {
        self.writer.get_ref()
    }

    /// Consume the emulator and return the sink.
    pub fn into_inner(self) -> T {
        self.writer.into_inner()
    }

    fn emit(writer: &mut TelegramWriter<T>, payload: &PayloadFile) -> Result<u64> {
        let telegram = payload.read()?;
        writer.send(&telegram)?;
        Ok(telegram.len() as u64)
    }
}

/// Sleep for `interval`, polling `stop`. Returns false when cancelled.
fn wait_interval(stop: &AtomicBool, interval: Duration) -> bool {
    let deadline = Instant::now() + interval;
    loop {
        if stop.load(Ordering::SeqCst) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        std::thread::sleep((deadline - now).min(WAIT_SLICE));
    }
}
