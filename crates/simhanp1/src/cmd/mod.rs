use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod doctor;
pub mod run;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Emulate a P1 meter on a serial device.
    Run(RunArgs),
    /// Run local environment health checks.
    Doctor(DoctorArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Run(args) => run::run(args, format),
        Command::Doctor(args) => doctor::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Serial device to transmit on (TTY path or COM name).
    pub device: String,
    /// Pause after each telegram write (e.g. 1s, 500ms).
    #[arg(default_value = "1s")]
    pub interval: String,
    /// Baud rate.
    #[arg(long, default_value_t = simhanp1_channel::DEFAULT_BAUD_RATE)]
    pub baud: u32,
    /// Port timeout (e.g. 50ms). The emulator never reads, but the
    /// timeout is still applied to the device.
    #[arg(long, value_name = "DURATION", default_value = "50ms")]
    pub read_timeout: String,
    /// First telegram payload file, re-read every cycle.
    #[arg(long, value_name = "FILE", default_value = "hanp1_1.data")]
    pub first: PathBuf,
    /// Second telegram payload file, re-read every cycle.
    #[arg(long, value_name = "FILE", default_value = "hanp1_2.data")]
    pub second: PathBuf,
    /// Exit after N complete cycles instead of running until Ctrl-C.
    #[arg(long, value_name = "N")]
    pub cycles: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub struct DoctorArgs {
    /// Also probe this device by opening it with default parameters.
    #[arg(long, value_name = "DEVICE")]
    pub device: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
