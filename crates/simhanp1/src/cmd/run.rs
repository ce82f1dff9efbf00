use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use simhanp1_channel::SerialConfig;
use simhanp1_emulator::{Emulator, EmulatorConfig};
use simhanp1_telegram::PayloadFile;
use tracing::info;

use crate::cmd::RunArgs;
use crate::exit::{emulator_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_report, OutputFormat, RunReport};

pub fn run(args: RunArgs, format: OutputFormat) -> CliResult<i32> {
    let interval = parse_duration(&args.interval)?;
    let read_timeout = parse_duration(&args.read_timeout)?;

    // Both payloads must be present before the device is touched, so a
    // misconfigured environment cannot produce partial output.
    require_payload(&args.first)?;
    require_payload(&args.second)?;

    let serial = SerialConfig {
        device: args.device.clone(),
        baud_rate: args.baud,
        read_timeout,
    };
    let config = EmulatorConfig {
        interval,
        max_cycles: args.cycles,
    };

    let mut emulator = Emulator::open(
        &serial,
        PayloadFile::new(&args.first),
        PayloadFile::new(&args.second),
        config,
    )
    .map_err(|err| emulator_error("startup failed", err))?;

    let stop = Arc::new(AtomicBool::new(false));
    install_ctrlc_handler(Arc::clone(&stop))?;

    info!(
        device = %args.device,
        interval_ms = interval.as_millis() as u64,
        "emulating HAN P1 meter, Ctrl-C to stop"
    );

    let stats = emulator
        .run(&stop)
        .map_err(|err| emulator_error("emulation failed", err))?;

    print_report(
        &RunReport {
            device: args.device,
            cycles: stats.cycles,
            bytes_written: stats.bytes_written,
            interval_ms: interval.as_millis() as u64,
        },
        format,
    );

    Ok(SUCCESS)
}

fn require_payload(path: &Path) -> CliResult<()> {
    if path.is_file() {
        return Ok(());
    }
    Err(CliError::new(
        DATA_INVALID,
        format!("payload file missing: {}", path.display()),
    ))
}

fn install_ctrlc_handler(stop: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        stop.store(true, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}

fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("50ms").unwrap(), Duration::from_millis(50));
        assert_eq!(parse_duration("1").unwrap(), Duration::from_secs(1));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn missing_payload_is_a_data_error() {
        let err = require_payload(Path::new("/nonexistent/hanp1_1.data"))
            .expect_err("missing payload should fail");
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.contains("hanp1_1.data"));
    }
}
