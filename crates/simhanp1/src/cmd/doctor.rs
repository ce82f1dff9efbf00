use std::path::Path;

use serde::Serialize;
use simhanp1_channel::{available_ports, SerialChannel, SerialConfig};

use crate::cmd::DoctorArgs;
use crate::exit::{CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Warn,
    Info,
    Skip,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    detail: String,
}

#[derive(Debug, Serialize)]
struct DoctorOutput {
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(args: DoctorArgs, format: OutputFormat) -> CliResult<i32> {
    let checks = vec![
        serial_ports_check(),
        device_check(args.device.as_deref()),
        payload_file_check("payload_first", Path::new("hanp1_1.data")),
        payload_file_check("payload_second", Path::new("hanp1_2.data")),
        compiled_features_check(),
    ];

    let has_fail = checks.iter().any(|c| matches!(c.status, CheckStatus::Fail));
    let overall = if has_fail { "fail" } else { "pass" };

    let output = DoctorOutput { checks, overall };

    print_doctor(&output, format);

    if has_fail {
        Ok(HEALTH_CHECK_FAILED)
    } else {
        Ok(SUCCESS)
    }
}

fn serial_ports_check() -> CheckResult {
    match available_ports() {
        Ok(ports) if ports.is_empty() => CheckResult {
            name: "serial_ports".to_string(),
            status: CheckStatus::Warn,
            detail: "no serial ports detected on this host".to_string(),
        },
        Ok(ports) => {
            let names: Vec<String> = ports
                .iter()
                .map(|p| format!("{} ({})", p.name, p.kind))
                .collect();
            CheckResult {
                name: "serial_ports".to_string(),
                status: CheckStatus::Info,
                detail: names.join(", "),
            }
        }
        Err(err) => CheckResult {
            name: "serial_ports".to_string(),
            status: CheckStatus::Fail,
            detail: format!("port enumeration failed: {err}"),
        },
    }
}

fn device_check(device: Option<&str>) -> CheckResult {
    let Some(device) = device else {
        return CheckResult {
            name: "device_open".to_string(),
            status: CheckStatus::Skip,
            detail: "--device not given".to_string(),
        };
    };

    match SerialChannel::open(&SerialConfig::for_device(device)) {
        Ok(channel) => CheckResult {
            name: "device_open".to_string(),
            status: CheckStatus::Pass,
            detail: format!("{} opened at default parameters", channel.device()),
        },
        Err(err) => CheckResult {
            name: "device_open".to_string(),
            status: CheckStatus::Fail,
            detail: err.to_string(),
        },
    }
}

fn payload_file_check(name: &str, path: &Path) -> CheckResult {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => CheckResult {
            name: name.to_string(),
            status: CheckStatus::Pass,
            detail: format!("{} ({} bytes)", path.display(), meta.len()),
        },
        Ok(_) => CheckResult {
            name: name.to_string(),
            status: CheckStatus::Fail,
            detail: format!("{} is not a regular file", path.display()),
        },
        Err(_) => CheckResult {
            name: name.to_string(),
            status: CheckStatus::Warn,
            detail: format!(
                "{} not found in working directory (run takes --first/--second)",
                path.display()
            ),
        },
    }
}

fn compiled_features_check() -> CheckResult {
    let mut features = Vec::new();
    if cfg!(feature = "emulator") {
        features.push("emulator");
    }
    if cfg!(feature = "cli") {
        features.push("cli");
    }

    CheckResult {
        name: "compiled_features".to_string(),
        status: CheckStatus::Info,
        detail: features.join(", "),
    }
}

fn print_doctor(output: &DoctorOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("simhanp1 doctor\n");
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<18} {}",
                    status_text(c.status),
                    c.name,
                    c.detail
                );
            }
            if output.overall == "pass" {
                println!("\n  Result: all checks passed");
            } else {
                println!("\n  Result: one or more checks failed");
            }
        }
        OutputFormat::Raw => {
            println!("{}", output.overall);
        }
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Warn => "WARN",
        CheckStatus::Info => "INFO",
        CheckStatus::Skip => "SKIP",
    }
}
