use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Summary printed when a run ends cleanly.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub device: String,
    pub cycles: u64,
    pub bytes_written: u64,
    pub interval_ms: u64,
}

pub fn print_report(report: &RunReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["DEVICE", "CYCLES", "BYTES", "INTERVAL"])
                .add_row(vec![
                    report.device.clone(),
                    report.cycles.to_string(),
                    report.bytes_written.to_string(),
                    format!("{}ms", report.interval_ms),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "device={} cycles={} bytes={} interval={}ms",
                report.device, report.cycles, report.bytes_written, report.interval_ms
            );
        }
        OutputFormat::Raw => {
            println!("{}", report.cycles);
        }
    }
}
