use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use httpsnotif_service::RelayError;
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

/// Outcome of an offline payload check, in every output format.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CheckReport {
    pub fn from_result(result: &Result<(), RelayError>) -> Self {
        match result {
            Ok(()) => Self {
                outcome: "accepted",
                kind: None,
                http_status: None,
                reason: None,
            },
            Err(err) => Self {
                outcome: "rejected",
                kind: Some(err.kind()),
                http_status: Some(err.status().as_u16()),
                reason: Some(err.to_string()),
            },
        }
    }
}

pub fn print_check(report: &CheckReport, format: OutputFormat) {
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
                .set_header(vec!["OUTCOME", "KIND", "STATUS", "REASON"])
                .add_row(vec![
                    report.outcome.to_string(),
                    report.kind.unwrap_or("-").to_string(),
                    report
                        .http_status
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    report.reason.clone().unwrap_or_else(|| "-".to_string()),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => match (&report.kind, &report.reason) {
            (Some(kind), Some(reason)) => {
                println!("rejected ({kind}): {reason}");
            }
            _ => println!("accepted"),
        },
        OutputFormat::Raw => {
            println!("{}", report.outcome);
        }
    }
}
