use std::path::PathBuf;

use httpsnotif_schema::{ModelConfig, SchemaModel};
use serde::Serialize;

use crate::cmd::DoctorArgs;
use crate::exit::{CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
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

pub fn run(_args: DoctorArgs, format: OutputFormat) -> CliResult<i32> {
    let checks = vec![
        loopback_bind_check(),
        runtime_check(),
        schema_file_check(),
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

fn print_doctor(output: &DoctorOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("httpsnotif doctor\n");
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<22} {}",
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
        CheckStatus::Skip => "SKIP",
    }
}

fn loopback_bind_check() -> CheckResult {
    match std::net::TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => CheckResult {
            name: "loopback_bind".to_string(),
            status: CheckStatus::Pass,
            detail: match listener.local_addr() {
                Ok(addr) => format!("ephemeral bind succeeded on {addr}"),
                Err(_) => "ephemeral bind succeeded".to_string(),
            },
        },
        Err(err) => CheckResult {
            name: "loopback_bind".to_string(),
            status: CheckStatus::Fail,
            detail: format!("ephemeral bind failed: {err}"),
        },
    }
}

fn runtime_check() -> CheckResult {
    match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(_) => CheckResult {
            name: "async_runtime".to_string(),
            status: CheckStatus::Pass,
            detail: "multi-thread runtime built".to_string(),
        },
        Err(err) => CheckResult {
            name: "async_runtime".to_string(),
            status: CheckStatus::Fail,
            detail: format!("runtime build failed: {err}"),
        },
    }
}

fn schema_file_check() -> CheckResult {
    let path = match std::env::var("HTTPSNOTIF_SCHEMA") {
        Ok(value) => PathBuf::from(value),
        Err(_) => {
            return CheckResult {
                name: "schema_file".to_string(),
                status: CheckStatus::Skip,
                detail: "HTTPSNOTIF_SCHEMA not set".to_string(),
            }
        }
    };

    match SchemaModel::from_file(&path, ModelConfig::default()) {
        Ok(_) => CheckResult {
            name: "schema_file".to_string(),
            status: CheckStatus::Pass,
            detail: format!("{} compiled successfully", path.display()),
        },
        Err(err) => CheckResult {
            name: "schema_file".to_string(),
            status: CheckStatus::Fail,
            detail: format!("{} failed schema load: {err}", path.display()),
        },
    }
}
