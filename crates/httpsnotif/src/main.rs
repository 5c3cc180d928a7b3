mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "httpsnotif", version, about = "HTTPS notification receiver")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_subcommand() {
        let cli = Cli::try_parse_from([
            "httpsnotif",
            "serve",
            "--bind",
            "127.0.0.1:3000",
            "--schema",
            "/tmp/notification.schema.json",
            "--encodings",
            "xml,json",
        ])
        .expect("serve args should parse");

        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.encodings.len(), 2);
                assert_eq!(args.bind.port(), 3000);
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn serve_requires_schema() {
        let err = Cli::try_parse_from(["httpsnotif", "serve"])
            .expect_err("missing --schema should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn parses_check_subcommand_with_content_type() {
        let cli = Cli::try_parse_from([
            "httpsnotif",
            "check",
            "/tmp/payload.xml",
            "--content-type",
            "application/xml",
            "--schema",
            "/tmp/notification.schema.json",
        ])
        .expect("check args should parse");

        match cli.command {
            Command::Check(args) => assert_eq!(args.content_type, "application/xml"),
            other => panic!("expected check, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_encoding_name() {
        let err = Cli::try_parse_from([
            "httpsnotif",
            "serve",
            "--schema",
            "/tmp/s.json",
            "--encodings",
            "yaml",
        ])
        .expect_err("unknown encoding should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
