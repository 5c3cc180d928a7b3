use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use httpsnotif_codec::{CapabilitySet, Encoding};
use httpsnotif_service::config::DEFAULT_MAX_BODY_SIZE;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod check;
pub mod doctor;
pub mod serve;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the notification receiver.
    Serve(ServeArgs),
    /// Validate a notification payload offline, using the server pipeline.
    Check(CheckArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Run local environment health checks.
    Doctor(DoctorArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Serve(args) => serve::run(args),
        Command::Check(args) => check::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Doctor(args) => doctor::run(args, format),
    }
}

/// Wire encoding names as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EncodingArg {
    Json,
    Xml,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Json => Encoding::Json,
            EncodingArg::Xml => Encoding::Xml,
        }
    }
}

impl fmt::Display for EncodingArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingArg::Json => write!(f, "json"),
            EncodingArg::Xml => write!(f, "xml"),
        }
    }
}

/// Argument order is advertised order; duplicates are dropped.
pub fn capability_set(args: &[EncodingArg]) -> CapabilitySet {
    let encodings: Vec<Encoding> = args.iter().copied().map(Encoding::from).collect();
    CapabilitySet::new(&encodings)
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,
    /// JSON Schema file describing the notification shape.
    #[arg(long, value_name = "FILE", env = "HTTPSNOTIF_SCHEMA")]
    pub schema: PathBuf,
    /// Encodings to enable, in advertised order (comma-separated).
    #[arg(long, value_delimiter = ',', default_values_t = [EncodingArg::Json, EncodingArg::Xml])]
    pub encodings: Vec<EncodingArg>,
    /// Maximum notification body size in bytes.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_BODY_SIZE)]
    pub max_body_size: usize,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Payload file to validate.
    pub payload: PathBuf,
    /// Declared content type of the payload.
    #[arg(long, default_value = "application/json")]
    pub content_type: String,
    /// JSON Schema file describing the notification shape.
    #[arg(long, value_name = "FILE", env = "HTTPSNOTIF_SCHEMA")]
    pub schema: PathBuf,
    /// Encodings to treat as enabled.
    #[arg(long, value_delimiter = ',', default_values_t = [EncodingArg::Json, EncodingArg::Xml])]
    pub encodings: Vec<EncodingArg>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct DoctorArgs {}
