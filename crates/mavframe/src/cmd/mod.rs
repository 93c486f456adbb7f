use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use mavframe_frame::ProtocolVersion;
use mavframe_system::{DEFAULT_COMPONENT_ID, DEFAULT_SYSTEM_ID};

use crate::exit::{io_error, CliError, CliResult};
use crate::output::OutputFormat;

pub mod checksum;
pub mod encode;
pub mod ids;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build frames and print them.
    Encode(EncodeArgs),
    /// Compute the frame checksum of arbitrary bytes.
    Checksum(ChecksumArgs),
    /// List message ids and payload capacities.
    Ids(IdsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Checksum(args) => checksum::run(args, format),
        Command::Ids(args) => ids::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Start marker selection.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Marker {
    /// 0xFE
    V1,
    /// 0xFD
    V2,
}

impl From<Marker> for ProtocolVersion {
    fn from(marker: Marker) -> Self {
        match marker {
            Marker::V1 => ProtocolVersion::V1,
            Marker::V2 => ProtocolVersion::V2,
        }
    }
}

/// Byte input shared by commands that take a payload.
#[derive(Args, Debug, Default)]
pub struct PayloadArgs {
    /// Hex-encoded bytes (whitespace ignored).
    #[arg(long, conflicts_with_all = ["data", "file"])]
    pub hex: Option<String>,
    /// Raw string bytes.
    #[arg(long, conflicts_with_all = ["hex", "file"])]
    pub data: Option<String>,
    /// Read bytes from file.
    #[arg(long, conflicts_with_all = ["hex", "data"])]
    pub file: Option<PathBuf>,
}

impl PayloadArgs {
    pub fn resolve(&self) -> CliResult<Vec<u8>> {
        if let Some(text) = &self.hex {
            return parse_hex(text);
        }
        if let Some(data) = &self.data {
            return Ok(data.as_bytes().to_vec());
        }
        if let Some(path) = &self.file {
            return std::fs::read(path)
                .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
        }
        Ok(Vec::new())
    }
}

pub fn parse_hex(text: &str) -> CliResult<Vec<u8>> {
    let compact: String = text.split_whitespace().collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    hex::decode(digits).map_err(|err| CliError::usage(format!("--hex is not valid hex: {err}")))
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Message id (24-bit).
    #[arg(long, short = 'm')]
    pub message_id: u32,
    /// Start marker / protocol version tag.
    #[arg(long, value_enum, default_value = "v2")]
    pub marker: Marker,
    /// Originating system id.
    #[arg(long, default_value_t = DEFAULT_SYSTEM_ID)]
    pub system_id: u8,
    /// Originating component id.
    #[arg(long, default_value_t = DEFAULT_COMPONENT_ID)]
    pub component_id: u8,
    /// Explicit payload capacity; overrides the capacity table.
    #[arg(long)]
    pub capacity: Option<u8>,
    /// Number of consecutive frames to build.
    #[arg(long, default_value = "1")]
    pub count: usize,
    #[command(flatten)]
    pub payload: PayloadArgs,
    /// Zero-fill the rest of the payload so the frame completes.
    #[arg(long)]
    pub pad: bool,
    /// JSON capacity table (`{"<id>": <capacity>}`) replacing the built-in one.
    #[arg(long, value_name = "FILE", env = "MAVFRAME_CAPACITIES")]
    pub capacities: Option<PathBuf>,
    /// Fail for message ids with no configured capacity instead of using 255.
    #[arg(long)]
    pub reject_unknown: bool,
    /// Leave the start marker out of the checksum.
    #[arg(long)]
    pub exclude_marker: bool,
}

#[derive(Args, Debug)]
pub struct ChecksumArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args, Debug)]
pub struct IdsArgs {
    /// JSON capacity table to list instead of the built-in one.
    #[arg(long, value_name = "FILE", env = "MAVFRAME_CAPACITIES")]
    pub capacities: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
