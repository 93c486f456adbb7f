use mavframe_frame::{ChecksumEngine, MCRF4XX};
use serde::Serialize;

use crate::cmd::ChecksumArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{format_checksum, print_json, print_raw, OutputFormat};

#[derive(Serialize)]
struct ChecksumOutput {
    checksum: String,
    value: u16,
    len: usize,
    poly: String,
    init: String,
    xor_out: String,
}

pub fn run(args: ChecksumArgs, format: OutputFormat) -> CliResult<i32> {
    let input = args.payload.resolve()?;

    let mut engine = ChecksumEngine::new();
    engine.update(&input);
    let value = engine.value();

    match format {
        OutputFormat::Json => print_json(&ChecksumOutput {
            checksum: format_checksum(value),
            value,
            len: input.len(),
            poly: format_checksum(MCRF4XX.poly),
            init: format_checksum(MCRF4XX.init),
            xor_out: format_checksum(MCRF4XX.xor_out),
        }),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("{} ({} bytes)", format_checksum(value), input.len());
        }
        OutputFormat::Raw => print_raw(&value.to_le_bytes()),
    }
    Ok(SUCCESS)
}
