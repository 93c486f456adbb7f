use mavframe_frame::MCRF4XX;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("mavframe {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: mavframe");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("MAVFRAME_BUILD_TARGET").unwrap_or("unknown")
    );
    println!(
        "profile: {}",
        option_env!("MAVFRAME_BUILD_PROFILE").unwrap_or("unknown")
    );
    println!(
        "checksum: crc16 poly=0x{:04X} init=0x{:04X} refin={} refout={} xorout=0x{:04X}",
        MCRF4XX.poly, MCRF4XX.init, MCRF4XX.reflect_in, MCRF4XX.reflect_out, MCRF4XX.xor_out
    );
    println!(
        "features: system={}, cli=true",
        cfg!(feature = "system")
    );

    Ok(SUCCESS)
}
