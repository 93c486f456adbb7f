use mavframe_frame::{
    CapacityTable, ChecksumCoverage, Frame, FrameConfig, FrameState, UnknownIdPolicy,
};
use mavframe_system::{load_capacity_table, Component, System, SystemConfig};

use crate::cmd::EncodeArgs;
use crate::exit::{frame_error, system_error, CliError, CliResult, SUCCESS};
use crate::output::{print_frames, OutputFormat};

const MAX_COUNT: usize = 4096;

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    if args.count == 0 || args.count > MAX_COUNT {
        return Err(CliError::usage(format!(
            "--count must be between 1 and {MAX_COUNT}"
        )));
    }

    let payload = args.payload.resolve()?;
    let mut system = build_system(&args)?;

    let mut frames = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        let frame = system
            .create_frame(args.component_id, args.message_id, args.capacity)
            .map_err(|err| system_error("frame creation failed", err))?;
        frames.push(fill(frame, &payload, args.pad)?);
    }

    tracing::info!(
        count = frames.len(),
        complete = frames.iter().filter(|f| f.is_complete()).count(),
        "encoded frames"
    );
    print_frames(&frames, format)?;
    Ok(SUCCESS)
}

fn build_system(args: &EncodeArgs) -> CliResult<System> {
    let capacities = match &args.capacities {
        Some(path) => {
            load_capacity_table(path).map_err(|err| system_error("capacity table", err))?
        }
        None => CapacityTable::common(),
    };
    let config = SystemConfig {
        frame: FrameConfig {
            capacities,
            unknown_ids: if args.reject_unknown {
                UnknownIdPolicy::Reject
            } else {
                UnknownIdPolicy::DefaultToMaximum
            },
            coverage: if args.exclude_marker {
                ChecksumCoverage::ExcludeMarker
            } else {
                ChecksumCoverage::IncludeMarker
            },
        },
        ..SystemConfig::default()
    };

    let mut system = System::with_config(args.marker.into(), args.system_id, "mavframe-cli", config);
    if system.component(args.component_id).is_none() {
        system
            .place_component(Component::default_for(args.component_id))
            .map_err(|err| system_error("invalid component", err))?;
    }
    Ok(system)
}

fn fill(mut frame: Frame, payload: &[u8], pad: bool) -> CliResult<Frame> {
    if !payload.is_empty() {
        frame
            .append_bytes(payload)
            .map_err(|err| frame_error("payload does not fit", err))?;
    }

    if pad && frame.state() != FrameState::Complete {
        let zeros = vec![0u8; frame.remaining()];
        frame
            .append_bytes(&zeros)
            .map_err(|err| frame_error("padding failed", err))?;
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use mavframe_frame::{FrameFactory, MARKER_V2};

    use super::*;

    fn open_frame(capacity: u8) -> Frame {
        FrameFactory::new()
            .create(MARKER_V2, 1, 1, 1, 0, Some(capacity))
            .unwrap()
    }

    #[test]
    fn fill_with_padding_completes() {
        let frame = fill(open_frame(4), &[1, 2], true).unwrap();
        assert!(frame.is_complete());
        assert_eq!(frame.payload_bytes(), &[1, 2, 0, 0]);
    }

    #[test]
    fn fill_without_padding_leaves_frame_open() {
        let frame = fill(open_frame(4), &[1], false).unwrap();
        assert_eq!(frame.state(), FrameState::InPayload);
    }

    #[test]
    fn fill_rejects_oversized_payload() {
        let err = fill(open_frame(2), &[1, 2, 3], false).unwrap_err();
        assert_eq!(err.code, crate::exit::DATA_INVALID);
    }

    #[test]
    fn pad_on_zero_capacity_is_noop() {
        let frame = fill(open_frame(0), &[], true).unwrap();
        assert!(frame.is_complete());
    }
}
