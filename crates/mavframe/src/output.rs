use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use mavframe_frame::{message_name, Frame, FrameState, FrameWriter};
use serde::Serialize;

use crate::exit::{frame_error, CliResult};

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

#[derive(Serialize)]
pub struct FrameOutput {
    pub sequence: Option<u8>,
    pub system_id: Option<u8>,
    pub component_id: Option<u8>,
    pub message_id: Option<u32>,
    pub message_name: Option<&'static str>,
    pub capacity: u8,
    pub state: &'static str,
    pub checksum: Option<String>,
    pub len: usize,
    pub hex: String,
}

impl FrameOutput {
    pub fn from_frame(frame: &Frame) -> Self {
        let fields = frame.header_fields();
        Self {
            sequence: fields.map(|f| f.sequence),
            system_id: fields.map(|f| f.system_id),
            component_id: fields.map(|f| f.component_id),
            message_id: fields.map(|f| f.message_id),
            message_name: fields.and_then(|f| message_name(f.message_id)),
            capacity: frame.capacity(),
            state: state_name(frame.state()),
            checksum: frame.checksum().map(format_checksum),
            len: frame.len(),
            hex: hex::encode(frame.as_bytes()),
        }
    }
}

pub fn print_frames(frames: &[Frame], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            for frame in frames {
                print_json(&FrameOutput::from_frame(frame));
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SEQ", "MESSAGE", "CAPACITY", "STATE", "CHECKSUM", "BYTES"]);
            for frame in frames {
                let out = FrameOutput::from_frame(frame);
                table.add_row(vec![
                    display_opt(out.sequence),
                    message_label(out.message_id, out.message_name),
                    out.capacity.to_string(),
                    out.state.to_string(),
                    out.checksum.unwrap_or_else(|| "-".to_string()),
                    out.hex,
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for frame in frames {
                let out = FrameOutput::from_frame(frame);
                println!(
                    "seq={} msg={} capacity={} state={} checksum={} len={} bytes={}",
                    display_opt(out.sequence),
                    message_label(out.message_id, out.message_name),
                    out.capacity,
                    out.state,
                    out.checksum.as_deref().unwrap_or("-"),
                    out.len,
                    out.hex
                );
            }
        }
        OutputFormat::Raw => {
            let mut writer = FrameWriter::new(std::io::stdout().lock());
            for frame in frames {
                writer
                    .write_frame(frame)
                    .map_err(|err| frame_error("write failed", err))?;
            }
        }
    }
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

pub fn format_checksum(value: u16) -> String {
    format!("0x{value:04X}")
}

pub fn state_name(state: FrameState) -> &'static str {
    match state {
        FrameState::Empty => "empty",
        FrameState::InHeader => "in_header",
        FrameState::InPayload => "in_payload",
        FrameState::Complete => "complete",
    }
}

fn message_label(id: Option<u32>, name: Option<&str>) -> String {
    match (id, name) {
        (Some(id), Some(name)) => format!("{name} ({id})"),
        (Some(id), None) => id.to_string(),
        (None, _) => "-".to_string(),
    }
}

fn display_opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use mavframe_frame::{FrameFactory, MARKER_V2};

    use super::*;

    #[test]
    fn frame_output_describes_complete_frame() {
        let mut frame = FrameFactory::new()
            .create(MARKER_V2, 7, 1, 1, 0, None)
            .unwrap();
        frame.append_bytes(&[0u8; 9]).unwrap();

        let out = FrameOutput::from_frame(&frame);
        assert_eq!(out.sequence, Some(7));
        assert_eq!(out.message_name, Some("HEARTBEAT"));
        assert_eq!(out.state, "complete");
        assert_eq!(out.checksum.as_deref(), Some("0x050C"));
        assert_eq!(out.hex, "fd0900000701010000000000000000000000000c05");
    }

    #[test]
    fn frame_output_serializes() {
        let frame = FrameFactory::new()
            .create(MARKER_V2, 1, 1, 1, 0, None)
            .unwrap();
        let json = serde_json::to_string(&FrameOutput::from_frame(&frame)).unwrap();
        assert!(json.contains("\"state\":\"in_payload\""));
        assert!(json.contains("\"checksum\":null"));
    }

    #[test]
    fn labels() {
        assert_eq!(message_label(Some(0), Some("HEARTBEAT")), "HEARTBEAT (0)");
        assert_eq!(message_label(Some(900), None), "900");
        assert_eq!(display_opt::<u8>(None), "-");
    }
}
