//! Incremental telemetry frame assembly.
//!
//! This is the core of mavframe. Every frame is laid out as:
//! - A 10-byte header (start marker, declared length, flags, sequence,
//!   system id, component id, 24-bit message id)
//! - A payload of up to 255 bytes
//! - A 2-byte little-endian CRC-16 checksum
//!
//! Frames are filled one append at a time. The checksum is folded as bytes
//! arrive and written automatically when the payload is full.

pub mod checksum;
pub mod config;
pub mod error;
pub mod factory;
pub mod frame;
pub mod header;
pub mod message_ids;
pub mod payload;
pub mod writer;

pub use checksum::{checksum, ChecksumEngine, CrcAlgorithm, CrcParams, FRAME_CRC, MCRF4XX};
pub use config::{CapacityTable, ChecksumCoverage, FrameConfig, UnknownIdPolicy};
pub use error::{FrameError, Result};
pub use factory::FrameFactory;
pub use frame::{Frame, FrameState, CHECKSUM_SIZE, MAX_FRAME_LEN, SIGNATURE_LEN};
pub use header::{
    is_valid_marker, HeaderFields, HeaderView, ProtocolVersion, HEADER_SIZE, MARKER_V1, MARKER_V2,
    MAX_MESSAGE_ID,
};
pub use message_ids::{message_name, payload_capacity};
pub use payload::{PayloadView, MAX_PAYLOAD_LEN};
pub use writer::FrameWriter;
