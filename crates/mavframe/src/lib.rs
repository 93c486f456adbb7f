//! Drone-telemetry frame encoding.
//!
//! mavframe assembles telemetry frames (10-byte header, variable payload,
//! CRC-16 checksum) one append at a time, with addressing and sequence
//! numbers issued per originating system.
//!
//! # Crate Structure
//!
//! - [`frame`] — Frame assembly, checksum engine and capacity configuration
//! - [`system`] — System/component addressing and sequencing (behind `system` feature)

/// Re-export frame types.
pub mod frame {
    pub use mavframe_frame::*;
}

/// Re-export system types (requires `system` feature).
#[cfg(feature = "system")]
pub mod system {
    pub use mavframe_system::*;
}
