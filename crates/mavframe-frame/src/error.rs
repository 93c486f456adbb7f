/// Errors that can occur while assembling or emitting frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The append would run past the end of the frame, or the frame is already complete.
    #[error("frame capacity exceeded ({requested} bytes requested, {remaining} remaining)")]
    CapacityExceeded { requested: usize, remaining: usize },

    /// An indexed payload access referenced a byte that has not been written.
    #[error("payload index {index} out of bounds (written length {len})")]
    OutOfBounds { index: usize, len: usize },

    /// The start marker is not one of the recognized protocol version tags.
    #[error("invalid start marker 0x{0:02X} (expected 0xFE or 0xFD)")]
    InvalidMarker(u8),

    /// A header byte declared a payload length other than the frame's capacity.
    #[error("declared payload length {declared} does not match frame capacity {capacity}")]
    LengthMismatch { declared: u8, capacity: u8 },

    /// The message id does not fit in the 24-bit header field.
    #[error("message id {0} does not fit in 24 bits")]
    MessageIdOutOfRange(u32),

    /// No capacity is known for the message id and the policy rejects unknown ids.
    #[error("no payload capacity configured for message id {0}")]
    UnknownMessageId(u32),

    /// A frame was handed to a writer before its checksum was appended.
    #[error("frame incomplete ({written} of {expected} bytes written)")]
    Incomplete { written: usize, expected: usize },

    /// An I/O error occurred while writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink stopped accepting bytes before the frame was fully written.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
