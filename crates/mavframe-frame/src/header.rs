use crate::error::{FrameError, Result};

/// Fixed header size: marker, length, two flag bytes, sequence, system id,
/// component id and a 3-byte message id.
pub const HEADER_SIZE: usize = 10;

/// Start marker for protocol version 1.
pub const MARKER_V1: u8 = 0xFE;

/// Start marker for protocol version 2.
pub const MARKER_V2: u8 = 0xFD;

/// Largest message id representable in the 24-bit header field.
pub const MAX_MESSAGE_ID: u32 = 0x00FF_FFFF;

const MARKER: usize = 0;
const PAYLOAD_LEN: usize = 1;
const INCOMPAT_FLAGS: usize = 2;
const COMPAT_FLAGS: usize = 3;
const SEQUENCE: usize = 4;
const SYSTEM_ID: usize = 5;
const COMPONENT_ID: usize = 6;
const MESSAGE_ID: usize = 7;

/// Protocol version denoted by a start marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolVersion {
    V1,
    V2,
}

impl ProtocolVersion {
    /// Resolve a start marker. Returns `None` for anything but the two known tags.
    pub fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            MARKER_V1 => Some(Self::V1),
            MARKER_V2 => Some(Self::V2),
            _ => None,
        }
    }

    /// The start marker byte for this version.
    pub fn marker(self) -> u8 {
        match self {
            Self::V1 => MARKER_V1,
            Self::V2 => MARKER_V2,
        }
    }

    /// Numeric version (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }
}

/// Returns true if `marker` is a recognized start marker.
pub fn is_valid_marker(marker: u8) -> bool {
    ProtocolVersion::from_marker(marker).is_some()
}

/// Check one header byte arriving at `offset` of a frame whose payload
/// capacity is `capacity`. Only the marker and the declared length are
/// constrained.
pub(crate) fn check_header_byte(offset: usize, value: u8, capacity: u8) -> Result<()> {
    match offset {
        MARKER if !is_valid_marker(value) => Err(FrameError::InvalidMarker(value)),
        PAYLOAD_LEN if value != capacity => Err(FrameError::LengthMismatch {
            declared: value,
            capacity,
        }),
        _ => Ok(()),
    }
}

/// Decoded header fields.
///
/// The header shape is the same for both markers; a version-1 marker still
/// produces the 10-byte layout with a 24-bit message id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFields {
    pub marker: u8,
    pub payload_len: u8,
    pub incompat_flags: u8,
    pub compat_flags: u8,
    pub sequence: u8,
    pub system_id: u8,
    pub component_id: u8,
    pub message_id: u32,
}

impl HeaderFields {
    /// Header fields with zeroed flags and length; the factory fills in the length.
    pub fn new(marker: u8, sequence: u8, system_id: u8, component_id: u8, message_id: u32) -> Self {
        Self {
            marker,
            payload_len: 0,
            incompat_flags: 0,
            compat_flags: 0,
            sequence,
            system_id,
            component_id,
            message_id,
        }
    }

    /// Check the marker and message-id range.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_marker(self.marker) {
            return Err(FrameError::InvalidMarker(self.marker));
        }
        if self.message_id > MAX_MESSAGE_ID {
            return Err(FrameError::MessageIdOutOfRange(self.message_id));
        }
        Ok(())
    }

    /// Wire encoding of the header. The message id is truncated to 24 bits;
    /// call [`HeaderFields::validate`] first to reject ids that do not fit.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let id = self.message_id.to_le_bytes();
        [
            self.marker,
            self.payload_len,
            self.incompat_flags,
            self.compat_flags,
            self.sequence,
            self.system_id,
            self.component_id,
            id[0],
            id[1],
            id[2],
        ]
    }

    /// Decode the header from the first [`HEADER_SIZE`] bytes of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let header = bytes.get(..HEADER_SIZE)?;
        Some(Self {
            marker: header[MARKER],
            payload_len: header[PAYLOAD_LEN],
            incompat_flags: header[INCOMPAT_FLAGS],
            compat_flags: header[COMPAT_FLAGS],
            sequence: header[SEQUENCE],
            system_id: header[SYSTEM_ID],
            component_id: header[COMPONENT_ID],
            message_id: u32::from_le_bytes([
                header[MESSAGE_ID],
                header[MESSAGE_ID + 1],
                header[MESSAGE_ID + 2],
                0,
            ]),
        })
    }
}

/// Window over the first [`HEADER_SIZE`] bytes of a frame's storage.
///
/// Holds no bytes of its own, only the count of header bytes that have
/// arrived. Every accessor reads through the storage slice it is given, so
/// writes made through the owning frame are visible immediately.
///
/// Accessors index the storage directly and panic if it is shorter than
/// [`HEADER_SIZE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderView {
    filled: usize,
}

impl HeaderView {
    /// An empty header that will be filled byte by byte.
    pub fn incremental() -> Self {
        Self { filled: 0 }
    }

    /// Write all ten header bytes into `storage` at once.
    pub fn prefilled(storage: &mut [u8], fields: &HeaderFields) -> Self {
        storage[..HEADER_SIZE].copy_from_slice(&fields.to_bytes());
        Self {
            filled: HEADER_SIZE,
        }
    }

    /// Number of header bytes written so far.
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// Returns true once all ten bytes have arrived.
    pub fn is_full(&self) -> bool {
        self.filled >= HEADER_SIZE
    }

    /// Store the next header byte.
    pub fn push(&mut self, storage: &mut [u8], value: u8) -> Result<()> {
        if self.is_full() {
            return Err(FrameError::CapacityExceeded {
                requested: 1,
                remaining: 0,
            });
        }
        storage[self.filled] = value;
        self.filled += 1;
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.filled = 0;
    }

    /// The header bytes written so far.
    pub fn as_slice<'a>(&self, storage: &'a [u8]) -> &'a [u8] {
        &storage[..self.filled]
    }

    /// All fields, once the header is full.
    pub fn fields(&self, storage: &[u8]) -> Option<HeaderFields> {
        if !self.is_full() {
            return None;
        }
        HeaderFields::from_bytes(storage)
    }

    pub fn marker(&self, storage: &[u8]) -> u8 {
        storage[MARKER]
    }

    /// Declared payload length.
    pub fn payload_len(&self, storage: &[u8]) -> u8 {
        storage[PAYLOAD_LEN]
    }

    pub fn incompat_flags(&self, storage: &[u8]) -> u8 {
        storage[INCOMPAT_FLAGS]
    }

    pub fn compat_flags(&self, storage: &[u8]) -> u8 {
        storage[COMPAT_FLAGS]
    }

    pub fn sequence(&self, storage: &[u8]) -> u8 {
        storage[SEQUENCE]
    }

    pub fn system_id(&self, storage: &[u8]) -> u8 {
        storage[SYSTEM_ID]
    }

    pub fn component_id(&self, storage: &[u8]) -> u8 {
        storage[COMPONENT_ID]
    }

    /// 24-bit little-endian message id.
    pub fn message_id(&self, storage: &[u8]) -> u32 {
        u32::from(storage[MESSAGE_ID])
            | u32::from(storage[MESSAGE_ID + 1]) << 8
            | u32::from(storage[MESSAGE_ID + 2]) << 16
    }

    /// Protocol version of the stored marker, if recognized.
    pub fn version(&self, storage: &[u8]) -> Option<ProtocolVersion> {
        ProtocolVersion::from_marker(self.marker(storage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HeaderFields {
        HeaderFields {
            payload_len: 9,
            ..HeaderFields::new(MARKER_V2, 7, 1, 1, 0x0A0B0C)
        }
    }

    #[test]
    fn marker_validation() {
        assert!(is_valid_marker(MARKER_V1));
        assert!(is_valid_marker(MARKER_V2));
        assert!(!is_valid_marker(0x00));
        assert!(!is_valid_marker(0xFC));
        assert_eq!(ProtocolVersion::from_marker(0xFE), Some(ProtocolVersion::V1));
        assert_eq!(ProtocolVersion::from_marker(0xFD).map(|v| v.number()), Some(2));
    }

    #[test]
    fn wire_layout() {
        let bytes = sample().to_bytes();
        assert_eq!(bytes, [0xFD, 9, 0, 0, 7, 1, 1, 0x0C, 0x0B, 0x0A]);
    }

    #[test]
    fn prefilled_is_full_and_readable() {
        let mut storage = [0u8; 32];
        let view = HeaderView::prefilled(&mut storage, &sample());

        assert!(view.is_full());
        assert_eq!(view.marker(&storage), MARKER_V2);
        assert_eq!(view.payload_len(&storage), 9);
        assert_eq!(view.sequence(&storage), 7);
        assert_eq!(view.system_id(&storage), 1);
        assert_eq!(view.component_id(&storage), 1);
        assert_eq!(view.message_id(&storage), 0x0A0B0C);
        assert_eq!(view.version(&storage), Some(ProtocolVersion::V2));
        assert_eq!(view.fields(&storage), Some(sample()));
    }

    #[test]
    fn incremental_push_until_full() {
        let mut storage = [0u8; 32];
        let mut view = HeaderView::incremental();

        for (i, b) in sample().to_bytes().into_iter().enumerate() {
            assert!(!view.is_full());
            assert!(view.fields(&storage).is_none());
            view.push(&mut storage, b).unwrap();
            assert_eq!(view.filled(), i + 1);
        }

        assert!(view.is_full());
        assert_eq!(view.fields(&storage), Some(sample()));
        assert!(matches!(
            view.push(&mut storage, 0xAA),
            Err(FrameError::CapacityExceeded { .. })
        ));
        assert_eq!(storage[HEADER_SIZE], 0);
    }

    #[test]
    fn view_reads_through_storage() {
        let mut storage = [0u8; 16];
        let view = HeaderView::prefilled(&mut storage, &sample());
        storage[4] = 42;
        assert_eq!(view.sequence(&storage), 42);
    }

    #[test]
    fn validate_rejects_bad_marker_and_wide_id() {
        let bad_marker = HeaderFields::new(0x55, 1, 1, 1, 0);
        assert!(matches!(
            bad_marker.validate(),
            Err(FrameError::InvalidMarker(0x55))
        ));

        let wide = HeaderFields::new(MARKER_V2, 1, 1, 1, MAX_MESSAGE_ID + 1);
        assert!(matches!(
            wide.validate(),
            Err(FrameError::MessageIdOutOfRange(_))
        ));
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn from_bytes_requires_full_header() {
        assert!(HeaderFields::from_bytes(&[0xFD, 1, 2]).is_none());
    }
}
