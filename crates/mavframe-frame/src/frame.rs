use bytes::Bytes;

use crate::checksum::ChecksumEngine;
use crate::config::ChecksumCoverage;
use crate::error::{FrameError, Result};
use crate::header::{check_header_byte, HeaderFields, HeaderView, HEADER_SIZE};
use crate::payload::{PayloadView, MAX_PAYLOAD_LEN};

/// Checksum trailer size.
pub const CHECKSUM_SIZE: usize = 2;

/// Space reserved for a signature block. Never written.
pub const SIGNATURE_LEN: usize = 13;

/// Size of a frame's backing storage.
pub const MAX_FRAME_LEN: usize = HEADER_SIZE + MAX_PAYLOAD_LEN + CHECKSUM_SIZE + SIGNATURE_LEN;

/// Assembly progress of a [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Nothing written.
    Empty,
    /// Fewer than [`HEADER_SIZE`] bytes written.
    InHeader,
    /// Header written, payload not yet full.
    InPayload,
    /// Payload full and checksum appended. Terminal until [`Frame::reset`].
    Complete,
}

/// A telemetry frame assembled in place.
///
/// Wire format:
/// ```text
/// ┌────────┬─────┬──────────┬────────┬─────┬───────┬────────┬─────────┬─────────┬──────────┐
/// │ Marker │ Len │ Incompat │ Compat │ Seq │ SysId │ CompId │ MsgId   │ Payload │ Checksum │
/// │ (1B)   │(1B) │ (1B)     │ (1B)   │(1B) │ (1B)  │ (1B)   │ (3B LE) │ (Len B) │ (2B LE)  │
/// └────────┴─────┴──────────┴────────┴─────┴───────┴────────┴─────────┴─────────┴──────────┘
/// ```
///
/// The frame owns one fixed-size buffer. The header and payload views are
/// offset/length descriptors into it. Every append writes at the cursor and
/// folds exactly the new bytes into the running checksum; the buffer is never
/// rescanned. The append that fills the payload also writes the checksum,
/// low byte first, and reports [`FrameState::Complete`].
///
/// Header bytes appended to an empty frame are checked as they arrive: the
/// marker must be a recognized tag and the declared length must equal the
/// capacity the frame was created with.
///
/// A frame is plain mutable state with no internal locking.
#[derive(Debug, Clone)]
pub struct Frame {
    buf: [u8; MAX_FRAME_LEN],
    cursor: usize,
    header: HeaderView,
    payload: PayloadView,
    checksum: ChecksumEngine,
    coverage: ChecksumCoverage,
    prefilled: Option<HeaderFields>,
}

impl Frame {
    /// An empty frame whose header will arrive through appends.
    ///
    /// The declared length byte is whatever the caller appends; completion is
    /// driven by `capacity`.
    pub fn empty(capacity: u8) -> Self {
        Self::empty_with_coverage(capacity, ChecksumCoverage::default())
    }

    /// An empty frame with explicit checksum coverage.
    pub fn empty_with_coverage(capacity: u8, coverage: ChecksumCoverage) -> Self {
        Self {
            buf: [0u8; MAX_FRAME_LEN],
            cursor: 0,
            header: HeaderView::incremental(),
            payload: PayloadView::new(HEADER_SIZE, capacity),
            checksum: ChecksumEngine::new(),
            coverage,
            prefilled: None,
        }
    }

    /// A frame with its header written in one step.
    ///
    /// The payload capacity is the header's declared length. A zero-length
    /// payload completes the frame immediately.
    pub fn with_header(fields: HeaderFields, coverage: ChecksumCoverage) -> Result<Self> {
        fields.validate()?;
        let mut frame = Self::empty_with_coverage(fields.payload_len, coverage);
        frame.prefilled = Some(fields);
        frame.write_header(&fields);
        Ok(frame)
    }

    /// Current assembly state.
    pub fn state(&self) -> FrameState {
        if self.cursor == 0 {
            FrameState::Empty
        } else if self.cursor == self.frame_len() {
            FrameState::Complete
        } else if self.cursor < HEADER_SIZE {
            FrameState::InHeader
        } else {
            FrameState::InPayload
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == FrameState::Complete
    }

    /// Bytes written so far, including the checksum once complete.
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Payload capacity fixed at construction.
    pub fn capacity(&self) -> u8 {
        self.payload.capacity()
    }

    /// Total size of the finished frame: header, payload and checksum.
    pub fn frame_len(&self) -> usize {
        self.data_len() + CHECKSUM_SIZE
    }

    /// Bytes that can still be appended before the frame completes.
    pub fn remaining(&self) -> usize {
        if self.is_complete() {
            0
        } else {
            self.data_len() - self.cursor
        }
    }

    pub fn coverage(&self) -> ChecksumCoverage {
        self.coverage
    }

    pub fn header(&self) -> &HeaderView {
        &self.header
    }

    pub fn payload(&self) -> &PayloadView {
        &self.payload
    }

    /// Header fields, once all ten header bytes have arrived.
    pub fn header_fields(&self) -> Option<HeaderFields> {
        self.header.fields(&self.buf)
    }

    /// The payload bytes written so far.
    pub fn payload_bytes(&self) -> &[u8] {
        self.payload.as_slice(&self.buf)
    }

    /// Read one payload byte. Fails for positions not yet written.
    pub fn payload_byte(&self, index: usize) -> Result<u8> {
        self.payload.get(&self.buf, index)
    }

    /// The checksum written into the frame, once complete.
    pub fn checksum(&self) -> Option<u16> {
        if !self.is_complete() {
            return None;
        }
        let at = self.data_len();
        Some(u16::from_le_bytes([self.buf[at], self.buf[at + 1]]))
    }

    /// Digest of the covered bytes appended so far.
    pub fn running_checksum(&self) -> u16 {
        self.checksum.value()
    }

    /// The written prefix of the frame.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.cursor]
    }

    /// Owned copy of the written prefix.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }

    pub fn append_u8(&mut self, value: u8) -> Result<FrameState> {
        self.append_bytes(&[value])
    }

    pub fn append_u16(&mut self, value: u16) -> Result<FrameState> {
        self.append_bytes(&value.to_le_bytes())
    }

    pub fn append_u32(&mut self, value: u32) -> Result<FrameState> {
        self.append_bytes(&value.to_le_bytes())
    }

    pub fn append_f32(&mut self, value: f32) -> Result<FrameState> {
        self.append_bytes(&value.to_le_bytes())
    }

    pub fn append_f64(&mut self, value: f64) -> Result<FrameState> {
        self.append_bytes(&value.to_le_bytes())
    }

    /// Append raw bytes at the cursor.
    ///
    /// Fails with [`FrameError::CapacityExceeded`], leaving the frame
    /// untouched, if the bytes would pass the end of the payload or the frame
    /// is already complete. Returns the state after the append.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> Result<FrameState> {
        let remaining = self.remaining();
        if self.is_complete() || bytes.len() > remaining {
            return Err(FrameError::CapacityExceeded {
                requested: bytes.len(),
                remaining,
            });
        }
        if bytes.is_empty() {
            return Ok(self.state());
        }

        let start = self.cursor;
        let header_part = HEADER_SIZE.saturating_sub(start).min(bytes.len());
        let (head, body) = bytes.split_at(header_part);
        for (offset, &b) in (start..).zip(head) {
            check_header_byte(offset, b, self.capacity())?;
        }

        if start == 0 {
            self.checksum.reset();
        }
        for &b in head {
            self.header.push(&mut self.buf, b)?;
        }
        self.payload.extend(&mut self.buf, body)?;

        Ok(self.commit(start, start + bytes.len()))
    }

    /// Return to the state right after construction. Capacity and coverage
    /// are kept. A frame built by [`Frame::with_header`] gets its header
    /// written again; one built by [`Frame::empty`] is left empty.
    pub fn reset(&mut self) {
        self.buf.fill(0);
        self.cursor = 0;
        self.header.clear();
        self.payload.clear();
        self.checksum.reset();
        if let Some(fields) = self.prefilled {
            self.write_header(&fields);
        }
    }

    fn write_header(&mut self, fields: &HeaderFields) {
        self.header = HeaderView::prefilled(&mut self.buf, fields);
        self.checksum.reset();
        self.commit(0, HEADER_SIZE);
    }

    fn data_len(&self) -> usize {
        HEADER_SIZE + usize::from(self.payload.capacity())
    }

    /// Fold `buf[start..end]` into the checksum, advance the cursor and
    /// finalize if the payload is now full.
    fn commit(&mut self, start: usize, end: usize) -> FrameState {
        let covered_from = match self.coverage {
            ChecksumCoverage::IncludeMarker => start,
            ChecksumCoverage::ExcludeMarker => start.max(1),
        };
        if covered_from < end {
            self.checksum.update(&self.buf[covered_from..end]);
        }
        self.cursor = end;
        tracing::trace!(cursor = end, appended = end - start, "frame append");

        if end < self.data_len() {
            return self.state();
        }

        let crc = self.checksum.value();
        self.buf[end..end + CHECKSUM_SIZE].copy_from_slice(&crc.to_le_bytes());
        self.cursor = end + CHECKSUM_SIZE;
        tracing::debug!(len = self.cursor, checksum = crc, "frame complete");
        FrameState::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::checksum;
    use crate::header::MARKER_V2;

    fn header(capacity: u8) -> HeaderFields {
        HeaderFields {
            payload_len: capacity,
            ..HeaderFields::new(MARKER_V2, 7, 1, 1, 0)
        }
    }

    #[test]
    fn incremental_state_transitions() {
        let mut frame = Frame::empty(2);
        assert_eq!(frame.state(), FrameState::Empty);

        let bytes = header(2).to_bytes();
        assert_eq!(frame.append_u8(bytes[0]).unwrap(), FrameState::InHeader);
        assert_eq!(
            frame.append_bytes(&bytes[1..9]).unwrap(),
            FrameState::InHeader
        );
        assert_eq!(frame.header().filled(), 9);
        assert_eq!(frame.append_u8(bytes[9]).unwrap(), FrameState::InPayload);
        assert!(frame.header().is_full());
        assert_eq!(frame.append_u8(0xAA).unwrap(), FrameState::InPayload);
        assert_eq!(frame.append_u8(0xBB).unwrap(), FrameState::Complete);

        assert_eq!(frame.len(), HEADER_SIZE + 2 + CHECKSUM_SIZE);
        assert_eq!(frame.payload_bytes(), &[0xAA, 0xBB]);
    }

    #[test]
    fn prefilled_frame_starts_in_payload() {
        let frame = Frame::with_header(header(9), ChecksumCoverage::IncludeMarker).unwrap();
        assert_eq!(frame.state(), FrameState::InPayload);
        assert_eq!(frame.len(), HEADER_SIZE);
        assert_eq!(frame.remaining(), 9);
        assert_eq!(frame.header_fields(), Some(header(9)));
    }

    #[test]
    fn typed_appends_are_little_endian() {
        let mut frame = Frame::with_header(header(19), ChecksumCoverage::IncludeMarker).unwrap();
        frame.append_u16(0x1234).unwrap();
        frame.append_u32(0xDEADBEEF).unwrap();
        frame.append_f32(1.5).unwrap();
        frame.append_f64(-2.0).unwrap();
        let state = frame.append_u8(0x7F).unwrap();

        assert_eq!(state, FrameState::Complete);
        let payload = frame.payload_bytes();
        assert_eq!(&payload[0..2], &[0x34, 0x12]);
        assert_eq!(&payload[2..6], &[0xEF, 0xBE, 0xAD, 0xDE]);
        assert_eq!(&payload[6..10], &1.5f32.to_le_bytes());
        assert_eq!(&payload[10..18], &(-2.0f64).to_le_bytes());
        assert_eq!(payload[18], 0x7F);
    }

    #[test]
    fn checksum_written_low_byte_first() {
        let mut frame = Frame::with_header(header(3), ChecksumCoverage::IncludeMarker).unwrap();
        frame.append_bytes(&[1, 2, 3]).unwrap();

        let bytes = frame.as_bytes();
        let expected = checksum(&bytes[..HEADER_SIZE + 3]);
        assert_eq!(frame.checksum(), Some(expected));
        assert_eq!(&bytes[HEADER_SIZE + 3..], &expected.to_le_bytes());
    }

    #[test]
    fn exclude_marker_coverage() {
        let mut frame = Frame::with_header(header(3), ChecksumCoverage::ExcludeMarker).unwrap();
        frame.append_bytes(&[1, 2, 3]).unwrap();

        let bytes = frame.as_bytes();
        assert_eq!(frame.checksum(), Some(checksum(&bytes[1..HEADER_SIZE + 3])));
    }

    #[test]
    fn exclude_marker_coverage_incremental() {
        let mut frame = Frame::empty_with_coverage(1, ChecksumCoverage::ExcludeMarker);
        frame.append_u8(MARKER_V2).unwrap();
        assert_eq!(frame.running_checksum(), 0x0000);
        frame.append_bytes(&header(1).to_bytes()[1..]).unwrap();
        frame.append_u8(9).unwrap();

        let bytes = frame.as_bytes();
        assert_eq!(frame.checksum(), Some(checksum(&bytes[1..HEADER_SIZE + 1])));
    }

    #[test]
    fn append_after_complete_fails_without_mutation() {
        let mut frame = Frame::with_header(header(1), ChecksumCoverage::IncludeMarker).unwrap();
        frame.append_u8(5).unwrap();
        let before = frame.as_bytes().to_vec();

        let err = frame.append_u8(6).unwrap_err();
        assert!(matches!(
            err,
            FrameError::CapacityExceeded {
                requested: 1,
                remaining: 0
            }
        ));
        assert!(frame.append_bytes(&[]).is_err());
        assert_eq!(frame.as_bytes(), before.as_slice());
        assert_eq!(frame.buf[frame.len()], 0);
    }

    #[test]
    fn oversized_append_fails_without_mutation() {
        let mut frame = Frame::with_header(header(4), ChecksumCoverage::IncludeMarker).unwrap();
        frame.append_u16(0xFFFF).unwrap();
        let running = frame.running_checksum();

        let err = frame.append_u32(1).unwrap_err();
        assert!(matches!(
            err,
            FrameError::CapacityExceeded {
                requested: 4,
                remaining: 2
            }
        ));
        assert_eq!(frame.len(), HEADER_SIZE + 2);
        assert_eq!(frame.payload().len(), 2);
        assert_eq!(frame.running_checksum(), running);
        assert!(frame.buf[HEADER_SIZE + 2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn append_spanning_header_and_payload() {
        let mut bytes = header(2).to_bytes().to_vec();
        bytes.extend_from_slice(&[0x10, 0x20]);

        let mut frame = Frame::empty(2);
        frame.append_bytes(&bytes[..4]).unwrap();
        let state = frame.append_bytes(&bytes[4..11]).unwrap();
        assert_eq!(state, FrameState::InPayload);
        assert!(frame.header().is_full());
        assert_eq!(frame.payload().len(), 1);
        assert_eq!(frame.append_bytes(&bytes[11..]).unwrap(), FrameState::Complete);
        assert_eq!(frame.payload_bytes(), &[0x10, 0x20]);
    }

    #[test]
    fn zero_capacity_completes_with_header() {
        let frame = Frame::with_header(header(0), ChecksumCoverage::IncludeMarker).unwrap();
        assert!(frame.is_complete());
        assert_eq!(frame.len(), HEADER_SIZE + CHECKSUM_SIZE);
        assert_eq!(frame.checksum(), Some(checksum(&header(0).to_bytes())));
    }

    #[test]
    fn payload_byte_is_bounds_checked() {
        let mut frame = Frame::with_header(header(4), ChecksumCoverage::IncludeMarker).unwrap();
        frame.append_u8(0x42).unwrap();
        assert_eq!(frame.payload_byte(0).unwrap(), 0x42);
        assert!(matches!(
            frame.payload_byte(1),
            Err(FrameError::OutOfBounds { index: 1, len: 1 })
        ));
    }

    #[test]
    fn checksum_absent_until_complete() {
        let mut frame = Frame::with_header(header(2), ChecksumCoverage::IncludeMarker).unwrap();
        assert_eq!(frame.checksum(), None);
        frame.append_u16(0).unwrap();
        assert!(frame.checksum().is_some());
    }

    #[test]
    fn reset_incremental_frame_returns_to_empty() {
        let mut frame = Frame::empty(1);
        frame.append_bytes(&header(1).to_bytes()).unwrap();
        frame.append_u8(1).unwrap();
        frame.reset();

        assert_eq!(frame.state(), FrameState::Empty);
        assert!(frame.as_bytes().is_empty());
        assert_eq!(frame.capacity(), 1);
        assert!(frame.header_fields().is_none());
        assert!(frame.payload().is_empty());
        assert!(frame.buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn reset_prefilled_frame_restores_header() {
        let mut frame = Frame::with_header(header(2), ChecksumCoverage::IncludeMarker).unwrap();
        let after_construction = frame.running_checksum();
        frame.append_u16(0xFFFF).unwrap();
        frame.reset();

        assert_eq!(frame.state(), FrameState::InPayload);
        assert_eq!(frame.as_bytes(), &header(2).to_bytes());
        assert_eq!(frame.header_fields(), Some(header(2)));
        assert!(frame.payload().is_empty());
        assert_eq!(frame.running_checksum(), after_construction);
        assert!(frame.buf[HEADER_SIZE..].iter().all(|&b| b == 0));
    }

    #[test]
    fn reset_zero_capacity_prefilled_frame_is_complete() {
        let mut frame = Frame::with_header(header(0), ChecksumCoverage::IncludeMarker).unwrap();
        let first = frame.to_bytes();
        frame.reset();
        assert!(frame.is_complete());
        assert_eq!(frame.as_bytes(), first.as_ref());
    }

    #[test]
    fn incremental_marker_is_validated() {
        let mut frame = Frame::empty(2);
        assert!(matches!(
            frame.append_u8(0x00),
            Err(FrameError::InvalidMarker(0x00))
        ));
        assert_eq!(frame.state(), FrameState::Empty);

        let mut bytes = HeaderFields {
            marker: 0x55,
            ..header(2)
        }
        .to_bytes()
        .to_vec();
        bytes.extend_from_slice(&[1, 2]);
        assert!(matches!(
            frame.append_bytes(&bytes),
            Err(FrameError::InvalidMarker(0x55))
        ));
        assert!(frame.is_empty());
        assert!(frame.buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn incremental_declared_length_must_match_capacity() {
        let mut bytes = header(9).to_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2]);

        let mut frame = Frame::empty(2);
        assert!(matches!(
            frame.append_bytes(&bytes),
            Err(FrameError::LengthMismatch {
                declared: 9,
                capacity: 2
            })
        ));
        assert!(frame.is_empty());

        frame.append_u8(MARKER_V2).unwrap();
        let running = frame.running_checksum();
        assert!(frame.append_u8(9).is_err());
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.running_checksum(), running);
        assert_eq!(frame.buf[1], 0);

        frame.append_u8(2).unwrap();
        frame.append_bytes(&bytes[2..HEADER_SIZE]).unwrap();
        assert_eq!(frame.append_bytes(&[1, 2]).unwrap(), FrameState::Complete);
        assert_eq!(frame.header_fields().map(|f| f.payload_len), Some(2));
    }

    #[test]
    fn reset_incremental_frame_validates_marker_again() {
        let mut frame = Frame::empty(1);
        frame.append_bytes(&header(1).to_bytes()).unwrap();
        frame.reset();
        assert!(matches!(
            frame.append_u8(0x00),
            Err(FrameError::InvalidMarker(0x00))
        ));
    }

    #[test]
    fn invalid_header_rejected() {
        let bad = HeaderFields::new(0x00, 1, 1, 1, 0);
        assert!(matches!(
            Frame::with_header(bad, ChecksumCoverage::IncludeMarker),
            Err(FrameError::InvalidMarker(0x00))
        ));
    }

    #[test]
    fn to_bytes_snapshot() {
        let mut frame = Frame::with_header(header(1), ChecksumCoverage::IncludeMarker).unwrap();
        frame.append_u8(3).unwrap();
        let snapshot = frame.to_bytes();
        assert_eq!(snapshot.as_ref(), frame.as_bytes());
        assert_eq!(snapshot.len(), frame.frame_len());
    }

    #[test]
    fn storage_has_signature_headroom() {
        assert_eq!(MAX_FRAME_LEN, 280);
        let frame = Frame::empty(255);
        assert_eq!(frame.frame_len() + SIGNATURE_LEN, MAX_FRAME_LEN);
    }
}
