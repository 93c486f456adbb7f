use crate::error::{FrameError, Result};

/// Largest payload a frame can carry.
pub const MAX_PAYLOAD_LEN: usize = 255;

/// Window over the payload region of a frame's storage.
///
/// Described by an offset, a fixed capacity and the number of bytes written.
/// Indexed access is checked against the written length, not the capacity:
/// a position is only readable once something has been appended there.
/// Appends are checked against the capacity and never touch storage outside
/// `offset..offset + capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadView {
    offset: usize,
    capacity: u8,
    len: u8,
}

impl PayloadView {
    /// An empty payload region starting at `offset`.
    pub fn new(offset: usize, capacity: u8) -> Self {
        Self {
            offset,
            capacity,
            len: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    /// Bytes written so far.
    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Unwritten bytes left before the region is full.
    pub fn remaining(&self) -> usize {
        usize::from(self.capacity - self.len)
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.capacity
    }

    /// Read the byte at `index`.
    pub fn get(&self, storage: &[u8], index: usize) -> Result<u8> {
        self.check_index(index)?;
        Ok(storage[self.offset + index])
    }

    /// Overwrite the byte at `index`.
    pub fn set(&self, storage: &mut [u8], index: usize, value: u8) -> Result<()> {
        self.check_index(index)?;
        storage[self.offset + index] = value;
        Ok(())
    }

    /// Append one byte at the current length.
    pub fn push(&mut self, storage: &mut [u8], value: u8) -> Result<()> {
        self.extend(storage, &[value])
    }

    /// Append `values` at the current length. Fails without writing if they do not fit.
    pub fn extend(&mut self, storage: &mut [u8], values: &[u8]) -> Result<()> {
        if values.len() > self.remaining() {
            return Err(FrameError::CapacityExceeded {
                requested: values.len(),
                remaining: self.remaining(),
            });
        }
        let start = self.offset + usize::from(self.len);
        storage[start..start + values.len()].copy_from_slice(values);
        // Fits in u8: values.len() <= remaining <= 255.
        self.len += values.len() as u8;
        Ok(())
    }

    /// The payload bytes written so far.
    pub fn as_slice<'a>(&self, storage: &'a [u8]) -> &'a [u8] {
        &storage[self.offset..self.offset + usize::from(self.len)]
    }

    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= usize::from(self.len) {
            return Err(FrameError::OutOfBounds {
                index,
                len: usize::from(self.len),
            });
        }
        Ok(())
    }
}
