use std::io::{ErrorKind, Write};

use crate::error::{FrameError, Result};
use crate::frame::Frame;

/// Writes complete frames to any `Write` sink.
///
/// The sink owns when and how the bytes travel; the writer only guarantees
/// that each frame is written whole and flushed.
pub struct FrameWriter<T> {
    inner: T,
    frames_written: u64,
}

impl<T: Write> FrameWriter<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            frames_written: 0,
        }
    }

    /// Write a complete frame (blocking).
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        if !frame.is_complete() {
            return Err(FrameError::Incomplete {
                written: frame.len(),
                expected: frame.frame_len(),
            });
        }

        let bytes = frame.as_bytes();
        let mut offset = 0usize;
        while offset < bytes.len() {
            match self.inner.write(&bytes[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()?;
        self.frames_written += 1;
        tracing::trace!(len = bytes.len(), total = self.frames_written, "frame written");
        Ok(())
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the writer and return the inner sink.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
