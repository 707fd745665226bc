//! Chunked line reader.
//!
//! `ChunkReader` pulls large fixed-size chunks from any [`Read`] source
//! and carves them into delimiter-terminated lines. The whole pipeline's
//! throughput is dominated by this loop, so the delimiter scan goes
//! through the SIMD byte-find primitive and line bytes are copied once,
//! straight into a caller-owned reusable buffer.

use std::io::{ErrorKind, Read};

use crate::bytes::LineBuf;
use crate::error::{Error, Result};
use crate::simd;

/// Default backing-chunk capacity.
pub const DEFAULT_CHUNK_CAPACITY: usize = 4 * 1024 * 1024;

/// Buffered reader that yields delimiter-inclusive lines.
pub struct ChunkReader<R> {
    inner: R,
    buf: Box<[u8]>,
    filled: usize,
    cursor: usize,
    delim: u8,
}

impl<R: Read> ChunkReader<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, DEFAULT_CHUNK_CAPACITY)
    }

    /// Reader with a custom chunk capacity. Lines longer than the chunk
    /// are still supported; they accumulate across refills.
    #[must_use]
    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        Self {
            inner,
            buf: vec![0u8; capacity.max(1)].into_boxed_slice(),
            filled: 0,
            cursor: 0,
            delim: b'\n',
        }
    }

    /// Replace the line delimiter (default `\n`).
    #[must_use]
    pub fn with_delimiter(mut self, delim: u8) -> Self {
        self.delim = delim;
        self
    }

    /// Read the next line into `line`, replacing its previous content.
    ///
    /// The line includes the terminating delimiter byte when one was
    /// present; the final line of a source with no trailing delimiter is
    /// returned without one. Returns the line length, or `0` at end of
    /// stream.
    pub fn read_line(&mut self, line: &mut LineBuf) -> Result<usize> {
        line.clear();
        loop {
            if self.cursor == self.filled {
                self.filled = self.refill()?;
                self.cursor = 0;
                if self.filled == 0 {
                    return Ok(line.len());
                }
            }
            let window = &self.buf[self.cursor..self.filled];
            match simd::find_byte(window, self.delim) {
                Some(pos) => {
                    line.extend_from_slice(&window[..=pos])?;
                    self.cursor += pos + 1;
                    return Ok(line.len());
                }
                None => {
                    line.extend_from_slice(window)?;
                    self.cursor = self.filled;
                }
            }
        }
    }

    fn refill(&mut self) -> Result<usize> {
        loop {
            match self.inner.read(&mut self.buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::Read(e)),
            }
        }
    }
}
