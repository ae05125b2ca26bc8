//! Little-endian byte cursors over fixed-size buffers.
//!
//! Every read and write is bounds checked against the underlying slice, so a
//! truncated file or a mis-sized output buffer surfaces as an error instead of
//! a panic.

use thiserror::Error;

/// Errors raised by the byte cursors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Unexpected end of data at offset {offset}: needed {needed} bytes, {available} available")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Buffer overflow at offset {offset}: writing {needed} bytes into a {capacity} byte buffer")]
    Overflow {
        offset: usize,
        needed: usize,
        capacity: usize,
    },
}

/// Result type for cursor operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Reads little-endian values from a byte slice.
#[derive(Debug)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current offset from the start of the slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn take(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(CodecError::UnexpectedEof {
                offset: self.pos,
                needed: len,
                available: self.remaining(),
            });
        }

        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Move the cursor to an absolute offset.
    pub fn seek(&mut self, offset: usize) -> CodecResult<()> {
        if offset > self.bytes.len() {
            return Err(CodecError::UnexpectedEof {
                offset: self.bytes.len(),
                needed: offset - self.bytes.len(),
                available: 0,
            });
        }
        self.pos = offset;
        Ok(())
    }

    pub fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> CodecResult<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    pub fn read_u32(&mut self) -> CodecResult<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_i32(&mut self) -> CodecResult<i32> {
        self.read_array().map(i32::from_le_bytes)
    }
}

/// Writes little-endian values into a pre-sized byte slice.
#[derive(Debug)]
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> CodecResult<()> {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            return Err(CodecError::Overflow {
                offset: self.pos,
                needed: bytes.len(),
                capacity: self.buf.len(),
            });
        }

        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    /// Write `len` zero bytes.
    pub fn pad(&mut self, len: usize) -> CodecResult<()> {
        const ZEROS: [u8; 4] = [0; 4];

        let mut left = len;
        while left > 0 {
            let chunk = left.min(ZEROS.len());
            self.write_bytes(&ZEROS[..chunk])?;
            left -= chunk;
        }
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> CodecResult<()> {
        self.write_bytes(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> CodecResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> CodecResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> CodecResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }
}
