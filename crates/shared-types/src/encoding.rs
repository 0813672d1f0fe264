//! # Wire Encoding
//!
//! Little-endian fixed-width integers and CompactSize-prefixed byte strings.
//!
//! CompactSize layout:
//!
//! | Value | Bytes |
//! |-------|-------|
//! | `< 0xfd` | 1 |
//! | `<= 0xffff` | `0xfd` + u16 |
//! | `<= 0xffff_ffff` | `0xfe` + u32 |
//! | otherwise | `0xff` + u64 |

use crate::errors::EncodingError;

/// Largest length a CompactSize prefix may declare.
pub const MAX_SIZE: u64 = 0x0200_0000;

/// Append-only encoder over a byte vector.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn write_i64(&mut self, value: i64) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Write a CompactSize integer.
    pub fn write_compact_size(&mut self, value: u64) -> &mut Self {
        if value < 0xfd {
            self.buf.push(value as u8);
        } else if value <= 0xffff {
            self.buf.push(0xfd);
            self.buf.extend_from_slice(&(value as u16).to_le_bytes());
        } else if value <= 0xffff_ffff {
            self.buf.push(0xfe);
            self.buf.extend_from_slice(&(value as u32).to_le_bytes());
        } else {
            self.buf.push(0xff);
            self.buf.extend_from_slice(&value.to_le_bytes());
        }
        self
    }

    /// Write a length-prefixed byte string.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_compact_size(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Write raw bytes with no prefix.
    pub fn write_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], EncodingError> {
        if self.remaining() < n {
            return Err(EncodingError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], EncodingError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, EncodingError> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_i32(&mut self) -> Result<i32, EncodingError> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, EncodingError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, EncodingError> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    /// Read a CompactSize integer, rejecting non-minimal forms and values
    /// above [`MAX_SIZE`].
    pub fn read_compact_size(&mut self) -> Result<u64, EncodingError> {
        let value = match self.read_u8()? {
            0xfd => {
                let v = u16::from_le_bytes(self.take_array()?) as u64;
                if v < 0xfd {
                    return Err(EncodingError::NonCanonicalSize);
                }
                v
            }
            0xfe => {
                let v = u32::from_le_bytes(self.take_array()?) as u64;
                if v <= 0xffff {
                    return Err(EncodingError::NonCanonicalSize);
                }
                v
            }
            0xff => {
                let v = u64::from_le_bytes(self.take_array()?);
                if v <= 0xffff_ffff {
                    return Err(EncodingError::NonCanonicalSize);
                }
                v
            }
            small => small as u64,
        };
        if value > MAX_SIZE {
            return Err(EncodingError::OversizedLength(value));
        }
        Ok(value)
    }

    /// Read a CompactSize-prefixed byte string.
    pub fn read_var_bytes(&mut self) -> Result<Vec<u8>, EncodingError> {
        let len = self.read_compact_size()? as usize;
        Ok(self.take(len)?.to_vec())
    }

    /// Fail if any input is left unread.
    pub fn finish(self) -> Result<(), EncodingError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(EncodingError::TrailingBytes(n)),
        }
    }
}
