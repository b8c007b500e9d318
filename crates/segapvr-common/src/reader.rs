//! Binary reader for bounds-checked parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor over a byte slice. Every
//! read and every skip is checked against the end of the slice, so walking a
//! texture payload can never step outside the buffer it was handed.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// A cursor that reads bytes and zerocopy structs from a byte slice.
///
/// # Example
///
/// ```
/// use segapvr_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_bytes(2).unwrap(), &[0x01, 0x02]);
/// reader.skip(2).unwrap();
/// assert!(reader.skip(4).is_err());
/// assert_eq!(reader.remaining_bytes(), &[0x05, 0x06]);
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Advance the position by `count` bytes.
    ///
    /// Fails without moving if fewer than `count` bytes remain. Skipping
    /// exactly to the end of the buffer is allowed.
    #[inline]
    pub fn skip(&mut self, count: usize) -> Result<()> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        self.position += count;
        Ok(())
    }

    /// Get the remaining bytes as a slice.
    #[inline]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Check whether the bytes at the current position equal `magic`.
    ///
    /// A buffer too short to hold `magic` simply does not match.
    #[inline]
    pub fn starts_with(&self, magic: &[u8]) -> bool {
        self.remaining_bytes().starts_with(magic)
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use zerocopy::byteorder::little_endian::U32;
    use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

    use super::*;

    #[derive(Debug, FromBytes, Immutable, KnownLayout, Unaligned)]
    #[repr(C)]
    struct Tag {
        magic: [u8; 4],
        size: U32,
    }

    #[test]
    fn test_read_struct_little_endian() {
        let data = [b'P', b'V', b'R', b'T', 0x01, 0x02, 0x03, 0x04, 0xFF];
        let mut reader = BinaryReader::new(&data);

        let tag: Tag = reader.read_struct().unwrap();
        assert_eq!(&tag.magic, b"PVRT");
        assert_eq!(tag.size.get(), 0x04030201);
        assert_eq!(reader.position(), 8);
        assert_eq!(reader.remaining(), 1);
        assert!(reader.read_struct::<Tag>().is_err());
    }

    #[test]
    fn test_skip_is_bounded() {
        let data = [0u8; 4];
        let mut reader = BinaryReader::new(&data);

        reader.skip(3).unwrap();
        assert_eq!(reader.position(), 3);
        assert!(matches!(
            reader.skip(2),
            Err(Error::UnexpectedEof { needed: 2, available: 1 })
        ));
        assert_eq!(reader.position(), 3);
        reader.skip(1).unwrap();
        assert!(reader.is_empty());
    }

    #[test]
    fn test_peek_does_not_advance() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let reader = BinaryReader::new(&data);

        assert_eq!(reader.peek_bytes(2).unwrap(), &[0x01, 0x02]);
        assert_eq!(reader.position(), 0);
        assert!(reader.starts_with(&[0x01, 0x02]));
        assert!(!reader.starts_with(&[0x01, 0x02, 0x03, 0x04, 0x05]));
    }

    #[test]
    fn test_eof_error() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);

        assert!(reader.read_bytes(3).is_err());
        assert_eq!(reader.read_bytes(2).unwrap(), &[0x01, 0x02]);
        assert!(reader.is_empty());
    }
}
