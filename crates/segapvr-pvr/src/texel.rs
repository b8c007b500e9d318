//! Texel conversion from packed 16-bit formats to RGBA8888.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};

use crate::{Error, Result};

/// Size of one packed source texel in bytes.
pub const TEXEL_SIZE: usize = 2;

/// Size of one RGBA8888 destination pixel in bytes.
pub const RGBA_SIZE: usize = 4;

/// Pixel format, taken from the format mask of the attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PixelFormat {
    Argb1555 = 0x00,
    Rgb565 = 0x01,
    Argb4444 = 0x02,
    /// Not decoded. Texels come out opaque white.
    Yuv422 = 0x03,
}

impl PixelFormat {
    /// Classify a format mask byte.
    pub fn from_mask(mask: u8) -> Option<Self> {
        match mask {
            0x00 => Some(Self::Argb1555),
            0x01 => Some(Self::Rgb565),
            0x02 => Some(Self::Argb4444),
            0x03 => Some(Self::Yuv422),
            _ => None,
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Argb1555 => "ARGB1555",
            Self::Rgb565 => "RGB565",
            Self::Argb4444 => "ARGB4444",
            Self::Yuv422 => "YUV422",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expand one packed texel into `[r, g, b, a]`.
///
/// Channels are shifted into place without replicating their high bits, so
/// a full-intensity 5-bit channel becomes 248, not 255.
#[inline]
pub fn texel_to_rgba(texel: u16, format: PixelFormat) -> [u8; 4] {
    match format {
        PixelFormat::Rgb565 => [
            (((texel >> 11) & 0x1F) << 3) as u8,
            (((texel >> 5) & 0x3F) << 2) as u8,
            ((texel & 0x1F) << 3) as u8,
            0xFF,
        ],
        PixelFormat::Argb1555 => [
            ((texel & 0x7C00) >> 7) as u8,
            ((texel & 0x03E0) >> 2) as u8,
            ((texel & 0x001F) << 3) as u8,
            if texel & 0x8000 != 0 { 0xFF } else { 0x00 },
        ],
        PixelFormat::Argb4444 => [
            ((texel & 0x0F00) >> 4) as u8,
            (texel & 0x00F0) as u8,
            ((texel & 0x000F) << 4) as u8,
            ((texel & 0xF000) >> 8) as u8,
        ],
        PixelFormat::Yuv422 => [0xFF; 4],
    }
}

/// Read the `index`th little-endian texel of `texels`.
#[inline]
pub fn read_texel(texels: &[u8], index: usize) -> Result<u16> {
    let start = index * TEXEL_SIZE;
    texels
        .get(start..start + TEXEL_SIZE)
        .map(LittleEndian::read_u16)
        .ok_or(Error::TexelOutOfBounds {
            position: start,
            len: texels.len(),
        })
}

/// Write one RGBA pixel at byte offset `position` of `dst`.
#[inline]
pub fn store_rgba(dst: &mut [u8], position: usize, rgba: [u8; 4]) -> Result<()> {
    let len = dst.len();
    dst.get_mut(position..position + RGBA_SIZE)
        .ok_or(Error::TexelOutOfBounds { position, len })?
        .copy_from_slice(&rgba);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb565() {
        assert_eq!(texel_to_rgba(0xFFFF, PixelFormat::Rgb565), [248, 252, 248, 255]);
        assert_eq!(texel_to_rgba(0x0000, PixelFormat::Rgb565), [0, 0, 0, 255]);
        assert_eq!(texel_to_rgba(0xF800, PixelFormat::Rgb565), [248, 0, 0, 255]);
        assert_eq!(texel_to_rgba(0x07E0, PixelFormat::Rgb565), [0, 252, 0, 255]);
        assert_eq!(texel_to_rgba(0x001F, PixelFormat::Rgb565), [0, 0, 248, 255]);
    }

    #[test]
    fn test_argb1555() {
        assert_eq!(texel_to_rgba(0xFFFF, PixelFormat::Argb1555), [248, 248, 248, 255]);
        assert_eq!(texel_to_rgba(0x7FFF, PixelFormat::Argb1555), [248, 248, 248, 0]);
        assert_eq!(texel_to_rgba(0x8000, PixelFormat::Argb1555), [0, 0, 0, 255]);
        assert_eq!(texel_to_rgba(0x7C00, PixelFormat::Argb1555), [248, 0, 0, 0]);
        assert_eq!(texel_to_rgba(0x03E0, PixelFormat::Argb1555), [0, 248, 0, 0]);
        assert_eq!(texel_to_rgba(0x0001, PixelFormat::Argb1555), [0, 0, 8, 0]);
    }

    #[test]
    fn test_argb4444() {
        assert_eq!(texel_to_rgba(0xF000, PixelFormat::Argb4444), [0, 0, 0, 0xF0]);
        assert_eq!(texel_to_rgba(0x0F00, PixelFormat::Argb4444), [0xF0, 0, 0, 0]);
        assert_eq!(texel_to_rgba(0x00F0, PixelFormat::Argb4444), [0, 0xF0, 0, 0]);
        assert_eq!(texel_to_rgba(0x000F, PixelFormat::Argb4444), [0, 0, 0xF0, 0]);
        assert_eq!(texel_to_rgba(0x1234, PixelFormat::Argb4444), [0x20, 0x30, 0x40, 0x10]);
    }

    #[test]
    fn test_yuv422_is_opaque_white() {
        assert_eq!(texel_to_rgba(0x0000, PixelFormat::Yuv422), [0xFF; 4]);
        assert_eq!(texel_to_rgba(0x1234, PixelFormat::Yuv422), [0xFF; 4]);
    }

    #[test]
    fn test_format_mask() {
        assert_eq!(PixelFormat::from_mask(0), Some(PixelFormat::Argb1555));
        assert_eq!(PixelFormat::from_mask(3), Some(PixelFormat::Yuv422));
        assert_eq!(PixelFormat::from_mask(5), None);
    }

    #[test]
    fn test_read_texel_bounds() {
        let texels = [0x34, 0x12, 0x78];
        assert_eq!(read_texel(&texels, 0).unwrap(), 0x1234);
        assert!(matches!(
            read_texel(&texels, 1),
            Err(Error::TexelOutOfBounds { position: 2, len: 3 })
        ));
    }

    #[test]
    fn test_store_rgba_bounds() {
        let mut dst = [0u8; 8];
        store_rgba(&mut dst, 4, [1, 2, 3, 4]).unwrap();
        assert_eq!(dst, [0, 0, 0, 0, 1, 2, 3, 4]);
        assert!(store_rgba(&mut dst, 6, [9; 4]).is_err());
        assert_eq!(dst, [0, 0, 0, 0, 1, 2, 3, 4]);
    }
}
