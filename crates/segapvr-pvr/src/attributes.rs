//! Texture type classification.

use std::fmt;

use crate::{Error, Result};

/// Storage layout of a texture, taken from the type mask of the attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TextureType {
    Twiddled = 0x01,
    TwiddledMipMaps = 0x02,
    VectorQuantized = 0x03,
    VectorQuantizedMipMaps = 0x04,
    RawNonSquare = 0x09,
    Raw = 0x0B,
    TwiddledNonSquare = 0x0D,
    VectorQuantizedCustomCodeBook = 0x10,
    VectorQuantizedCustomCodeBookMipMaps = 0x11,
}

impl TextureType {
    /// Number of 16-bit texels in one codebook entry (a 2x2 block).
    pub const CODEBOOK_ENTRY_TEXELS: usize = 4;

    /// Codebook entry count of standard VQ textures.
    pub const STANDARD_CODEBOOK_SIZE: usize = 256;

    /// Classify a type mask byte.
    pub fn from_mask(mask: u8) -> Result<Self> {
        Ok(match mask {
            0x01 => Self::Twiddled,
            0x02 => Self::TwiddledMipMaps,
            0x03 => Self::VectorQuantized,
            0x04 => Self::VectorQuantizedMipMaps,
            0x09 => Self::RawNonSquare,
            0x0B => Self::Raw,
            0x0D => Self::TwiddledNonSquare,
            0x10 => Self::VectorQuantizedCustomCodeBook,
            0x11 => Self::VectorQuantizedCustomCodeBookMipMaps,
            other => return Err(Error::UnsupportedTypeMask(other)),
        })
    }

    /// The type mask byte.
    #[inline]
    pub const fn mask(self) -> u8 {
        self as u8
    }

    /// Texels are stored in twiddled order.
    pub const fn is_twiddled(self) -> bool {
        matches!(
            self,
            Self::Twiddled | Self::TwiddledMipMaps | Self::TwiddledNonSquare
        )
    }

    /// The base level is preceded by a chain of smaller mip levels.
    pub const fn has_mip_maps(self) -> bool {
        matches!(
            self,
            Self::TwiddledMipMaps
                | Self::VectorQuantizedMipMaps
                | Self::VectorQuantizedCustomCodeBookMipMaps
        )
    }

    /// Texels are stored as codebook indices.
    pub const fn is_vq_compressed(self) -> bool {
        matches!(
            self,
            Self::VectorQuantized
                | Self::VectorQuantizedMipMaps
                | Self::VectorQuantizedCustomCodeBook
                | Self::VectorQuantizedCustomCodeBookMipMaps
        )
    }

    /// Number of codebook entries, or `None` for uncompressed types.
    ///
    /// Custom codebooks are sized from the texture width: narrower than 16
    /// gives 16 entries, exactly 64 gives 128, anything else 256.
    pub fn codebook_size(self, width: u16) -> Option<usize> {
        match self {
            Self::VectorQuantized | Self::VectorQuantizedMipMaps => {
                Some(Self::STANDARD_CODEBOOK_SIZE)
            }
            Self::VectorQuantizedCustomCodeBook | Self::VectorQuantizedCustomCodeBookMipMaps => {
                Some(match width {
                    w if w < 16 => 16,
                    64 => 128,
                    _ => 256,
                })
            }
            _ => None,
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Twiddled => "twiddled",
            Self::TwiddledMipMaps => "twiddled+mipmaps",
            Self::VectorQuantized => "vq",
            Self::VectorQuantizedMipMaps => "vq+mipmaps",
            Self::RawNonSquare => "raw (non-square)",
            Self::Raw => "raw",
            Self::TwiddledNonSquare => "twiddled (non-square)",
            Self::VectorQuantizedCustomCodeBook => "vq (custom codebook)",
            Self::VectorQuantizedCustomCodeBookMipMaps => "vq+mipmaps (custom codebook)",
        }
    }
}

impl fmt::Display for TextureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TextureType; 9] = [
        TextureType::Twiddled,
        TextureType::TwiddledMipMaps,
        TextureType::VectorQuantized,
        TextureType::VectorQuantizedMipMaps,
        TextureType::RawNonSquare,
        TextureType::Raw,
        TextureType::TwiddledNonSquare,
        TextureType::VectorQuantizedCustomCodeBook,
        TextureType::VectorQuantizedCustomCodeBookMipMaps,
    ];

    #[test]
    fn test_mask_classification_is_exhaustive() {
        for ty in ALL {
            assert_eq!(TextureType::from_mask(ty.mask()).unwrap(), ty);
        }

        let known: Vec<u8> = ALL.iter().map(|t| t.mask()).collect();
        for mask in 0..=u8::MAX {
            if !known.contains(&mask) {
                assert!(matches!(
                    TextureType::from_mask(mask),
                    Err(Error::UnsupportedTypeMask(m)) if m == mask
                ));
            }
        }
    }

    #[test]
    fn test_flags() {
        assert!(TextureType::TwiddledMipMaps.is_twiddled());
        assert!(TextureType::TwiddledMipMaps.has_mip_maps());
        assert!(!TextureType::TwiddledMipMaps.is_vq_compressed());

        assert!(TextureType::TwiddledNonSquare.is_twiddled());
        assert!(!TextureType::TwiddledNonSquare.has_mip_maps());

        assert!(!TextureType::Raw.is_twiddled());
        assert!(!TextureType::RawNonSquare.has_mip_maps());

        assert!(TextureType::VectorQuantizedMipMaps.is_vq_compressed());
        assert!(TextureType::VectorQuantizedMipMaps.has_mip_maps());
        assert!(!TextureType::VectorQuantized.is_twiddled());
    }

    #[test]
    fn test_codebook_size() {
        assert_eq!(TextureType::Raw.codebook_size(64), None);
        assert_eq!(TextureType::VectorQuantized.codebook_size(8), Some(256));

        let custom = TextureType::VectorQuantizedCustomCodeBook;
        assert_eq!(custom.codebook_size(8), Some(16));
        assert_eq!(custom.codebook_size(16), Some(256));
        assert_eq!(custom.codebook_size(32), Some(256));
        assert_eq!(custom.codebook_size(64), Some(128));
        assert_eq!(custom.codebook_size(128), Some(256));
        assert_eq!(
            TextureType::VectorQuantizedCustomCodeBookMipMaps.codebook_size(64),
            Some(128)
        );
    }
}
