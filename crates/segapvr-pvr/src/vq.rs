//! Vector-quantized texture expansion.
//!
//! A VQ payload is a codebook of 2x2 texel blocks followed by one index
//! byte per block. Index bytes are stored twiddled; blocks are written out
//! in raster order.

use segapvr_common::BinaryReader;

use crate::mip::MipLevel;
use crate::texel::{read_texel, store_rgba, texel_to_rgba, PixelFormat, RGBA_SIZE, TEXEL_SIZE};
use crate::{Error, Result, TextureType, TwiddleTable};

/// Codebook of 2x2 texel blocks.
#[derive(Debug, Clone, Copy)]
pub struct Codebook<'a> {
    /// Texel data from the start of the codebook to the end of the payload.
    texels: &'a [u8],
    entries: usize,
}

impl<'a> Codebook<'a> {
    /// Take a codebook of `entries` blocks from the reader, leaving it
    /// positioned at the data that follows.
    ///
    /// Lookups are bounded by the payload, not by `entries`: an index past
    /// the declared entries reads the bytes that follow the codebook.
    pub fn read(reader: &mut BinaryReader<'a>, entries: usize) -> Result<Self> {
        let texels = reader.remaining_bytes();
        reader.skip(Self::byte_len(entries))?;
        Ok(Self { texels, entries })
    }

    /// Size in bytes of a codebook with `entries` blocks.
    pub const fn byte_len(entries: usize) -> usize {
        entries * TextureType::CODEBOOK_ENTRY_TEXELS * TEXEL_SIZE
    }

    /// Number of declared entries.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Texel `index`, counted in texels from the start of the codebook.
    #[inline]
    pub fn texel(&self, index: usize) -> Result<u16> {
        read_texel(self.texels, index)
    }
}

/// Expand a VQ base level into `dst`.
///
/// `level` is the half-resolution block grid from
/// [`locate_base_level`](crate::mip::locate_base_level) and `indices` the
/// index bytes of the base level.
pub fn decompress_vq(
    table: &TwiddleTable,
    codebook: &Codebook<'_>,
    indices: &[u8],
    level: &MipLevel,
    format: PixelFormat,
    dst: &mut [u8],
) -> Result<()> {
    let block_width = level.width as usize;
    let (mut x, mut y) = (0usize, 0usize);

    for _ in 0..level.pixel_count {
        let position = table.swizzled_position(x as u32, y as u32);
        let index = *indices.get(position).ok_or(Error::TexelOutOfBounds {
            position,
            len: indices.len(),
        })? as usize
            * TextureType::CODEBOOK_ENTRY_TEXELS;

        // Codebook blocks are column-major: (0,0) (0,1) (1,0) (1,1).
        for yoffset in 0..2 {
            for xoffset in 0..2 {
                let texel = codebook.texel(index + xoffset * 2 + yoffset)?;
                let pixel = (y * 2 + yoffset) * 2 * block_width + (x * 2 + xoffset);
                store_rgba(dst, pixel * RGBA_SIZE, texel_to_rgba(texel, format))?;
            }
        }

        x += 1;
        if x >= block_width {
            x = 0;
            y += 1;
        }
    }

    Ok(())
}
