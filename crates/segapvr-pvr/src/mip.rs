//! Mipmap chain navigation.
//!
//! PVR files store mip levels smallest first, so the base level sits after
//! every smaller level. Decoding only ever produces the base level.

use segapvr_common::BinaryReader;
use tracing::trace;

use crate::texel::TEXEL_SIZE;
use crate::{Result, TextureType};

/// Dimensions of the mip level the payload cursor points at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MipLevel {
    /// Width in texels, or in 2x2 blocks for VQ textures.
    pub width: u32,
    /// Height in texels, or in 2x2 blocks for VQ textures.
    pub height: u32,
    /// `width * height`.
    pub pixel_count: usize,
}

impl MipLevel {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixel_count: width as usize * height as usize,
        }
    }
}

/// Number of mip levels in a full chain for a texture of this width.
pub fn mip_maps_count_from_width(width: u32) -> u32 {
    let mut width = width;
    let mut count = 0;
    while width != 0 {
        count += 1;
        width /= 2;
    }
    count
}

/// Advance `reader` past the smaller mip levels to the start of the base
/// level and return its dimensions.
///
/// Each skipped level takes `size / 4` bytes of index data for VQ textures
/// or `size * 2` bytes of texels otherwise. A mipmapped chain also carries
/// one extra 1x1 entry (1 byte VQ, 2 bytes raw) ahead of the base level.
/// VQ dimensions are returned at half resolution, one unit per 2x2 block.
pub fn locate_base_level(
    reader: &mut BinaryReader<'_>,
    width: u16,
    height: u16,
    texture_type: TextureType,
) -> Result<MipLevel> {
    let is_vq = texture_type.is_vq_compressed();
    let has_mip_maps = texture_type.has_mip_maps();

    let mut remaining = if has_mip_maps {
        mip_maps_count_from_width(width as u32)
    } else {
        1
    };
    let mut level = MipLevel::default();

    while remaining > 0 {
        let shift = remaining - 1;
        level = MipLevel::new((width as u32) >> shift, (height as u32) >> shift);
        remaining -= 1;

        if remaining > 0 {
            let skip = if is_vq {
                level.pixel_count / 4
            } else {
                level.pixel_count * TEXEL_SIZE
            };
            trace!(width = level.width, height = level.height, skip, "skipping mip level");
            reader.skip(skip)?;
        } else if has_mip_maps {
            reader.skip(if is_vq { 1 } else { TEXEL_SIZE })?;
        }
    }

    if is_vq {
        level = MipLevel::new(level.width / 2, level.height / 2);
    }

    Ok(level)
}
