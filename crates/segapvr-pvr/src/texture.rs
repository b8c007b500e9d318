//! Whole-file decoding.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::decode::{decode_with_table, DecodeStage};
use crate::header::read_header;
use crate::{GlobalIndexHeader, Result, TextureHeader, TwiddleTable};

/// A decoded texture in RGBA8888.
#[derive(Debug, Clone)]
pub struct DecodedTexture {
    /// Global index tag, if the file carried one.
    pub global_index: Option<GlobalIndexHeader>,
    /// The texture header.
    pub header: TextureHeader,
    rgba: Vec<u8>,
}

impl DecodedTexture {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.header.width() as u32
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.header.height() as u32
    }

    /// Pixel data, four bytes per pixel in raster order.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Take the pixel data.
    pub fn into_rgba(self) -> Vec<u8> {
        self.rgba
    }
}

/// Decode a complete PVR file held in memory.
///
/// Pixels the texture does not cover are left zeroed.
pub fn decode_pvr(data: &[u8]) -> Result<DecodedTexture> {
    decode_pvr_with_table(TwiddleTable::global(), data)
}

/// Decode a complete PVR file held in memory with an explicit twiddle table.
pub fn decode_pvr_with_table(table: &TwiddleTable, data: &[u8]) -> Result<DecodedTexture> {
    debug!(stage = %DecodeStage::ParseHeader, len = data.len());
    let parsed = read_header(data)?;

    let mut rgba = vec![0u8; parsed.texture.rgba_len()];
    decode_with_table(table, &data[parsed.payload_offset..], &parsed.texture, &mut rgba)?;

    Ok(DecodedTexture {
        global_index: parsed.global_index,
        header: parsed.texture,
        rgba,
    })
}

/// Read and decode a PVR file from disk.
pub fn load_pvr_file<P: AsRef<Path>>(path: P) -> Result<DecodedTexture> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading PVR file");

    let data = fs::read(path)?;
    decode_pvr(&data)
}
