//! Decode orchestration: classify, locate the base level, fill pixels.

use std::fmt;

use segapvr_common::BinaryReader;
use tracing::{debug, debug_span, warn};

use crate::mip::{locate_base_level, MipLevel};
use crate::texel::{read_texel, store_rgba, texel_to_rgba, PixelFormat, RGBA_SIZE};
use crate::twiddle::untwiddle_index;
use crate::vq::{decompress_vq, Codebook};
use crate::{Error, Result, TextureHeader, TextureType, TwiddleTable};

/// Stages a decode passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    ParseHeader,
    ClassifyAttributes,
    LocateCodebook,
    SkipMips,
    FillPixels,
    Done,
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ParseHeader => "parse-header",
            Self::ClassifyAttributes => "classify-attributes",
            Self::LocateCodebook => "locate-codebook",
            Self::SkipMips => "skip-mips",
            Self::FillPixels => "fill-pixels",
            Self::Done => "done",
        })
    }
}

/// Decode the texture payload into `dst` as RGBA8888, using the
/// process-wide twiddle table.
///
/// `payload` is the data following the headers (see
/// [`parse_header`](crate::parse_header)) and `dst` must hold at least
/// `width * height * 4` bytes.
pub fn decode(payload: &[u8], header: &TextureHeader, dst: &mut [u8]) -> Result<()> {
    decode_with_table(TwiddleTable::global(), payload, header, dst)
}

/// Decode the texture payload into `dst` as RGBA8888.
///
/// Classification and size checks happen before anything is written, so an
/// unsupported type mask leaves `dst` untouched. An unknown pixel format
/// byte is not an error: no texels are written. YUV422 texels come out
/// opaque white.
pub fn decode_with_table(
    table: &TwiddleTable,
    payload: &[u8],
    header: &TextureHeader,
    dst: &mut [u8],
) -> Result<()> {
    let span = debug_span!("decode", width = header.width(), height = header.height());
    let _enter = span.enter();

    debug!(stage = %DecodeStage::ClassifyAttributes, attributes = header.attributes());
    let texture_type = header.texture_type()?;

    let expected = header.rgba_len();
    if dst.len() < expected {
        return Err(Error::DestinationTooSmall {
            expected,
            actual: dst.len(),
        });
    }

    let Some(format) = header.pixel_format() else {
        warn!(format = header.format_mask(), "pixel format not supported, nothing decoded");
        return Ok(());
    };
    if format == PixelFormat::Yuv422 {
        warn!("YUV422 is not decoded, texels are filled with opaque white");
    }
    debug!(%texture_type, %format, "classified");

    let mut reader = BinaryReader::new(payload);

    let codebook = match texture_type.codebook_size(header.width()) {
        Some(entries) => {
            debug!(stage = %DecodeStage::LocateCodebook, entries);
            Some(Codebook::read(&mut reader, entries)?)
        }
        None => None,
    };

    debug!(stage = %DecodeStage::SkipMips, has_mip_maps = texture_type.has_mip_maps());
    let level = locate_base_level(&mut reader, header.width(), header.height(), texture_type)?;

    debug!(
        stage = %DecodeStage::FillPixels,
        offset = reader.position(),
        width = level.width,
        height = level.height
    );
    let data = reader.remaining_bytes();
    match codebook {
        Some(codebook) => decompress_vq(table, &codebook, data, &level, format, dst)?,
        None => fill_raw(header, texture_type, data, &level, format, dst)?,
    }

    debug!(stage = %DecodeStage::Done);
    Ok(())
}

/// Convert uncompressed texels, placing them in raster or twiddled order.
///
/// Twiddled placement is computed against the header's dimensions rather
/// than the level's.
fn fill_raw(
    header: &TextureHeader,
    texture_type: TextureType,
    texels: &[u8],
    level: &MipLevel,
    format: PixelFormat,
    dst: &mut [u8],
) -> Result<()> {
    for processed in 0..level.pixel_count {
        let texel = read_texel(texels, processed)?;
        let pixel = if texture_type.is_twiddled() {
            untwiddle_index(header.width(), header.height(), processed as u32) as usize
        } else {
            processed
        };
        store_rgba(dst, pixel * RGBA_SIZE, texel_to_rgba(texel, format))?;
    }
    Ok(())
}
