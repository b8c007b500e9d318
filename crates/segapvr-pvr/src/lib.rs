//! Sega PVR texture decoding.
//!
//! PVR is the native texture container of the Sega Dreamcast. A file holds
//! an optional `GBIX` global index tag, a `PVRT` texture header and the
//! texture payload. Payloads may be:
//!
//! - raw or twiddled (Morton ordered) 16-bit texels
//! - vector-quantized: a codebook of 2x2 blocks plus one index byte per block
//! - preceded by a mipmap chain, smallest level first
//!
//! This crate decodes the base level into a flat RGBA8888 buffer. Texels in
//! ARGB1555, RGB565 and ARGB4444 are supported; YUV422 is recognized but
//! decodes to opaque white.
//!
//! # Example
//!
//! ```no_run
//! use segapvr_pvr::{decode, parse_header};
//!
//! let data = std::fs::read("texture.pvr")?;
//! let (offset, header) = parse_header(&data)?;
//!
//! let mut rgba = vec![0u8; header.rgba_len()];
//! decode(&data[offset..], &header, &mut rgba)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod attributes;
mod error;
mod header;
mod texture;

pub mod decode;
pub mod mip;
pub mod texel;
pub mod twiddle;
pub mod vq;

pub use attributes::TextureType;
pub use decode::{decode, decode_with_table, DecodeStage};
pub use error::{Error, Result};
pub use header::{is_pvr, parse_header, read_header, GlobalIndexHeader, ParsedHeader, TextureHeader};
pub use mip::{mip_maps_count_from_width, MipLevel};
pub use texel::{texel_to_rgba, PixelFormat};
pub use texture::{decode_pvr, decode_pvr_with_table, load_pvr_file, DecodedTexture};
pub use twiddle::{build_twiddle_table, untwiddle, untwiddle_index, TwiddleTable};
