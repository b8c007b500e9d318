//! PVR header structures and parsing.

use segapvr_common::BinaryReader;
use zerocopy::byteorder::little_endian::{U16, U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::texel::{PixelFormat, RGBA_SIZE};
use crate::{Error, Result, TextureType};

/// Optional global index tag that may precede the texture header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct GlobalIndexHeader {
    /// Tag ID, "GBIX" in ASCII.
    pub magic: [u8; 4],
    /// Number of bytes to the next tag.
    pub next_tag_offset: U32,
    /// Global index value.
    pub global_index: U64,
}

impl GlobalIndexHeader {
    /// Tag magic bytes.
    pub const MAGIC: &'static [u8; 4] = b"GBIX";

    /// Size of the tag in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

/// Texture header. Every PVR file carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct TextureHeader {
    /// Tag ID, "PVRT" in ASCII.
    pub magic: [u8; 4],
    /// Size of the texture data in bytes.
    pub texture_data_size: U32,
    /// Packed type mask and pixel format mask.
    pub attributes: U32,
    /// Width of the texture.
    pub width: U16,
    /// Height of the texture.
    pub height: U16,
}

impl TextureHeader {
    /// Tag magic bytes.
    pub const MAGIC: &'static [u8; 4] = b"PVRT";

    /// Size of the header in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Build a header from its field values.
    pub fn new(texture_data_size: u32, attributes: u32, width: u16, height: u16) -> Self {
        Self {
            magic: *Self::MAGIC,
            texture_data_size: U32::new(texture_data_size),
            attributes: U32::new(attributes),
            width: U16::new(width),
            height: U16::new(height),
        }
    }

    /// Texture width in texels.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width.get()
    }

    /// Texture height in texels.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height.get()
    }

    /// Raw attributes value.
    #[inline]
    pub fn attributes(&self) -> u32 {
        self.attributes.get()
    }

    /// Pixel format mask (low byte of the attributes).
    #[inline]
    pub fn format_mask(&self) -> u8 {
        (self.attributes() & 0xFF) as u8
    }

    /// Texture type mask (second byte of the attributes).
    #[inline]
    pub fn type_mask(&self) -> u8 {
        ((self.attributes() >> 8) & 0xFF) as u8
    }

    /// Classify the type mask.
    pub fn texture_type(&self) -> Result<TextureType> {
        TextureType::from_mask(self.type_mask())
    }

    /// Classify the format mask, if it is one we know.
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        PixelFormat::from_mask(self.format_mask())
    }

    /// Number of bytes an RGBA8888 rendition of the texture occupies.
    pub fn rgba_len(&self) -> usize {
        self.width() as usize * self.height() as usize * RGBA_SIZE
    }
}

/// Headers found at the start of a PVR file.
#[derive(Debug, Clone, Copy)]
pub struct ParsedHeader {
    /// Global index tag, if the file carries one.
    pub global_index: Option<GlobalIndexHeader>,
    /// The texture header.
    pub texture: TextureHeader,
    /// Offset of the texture payload from the start of the file.
    pub payload_offset: usize,
}

/// Check if data starts with a PVR texture, optionally behind a GBIX tag.
pub fn is_pvr(data: &[u8]) -> bool {
    let offset = if data.starts_with(GlobalIndexHeader::MAGIC) {
        GlobalIndexHeader::SIZE
    } else {
        0
    };
    data.get(offset..)
        .is_some_and(|rest| rest.starts_with(TextureHeader::MAGIC))
}

/// Read the optional global index tag and the texture header.
pub fn read_header(data: &[u8]) -> Result<ParsedHeader> {
    let mut reader = BinaryReader::new(data);

    let global_index = if reader.starts_with(GlobalIndexHeader::MAGIC) {
        Some(reader.read_struct::<GlobalIndexHeader>()?)
    } else {
        None
    };

    if !reader.starts_with(TextureHeader::MAGIC) {
        let offset = reader.position();
        let actual = reader.remaining_bytes();
        return Err(Error::MalformedHeader {
            offset,
            actual: actual[..actual.len().min(TextureHeader::MAGIC.len())].to_vec(),
        });
    }
    let texture: TextureHeader = reader.read_struct()?;

    Ok(ParsedHeader {
        global_index,
        texture,
        payload_offset: reader.position(),
    })
}

/// Parse the headers and return the number of bytes they occupy together
/// with the texture header.
///
/// The payload handed to [`decode`](crate::decode()) starts at the returned
/// offset.
pub fn parse_header(data: &[u8]) -> Result<(usize, TextureHeader)> {
    let parsed = read_header(data)?;
    Ok((parsed.payload_offset, parsed.texture))
}
