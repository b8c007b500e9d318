//! segapvr - Sega PVR texture decoding library.
//!
//! This crate provides a unified interface to the segapvr crates.
//!
//! # Crates
//!
//! - [`segapvr_common`] - Common utilities (bounded binary reading)
//! - [`segapvr_pvr`] - PVR header parsing and RGBA8888 decoding
//!
//! # Example
//!
//! ```no_run
//! use segapvr::prelude::*;
//!
//! let texture = load_pvr_file("texture.pvr")?;
//! println!("{}x{}", texture.width(), texture.height());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use segapvr_common as common;
pub use segapvr_pvr as pvr;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use segapvr_common::BinaryReader;
    pub use segapvr_pvr::{
        decode, decode_pvr, is_pvr, load_pvr_file, parse_header, DecodedTexture, PixelFormat,
        TextureHeader, TextureType,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
