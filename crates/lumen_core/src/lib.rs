//! Lumen Core - image storage for the Lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Bitmap codec**: uncompressed 24-bit BMP files, read and written
//!   byte-exactly (`Bitmap`, `FileHeader`, `InfoHeader`)
//! - **Byte cursors**: bounds-checked little-endian readers and writers
//!
//! # Example
//!
//! ```no_run
//! use lumen_core::{Bitmap, Rgb8};
//!
//! let mut image = Bitmap::new(16, 12)?;
//! image.set(0, 0, Rgb8::new(255, 0, 0));
//! image.write("out.bmp")?;
//!
//! let loaded = Bitmap::read("out.bmp")?;
//! assert_eq!(loaded, image);
//! # Ok::<(), lumen_core::BitmapError>(())
//! ```

pub mod bitmap;
pub mod codec;
pub mod header;

// Re-export commonly used types
pub use bitmap::{Bitmap, BitmapDiff, BitmapError, BitmapResult, Rgb8};
pub use codec::{ByteReader, ByteWriter, CodecError, CodecResult};
pub use header::{row_size, FileHeader, InfoHeader};
