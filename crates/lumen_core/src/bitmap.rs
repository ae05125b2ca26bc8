//! In-memory 24-bit bitmap and its file codec.
//!
//! Pixels are kept row-major with row 0 at the top of the image. On disk the
//! rows run bottom-to-top (for positive heights), each pixel is three bytes in
//! B, G, R order and every row is zero-padded to a multiple of four bytes.

use std::path::Path;

use thiserror::Error;

use crate::codec::{ByteReader, ByteWriter, CodecError};
use crate::header::{row_size, FileHeader, InfoHeader, BITS_PER_PIXEL, SIGNATURE};

const BYTES_PER_PIXEL: usize = (BITS_PER_PIXEL / 8) as usize;

/// Errors that can occur while building, reading or writing a bitmap.
#[derive(Error, Debug)]
pub enum BitmapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed bitmap data: {0}")]
    Codec(#[from] CodecError),

    #[error("Not a bitmap file (signature {0:?})")]
    InvalidSignature([u8; 2]),

    #[error("Unsupported info header size: {0} bytes")]
    UnsupportedHeader(u32),

    #[error("Pixel array offset {0} overlaps the headers")]
    InvalidPixelOffset(u32),

    #[error("Unsupported bit depth: {0} bits per pixel")]
    UnsupportedBitDepth(u16),

    #[error("Unsupported compression method: {0}")]
    UnsupportedCompression(u32),

    #[error("Invalid bitmap dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Region {width}x{height} at ({x}, {y}) is outside the image")]
    InvalidRegion { x: u32, y: u32, width: u32, height: u32 },

    #[error("Image sizes differ: {0:?} vs {1:?}")]
    SizeMismatch((u32, u32), (u32, u32)),
}

pub type BitmapResult<T> = Result<T, BitmapError>;

/// An 8-bit-per-channel RGB pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8 { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Largest absolute difference over the three channels.
    pub fn max_delta(&self, other: &Rgb8) -> u8 {
        self.r
            .abs_diff(other.r)
            .max(self.g.abs_diff(other.g))
            .max(self.b.abs_diff(other.b))
    }
}

/// Result of comparing two bitmaps pixel by pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitmapDiff {
    /// Number of pixels that differ in at least one channel
    pub differing_pixels: usize,
    /// Largest per-channel difference seen
    pub max_channel_delta: u8,
}

impl BitmapDiff {
    pub fn is_identical(&self) -> bool {
        self.differing_pixels == 0
    }
}

/// A 24-bit bitmap image with its file headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
    width: u32,
    height: u32,
    pixels: Vec<Rgb8>,
}

impl Bitmap {
    /// Create a black image with headers describing a bottom-up 24-bit file.
    pub fn new(width: u32, height: u32) -> BitmapResult<Self> {
        let invalid = || BitmapError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        };

        let signed_width = i32::try_from(width).map_err(|_| invalid())?;
        let signed_height = i32::try_from(height).map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }

        // The whole file has to be addressable by the 32-bit size field
        let image_size = row_size(BITS_PER_PIXEL, width)
            .checked_mul(height as usize)
            .filter(|&size| size + FileHeader::SIZE + InfoHeader::SIZE <= u32::MAX as usize)
            .ok_or_else(invalid)? as u32;

        Ok(Self {
            file_header: FileHeader::new(image_size),
            info_header: InfoHeader::new(signed_width, signed_height, image_size),
            width,
            height,
            pixels: vec![Rgb8::BLACK; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels in row-major order, top row first.
    pub fn pixels(&self) -> &[Rgb8] {
        &self.pixels
    }

    /// Get the pixel at (x, y), with y = 0 at the top.
    pub fn get(&self, x: u32, y: u32) -> Rgb8 {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y), with y = 0 at the top.
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgb8) {
        let idx = self.index(x, y);
        self.pixels[idx] = pixel;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} image",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Bytes per stored row including padding.
    pub fn row_size(&self) -> usize {
        row_size(self.info_header.bit_count, self.width)
    }

    /// Copy a rectangular region into a new bitmap.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> BitmapResult<Bitmap> {
        let fits = x.checked_add(width).is_some_and(|right| right <= self.width)
            && y.checked_add(height).is_some_and(|bottom| bottom <= self.height);
        if !fits {
            return Err(BitmapError::InvalidRegion { x, y, width, height });
        }

        let mut region = Bitmap::new(width, height)?;
        for row in 0..height {
            let start = self.index(x, y + row);
            let dest = row as usize * width as usize;
            region.pixels[dest..dest + width as usize]
                .copy_from_slice(&self.pixels[start..start + width as usize]);
        }
        Ok(region)
    }

    /// Draw `other` with its top-left corner at (x, y), clipped to this image.
    pub fn paste(&mut self, other: &Bitmap, x: u32, y: u32) {
        let cols = other.width.min(self.width.saturating_sub(x));
        let rows = other.height.min(self.height.saturating_sub(y));

        for row in 0..rows {
            for col in 0..cols {
                self.set(x + col, y + row, other.get(col, row));
            }
        }
    }

    /// Compare pixel data with another bitmap of the same size.
    pub fn diff(&self, other: &Bitmap) -> BitmapResult<BitmapDiff> {
        if (self.width, self.height) != (other.width, other.height) {
            return Err(BitmapError::SizeMismatch(
                (self.width, self.height),
                (other.width, other.height),
            ));
        }

        let mut diff = BitmapDiff::default();
        for (a, b) in self.pixels.iter().zip(&other.pixels) {
            let delta = a.max_delta(b);
            if delta > 0 {
                diff.differing_pixels += 1;
                diff.max_channel_delta = diff.max_channel_delta.max(delta);
            }
        }
        Ok(diff)
    }

    /// Maps a stored row (in file order) to a row of the pixel buffer.
    fn buffer_row(&self, file_row: u32) -> u32 {
        if self.info_header.is_bottom_up() {
            self.height - 1 - file_row
        } else {
            file_row
        }
    }

    /// Serialize headers and pixel data into a complete bitmap file.
    pub fn encode(&self) -> BitmapResult<Vec<u8>> {
        let row_size = self.row_size();
        let pixel_offset = self.file_header.pixel_offset as usize;
        let padding = row_size - self.width as usize * BYTES_PER_PIXEL;

        let mut bytes = vec![0u8; pixel_offset + row_size * self.height as usize];
        let mut writer = ByteWriter::new(&mut bytes);

        self.file_header.encode(&mut writer)?;
        self.info_header.encode(&mut writer)?;
        writer.pad(pixel_offset.saturating_sub(writer.position()))?;

        for file_row in 0..self.height {
            let y = self.buffer_row(file_row);
            let start = y as usize * self.width as usize;
            for pixel in &self.pixels[start..start + self.width as usize] {
                writer.write_bytes(&[pixel.b, pixel.g, pixel.r])?;
            }
            writer.pad(padding)?;
        }

        Ok(bytes)
    }

    /// Parse a complete bitmap file.
    pub fn decode(bytes: &[u8]) -> BitmapResult<Bitmap> {
        let mut reader = ByteReader::new(bytes);
        let file_header = FileHeader::decode(&mut reader)?;
        if file_header.signature != SIGNATURE {
            return Err(BitmapError::InvalidSignature(file_header.signature));
        }

        let info_header = InfoHeader::decode(&mut reader)?;
        if (info_header.header_size as usize) < InfoHeader::SIZE {
            return Err(BitmapError::UnsupportedHeader(info_header.header_size));
        }
        if (file_header.pixel_offset as usize) < reader.position() {
            return Err(BitmapError::InvalidPixelOffset(file_header.pixel_offset));
        }
        if info_header.bit_count != BITS_PER_PIXEL {
            return Err(BitmapError::UnsupportedBitDepth(info_header.bit_count));
        }
        if info_header.compression != 0 {
            return Err(BitmapError::UnsupportedCompression(info_header.compression));
        }
        if info_header.width <= 0 || info_header.height == 0 {
            return Err(BitmapError::InvalidDimensions {
                width: info_header.width as i64,
                height: info_header.height as i64,
            });
        }

        let width = info_header.width as u32;
        let height = info_header.height.unsigned_abs();
        let row_size = row_size(info_header.bit_count, width);

        // Check the pixel array is all there before allocating for it
        reader.seek(file_header.pixel_offset as usize)?;
        let needed = row_size * height as usize;
        if needed > reader.remaining() {
            return Err(CodecError::UnexpectedEof {
                offset: reader.position(),
                needed,
                available: reader.remaining(),
            }
            .into());
        }

        let mut bitmap = Bitmap {
            file_header,
            info_header,
            width,
            height,
            pixels: vec![Rgb8::BLACK; width as usize * height as usize],
        };

        for file_row in 0..height {
            let row = reader.take(row_size)?;
            let start = bitmap.buffer_row(file_row) as usize * width as usize;

            // Only the first `width` pixels are image data, the rest is padding
            for (pixel, bgr) in bitmap.pixels[start..start + width as usize]
                .iter_mut()
                .zip(row.chunks_exact(BYTES_PER_PIXEL))
            {
                *pixel = Rgb8::new(bgr[2], bgr[1], bgr[0]);
            }
        }

        Ok(bitmap)
    }

    /// Write the bitmap to a file.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> BitmapResult<()> {
        let path = path.as_ref();
        let bytes = self.encode()?;
        std::fs::write(path, &bytes)?;

        log::debug!(
            "Wrote bitmap: {} ({}x{}, {} bytes)",
            path.display(),
            self.width,
            self.height,
            bytes.len()
        );
        Ok(())
    }

    /// Load a bitmap from a file.
    pub fn read<P: AsRef<Path>>(path: P) -> BitmapResult<Bitmap> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let bitmap = Self::decode(&bytes)?;

        log::debug!(
            "Read bitmap: {} ({}x{}, {} bytes)",
            path.display(),
            bitmap.width,
            bitmap.height,
            bytes.len()
        );
        Ok(bitmap)
    }
}
