//! BMP file and info headers.
//!
//! Field layout follows the classic `BITMAPFILEHEADER` / `BITMAPINFOHEADER`
//! pair, serialized little-endian field by field.

use std::fmt;

use crate::codec::{ByteReader, ByteWriter, CodecResult};

/// The `"BM"` magic at the start of every bitmap file.
pub const SIGNATURE: [u8; 2] = *b"BM";

/// Bits per pixel for the only supported layout (B, G, R bytes).
pub const BITS_PER_PIXEL: u16 = 24;

/// File-level header (14 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// `bfType`, always `"BM"` for files we write
    pub signature: [u8; 2],
    /// `bfSize`, total file size in bytes
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// `bfOffBits`, byte offset of the pixel array
    pub pixel_offset: u32,
}

impl FileHeader {
    /// Encoded size in bytes.
    pub const SIZE: usize = 14;

    /// Header for a file whose pixel array holds `pixel_bytes` bytes.
    pub fn new(pixel_bytes: u32) -> Self {
        let pixel_offset = (Self::SIZE + InfoHeader::SIZE) as u32;
        Self {
            signature: SIGNATURE,
            file_size: pixel_offset + pixel_bytes,
            reserved1: 0,
            reserved2: 0,
            pixel_offset,
        }
    }

    pub fn decode(reader: &mut ByteReader) -> CodecResult<Self> {
        Ok(Self {
            signature: reader.read_array()?,
            file_size: reader.read_u32()?,
            reserved1: reader.read_u16()?,
            reserved2: reader.read_u16()?,
            pixel_offset: reader.read_u32()?,
        })
    }

    pub fn encode(&self, writer: &mut ByteWriter) -> CodecResult<()> {
        writer.write_bytes(&self.signature)?;
        writer.write_u32(self.file_size)?;
        writer.write_u16(self.reserved1)?;
        writer.write_u16(self.reserved2)?;
        writer.write_u32(self.pixel_offset)
    }
}

impl fmt::Display for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BITMAP FILE HEADER")?;
        writeln!(
            f,
            "  Type: {}",
            String::from_utf8_lossy(&self.signature)
        )?;
        writeln!(f, "  Size: {} bytes", self.file_size)?;
        writeln!(
            f,
            "  Reserved: {} {}",
            self.reserved1, self.reserved2
        )?;
        write!(f, "  Pixel array offset: {}", self.pixel_offset)
    }
}

/// Info header (40 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeader {
    /// `biSize`, size of this header in bytes
    pub header_size: u32,
    pub width: i32,
    /// Positive for bottom-up row order, negative for top-down
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    /// `biSizeImage`, pixel array size in bytes including row padding
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl InfoHeader {
    /// Encoded size in bytes.
    pub const SIZE: usize = 40;

    /// Header for an uncompressed 24-bit image.
    pub fn new(width: i32, height: i32, image_size: u32) -> Self {
        Self {
            header_size: Self::SIZE as u32,
            width,
            height,
            planes: 1,
            bit_count: BITS_PER_PIXEL,
            compression: 0,
            image_size,
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            colors_used: 0,
            colors_important: 0,
        }
    }

    /// Rows are stored bottom-to-top unless the height is negative.
    pub fn is_bottom_up(&self) -> bool {
        self.height >= 0
    }

    pub fn decode(reader: &mut ByteReader) -> CodecResult<Self> {
        Ok(Self {
            header_size: reader.read_u32()?,
            width: reader.read_i32()?,
            height: reader.read_i32()?,
            planes: reader.read_u16()?,
            bit_count: reader.read_u16()?,
            compression: reader.read_u32()?,
            image_size: reader.read_u32()?,
            x_pixels_per_meter: reader.read_i32()?,
            y_pixels_per_meter: reader.read_i32()?,
            colors_used: reader.read_u32()?,
            colors_important: reader.read_u32()?,
        })
    }

    pub fn encode(&self, writer: &mut ByteWriter) -> CodecResult<()> {
        writer.write_u32(self.header_size)?;
        writer.write_i32(self.width)?;
        writer.write_i32(self.height)?;
        writer.write_u16(self.planes)?;
        writer.write_u16(self.bit_count)?;
        writer.write_u32(self.compression)?;
        writer.write_u32(self.image_size)?;
        writer.write_i32(self.x_pixels_per_meter)?;
        writer.write_i32(self.y_pixels_per_meter)?;
        writer.write_u32(self.colors_used)?;
        writer.write_u32(self.colors_important)
    }
}

impl fmt::Display for InfoHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BITMAP INFO HEADER")?;
        writeln!(f, "  Header size: {} bytes", self.header_size)?;
        writeln!(f, "  Resolution: {}x{}", self.width, self.height)?;
        writeln!(f, "  Color planes: {}", self.planes)?;
        writeln!(f, "  Bits per pixel: {}", self.bit_count)?;
        writeln!(f, "  Compression: {}", self.compression)?;
        writeln!(f, "  Image size: {} bytes", self.image_size)?;
        writeln!(
            f,
            "  Resolution (px/m): {}x{}",
            self.x_pixels_per_meter, self.y_pixels_per_meter
        )?;
        writeln!(f, "  Palette colors: {}", self.colors_used)?;
        write!(f, "  Important colors: {}", self.colors_important)
    }
}

/// Bytes per stored row, padded up to a multiple of 4.
///
/// `ceil(bits_per_pixel * width / 32) * 4`
pub fn row_size(bits_per_pixel: u16, width: u32) -> usize {
    (bits_per_pixel as usize * width as usize).div_ceil(32) * 4
}
