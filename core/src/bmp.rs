//! 1 bit per pixel Windows bitmap container.
//!
//! The writer always emits a `BITMAPINFOHEADER` with a two entry palette
//! (index 0 black, index 1 white) so the packed bits of a [`MonoBitmap`] can
//! be stored unchanged. Rows are stored bottom-up and padded to 4 bytes.

use alloc::vec::Vec;
use embedded_graphics::pixelcolor::BinaryColor;
use log::debug;
use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
    byteorder::{I32, LE, U16, U32},
};

use crate::bitmap::{self, MonoBitmap};

const BMP_MAGIC: &[u8; 2] = b"BM";
const INFO_HEADER_SIZE: u32 = 40;
// 96 dpi
const PIXELS_PER_METER: i32 = 3780;
const PALETTE: [[u8; 4]; 2] = [[0x00, 0x00, 0x00, 0x00], [0xFF, 0xFF, 0xFF, 0x00]];

#[repr(C)]
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
struct FileHeader {
    magic: [u8; 2],
    file_size: U32<LE>,
    reserved: [u8; 4],
    pixel_offset: U32<LE>,
}

#[repr(C)]
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
struct InfoHeader {
    header_size: U32<LE>,
    width: I32<LE>,
    height: I32<LE>,
    planes: U16<LE>,
    bits_per_pixel: U16<LE>,
    compression: U32<LE>,
    image_size: U32<LE>,
    x_pixels_per_meter: I32<LE>,
    y_pixels_per_meter: I32<LE>,
    colors_used: U32<LE>,
    colors_important: U32<LE>,
}

const FILE_HEADER_SIZE: usize = core::mem::size_of::<FileHeader>();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmpError {
    Truncated,
    InvalidSignature,
    Unsupported,
}

impl core::fmt::Display for BmpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BmpError::Truncated => f.write_str("bitmap file is truncated"),
            BmpError::InvalidSignature => f.write_str("not a bitmap file"),
            BmpError::Unsupported => f.write_str("unsupported bitmap layout"),
        }
    }
}

type Result<T> = core::result::Result<T, BmpError>;

/// The parts of a bitmap header needed to find and walk the pixel array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    pub bottom_up: bool,
    pub pixel_offset: usize,
    pub palette_offset: usize,
    pub colors_used: u32,
}

impl Header {
    pub fn row_stride(&self) -> usize {
        row_stride(self.width, self.bits_per_pixel)
    }

    pub fn pixel_data_size(&self) -> usize {
        self.row_stride() * self.height as usize
    }
}

pub fn row_stride(width: u32, bits_per_pixel: u16) -> usize {
    (width as usize * bits_per_pixel as usize).div_ceil(32) * 4
}

pub fn encode(bitmap: &MonoBitmap) -> Vec<u8> {
    let stride = row_stride(bitmap.width(), 1);
    let image_size = stride * bitmap.height() as usize;
    let pixel_offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE as usize + PALETTE.len() * 4;

    let file_header = FileHeader {
        magic: *BMP_MAGIC,
        file_size: U32::new((pixel_offset + image_size) as u32),
        reserved: [0u8; 4],
        pixel_offset: U32::new(pixel_offset as u32),
    };
    let info_header = InfoHeader {
        header_size: U32::new(INFO_HEADER_SIZE),
        width: I32::new(bitmap.width() as i32),
        height: I32::new(bitmap.height() as i32),
        planes: U16::new(1),
        bits_per_pixel: U16::new(1),
        compression: U32::new(0),
        image_size: U32::new(image_size as u32),
        x_pixels_per_meter: I32::new(PIXELS_PER_METER),
        y_pixels_per_meter: I32::new(PIXELS_PER_METER),
        colors_used: U32::new(PALETTE.len() as u32),
        colors_important: U32::new(PALETTE.len() as u32),
    };

    let mut out = Vec::with_capacity(pixel_offset + image_size);
    out.extend_from_slice(file_header.as_bytes());
    out.extend_from_slice(info_header.as_bytes());
    for entry in &PALETTE {
        out.extend_from_slice(entry);
    }
    for y in (0..bitmap.height()).rev() {
        let row = bitmap.row(y);
        out.extend_from_slice(row);
        out.resize(out.len() + stride - row.len(), 0);
    }
    out
}

pub fn parse_header(bytes: &[u8]) -> Result<Header> {
    let (file_header, rest) = FileHeader::read_from_prefix(bytes).map_err(|_| BmpError::Truncated)?;
    if &file_header.magic != BMP_MAGIC {
        return Err(BmpError::InvalidSignature);
    }
    let (info, _) = InfoHeader::read_from_prefix(rest).map_err(|_| BmpError::Truncated)?;
    let header_size = info.header_size.get();
    // OS/2 core headers use 16 bit dimensions, only the Windows layouts are handled
    if header_size < INFO_HEADER_SIZE {
        return Err(BmpError::Unsupported);
    }
    if info.planes.get() != 1 || info.compression.get() != 0 {
        return Err(BmpError::Unsupported);
    }
    let width = info.width.get();
    let height = info.height.get();
    if width <= 0 || height == 0 {
        return Err(BmpError::Unsupported);
    }

    let header = Header {
        width: width as u32,
        height: height.unsigned_abs(),
        bits_per_pixel: info.bits_per_pixel.get(),
        bottom_up: height > 0,
        pixel_offset: file_header.pixel_offset.get() as usize,
        palette_offset: FILE_HEADER_SIZE + header_size as usize,
        colors_used: info.colors_used.get(),
    };
    debug!(
        "Parsed BMP header: {}x{} {}bpp, pixels at {}",
        header.width, header.height, header.bits_per_pixel, header.pixel_offset
    );
    Ok(header)
}

/// Returns the raw pixel array, located through the header's data offset.
pub fn pixel_data(bytes: &[u8]) -> Result<&[u8]> {
    let header = parse_header(bytes)?;
    let end = header.pixel_offset + header.pixel_data_size();
    bytes.get(header.pixel_offset..end).ok_or(BmpError::Truncated)
}

/// Decodes a 1 bit per pixel bitmap. Palette entries are mapped to black or
/// white by their luminance.
pub fn decode(bytes: &[u8]) -> Result<MonoBitmap> {
    let header = parse_header(bytes)?;
    if header.bits_per_pixel != 1 {
        return Err(BmpError::Unsupported);
    }
    let mut palette = [BinaryColor::Off, BinaryColor::On];
    if header.colors_used != 0 {
        let entries = bytes
            .get(header.palette_offset..header.palette_offset + 8)
            .ok_or(BmpError::Truncated)?;
        for (color, entry) in palette.iter_mut().zip(entries.chunks_exact(4)) {
            // entries are stored blue, green, red, reserved
            *color = if bitmap::luma(entry[2], entry[1], entry[0]) < bitmap::THRESHOLD {
                BinaryColor::Off
            } else {
                BinaryColor::On
            };
        }
    }

    let data = pixel_data(bytes)?;
    let stride = header.row_stride();
    let mut out = MonoBitmap::new(header.width, header.height);
    for (row_index, row) in data.chunks_exact(stride).enumerate() {
        let y = if header.bottom_up {
            header.height as usize - 1 - row_index
        } else {
            row_index
        };
        for x in 0..header.width as usize {
            let index = (row[x / 8] >> (7 - (x % 8))) & 1;
            out.set_pixel(x as i32, y as i32, palette[index as usize]);
        }
    }
    Ok(out)
}
