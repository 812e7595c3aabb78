use alloc::{vec, vec::Vec};
use embedded_graphics::{
    Pixel,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Size},
};

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 420;
pub const THRESHOLD: u8 = 128;

/// Luminance with ITU-R 601-2 weights, in 16.16 fixed point.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Packed 1-bit image.
///
/// Rows are padded to whole bytes and the most significant bit is the
/// leftmost pixel. A set bit is white ([`BinaryColor::On`]), a cleared bit
/// is black ([`BinaryColor::Off`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoBitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl MonoBitmap {
    /// Creates an all-white bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0xFF; Self::stride_for(width) * height as usize],
        }
    }

    pub fn stride_for(width: u32) -> usize {
        (width as usize).div_ceil(8)
    }

    /// Thresholds a single channel buffer: values below `threshold` become black.
    pub fn from_luma(width: u32, height: u32, luma: &[u8], threshold: u8) -> Self {
        let mut bitmap = Self::new(width, height);
        let w = width as usize;
        for (index, &value) in luma.iter().take(w * height as usize).enumerate() {
            if value < threshold {
                bitmap.clear_bit(index % w, index / w);
            }
        }
        bitmap
    }

    /// Converts an interleaved RGB buffer to luminance and thresholds it.
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8], threshold: u8) -> Self {
        let mut bitmap = Self::new(width, height);
        let w = width as usize;
        for (index, px) in rgb.chunks_exact(3).take(w * height as usize).enumerate() {
            if luma(px[0], px[1], px[2]) < threshold {
                bitmap.clear_bit(index % w, index / w);
            }
        }
        bitmap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        Self::stride_for(self.width)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let byte = self.data[y as usize * self.stride() + x as usize / 8];
        let bit_index = 7 - (x as usize % 8);
        Some(if (byte >> bit_index) & 1 == 1 {
            BinaryColor::On
        } else {
            BinaryColor::Off
        })
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        match color {
            BinaryColor::On => self.set_bit(x as usize, y as usize),
            BinaryColor::Off => self.clear_bit(x as usize, y as usize),
        }
    }

    fn set_bit(&mut self, x: usize, y: usize) {
        let byte_index = y * self.stride() + x / 8;
        self.data[byte_index] |= 1 << (7 - (x % 8));
    }

    fn clear_bit(&mut self, x: usize, y: usize) {
        let byte_index = y * self.stride() + x / 8;
        self.data[byte_index] &= !(1 << (7 - (x % 8)));
    }

    /// Mirrors the bitmap across the horizontal axis.
    pub fn flip_vertical(&mut self) {
        let stride = self.stride();
        let height = self.height as usize;
        for y in 0..height / 2 {
            let (top, bottom) = self.data.split_at_mut((height - 1 - y) * stride);
            top[y * stride..(y + 1) * stride].swap_with_slice(&mut bottom[..stride]);
        }
    }

    /// Expands to one byte per pixel, 0x00 for black and 0xFF for white.
    pub fn to_luma(&self) -> Vec<u8> {
        let mut luma = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                luma.push(match self.get_pixel(x, y) {
                    Some(BinaryColor::Off) => 0x00,
                    _ => 0xFF,
                });
            }
        }
        luma
    }

    pub fn black_pixels(&self) -> usize {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.get_pixel(x, y) == Some(BinaryColor::Off))
            .count()
    }
}

impl OriginDimensions for MonoBitmap {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for MonoBitmap {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_pixel(coord.x, coord.y, color);
        }
        Ok(())
    }
}
