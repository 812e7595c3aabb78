use epd_asset_core::{
    bitmap::MonoBitmap,
    letterbox::{self, Placement},
};
use image::{
    DynamicImage, Rgb, RgbImage,
    imageops::{self, FilterType},
};

use crate::Error;

/// Scales `image` to fit a `width`x`height` canvas and pastes it centered on white.
pub fn letterbox(
    image: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<(RgbImage, Placement), Error> {
    let placement = letterbox::fit(image.width(), image.height(), width, height)?;
    let scaled = if placement.is_unscaled(image.width(), image.height()) {
        image.to_rgb8()
    } else {
        image
            .resize_exact(placement.width, placement.height, FilterType::Lanczos3)
            .into_rgb8()
    };

    let mut canvas = RgbImage::from_pixel(width, height, Rgb([0xFF, 0xFF, 0xFF]));
    imageops::replace(&mut canvas, &scaled, placement.x as i64, placement.y as i64);
    Ok((canvas, placement))
}

pub fn threshold(canvas: &RgbImage, threshold: u8) -> MonoBitmap {
    MonoBitmap::from_rgb(canvas.width(), canvas.height(), canvas.as_raw(), threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::BinaryColor;
    use image::{GrayImage, Luma};

    #[test]
    fn test_pillarbox_margins() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 420, Rgb([0, 0, 0])));
        let (canvas, placement) = letterbox(&image, 800, 420).unwrap();
        assert_eq!((placement.x, placement.y), (200, 0));
        assert_eq!(canvas.dimensions(), (800, 420));
        assert_eq!(canvas.get_pixel(199, 0), &Rgb([0xFF, 0xFF, 0xFF]));
        assert_eq!(canvas.get_pixel(200, 0), &Rgb([0, 0, 0]));
        assert_eq!(canvas.get_pixel(599, 419), &Rgb([0, 0, 0]));
        assert_eq!(canvas.get_pixel(600, 419), &Rgb([0xFF, 0xFF, 0xFF]));
    }

    #[test]
    fn test_letterbox_downscale() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(1000, 1000, Luma([0])));
        let (canvas, placement) = letterbox(&image, 800, 420).unwrap();
        assert_eq!((placement.width, placement.height), (420, 420));
        assert_eq!((placement.x, placement.y), (190, 0));
        assert_eq!(canvas.get_pixel(400, 210), &Rgb([0, 0, 0]));
        assert_eq!(canvas.get_pixel(100, 210), &Rgb([0xFF, 0xFF, 0xFF]));
    }

    #[test]
    fn test_empty_image_rejected() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(0, 10));
        assert!(matches!(letterbox(&image, 800, 420), Err(Error::EmptyImage(_))));
    }

    #[test]
    fn test_threshold_canvas() {
        let mut canvas = RgbImage::from_pixel(16, 2, Rgb([0xFF, 0xFF, 0xFF]));
        canvas.put_pixel(0, 0, Rgb([127, 127, 127]));
        canvas.put_pixel(1, 0, Rgb([128, 128, 128]));
        let bitmap = threshold(&canvas, 128);
        assert_eq!(bitmap.get_pixel(0, 0), Some(BinaryColor::Off));
        assert_eq!(bitmap.get_pixel(1, 0), Some(BinaryColor::On));
        assert_eq!(bitmap.black_pixels(), 1);
    }
}
