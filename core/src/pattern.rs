use embedded_graphics::{
    Drawable,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Point, Primitive, Size},
    primitives::{Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
};
use log::debug;

use crate::bitmap::MonoBitmap;

const STROKE_WIDTH: u32 = 3;

/// Draws the fallback test card: a centered circle, two diagonals and a
/// square in each corner, laid out for an 800x420 canvas.
pub fn draw_test_pattern<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let outline = PrimitiveStyleBuilder::new()
        .stroke_color(BinaryColor::Off)
        .stroke_width(STROKE_WIDTH)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();

    Circle::new(Point::new(300, 110), 201)
        .into_styled(outline)
        .draw(target)?;

    let line = PrimitiveStyle::with_stroke(BinaryColor::Off, STROKE_WIDTH);
    Line::new(Point::new(50, 50), Point::new(750, 370))
        .into_styled(line)
        .draw(target)?;
    Line::new(Point::new(50, 370), Point::new(750, 50))
        .into_styled(line)
        .draw(target)?;

    for (x, y) in [(50, 50), (650, 50), (50, 270), (650, 270)] {
        Rectangle::new(Point::new(x, y), Size::new(101, 101))
            .into_styled(outline)
            .draw(target)?;
    }
    Ok(())
}

pub fn test_pattern(width: u32, height: u32) -> MonoBitmap {
    let mut bitmap = MonoBitmap::new(width, height);
    let Ok(()) = draw_test_pattern(&mut bitmap);
    debug!("Drew test pattern, {} black pixels", bitmap.black_pixels());
    bitmap
}
