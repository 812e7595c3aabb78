//! Fitting a source image onto a fixed canvas.
//!
//! The source is scaled by `min(canvas_w / w, canvas_h / h)` so it fills one
//! canvas dimension exactly and is centered along the other. All arithmetic
//! is done on integers so the result does not depend on float rounding.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterboxError {
    EmptySource { width: u32, height: u32 },
    EmptyCanvas { width: u32, height: u32 },
}

impl core::fmt::Display for LetterboxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LetterboxError::EmptySource { width, height } => {
                write!(f, "source image has no pixels ({width}x{height})")
            }
            LetterboxError::EmptyCanvas { width, height } => {
                write!(f, "canvas has no pixels ({width}x{height})")
            }
        }
    }
}

/// Where a scaled source lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub ratio: f64,
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl Placement {
    /// True when the source can be pasted without resampling.
    pub fn is_unscaled(&self, src_width: u32, src_height: u32) -> bool {
        self.width == src_width && self.height == src_height
    }
}

/// `round(value * num / den)`, halves rounded up.
fn scale_rounded(value: u32, num: u32, den: u32) -> u32 {
    let scaled = (2 * value as u64 * num as u64 + den as u64) / (2 * den as u64);
    scaled as u32
}

pub fn check_canvas(width: u32, height: u32) -> Result<(), LetterboxError> {
    if width == 0 || height == 0 {
        return Err(LetterboxError::EmptyCanvas { width, height });
    }
    Ok(())
}

pub fn fit(
    src_width: u32,
    src_height: u32,
    canvas_width: u32,
    canvas_height: u32,
) -> Result<Placement, LetterboxError> {
    if src_width == 0 || src_height == 0 {
        return Err(LetterboxError::EmptySource {
            width: src_width,
            height: src_height,
        });
    }
    check_canvas(canvas_width, canvas_height)?;

    // canvas_w / src_w <= canvas_h / src_h, cross-multiplied
    let width_bound =
        canvas_width as u64 * src_height as u64 <= canvas_height as u64 * src_width as u64;
    let (ratio, width, height) = if width_bound {
        (
            canvas_width as f64 / src_width as f64,
            canvas_width,
            scale_rounded(src_height, canvas_width, src_width),
        )
    } else {
        (
            canvas_height as f64 / src_height as f64,
            scale_rounded(src_width, canvas_height, src_height),
            canvas_height,
        )
    };
    let width = width.clamp(1, canvas_width);
    let height = height.clamp(1, canvas_height);

    Ok(Placement {
        ratio,
        width,
        height,
        x: (canvas_width - width) / 2,
        y: (canvas_height - height) / 2,
    })
}
