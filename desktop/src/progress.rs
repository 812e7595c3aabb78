use std::path::PathBuf;

use log::{info, warn};

/// Milestones of a conversion run, in the order they happen.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Loaded { path: PathBuf, width: u32, height: u32 },
    Fallback { path: PathBuf },
    Resized { ratio: f64, width: u32, height: u32 },
    Centered { x: u32, y: u32 },
    Thresholded { threshold: u8, black_pixels: usize },
    Flipped,
    PreviewSaved { path: PathBuf },
    HeaderWritten { path: PathBuf, bytes: usize },
}

/// Receives progress while a conversion runs.
pub trait Progress {
    fn step(&mut self, step: Step);
}

/// Reports every step through `log`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn step(&mut self, step: Step) {
        match step {
            Step::Loaded { path, width, height } => {
                info!("Original image size: {width}x{height} ({})", path.display())
            }
            Step::Fallback { path } => {
                warn!("No image found at {}, creating a sample image", path.display())
            }
            Step::Resized { ratio, width, height } => {
                info!("Resizing to: {width}x{height} (ratio {ratio:.4})")
            }
            Step::Centered { x, y } => info!("Centering image at position: ({x}, {y})"),
            Step::Thresholded {
                threshold,
                black_pixels,
            } => info!("Converted to black and white at {threshold}, {black_pixels} black pixels"),
            Step::Flipped => info!("Flipped image vertically for e-paper display"),
            Step::PreviewSaved { path } => info!("Saved preview to: {}", path.display()),
            Step::HeaderWritten { path, bytes } => {
                info!("Generated header file: {} ({bytes} bytes)", path.display())
            }
        }
    }
}

/// Discards all progress.
impl Progress for () {
    fn step(&mut self, _step: Step) {}
}

impl Progress for Vec<Step> {
    fn step(&mut self, step: Step) {
        self.push(step);
    }
}
