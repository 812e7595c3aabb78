use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use epd_asset_core::{
    asset::{self, AssetHeader},
    bitmap::MonoBitmap,
    bmp,
    letterbox::Placement,
    pattern,
};
use image::DynamicImage;
use log::debug;

use crate::{Config, Error, Progress, Step, source, transform};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub preview: PathBuf,
    pub header: PathBuf,
    pub payload_len: usize,
    /// `None` when the test pattern was used
    pub placement: Option<Placement>,
}

impl Artifacts {
    pub fn used_fallback(&self) -> bool {
        self.placement.is_none()
    }
}

/// Letterboxes, thresholds and flips a decoded image.
pub fn convert_image(
    image: &DynamicImage,
    config: &Config,
    progress: &mut dyn Progress,
) -> Result<(MonoBitmap, Placement), Error> {
    let (canvas, placement) = transform::letterbox(image, config.width, config.height)?;
    progress.step(Step::Resized {
        ratio: placement.ratio,
        width: placement.width,
        height: placement.height,
    });
    progress.step(Step::Centered {
        x: placement.x,
        y: placement.y,
    });

    let mut bitmap = transform::threshold(&canvas, config.threshold);
    progress.step(Step::Thresholded {
        threshold: config.threshold,
        black_pixels: bitmap.black_pixels(),
    });

    bitmap.flip_vertical();
    progress.step(Step::Flipped);
    Ok((bitmap, placement))
}

/// Produces the final bitmap from the configured input, or the test pattern
/// when the input does not exist. The test pattern is not flipped.
pub fn render_bitmap(
    config: &Config,
    progress: &mut dyn Progress,
) -> Result<(MonoBitmap, Option<Placement>), Error> {
    config.validate()?;
    match source::load(&config.input) {
        Ok(image) => {
            progress.step(Step::Loaded {
                path: config.input.clone(),
                width: image.width(),
                height: image.height(),
            });
            let (bitmap, placement) = convert_image(&image, config, progress)?;
            Ok((bitmap, Some(placement)))
        }
        Err(Error::MissingFile(path)) => {
            progress.step(Step::Fallback { path });
            Ok((pattern::test_pattern(config.width, config.height), None))
        }
        Err(err) => Err(err),
    }
}

pub fn write_preview(path: &Path, bitmap: &MonoBitmap) -> Result<(), Error> {
    fs::write(path, bmp::encode(bitmap)).map_err(|source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a preview bitmap back and returns its pixel array.
pub fn read_payload(path: &Path) -> Result<Vec<u8>, Error> {
    let bytes = fs::read(path).map_err(|source| Error::ReadBack {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(bmp::pixel_data(&bytes)?.to_vec())
}

pub fn write_header(path: &Path, header: &AssetHeader, payload: &[u8]) -> Result<(), Error> {
    let output_error = |source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(output_error)?);
    out.write_all(header.render(payload).as_bytes())
        .map_err(output_error)?;
    out.flush().map_err(output_error)
}

pub fn run(config: &Config, progress: &mut dyn Progress) -> Result<Artifacts, Error> {
    let (bitmap, placement) = render_bitmap(config, progress)?;

    write_preview(&config.preview, &bitmap)?;
    progress.step(Step::PreviewSaved {
        path: config.preview.clone(),
    });

    let payload = read_payload(&config.preview)?;
    debug!("Read {} payload bytes back from {}", payload.len(), config.preview.display());
    write_header(&config.header, &config.asset_header(), &payload)?;
    progress.step(Step::HeaderWritten {
        path: config.header.clone(),
        bytes: payload.len(),
    });

    Ok(Artifacts {
        preview: config.preview.clone(),
        header: config.header.clone(),
        payload_len: payload.len(),
        placement,
    })
}

/// Checks that the generated header holds exactly the preview's pixel array.
/// Returns the number of bytes compared.
pub fn verify(config: &Config) -> Result<usize, Error> {
    let preview = fs::read(&config.preview).map_err(|source| Error::ReadBack {
        path: config.preview.clone(),
        source,
    })?;
    let bmp_header = bmp::parse_header(&preview)?;
    let payload = bmp::pixel_data(&preview)?;

    let text = fs::read_to_string(&config.header).map_err(|source| Error::ReadBack {
        path: config.header.clone(),
        source,
    })?;
    let parsed = asset::parse_byte_array(&text)?;

    if let Some((width, height)) = asset::parse_dimensions(&text) {
        if (width, height) != (bmp_header.width, bmp_header.height) {
            return Err(Error::Mismatch(format!(
                "header is {width}x{height}, preview is {}x{}",
                bmp_header.width, bmp_header.height
            )));
        }
    }
    if parsed.len() != payload.len() {
        return Err(Error::Mismatch(format!(
            "header has {} bytes, preview has {}",
            parsed.len(),
            payload.len()
        )));
    }
    if let Some(index) = parsed.iter().zip(payload).position(|(a, b)| a != b) {
        return Err(Error::Mismatch(format!("first difference at byte {index}")));
    }
    Ok(parsed.len())
}
