use std::path::Path;

use image::{DynamicImage, ImageError, ImageReader};
use log::debug;

use crate::Error;

/// Decodes the image at `path`, detecting the format from the file contents.
pub fn load(path: &Path) -> Result<DynamicImage, Error> {
    if !path.exists() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }
    let invalid = |source: ImageError| Error::InvalidInput {
        path: path.to_path_buf(),
        source,
    };
    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|err| invalid(ImageError::IoError(err)))?
        .decode()
        .map_err(invalid)?;
    debug!("Decoded image {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}
