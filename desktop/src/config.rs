use std::path::PathBuf;

use epd_asset_core::{
    asset::{self, AssetHeader},
    bitmap,
    letterbox,
};

use crate::Error;

pub const DEFAULT_INPUT: &str = "website.jpg";
pub const DEFAULT_PREVIEW: &str = "preview.bmp";
pub const DEFAULT_HEADER: &str = "../include/test_image.h";

/// Everything a conversion run reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Source image, any format `image` can detect from its contents
    pub input: PathBuf,
    /// 1 bit BMP written with the final bitmap
    pub preview: PathBuf,
    /// Generated C header
    pub header: PathBuf,
    /// Name of the array in the header
    pub name: String,
    /// First comment line of the header
    pub description: String,
    pub width: u32,
    pub height: u32,
    /// Luminance below this becomes black
    pub threshold: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT.into(),
            preview: DEFAULT_PREVIEW.into(),
            header: DEFAULT_HEADER.into(),
            name: asset::DEFAULT_NAME.into(),
            description: asset::DEFAULT_DESCRIPTION.into(),
            width: bitmap::WIDTH,
            height: bitmap::HEIGHT,
            threshold: bitmap::THRESHOLD,
        }
    }
}

impl Config {
    /// Checks the settings that do not depend on the input image.
    pub fn validate(&self) -> Result<(), Error> {
        letterbox::check_canvas(self.width, self.height)?;
        self.asset_header().validate()?;
        Ok(())
    }

    pub fn asset_header(&self) -> AssetHeader {
        AssetHeader {
            name: self.name.clone(),
            description: self.description.clone(),
            width: self.width,
            height: self.height,
        }
    }
}
