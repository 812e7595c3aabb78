use std::{fmt, io, path::PathBuf};

use epd_asset_core::{
    asset::{HeaderError, ParseError},
    bmp::BmpError,
    letterbox::LetterboxError,
};

#[derive(Debug)]
pub enum Error {
    /// The input exists but could not be decoded
    InvalidInput {
        path: PathBuf,
        source: image::ImageError,
    },
    /// The input or canvas has a zero dimension
    EmptyImage(LetterboxError),
    /// The input does not exist
    MissingFile(PathBuf),
    /// Array name or description cannot be written into the header
    InvalidHeader(HeaderError),
    OutputWrite {
        path: PathBuf,
        source: io::Error,
    },
    ReadBack {
        path: PathBuf,
        source: io::Error,
    },
    Bmp(BmpError),
    Parse(ParseError),
    Mismatch(String),
}

impl From<LetterboxError> for Error {
    fn from(err: LetterboxError) -> Self {
        Error::EmptyImage(err)
    }
}

impl From<HeaderError> for Error {
    fn from(err: HeaderError) -> Self {
        Error::InvalidHeader(err)
    }
}

impl From<BmpError> for Error {
    fn from(err: BmpError) -> Self {
        Error::Bmp(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput { path, source } => {
                write!(f, "failed to decode {}: {source}", path.display())
            }
            Error::EmptyImage(err) => write!(f, "invalid input: {err}"),
            Error::MissingFile(path) => write!(f, "{} does not exist", path.display()),
            Error::InvalidHeader(err) => write!(f, "invalid header settings: {err}"),
            Error::OutputWrite { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
            Error::ReadBack { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Error::Bmp(err) => write!(f, "preview bitmap: {err}"),
            Error::Parse(err) => write!(f, "header: {err}"),
            Error::Mismatch(msg) => write!(f, "header does not match preview: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidInput { source, .. } => Some(source),
            Error::OutputWrite { source, .. } | Error::ReadBack { source, .. } => Some(source),
            _ => None,
        }
    }
}
