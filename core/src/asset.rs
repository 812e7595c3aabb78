//! C header generation for firmware images.
//!
//! The generated file looks like
//!
//! ```text
//! #pragma once
//!
//! // Test image bitmap data
//! // Size: 800x420 pixels
//!
//! const uint8_t TEST_IMAGE[] PROGMEM = {
//!     0xFF, 0xFF, ...
//! };
//! ```
//!
//! with sixteen bytes per line. The layout is fixed byte for byte so that
//! regenerating an unchanged image never produces a diff.

use alloc::{format, string::String, vec::Vec};

const BYTES_PER_LINE: usize = 16;
const INDENT: &str = "    ";
const HEX: &[u8; 16] = b"0123456789ABCDEF";
const DECLARATION: &str = "PROGMEM = {";

pub const DEFAULT_NAME: &str = "TEST_IMAGE";
pub const DEFAULT_DESCRIPTION: &str = "Test image bitmap data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHeader {
    pub name: String,
    pub description: String,
    pub width: u32,
    pub height: u32,
}

impl AssetHeader {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            name: String::from(DEFAULT_NAME),
            description: String::from(DEFAULT_DESCRIPTION),
            width,
            height,
        }
    }

    /// Rejects values that would not survive a round trip through the
    /// generated source: the name must be a C identifier and the description
    /// must fit on its comment line.
    pub fn validate(&self) -> Result<(), HeaderError> {
        let mut chars = self.name.chars();
        let identifier = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !identifier {
            return Err(HeaderError::InvalidName(self.name.clone()));
        }
        if self.description.contains(['\n', '\r']) {
            return Err(HeaderError::MultilineDescription);
        }
        Ok(())
    }

    pub fn render(&self, payload: &[u8]) -> String {
        // each byte takes "0xHH, " plus the line breaks
        let mut out = String::with_capacity(128 + payload.len() * 6 + payload.len() / 4);
        out.push_str("#pragma once\n\n");
        out.push_str(&format!("// {}\n", self.description));
        out.push_str(&format!("// Size: {}x{} pixels\n\n", self.width, self.height));
        out.push_str(&format!("const uint8_t {}[] PROGMEM = {{\n{INDENT}", self.name));
        write_byte_array(&mut out, payload);
        out.push_str("\n};\n");
        out
    }
}

/// Appends `0xHH` literals separated by `, `, breaking the line after every
/// sixteenth byte. The last byte has no separator.
pub fn write_byte_array(out: &mut String, payload: &[u8]) {
    for (i, &byte) in payload.iter().enumerate() {
        out.push_str("0x");
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0F) as usize] as char);
        if i < payload.len() - 1 {
            out.push_str(", ");
        }
        if (i + 1) % BYTES_PER_LINE == 0 {
            out.push('\n');
            out.push_str(INDENT);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    InvalidName(String),
    MultilineDescription,
}

impl core::fmt::Display for HeaderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HeaderError::InvalidName(name) => write!(f, "{name:?} is not a C identifier"),
            HeaderError::MultilineDescription => f.write_str("description spans several lines"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    MissingBody,
    InvalidLiteral { index: usize, literal: String },
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::MissingBody => f.write_str("no array initializer found"),
            ParseError::InvalidLiteral { index, literal } => {
                write!(f, "invalid byte literal {literal:?} at index {index}")
            }
        }
    }
}

/// Reads the bytes of the `PROGMEM = { ... }` initializer in `text`, or of
/// the first `{ ... }` when there is no such declaration.
pub fn parse_byte_array(text: &str) -> Result<Vec<u8>, ParseError> {
    let start = match text.rfind(DECLARATION) {
        Some(pos) => pos + DECLARATION.len() - 1,
        None => text.find('{').ok_or(ParseError::MissingBody)?,
    };
    let len = text[start..].find('}').ok_or(ParseError::MissingBody)?;
    let body = text[start + 1..start + len].trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    body.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(index, literal)| {
            literal
                .strip_prefix("0x")
                .or_else(|| literal.strip_prefix("0X"))
                .filter(|digits| !digits.is_empty() && digits.len() <= 2)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(|| ParseError::InvalidLiteral {
                    index,
                    literal: String::from(literal),
                })
        })
        .collect()
}

/// Reads the `// Size: WxH pixels` comment of a generated header.
pub fn parse_dimensions(text: &str) -> Option<(u32, u32)> {
    let line = text.lines().find_map(|line| line.trim().strip_prefix("// Size:"))?;
    let (width, height) = line.trim().strip_suffix("pixels")?.trim().split_once('x')?;
    Some((width.parse().ok()?, height.parse().ok()?))
}
