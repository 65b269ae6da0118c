//! # Colour Notation
//!
//! Speakers are identified by the colour their text is written in. Callers
//! name those colours in one of two notations:
//! * `RGB(<int>,<int>,<int>)` with components between 0 and 255, tolerant
//!   of whitespace around the numbers (e.g., `rgb(11, 93, 162)`).
//! * `#rrggbb` hex triplets (e.g., `#0B5DA2`).
//!
//! Both are case-insensitive and parse into the same [`Rgb`] value, so
//! `RGB(11,93,162)` and `#0b5da2` name the same speaker.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error(
        "RGB specification must be of the form RGB(<int>,<int>,<int>), with ints between 0 and 255; not {0}"
    )]
    MalformedRgb(String),
    #[error("valid RGB ints are between 0 and 255; was given {r}, {g}, and {b}")]
    OutOfRange { r: u32, g: u32, b: u32 },
    #[error("string '{0}' is not of form '#rrggbb' of hex numbers")]
    MalformedHex(String),
    #[error("'{0}' is neither an RGB(...) nor a #rrggbb colour")]
    UnknownNotation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({},{},{})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    /// Parses either supported notation, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();

        if upper.starts_with("RGB") {
            return validate_rgb_string(&upper);
        }
        if upper.starts_with('#') {
            return validate_rgb_hex_string(&upper);
        }

        Err(ColorError::UnknownNotation(trimmed.to_string()))
    }
}

/// Checks that `rgb_string` is `RGB(int,int,int)` (upper-case prefix) with
/// every component in 0..=255, and returns the colour.
pub fn validate_rgb_string(rgb_string: &str) -> Result<Rgb, ColorError> {
    let malformed = || ColorError::MalformedRgb(rgb_string.to_string());

    let inner = rgb_string
        .strip_prefix("RGB(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;

    let components: Vec<u32> = inner
        .split(',')
        .map(|part| {
            let part = part.trim();
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            // Long digit runs still count as well-formed, just out of range.
            Ok(part.parse::<u32>().unwrap_or(u32::MAX))
        })
        .collect::<Result<_, _>>()?;

    let [r, g, b] = components[..] else {
        return Err(malformed());
    };

    match (u8::try_from(r), u8::try_from(g), u8::try_from(b)) {
        (Ok(r), Ok(g), Ok(b)) => Ok(Rgb::new(r, g, b)),
        _ => Err(ColorError::OutOfRange { r, g, b }),
    }
}

/// Checks that `hex_string` is `#` followed by exactly six hex digits.
pub fn validate_rgb_hex_string(hex_string: &str) -> Result<Rgb, ColorError> {
    let malformed = || ColorError::MalformedHex(hex_string.to_string());

    let digits = hex_string.strip_prefix('#').ok_or_else(malformed)?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed());
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| malformed());
    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}
