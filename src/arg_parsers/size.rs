use std::{ffi::OsStr, fmt::Display, num::NonZeroU32, str::FromStr};

use crate::arg_parse_err::ArgParseErr;

#[cfg(test)]
use quickcheck::Arbitrary;

/// Exact output dimensions. The aspect ratio of the input is not preserved.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Size {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl Size {
    pub const DEFAULT_EDGE: NonZeroU32 = match NonZeroU32::new(512) {
        Some(edge) => edge,
        None => panic!("default edge must be non-zero"),
    };

    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }

    pub fn square(edge: NonZeroU32) -> Self {
        Self {
            width: edge,
            height: edge,
        }
    }

    pub fn as_tuple(&self) -> (u32, u32) {
        (self.width.get(), self.height.get())
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::square(Self::DEFAULT_EDGE)
    }
}

#[cfg(test)]
impl Arbitrary for Size {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // keep the images small enough that resampling them in a test is cheap
        let width = u32::from(u8::arbitrary(g)).max(1);
        let height = u32::from(u8::arbitrary(g)).max(1);
        Self::new(width, height).unwrap()
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Size {
    type Err = ArgParseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = match s.split_once(['x', 'X']) {
            Some((width, height)) => (parse_edge(width)?, parse_edge(height)?),
            None => {
                // a lone number means a square
                let edge = parse_edge(s)?;
                (edge, edge)
            }
        };
        Ok(Self { width, height })
    }
}

impl TryFrom<&OsStr> for Size {
    type Error = ArgParseErr;

    fn try_from(s: &OsStr) -> Result<Self, Self::Error> {
        match s.to_str() {
            Some(utf8) => Self::from_str(utf8),
            None => Err(ArgParseErr::new()),
        }
    }
}

fn parse_edge(input: &str) -> Result<NonZeroU32, ArgParseErr> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ArgParseErr::new());
    }
    let value: u32 = trimmed.parse()?;
    NonZeroU32::new(value).ok_or_else(|| ArgParseErr::with_msg("negative or zero image size"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck_macros::quickcheck;

    #[test]
    fn default_is_512_square() {
        assert_eq!(Size::default().as_tuple(), (512, 512));
    }

    #[test]
    fn test_width_and_height() {
        let parsed = Size::from_str("640x480").unwrap();
        assert_eq!(parsed.as_tuple(), (640, 480));
        let parsed = Size::from_str("640X480").unwrap();
        assert_eq!(parsed.as_tuple(), (640, 480));
    }

    #[test]
    fn test_single_number_is_square() {
        let parsed = Size::from_str("256").unwrap();
        assert_eq!(parsed, Size::new(256, 256).unwrap());
    }

    #[test]
    fn test_zero_is_rejected() {
        let err = Size::from_str("0x10").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("negative or zero image size"));
        assert!(Size::from_str("10x0").is_err());
        assert!(Size::from_str("0").is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        for input in ["", "x", "10x", "x10", "-10x10", "+5x5", "1.5x2", "10x10x10", "abc"] {
            assert!(Size::from_str(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert!(Size::from_str("99999999999x1").is_err());
    }

    #[quickcheck]
    fn roundtrip_is_lossless(orig: Size) {
        let parsed = Size::from_str(&orig.to_string()).unwrap();
        assert_eq!(orig, parsed)
    }
}
