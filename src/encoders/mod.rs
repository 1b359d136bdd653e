//! Format-specific encoders for formats that need more than `DynamicImage::write_to`

mod common;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;
