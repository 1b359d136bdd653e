use std::borrow::Cow;
use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use crate::encoders::common::write_icc;
use crate::{error::ResizeError, image::Image, op_try};

const QUALITY: u8 = 92;

pub fn encode<W: Write>(image: &Image, writer: &mut W) -> Result<(), ResizeError> {
    let mut encoder = JpegEncoder::new_with_quality(writer, QUALITY);
    write_icc(&mut encoder, image);
    let pixels = jpeg_compatible_pixels(&image.pixels);
    Ok(op_try!(pixels.write_with_encoder(encoder)))
}

/// JPEG only stores 8-bit gray or RGB, so alpha is dropped and deeper images are narrowed
fn jpeg_compatible_pixels(pixels: &DynamicImage) -> Cow<'_, DynamicImage> {
    match pixels {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(pixels),
        other if other.color().has_color() => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
        other => Cow::Owned(DynamicImage::ImageLuma8(other.to_luma8())),
    }
}
