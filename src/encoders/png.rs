use std::borrow::Cow;
use std::io::Write;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::DynamicImage;

use crate::encoders::common::write_icc;
use crate::{error::ResizeError, image::Image, op_try};

pub fn encode<W: Write>(image: &Image, writer: &mut W) -> Result<(), ResizeError> {
    let mut encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
    write_icc(&mut encoder, image);
    let pixels = png_compatible_pixels(&image.pixels);
    Ok(op_try!(pixels.write_with_encoder(encoder)))
}

/// PNG tops out at 16 bits per channel, so floating-point images get narrowed
fn png_compatible_pixels(pixels: &DynamicImage) -> Cow<'_, DynamicImage> {
    match pixels {
        DynamicImage::ImageRgb32F(_) => Cow::Owned(DynamicImage::ImageRgb16(pixels.to_rgb16())),
        DynamicImage::ImageRgba32F(_) => {
            Cow::Owned(DynamicImage::ImageRgba16(pixels.to_rgba16()))
        }
        _ => Cow::Borrowed(pixels),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::{ImageFormat, Rgba, Rgba32FImage};

    #[test]
    fn float_images_are_written_as_16_bit() {
        let pixels = DynamicImage::ImageRgba32F(Rgba32FImage::from_pixel(
            2,
            2,
            Rgba([0.5, 0.25, 1.0, 1.0]),
        ));
        let mut out = Vec::new();
        encode(&Image::from(pixels), &mut out).unwrap();

        let decoded = image::load_from_memory_with_format(&out, ImageFormat::Png).unwrap();
        assert!(matches!(decoded, DynamicImage::ImageRgba16(_)));
    }

    #[test]
    fn eight_bit_images_are_kept_as_is() {
        let pixels = DynamicImage::new_luma8(3, 3);
        assert!(matches!(png_compatible_pixels(&pixels), Cow::Borrowed(_)));
    }
}
