use std::ops::BitXor;

use image::{DynamicImage, ImageBuffer, Pixel};
use pic_scale_safe::ResamplingFunction;

use crate::{
    arg_parsers::{Filter, Size},
    error::ResizeError,
    image::Image,
    op_err, op_try,
};

/// Resamples the image to exactly `size`, ignoring the original aspect ratio.
pub fn resize(image: &mut Image, size: Size, filter: Filter) -> Result<(), ResizeError> {
    let (dst_width, dst_height) = size.as_tuple();
    resize_impl(&mut image.pixels, dst_width, dst_height, filter.into())
}

fn resize_impl(
    image: &mut DynamicImage,
    dst_width: u32,
    dst_height: u32,
    algorithm: ResamplingFunction,
) -> Result<(), ResizeError> {
    if image.width() == dst_width && image.height() == dst_height {
        return Ok(());
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(op_err!(
            "cannot resize an empty {}x{} image",
            image.width(),
            image.height()
        ));
    }
    // pic-scale-safe has no kernels for any other layout; f32 loses no precision for them
    if !matches!(
        image,
        DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageRgb8(_)
            | DynamicImage::ImageRgba8(_)
            | DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_)
            | DynamicImage::ImageRgb16(_)
            | DynamicImage::ImageRgba16(_)
            | DynamicImage::ImageRgb32F(_)
            | DynamicImage::ImageRgba32F(_)
    ) {
        *image = DynamicImage::ImageRgba32F(image.to_rgba32f());
    }

    use pic_scale_safe::*;
    use DynamicImage::*;
    let alg = algorithm; // otherwise rustfmt breaks up too-long-lines and the formatting is a mess
    let src_size = ImageSize::new(image.width() as usize, image.height() as usize);
    let dst_size = ImageSize::new(dst_width as usize, dst_height as usize);

    // Premultiply the image by alpha channel to avoid color bleed from fully transparent pixels.
    // Nearest-neighbor does not blend anything, so it doesn't need it.
    let mut premultiplied_by_alpha = false;
    if algorithm != ResamplingFunction::Nearest {
        premultiplied_by_alpha = premultiply_alpha_if_needed(image);
    }

    let mut resized = match &*image {
        ImageLuma8(src) => {
            let resized = op_try!(resize_plane8(src.as_raw(), src_size, dst_size, alg));
            ImageLuma8(buffer_from_raw(dst_width, dst_height, resized)?)
        }
        ImageLumaA8(src) => {
            let resized = op_try!(resize_plane8_with_alpha(src.as_raw(), src_size, dst_size, alg));
            ImageLumaA8(buffer_from_raw(dst_width, dst_height, resized)?)
        }
        ImageRgb8(src) => {
            let resized = op_try!(resize_rgb8(src.as_raw(), src_size, dst_size, alg));
            ImageRgb8(buffer_from_raw(dst_width, dst_height, resized)?)
        }
        ImageRgba8(src) => {
            let resized = op_try!(resize_rgba8(src.as_raw(), src_size, dst_size, alg));
            ImageRgba8(buffer_from_raw(dst_width, dst_height, resized)?)
        }
        ImageLuma16(src) => {
            let resized = op_try!(resize_plane16(src.as_raw(), src_size, dst_size, 16, alg));
            ImageLuma16(buffer_from_raw(dst_width, dst_height, resized)?)
        }
        ImageLumaA16(src) => {
            let resized = op_try!(resize_plane16_with_alpha(
                src.as_raw(),
                src_size,
                dst_size,
                16,
                alg
            ));
            ImageLumaA16(buffer_from_raw(dst_width, dst_height, resized)?)
        }
        ImageRgb16(src) => {
            let resized = op_try!(resize_rgb16(src.as_raw(), src_size, dst_size, 16, alg));
            ImageRgb16(buffer_from_raw(dst_width, dst_height, resized)?)
        }
        ImageRgba16(src) => {
            let resized = op_try!(resize_rgba16(src.as_raw(), src_size, dst_size, 16, alg));
            ImageRgba16(buffer_from_raw(dst_width, dst_height, resized)?)
        }
        ImageRgb32F(src) => {
            let resized = op_try!(resize_rgb_f32(src.as_raw(), src_size, dst_size, alg));
            ImageRgb32F(buffer_from_raw(dst_width, dst_height, resized)?)
        }
        ImageRgba32F(src) => {
            let resized = op_try!(resize_rgba_f32(src.as_raw(), src_size, dst_size, alg));
            ImageRgba32F(buffer_from_raw(dst_width, dst_height, resized)?)
        }
        other => return Err(op_err!("unsupported pixel format {:?}", other.color())),
    };
    if premultiplied_by_alpha {
        unpremultiply_alpha(&mut resized);
    }
    *image = resized;
    Ok(())
}

fn buffer_from_raw<P: Pixel>(
    width: u32,
    height: u32,
    buf: Vec<P::Subpixel>,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>, ResizeError> {
    ImageBuffer::from_raw(width, height, buf)
        .ok_or_else(|| op_err!("resampler returned a buffer of the wrong size"))
}

/// Return value indicates whether the image was premultiplied by alpha
#[must_use]
fn premultiply_alpha_if_needed(image: &mut DynamicImage) -> bool {
    use pic_scale_safe::*;
    if has_constant_alpha(image) {
        return false;
    }
    match image {
        DynamicImage::ImageLumaA8(buf) => {
            premultiply_la8(buf.as_mut());
            true
        }
        DynamicImage::ImageRgba8(buf) => {
            premultiply_rgba8(buf.as_mut());
            true
        }
        DynamicImage::ImageLumaA16(buf) => {
            premultiply_la16(buf.as_mut(), 16);
            true
        }
        DynamicImage::ImageRgba16(buf) => {
            premultiply_rgba16(buf.as_mut(), 16);
            true
        }
        DynamicImage::ImageRgba32F(buf) => {
            premultiply_rgba_f32(buf.as_mut());
            true
        }
        _ => false,
    }
}

/// Reverses premultiplication by alpha
fn unpremultiply_alpha(image: &mut DynamicImage) {
    use pic_scale_safe::*;
    match image {
        DynamicImage::ImageLumaA8(buf) => unpremultiply_la8(buf.as_mut()),
        DynamicImage::ImageRgba8(buf) => unpremultiply_rgba8(buf.as_mut()),
        DynamicImage::ImageLumaA16(buf) => unpremultiply_la16(buf.as_mut(), 16),
        DynamicImage::ImageRgba16(buf) => unpremultiply_rgba16(buf.as_mut(), 16),
        DynamicImage::ImageRgba32F(buf) => unpremultiply_rgba_f32(buf.as_mut()),
        _ => (),
    }
}

#[must_use]
fn has_constant_alpha(image: &DynamicImage) -> bool {
    match image {
        DynamicImage::ImageLumaA8(buf) => has_constant_alpha_integer(buf),
        DynamicImage::ImageRgba8(buf) => has_constant_alpha_integer(buf),
        DynamicImage::ImageLumaA16(buf) => has_constant_alpha_integer(buf),
        DynamicImage::ImageRgba16(buf) => has_constant_alpha_integer(buf),
        DynamicImage::ImageRgba32F(buf) => has_constant_alpha_f32(buf),
        // no alpha channel at all
        _ => true,
    }
}

#[must_use]
fn has_constant_alpha_integer<P, Container>(img: &ImageBuffer<P, Container>) -> bool
where
    P: Pixel + 'static,
    Container: std::ops::Deref<Target = [P::Subpixel]>,
    P::Subpixel: Copy + PartialEq + BitXor<P::Subpixel, Output = P::Subpixel> + Into<u64>,
{
    let first_pixel_alpha = match img.pixels().next().and_then(|p| p.channels().last()) {
        Some(alpha) => *alpha,
        None => return true, // empty input image
    };
    // Instead of comparing every pixel we scan every row with cheap arithmetic
    // and only compare the sum of divergences on every row, which should be 0
    let mut sum_of_diffs: u64 = 0;
    for row in img.rows() {
        row.for_each(|pixel| {
            if let Some(alpha) = pixel.channels().last() {
                let diff: u64 = (*alpha).bitxor(first_pixel_alpha).into();
                sum_of_diffs += diff;
            }
        });
        if sum_of_diffs != 0 {
            return false;
        }
    }
    true
}

#[must_use]
fn has_constant_alpha_f32(img: &ImageBuffer<image::Rgba<f32>, Vec<f32>>) -> bool {
    // NaNs and infinities make anything clever tricky, so do the naive thing
    let first_pixel_alpha = match img.pixels().next() {
        Some(pixel) => pixel.0[3],
        None => return true,
    };
    img.pixels().all(|pixel| pixel.0[3] == first_pixel_alpha)
}
