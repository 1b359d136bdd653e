//! Helpers shared between all encoders

use crate::image::Image;
use image::ImageEncoder;

pub fn write_icc(encoder: &mut impl ImageEncoder, image: &Image) {
    if let Some(icc) = image.icc.clone() {
        let _ = encoder.set_icc_profile(icc); // ignore UnsupportedError
    };
}
