use image::DynamicImage;

/// Decoded pixels plus the metadata we carry through to the output file.
#[derive(Debug, Clone)]
pub struct Image {
    pub icc: Option<Vec<u8>>,
    pub pixels: DynamicImage,
}

impl Image {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.pixels.width(), self.pixels.height())
    }
}

impl From<DynamicImage> for Image {
    fn from(pixels: DynamicImage) -> Self {
        Self { icc: None, pixels }
    }
}
