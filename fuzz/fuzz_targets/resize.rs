#![no_main]

use std::{num::NonZeroU8, path::Path};

use arbitrary::Unstructured;
use image::GenericImageView;
use libfuzzer_sys::fuzz_target;
use logo_resize::{arg_parsers::Size, plan::ResizePlan};

#[derive(Debug)]
struct StructuredImage {
    width: NonZeroU8,
    height: NonZeroU8,
    rgba_data: Vec<u8>,
}

impl StructuredImage {
    fn save_as_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        use image::{ImageBuffer, RgbaImage};

        let width = self.width.get() as u32;
        let img: RgbaImage = ImageBuffer::from_fn(width, self.height.get() as u32, |x, y| {
            let idx = (y * width + x) as usize * 4;
            image::Rgba([
                self.rgba_data[idx],
                self.rgba_data[idx + 1],
                self.rgba_data[idx + 2],
                self.rgba_data[idx + 3],
            ])
        });
        img.save(path)
    }
}

impl<'a> arbitrary::Arbitrary<'a> for StructuredImage {
    fn arbitrary(unstructured: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let width: NonZeroU8 = unstructured.arbitrary()?;
        let height: NonZeroU8 = unstructured.arbitrary()?;
        let rgba_data_len = width.get() as usize * height.get() as usize * 4;
        let rgba_data = unstructured.bytes(rgba_data_len)?;

        Ok(Self {
            width,
            height,
            rgba_data: rgba_data.to_vec(),
        })
    }
}

fuzz_target!(|input: (StructuredImage, NonZeroU8, NonZeroU8)| {
    let (image, new_width, new_height) = input;
    let new_width = new_width.get() as u32;
    let new_height = new_height.get() as u32;

    let temp_directory = tempfile::tempdir().expect("failed to create temporary directory");
    let input_path = temp_directory.path().join("input_image.png");
    let output_path = temp_directory.path().join("output_image.png");
    image
        .save_as_png(&input_path)
        .expect("failed to save image as PNG");

    let size = Size::new(new_width, new_height).expect("NonZeroU8 is never zero");
    ResizePlan::new(&input_path, &output_path, size)
        .execute()
        .expect("resizing a valid PNG must succeed");

    let (output_width, output_height) = image::open(&output_path)
        .expect("could not open the resized file")
        .dimensions();
    assert_eq!(output_width, new_width, "{}", output_path.display());
    assert_eq!(output_height, new_height, "{}", output_path.display());
});
