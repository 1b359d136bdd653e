use std::{io::ErrorKind, path::Path};

use image::{DynamicImage, ImageDecoder, ImageReader};

use crate::{error::ResizeError, image::Image, op_err, op_try};

/// Opens `file` and decodes it, guessing the format from the file contents.
///
/// A path that does not point to an existing file is reported as
/// [`ResizeError::FileNotFound`]; anything else that goes wrong is
/// [`ResizeError::OperationFailed`].
pub fn decode(file: &Path) -> Result<Image, ResizeError> {
    if !file.exists() {
        return Err(ResizeError::FileNotFound(file.to_owned()));
    }
    let reader = match ImageReader::open(file) {
        Ok(reader) => reader,
        // the file may have been removed between the check above and the open call
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ResizeError::FileNotFound(file.to_owned()))
        }
        Err(e) => return Err(op_err!("unable to open image '{}': {e}", file.display())),
    };
    let reader = op_try!(reader.with_guessed_format());

    let mut decoder = op_try!(reader.into_decoder());
    // A malformed colour profile must not stop us from resizing.
    let icc = decoder.icc_profile().ok().flatten();
    let pixels = op_try!(DynamicImage::from_decoder(decoder));

    Ok(Image { icc, pixels })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        match decode(&path) {
            Err(ResizeError::FileNotFound(reported)) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn directory_is_not_a_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            decode(dir.path()),
            Err(ResizeError::OperationFailed(_))
        ));
    }

    #[test]
    fn garbage_is_operation_failed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"this is not an image").unwrap();
        assert!(matches!(decode(&path), Err(ResizeError::OperationFailed(_))));
    }

    #[cfg(feature = "png")]
    #[test]
    fn decodes_png_by_content() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("small.png");
        DynamicImage::new_rgb8(3, 2).save(&png).unwrap();
        // the extension lies, the contents don't
        let path = dir.path().join("small.dat");
        std::fs::rename(&png, &path).unwrap();

        let decoded = decode(&path).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert!(decoded.icc.is_none());
    }
}
