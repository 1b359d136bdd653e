use std::{
    ffi::OsStr,
    io::{BufWriter, Write},
    path::Path,
};

use image::ImageFormat;
use tempfile::NamedTempFile;

use crate::{encoders, error::ResizeError, image::Image, op_err, op_try};

/// Encodes `image` into `path`, choosing the format from the file extension.
///
/// The data is written to a temporary file next to `path` first and only moved into place
/// once encoding succeeded, so a failure never leaves a truncated image behind.
pub fn encode(image: &Image, path: &Path) -> Result<(), ResizeError> {
    let format = choose_encoding_format(path)?;

    let mut tmp = create_sibling_tempfile(path)?;
    // Wrap in BufWriter for performance
    let mut writer = BufWriter::new(&mut tmp);

    match format {
        #[cfg(feature = "png")]
        ImageFormat::Png => encoders::png::encode(image, &mut writer)?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => encoders::jpeg::encode(image, &mut writer)?,
        _ => op_try!(image.pixels.write_to(&mut writer, format)),
    }

    // The buffers would be flushed on drop too, but that swallows errors.
    op_try!(writer.flush());
    drop(writer);

    // `persist` replaces the destination if it already exists.
    op_try!(tmp.persist(path));
    Ok(())
}

fn choose_encoding_format(path: &Path) -> Result<ImageFormat, ResizeError> {
    match ImageFormat::from_path(path) {
        Ok(format) if format.writing_enabled() => Ok(format),
        _ => {
            let extension = path.extension().unwrap_or(OsStr::new(""));
            Err(op_err!(
                "no encode delegate for this image format '{}'",
                extension.to_ascii_uppercase().to_string_lossy()
            ))
        }
    }
}

fn create_sibling_tempfile(path: &Path) -> Result<NamedTempFile, ResizeError> {
    let dir = match path.parent() {
        // a bare file name has an empty parent
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".logo-resize-").suffix(".tmp");
    // The default for temporary files is 0o600, but the result is a regular output file.
    // The process umask still applies on top of this.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    builder
        .tempfile_in(dir)
        .map_err(|error| op_err!("unable to open image '{}': {error}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::{DynamicImage, GenericImageView};

    fn sample() -> Image {
        Image::from(DynamicImage::new_rgba8(8, 6))
    }

    fn dir_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.notanimage");
        match encode(&sample(), &path) {
            Err(ResizeError::OperationFailed(msg)) => {
                assert!(msg.contains("'NOTANIMAGE'"), "{msg}")
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(dir_is_empty(dir.path()));
    }

    #[test]
    fn missing_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out");
        assert!(encode(&sample(), &path).is_err());
        assert!(dir_is_empty(dir.path()));
    }

    #[cfg(feature = "png")]
    #[test]
    fn missing_directory_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.png");
        match encode(&sample(), &path) {
            Err(ResizeError::OperationFailed(msg)) => {
                assert!(msg.contains("unable to open image"), "{msg}")
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(dir_is_empty(dir.path()));
    }

    #[cfg(feature = "png")]
    #[test]
    fn writes_png_and_leaves_no_tempfile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        encode(&sample(), &path).unwrap();

        let written = image::open(&path).unwrap();
        assert_eq!(written.dimensions(), (8, 6));
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(feature = "png")]
    #[test]
    fn overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        std::fs::write(&path, b"stale").unwrap();
        encode(&sample(), &path).unwrap();
        assert_eq!(image::open(&path).unwrap().dimensions(), (8, 6));
    }

    #[cfg(feature = "jpeg")]
    #[test]
    fn writes_jpeg_from_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("OUT.JPG");
        encode(&sample(), &path).unwrap();
        let written = image::open(&path).unwrap();
        assert_eq!(written.dimensions(), (8, 6));
    }
}
