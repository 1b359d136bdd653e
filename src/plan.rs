use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use crate::arg_parse_err::ArgParseErr;
use crate::arg_parsers::{Filter, Size};
use crate::args::Arg;
use crate::decode::decode;
use crate::encode::encode;
use crate::error::{ResizeError, UsageError};
use crate::operations::Operation;

pub const DEFAULT_INPUT: &str = "logo.png";
pub const DEFAULT_OUTPUT: &str = "logo_512.png";

/// Everything needed for one run: where to read, where to write, and how to resample.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizePlan {
    pub input: PathBuf,
    pub output: PathBuf,
    pub size: Size,
    pub filter: Filter,
}

impl Default for ResizePlan {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            size: Size::default(),
            filter: Filter::default(),
        }
    }
}

impl ResizePlan {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, size: Size) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            size,
            ..Default::default()
        }
    }

    pub fn apply_arg(&mut self, arg: Arg, value: Option<&OsStr>) -> Result<(), UsageError> {
        let arg_string: &'static str = arg.into();
        let value = match value {
            Some(value) => value,
            None => return Err(UsageError(format!("argument requires a value: -{arg_string}"))),
        };

        self.apply_arg_inner(arg, value)
            .map_err(|arg_err| UsageError(arg_err.display_with_arg(arg_string, value)))
    }

    /// Currently this can only fail due to argument parsing.
    /// Split into its own function due to lack of try{} blocks on stable Rust.
    fn apply_arg_inner(&mut self, arg: Arg, value: &OsStr) -> Result<(), ArgParseErr> {
        match arg {
            Arg::Filter => self.filter = Filter::try_from(value)?,
            Arg::Resize => self.size = Size::try_from(value)?,
        }
        Ok(())
    }

    pub fn operation(&self) -> Operation {
        Operation::Resize {
            size: self.size,
            filter: self.filter,
        }
    }

    /// Decodes the input, resizes it and writes the output.
    /// The decoded image is dropped on every path out of this function.
    pub fn execute(&self) -> Result<&Path, ResizeError> {
        let mut image = decode(&self.input)?;
        self.operation().execute(&mut image)?;
        encode(&image, &self.output)?;
        Ok(&self.output)
    }
}

/// The line printed after the output has been written.
pub fn success_message(output: &Path) -> String {
    format!("Success! Image saved as {}", output.display())
}

/// Resizes `input` into `output` with the default Lanczos filter.
pub fn resize_image(input: &Path, output: &Path, size: Size) -> Result<(), ResizeError> {
    ResizePlan::new(input, output, size).execute()?;
    Ok(())
}
