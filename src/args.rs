//! Command-line argument parsing.
//!
//! Options follow the imagemagick convention of a single leading `-`,
//! so this is a small hand-rolled parser rather than a `--flag` style one.
//! Everything is optional: with no arguments at all we resize `logo.png` into `logo_512.png`.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use crate::{error::UsageError, plan::ResizePlan};

use strum::{EnumString, IntoStaticStr, VariantArray};

#[derive(EnumString, IntoStaticStr, VariantArray, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum Arg {
    Filter,
    Resize,
}

impl Arg {
    pub fn value_hint(&self) -> &'static str {
        match self {
            Arg::Filter => "type",
            Arg::Resize => "geometry",
        }
    }

    pub fn help_text(&self) -> &'static str {
        match self {
            Arg::Filter => "use this filter when resizing an image",
            Arg::Resize => "resize the image to exactly WxH, or NxN given a single number",
        }
    }
}

pub fn parse_args(args: Vec<OsString>) -> Result<ResizePlan, UsageError> {
    let mut plan = ResizePlan::default();
    let mut files: Vec<OsString> = Vec::new();

    let mut iter = args.into_iter().skip(1); // skip argv[0], path to our binary
    while let Some(raw_arg) = iter.next() {
        if is_option(&raw_arg) {
            let name = option_name(raw_arg)?;
            let arg = Arg::try_from(name.as_str())
                .map_err(|_| UsageError(format!("unrecognized option '-{name}'")))?;
            let value = iter.next();
            plan.apply_arg(arg, value.as_deref())?;
        } else {
            files.push(raw_arg);
        }
    }

    let mut files = files.into_iter();
    if let Some(input) = files.next() {
        plan.input = PathBuf::from(input);
    }
    if let Some(output) = files.next() {
        plan.output = PathBuf::from(output);
    }
    if let Some(extra) = files.next() {
        return Err(UsageError(format!(
            "unexpected extra file name '{}'",
            extra.to_string_lossy()
        )));
    }
    Ok(plan)
}

/// A single `-` followed by a name. A bare `-` and anything starting with `--` are file names.
fn is_option(arg: &OsStr) -> bool {
    let bytes = arg.as_encoded_bytes();
    bytes.len() > 1 && bytes[0] == b'-' && bytes[1] != b'-'
}

fn option_name(raw_arg: OsString) -> Result<String, UsageError> {
    let mut string = raw_arg
        .into_string()
        .map_err(|s| UsageError(format!("unrecognized option '{}'", s.to_string_lossy())))?;
    string.remove(0);
    Ok(string)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::arg_parsers::{Filter, Size};
    use std::path::Path;

    fn parse(args: &[&str]) -> Result<ResizePlan, UsageError> {
        let mut argv = vec![OsString::from("logo-resize")];
        argv.extend(args.iter().map(OsString::from));
        parse_args(argv)
    }

    #[test]
    fn no_arguments_means_defaults() {
        assert_eq!(parse(&[]).unwrap(), ResizePlan::default());
    }

    #[test]
    fn positional_input_and_output() {
        let plan = parse(&["in.jpg", "out.webp"]).unwrap();
        assert_eq!(plan.input, Path::new("in.jpg"));
        assert_eq!(plan.output, Path::new("out.webp"));
        assert_eq!(plan.size, Size::default());
    }

    #[test]
    fn input_only_keeps_default_output() {
        let plan = parse(&["in.jpg"]).unwrap();
        assert_eq!(plan.input, Path::new("in.jpg"));
        assert_eq!(plan.output, Path::new("logo_512.png"));
    }

    #[test]
    fn options_anywhere() {
        let plan = parse(&["in.png", "-resize", "64x32", "out.png", "-filter", "mitchell"]).unwrap();
        assert_eq!(plan.size, Size::new(64, 32).unwrap());
        assert_eq!(plan.filter, Filter::Mitchell);
        assert_eq!(plan.input, Path::new("in.png"));
        assert_eq!(plan.output, Path::new("out.png"));
    }

    #[test]
    fn later_option_wins() {
        let plan = parse(&["-resize", "10", "-resize", "20x30"]).unwrap();
        assert_eq!(plan.size, Size::new(20, 30).unwrap());
    }

    #[test]
    fn double_dash_is_a_file_name() {
        let plan = parse(&["--weird.png"]).unwrap();
        assert_eq!(plan.input, Path::new("--weird.png"));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let err = parse(&["-sharpen", "3"]).unwrap_err();
        assert_eq!(err.to_string(), "logo-resize: unrecognized option '-sharpen'");
    }

    #[test]
    fn missing_value_is_rejected() {
        let err = parse(&["in.png", "-resize"]).unwrap_err();
        assert_eq!(err.0, "argument requires a value: -resize");
    }

    #[test]
    fn bad_filter_is_rejected() {
        let err = parse(&["-filter", "fuzzy"]).unwrap_err();
        assert_eq!(
            err.0,
            "invalid argument for option '-filter': unrecognized image filter 'fuzzy'"
        );
    }

    #[test]
    fn too_many_files_is_rejected() {
        let err = parse(&["a.png", "b.png", "c.png"]).unwrap_err();
        assert_eq!(err.0, "unexpected extra file name 'c.png'");
    }
}
