use std::{ffi::OsStr, fmt::Display};

use pic_scale_safe::ResamplingFunction;
use strum::{EnumString, IntoStaticStr, VariantArray};

use crate::arg_parse_err::ArgParseErr;

/// Resampling kernel selected with `-filter`.
///
/// Names follow imagemagick where it has a name for the kernel. Only kernels
/// that `pic-scale-safe` really implements are listed, so a name is never
/// accepted and then swapped for something else.
#[derive(
    Copy, Clone, Default, Eq, PartialEq, Debug, EnumString, IntoStaticStr, VariantArray,
)]
#[strum(ascii_case_insensitive)]
pub enum Filter {
    Bartlett,
    Blackman,
    Bohman,
    Box,
    Catrom,
    Cubic,
    Gaussian,
    Hamming,
    Hann,
    Hermite,
    Jinc,
    Kaiser,
    Lagrange,
    #[default]
    Lanczos,
    Lanczos2,
    Mitchell,
    Point,
    Quadratic,
    Robidoux,
    RobidouxSharp,
    Spline,
    Triangle,
    Welch,
}

impl From<Filter> for ResamplingFunction {
    fn from(filter: Filter) -> Self {
        use ResamplingFunction as R;
        match filter {
            Filter::Point => R::Nearest,
            Filter::Box => R::Box,
            Filter::Triangle => R::Bilinear,
            Filter::Hermite => R::Hermite,
            Filter::Cubic => R::Cubic,
            Filter::Catrom => R::CatmullRom,
            Filter::Mitchell => R::MitchellNetravalli,
            Filter::Spline => R::BSpline,
            Filter::Lagrange => R::Lagrange3,
            Filter::Quadratic => R::Quadric,
            Filter::Gaussian => R::Gaussian,
            Filter::Robidoux => R::Robidoux,
            Filter::RobidouxSharp => R::RobidouxSharp,
            Filter::Lanczos => R::Lanczos3,
            Filter::Lanczos2 => R::Lanczos2,
            Filter::Jinc => R::Lanczos3Jinc,
            // windowing functions
            Filter::Bartlett => R::Bartlett,
            Filter::Blackman => R::Blackman,
            Filter::Bohman => R::Bohman,
            Filter::Hamming => R::Hamming,
            Filter::Hann => R::Hann,
            Filter::Kaiser => R::Kaiser,
            Filter::Welch => R::Welch,
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        f.write_str(name)
    }
}

impl TryFrom<&OsStr> for Filter {
    type Error = ArgParseErr;

    fn try_from(s: &OsStr) -> Result<Self, Self::Error> {
        s.to_str()
            .and_then(|name| Filter::try_from(name).ok())
            .ok_or_else(|| {
                ArgParseErr::with_msg(format!(
                    "unrecognized image filter '{}'",
                    s.to_string_lossy()
                ))
            })
    }
}
