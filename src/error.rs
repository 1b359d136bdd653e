use std::fmt::{Debug, Display};
use std::path::PathBuf;

use crate::plan::DEFAULT_INPUT;

/// Everything that can go wrong while resizing, as reported to the user.
pub enum ResizeError {
    /// The input path does not name an existing file.
    ///
    /// The path is kept for callers, but the message shown to the user is
    /// always the same one, naming the logo the tool expects to find.
    FileNotFound(PathBuf),
    /// Any other failure while decoding, resampling or encoding.
    OperationFailed(String),
}

impl Display for ResizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResizeError::FileNotFound(_) => write!(f, "Error: '{DEFAULT_INPUT}' not found."),
            ResizeError::OperationFailed(msg) => write!(f, "An error occurred: {msg}"),
        }
    }
}

impl Debug for ResizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResizeError::FileNotFound(path) => {
                f.debug_tuple("FileNotFound").field(path).finish()
            }
            ResizeError::OperationFailed(msg) => {
                f.debug_tuple("OperationFailed").field(msg).finish()
            }
        }
    }
}

impl std::error::Error for ResizeError {}

/// The command line could not be understood.
pub struct UsageError(pub String);

impl Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "logo-resize: {}", self.0)
    }
}

impl Debug for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("UsageError").field(&self.0).finish()
    }
}

impl std::error::Error for UsageError {}

#[macro_export]
macro_rules! op_err {
    ($($arg:tt)*) => {
        $crate::error::ResizeError::OperationFailed(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! op_try {
    ($expr:expr $(,)?) => {
        match $expr {
            std::result::Result::Ok(val) => val,
            std::result::Result::Err(err) => {
                return std::result::Result::Err($crate::op_err!("{}", err));
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_is_fixed() {
        let err = ResizeError::FileNotFound(PathBuf::from("logo.png"));
        assert_eq!(err.to_string(), "Error: 'logo.png' not found.");
        let err = ResizeError::FileNotFound(PathBuf::from("elsewhere/missing.png"));
        assert_eq!(err.to_string(), "Error: 'logo.png' not found.");
        assert_eq!(
            format!("{err:?}"),
            r#"FileNotFound("elsewhere/missing.png")"#
        );
    }

    #[test]
    fn operation_failed_carries_underlying_text() {
        let err = op_err!("disk is {}", "full");
        assert_eq!(err.to_string(), "An error occurred: disk is full");
    }

    #[test]
    fn op_try_converts_foreign_errors() {
        fn parse(s: &str) -> Result<u32, ResizeError> {
            Ok(op_try!(s.parse::<u32>()))
        }
        assert_eq!(parse("7").unwrap(), 7);
        match parse("seven") {
            Err(ResizeError::OperationFailed(msg)) => assert!(msg.contains("invalid digit")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
