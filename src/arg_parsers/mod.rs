//! Parsers for the values of command-line options

mod filter;
pub use filter::*;
mod size;
pub use size::*;
