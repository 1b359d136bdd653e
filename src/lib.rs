//! `logo-resize` resizes one image to an exact size and writes it next to the original.
//!
//! The binary is the product; the library exists so that the pieces can be tested.
//! [`plan::resize_image`] is the one-call entry point.

#![forbid(unsafe_code)]

#[cfg(feature = "hardened_malloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod arg_parse_err;
pub mod arg_parsers;
pub mod args;
pub mod decode;
pub mod encode;
mod encoders;
pub mod error;
pub mod help;
pub mod image;
pub mod operations;
pub mod plan;
