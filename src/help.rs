use std::ffi::OsStr;

use current_platform::CURRENT_PLATFORM;
use strum::VariantArray;

use crate::arg_parsers::Filter;
use crate::args::Arg;
use crate::plan::{DEFAULT_INPUT, DEFAULT_OUTPUT};

pub fn maybe_print_help_and_exit(bin_name: &str) {
    if let Some(arg) = std::env::args_os().nth(1) {
        if is_help_flag(&arg) {
            print_help_and_exit(bin_name)
        }
    }
}

fn is_help_flag(arg: &OsStr) -> bool {
    arg == OsStr::new("--help") || arg == OsStr::new("-help") || arg == OsStr::new("-h")
}

fn print_help_and_exit(bin_name: &str) -> ! {
    print!("{}", help_text(bin_name));
    std::process::exit(0);
}

fn help_text(bin_name: &str) -> String {
    let mut text = String::new();
    text.push_str(&format!("Version: {}\n", version_string()));
    text.push_str(&format!("License: {}\n", env!("CARGO_PKG_LICENSE")));
    text.push_str(&format!("Usage: {bin_name} [options ...] [input [output]]\n"));
    text.push_str(&format!(
        "Defaults: input {DEFAULT_INPUT}, output {DEFAULT_OUTPUT}, -resize 512x512, -filter Lanczos\n"
    ));
    text.push('\n');
    text.push_str("Options:\n");
    for arg in Arg::VARIANTS {
        let name: &'static str = arg.into();
        let flag = format!("-{name} {}", arg.value_hint());
        text.push_str(&format!("  {flag:19} {}\n", arg.help_text()));
    }
    let filters: Vec<&'static str> = Filter::VARIANTS.iter().map(|f| f.into()).collect();
    text.push_str(&format!("\nFilters: {}\n", filters.join(", ")));
    text
}

fn version_string() -> String {
    let cpu = CURRENT_PLATFORM.split('-').next().unwrap_or("unknown");
    let version = env!("CARGO_PKG_VERSION");
    format!("logo-resize {version} {cpu}")
}
