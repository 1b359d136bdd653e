use std::process::ExitCode;

use logo_resize::{args, help, plan};

fn main() -> ExitCode {
    help::maybe_print_help_and_exit("logo-resize");
    let arguments: Vec<_> = std::env::args_os().collect();

    let plan = match args::parse_args(arguments) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // A failed resize is reported, not propagated: the exit status is 0 either way.
    match plan.execute() {
        Ok(output) => println!("{}", plan::success_message(output)),
        Err(e) => eprintln!("{e}"),
    }
    ExitCode::SUCCESS
}
