//! taskline - Personal task tracking in a plain text file

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = taskline::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
