//! Checkmark CLI - Keep task statuses in sync across markdown checklists

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = checkmark_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
