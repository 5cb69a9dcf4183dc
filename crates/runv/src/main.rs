use clap::Parser;
use std::process::ExitCode;

use cli::App;

mod cli;
mod commands;
mod logging;
mod prompt;

fn main() -> ExitCode {
    let app = match App::try_parse() {
        Ok(app) => app,
        Err(e) => {
            let _ = e.print();
            // Help and --version are "errors" to clap but not to us.
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    match commands::run(app.cmd) {
        Ok(code) => exit_code(code),
        Err(e) => {
            tracing::debug!("{e:?}");
            eprintln!("runv: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Exit statuses outside `0..=255` cannot be reported faithfully; treat them
/// as a generic failure.
fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map(ExitCode::from).unwrap_or(ExitCode::FAILURE)
}
