//! mkvenv entry point
//!
//! Parses the command line, runs the selected command and turns its result
//! into a process exit status. Errors are printed with their details and a
//! suggestion where one is known.

use clap::Parser;
use mkvenv::cli::Cli;
use mkvenv::core::{exit_code, user_friendly_error};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let code = match cli.execute().await {
        Ok(code) => code,
        Err(e) => {
            let code = exit_code(&e);
            user_friendly_error(e).display();
            code
        }
    };
    std::process::exit(code);
}
