//! slidepot - build, run and analyze the SlidePotentiometer application
//!
//! A thin dispatcher over the host's build tools.
//!
//! ## Architecture
//!
//! ```text
//! CLI → dispatch → commands/<step>.rs → package manager / CMake / Ninja / doxygen / valgrind
//! ```

mod build;
mod cli;
mod commands;
mod config;
mod dispatch;
mod error;
mod exec;
mod platform;
mod utils;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use error::AppError;
use utils::terminal::print_error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.execute() {
        Ok(0) => ExitCode::SUCCESS,
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            match err.downcast_ref::<AppError>() {
                Some(app_err) => app_err.display_with_hints(),
                None => print_error(&format!("{:#}", err)),
            }
            ExitCode::FAILURE
        }
    }
}
