//! Binary crate for the `travel` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive prompts and the search loop
//! - Human-friendly output formatting

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use clap::Parser;
use crossterm::style::Stylize;
use tracing_subscriber::EnvFilter;

mod cli;
mod prompt;
mod render;
mod session;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// The full error chain, red only when it lands on a terminal.
fn fatal_message(err: &anyhow::Error, styled: bool) -> String {
    let message = format!("{err:#}");
    if styled { message.red().to_string() } else { message }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cmd = cli::Cli::parse();
    match cmd.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", fatal_message(&err, io::stderr().is_terminal()));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_message_is_plain_when_redirected() {
        let err = anyhow::anyhow!("graphhopper request failed: status 500")
            .context("Error while getting locations from api");

        let plain = fatal_message(&err, false);
        assert_eq!(
            plain,
            "Error while getting locations from api: graphhopper request failed: status 500"
        );
        assert!(!plain.contains('\u{1b}'));
    }

    #[test]
    fn fatal_message_is_red_on_a_terminal() {
        let err = anyhow::anyhow!("boom");

        let styled = fatal_message(&err, true);
        // crossterm honors NO_COLOR even when asked to style.
        assert!(styled.contains('\u{1b}') || std::env::var_os("NO_COLOR").is_some());
        assert!(styled.contains("boom"));
    }
}
