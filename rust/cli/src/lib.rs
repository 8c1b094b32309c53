//! # squares CLI Library
//!
//! Command-line front end for the Poker Squares placement engine: play a
//! single game, simulate many, time the policy, or inspect configuration.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments and dispatches to a subcommand, writing to the
//! streams it is given so tests can capture output.
//!
//! ## Example Usage
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = squares_cli::run(["squares", "play", "--seed", "7"], &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Turn  1:"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play one game and print each placement
//! - `sim`: Play many games, optionally recording them as JSONL
//! - `bench`: Time placement decisions
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{Commands, SquaresCli};
use commands::{
    handle_bench_command, handle_cfg_command, handle_play_command, handle_sim_command,
};

pub use commands::play::{PlayedGame, play_game};
pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "bench", "cfg"];

/// Parse `args` and run the selected command.
///
/// Returns [`exit_code::SUCCESS`] or [`exit_code::ERROR`]; help and
/// version output go to `out` and count as success.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match SquaresCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Play {
            seed,
            mode,
            budget_ms,
        } => handle_play_command(seed, mode, budget_ms, out, err),
        Commands::Sim {
            games,
            seed,
            mode,
            output,
        } => handle_sim_command(games, seed, mode, output, out, err),
        Commands::Bench { games, mode } => handle_bench_command(games, mode, out, err),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        // already reported by the handler
        Err(CliError::Config(_)) => exit_code::ERROR,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let mut usage = || -> std::io::Result<()> {
        writeln!(err, "{}", e)?;
        writeln!(err)?;
        writeln!(err, "Poker Squares CLI")?;
        writeln!(err, "Usage: squares <command> [options]\n")?;
        writeln!(err, "Commands:")?;
        for c in COMMANDS {
            writeln!(err, "  {}", c)?;
        }
        writeln!(err, "\nFor full help, run: squares --help")
    };
    let _ = usage();
    exit_code::ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        SquaresCli::command().debug_assert();
    }

    #[test]
    fn test_command_list_matches_subcommands() {
        let names: Vec<String> = SquaresCli::command()
            .get_subcommands()
            .map(|c| c.get_name().to_string())
            .collect();
        assert_eq!(names, COMMANDS);
    }

    #[test]
    fn test_mode_is_validated_by_clap() {
        assert!(SquaresCli::try_parse_from(["squares", "play", "--mode", "mcts"]).is_err());
        assert!(SquaresCli::try_parse_from(["squares", "play", "--mode", "probability"]).is_ok());
    }

    #[test]
    fn test_unknown_command_prints_usage() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["squares", "deal"], &mut out, &mut err);
        assert_eq!(code, exit_code::ERROR);
        let stderr = String::from_utf8(err).unwrap();
        assert!(stderr.contains("Usage: squares <command>"));
        assert!(stderr.contains("  sim"));
    }

    #[test]
    fn test_help_goes_to_stdout() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        assert_eq!(run(["squares", "--help"], &mut out, &mut err), exit_code::SUCCESS);
        assert!(String::from_utf8(out).unwrap().contains("play"));
    }
}
