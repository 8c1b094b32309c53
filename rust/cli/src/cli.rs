//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "squares", version, about = "Poker Squares placement engine")]
pub struct SquaresCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play one game and print every placement
    Play {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum)]
        mode: Option<Mode>,
        /// Time budget per move in milliseconds
        #[arg(long)]
        budget_ms: Option<u64>,
    },
    /// Play many games and report the category histogram
    Sim {
        #[arg(long, default_value_t = 100)]
        games: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum)]
        mode: Option<Mode>,
        /// Append one JSON record per game to this file
        #[arg(long)]
        output: Option<String>,
    },
    /// Time placement decisions
    Bench {
        #[arg(long, default_value_t = 20)]
        games: u32,
        #[arg(long, value_enum)]
        mode: Option<Mode>,
    },
    /// Show the resolved configuration
    Cfg,
}

/// Placement policy selected on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Trained weights with search over critical cells
    Search,
    /// Configured reward weights, best cell only
    Probability,
}

impl Mode {
    /// Name understood by `squares_ai::create_policy`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use squares_cli::cli::Mode;
    /// assert_eq!(Mode::Search.as_str(), "search");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Search => "search",
            Mode::Probability => "probability",
        }
    }
}
