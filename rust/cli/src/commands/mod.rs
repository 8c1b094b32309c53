//! Command handler modules for the `squares` CLI.
//!
//! Each command lives in its own module with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in by [`crate::run`]
//! - Errors propagated as [`CliError`](crate::CliError)

pub mod bench;
pub mod cfg;
pub mod play;
pub mod sim;

pub use bench::handle_bench_command;
pub use cfg::handle_cfg_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;
