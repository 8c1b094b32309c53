//! Bench command handler: how fast the policy places cards.

use std::io::Write;
use std::time::Instant;

use super::play::{play_game, resolve_settings};
use crate::cli::Mode;
use crate::error::CliError;
use crate::ui;

/// Plays `games` games from seeds `1..=games` and reports moves per second.
pub fn handle_bench_command(
    games: u32,
    mode: Option<Mode>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if games == 0 {
        ui::write_error(err, "games must be >= 1")?;
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }
    let settings = resolve_settings(mode, None, None, err)?;

    let start = Instant::now();
    let mut moves = 0usize;
    for seed in 1..=u64::from(games) {
        let played = play_game(&settings.mode, settings.rewards, seed, settings.budget)?;
        moves += played.placements.len();
    }
    let dur = start.elapsed();
    let per_sec = moves as f64 / dur.as_secs_f64().max(f64::EPSILON);
    writeln!(
        out,
        "Benchmark: {} games, {} moves in {:?} ({:.0} moves/sec)",
        games, moves, dur, per_sec
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bench_command_output_format() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_bench_command(2, Some(Mode::Probability), &mut out, &mut err).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Benchmark:"));
        assert!(output.contains("2 games, 50 moves"));
    }

    #[test]
    fn test_bench_rejects_zero_games() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let r = handle_bench_command(0, None, &mut out, &mut err);
        assert!(matches!(r, Err(CliError::InvalidInput(_))));
        assert!(String::from_utf8(err).unwrap().contains("games must be >= 1"));
    }
}
