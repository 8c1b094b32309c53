//! Simulation command handler: many games, one category histogram.
//!
//! Game `i` is dealt from seed `base + i`, so a run is reproducible from
//! its base seed. With `--output`, every game is appended to a JSONL file
//! as a [`GameRecord`].

use std::collections::BTreeMap;
use std::io::Write;
use std::time::Instant;

use squares_engine::game::CategoryHistogram;
use squares_engine::logger::{GameLogger, GameRecord};
use tracing::info;

use super::play::{play_game, resolve_settings};
use crate::cli::Mode;
use crate::error::CliError;
use crate::ui;

pub fn handle_sim_command(
    games: u32,
    seed: Option<u64>,
    mode: Option<Mode>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if games == 0 {
        ui::write_error(err, "games must be >= 1")?;
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }
    let settings = resolve_settings(mode, seed, None, err)?;
    let base_seed = settings.seed.unwrap_or_else(rand::random);

    if let Some(path) = output.as_deref()
        && std::path::Path::new(path).exists()
    {
        ui::display_warning(err, &format!("appending to existing file {}", path))?;
    }
    let mut logger = match output.as_deref().map(GameLogger::create).transpose() {
        Ok(l) => l,
        Err(e) => {
            ui::write_error(err, &format!("Failed to open output file: {}", e))?;
            return Err(CliError::Io(e));
        }
    };

    let start = Instant::now();
    let mut hist = CategoryHistogram::default();
    let mut decisions: BTreeMap<String, u32> = BTreeMap::new();
    let mut policy_name = String::new();

    for i in 0..games {
        let game_seed = base_seed.wrapping_add(u64::from(i));
        let played = play_game(&settings.mode, settings.rewards, game_seed, settings.budget)?;
        hist.merge(&played.game.summary());
        for p in &played.placements {
            if let Some(d) = &p.decision {
                *decisions.entry(d.clone()).or_default() += 1;
            }
        }

        if let Some(logger) = logger.as_mut() {
            let record = GameRecord {
                game_id: logger.next_id(),
                seed: game_seed,
                policy: played.policy.clone(),
                categories: played.game.categories(),
                placements: played.placements,
                ts: None,
                meta: Some(serde_json::json!({ "base_seed": base_seed })),
            };
            logger.write(&record)?;
        }
        policy_name = played.policy;
    }
    let elapsed = start.elapsed();
    info!(games, ?elapsed, "simulation finished");

    writeln!(
        out,
        "Simulated: {} games (policy {}, base seed {})",
        games, policy_name, base_seed
    )?;
    writeln!(out, "Hands by category:")?;
    ui::write_histogram(out, &hist)?;
    let summary: Vec<String> = decisions
        .iter()
        .map(|(d, n)| format!("{}={}", d, n))
        .collect();
    writeln!(out, "Decisions: {}", summary.join(" "))?;
    writeln!(out, "Elapsed: {:.2?}", elapsed)?;
    if let Some(path) = &output {
        writeln!(out, "Records: {}", path)?;
    }
    Ok(())
}
