//! Play command handler: one game, every placement printed.

use std::io::Write;
use std::time::Duration;

use squares_ai::create_policy;
use squares_ai::rewards::RewardVector;
use squares_engine::game::Game;
use squares_engine::grid::NUM_HANDS;
use squares_engine::logger::PlacementRecord;
use tracing::info;

use crate::cli::Mode;
use crate::config;
use crate::error::CliError;
use crate::ui;

/// A finished game and how each card got where it is.
#[derive(Debug)]
pub struct PlayedGame {
    pub game: Game,
    pub policy: String,
    pub placements: Vec<PlacementRecord>,
}

/// Deal a seeded game and let the named policy place all 25 cards.
pub fn play_game(
    mode: &str,
    rewards: RewardVector,
    seed: u64,
    budget: Duration,
) -> Result<PlayedGame, CliError> {
    let mut policy = create_policy(mode, rewards)?;
    let mut game = Game::new(seed);
    let mut placements = Vec::with_capacity(25);

    while !game.is_complete() {
        let turn = game.turn();
        let card = game.deal()?;
        let cell = policy.choose_play(card, budget)?;
        game.place(cell)?;
        placements.push(PlacementRecord {
            turn,
            card,
            cell,
            decision: policy.last_decision().map(|d| d.as_str().to_string()),
        });
    }

    Ok(PlayedGame {
        policy: policy.name().to_string(),
        game,
        placements,
    })
}

/// Resolved settings shared by the game-playing commands; flags win over
/// the configuration.
pub(crate) struct RunSettings {
    pub mode: String,
    pub rewards: RewardVector,
    pub budget: Duration,
    pub seed: Option<u64>,
}

pub(crate) fn resolve_settings(
    mode: Option<Mode>,
    seed: Option<u64>,
    budget_ms: Option<u64>,
    err: &mut dyn Write,
) -> Result<RunSettings, CliError> {
    let cfg = match config::load() {
        Ok(c) => c,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };
    let mode = mode.map_or(cfg.mode, |m| m.as_str().to_string());
    let budget_ms = budget_ms.unwrap_or(cfg.time_budget_ms);
    if budget_ms == 0 {
        ui::write_error(err, "budget must be >= 1 ms")?;
        return Err(CliError::InvalidInput("budget must be >= 1 ms".to_string()));
    }
    Ok(RunSettings {
        mode,
        rewards: cfg.rewards,
        budget: Duration::from_millis(budget_ms),
        seed: seed.or(cfg.seed),
    })
}

pub fn handle_play_command(
    seed: Option<u64>,
    mode: Option<Mode>,
    budget_ms: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let settings = resolve_settings(mode, seed, budget_ms, err)?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    info!(seed, mode = %settings.mode, "starting game");

    let played = play_game(&settings.mode, settings.rewards, seed, settings.budget)?;

    writeln!(out, "Seed: {}  Policy: {}", seed, played.policy)?;
    for p in &played.placements {
        writeln!(
            out,
            "Turn {:>2}: {} -> {} [{}]",
            p.turn + 1,
            p.card,
            p.cell,
            p.decision.as_deref().unwrap_or("-")
        )?;
    }
    writeln!(out)?;
    write!(out, "{}", played.game.grid())?;
    writeln!(out)?;

    let categories = played.game.categories();
    for (h, category) in categories.iter().enumerate().take(NUM_HANDS) {
        writeln!(out, "{}: {}", ui::hand_label(h), category.name())?;
    }
    Ok(())
}
