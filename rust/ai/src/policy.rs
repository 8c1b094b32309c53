//! Turn-by-turn play selection on top of the probability engine.

use std::collections::BTreeSet;
use std::fmt;
use std::time::{Duration, Instant};

use squares_engine::cards::Card;
use squares_engine::errors::GameError;
use squares_engine::grid::{Cell, NUM_CELLS};
use tracing::{debug, warn};

use crate::probability::{ProbabilityEngine, UtilityGrid};
use crate::rewards::RewardVector;
use crate::search::PlaySearch;
use crate::PlacementPolicy;

/// Where the first card always goes.
pub const ANCHOR: (usize, usize) = (0, 0);
/// Utility at which a cell counts as critical.
pub const CRITICAL_THRESHOLD: f64 = 1.0;
/// Search is consulted only when there are fewer critical cells than this.
pub const MAX_SEARCH_CANDIDATES: usize = 18;

/// How the player turns utilities into a play.
#[derive(Debug)]
pub enum PlayMode {
    /// Trained weights; a short list of critical cells goes to the search.
    SearchAssisted(Box<dyn PlaySearch>),
    /// Caller-supplied weights; always plays the best cell.
    ProbabilityOnly(RewardVector),
}

/// Which branch of the turn logic picked the last cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Anchor,
    Terminal,
    FirstEmpty,
    Search,
    Greedy,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Anchor => "anchor",
            Decision::Terminal => "terminal",
            Decision::FirstEmpty => "first-empty",
            Decision::Search => "search",
            Decision::Greedy => "greedy",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plays one game: each call to [`choose_play`] picks a cell for the dealt
/// card and commits it to the engine.
///
/// Turn 0 goes to the anchor and the last turn to the only open cell,
/// neither computing utilities. Every other turn scores the board and
/// plays the best cell, or lets the search choose among the critical cells
/// when there are between 2 and 17 of them.
///
/// [`choose_play`]: ProbabilityPlayer::choose_play
#[derive(Debug)]
pub struct ProbabilityPlayer {
    engine: ProbabilityEngine,
    search: Option<Box<dyn PlaySearch>>,
    open: BTreeSet<usize>,
    last_decision: Option<Decision>,
}

impl ProbabilityPlayer {
    pub fn new(mode: PlayMode) -> Self {
        let (rewards, search) = match mode {
            PlayMode::SearchAssisted(s) => (RewardVector::trained(), Some(s)),
            PlayMode::ProbabilityOnly(r) => (r, None),
        };
        Self {
            engine: ProbabilityEngine::new(rewards),
            search,
            open: (0..NUM_CELLS).collect(),
            last_decision: None,
        }
    }

    pub fn engine(&self) -> &ProbabilityEngine {
        &self.engine
    }

    pub fn last_decision(&self) -> Option<Decision> {
        self.last_decision
    }

    pub fn is_search_assisted(&self) -> bool {
        self.search.is_some()
    }

    /// Pick a cell for `card`, commit it, and return it.
    ///
    /// `remaining` is the time left for this move; whatever is not spent
    /// scoring the board is handed to the search.
    pub fn choose_play(&mut self, card: Card, remaining: Duration) -> Result<Cell, GameError> {
        let first_open = self
            .open
            .first()
            .and_then(|&i| Cell::from_index(i))
            .ok_or(GameError::GameComplete)?;
        let turn = self.engine.turn();

        let (cell, decision) = if turn == 0 {
            (Cell::new(ANCHOR.0, ANCHOR.1)?, Decision::Anchor)
        } else if self.open.len() == 1 {
            (first_open, Decision::Terminal)
        } else {
            self.contested(card, remaining, first_open)?
        };

        self.engine.commit_placement(card, cell)?;
        self.open.remove(&cell.index());
        self.last_decision = Some(decision);
        debug!(turn, card = %card, cell = %cell, decision = %decision, "placed card");
        Ok(cell)
    }

    fn contested(
        &mut self,
        card: Card,
        remaining: Duration,
        first_open: Cell,
    ) -> Result<(Cell, Decision), GameError> {
        let started = Instant::now();
        let grid = self.engine.refresh_probabilities(card)?;

        let critical = grid.at_least(CRITICAL_THRESHOLD);
        if critical.is_empty() {
            debug!(card = %card, "no critical cells, playing first open cell");
            return Ok((first_open, Decision::FirstEmpty));
        }
        let max_cell = grid.argmax().unwrap_or(first_open);

        if let Some(search) = self.search.as_mut() {
            if critical.len() > 1 && critical.len() < MAX_SEARCH_CANDIDATES {
                let budget = remaining.saturating_sub(started.elapsed());
                debug!(
                    candidates = critical.len(),
                    ?budget,
                    search = search.name(),
                    "delegating to search"
                );
                return Ok(match search.choose_play(card, budget, &critical, &grid) {
                    Some(cell) if critical.contains(&cell) => (cell, Decision::Search),
                    other => {
                        warn!(?other, fallback = %max_cell, "search gave no usable candidate");
                        (max_cell, Decision::Greedy)
                    }
                });
            }
        }
        Ok((max_cell, Decision::Greedy))
    }

    /// Utility grid from the most recent contested turn, if any.
    pub fn last_grid(&self) -> Option<&UtilityGrid> {
        self.engine.last_grid()
    }
}

impl PlacementPolicy for ProbabilityPlayer {
    fn choose_play(&mut self, card: Card, remaining: Duration) -> Result<Cell, GameError> {
        ProbabilityPlayer::choose_play(self, card, remaining)
    }

    fn last_decision(&self) -> Option<Decision> {
        self.last_decision
    }

    fn name(&self) -> &str {
        if self.search.is_some() {
            "probability-search"
        } else {
            "probability"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::UtilityHintSearch;
    use std::sync::{Arc, Mutex};

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn cell(r: usize, c: usize) -> Cell {
        Cell::new(r, c).unwrap()
    }

    const BUDGET: Duration = Duration::from_millis(500);

    /// Records every call and answers with a fixed choice.
    #[derive(Debug)]
    struct Scripted {
        calls: Arc<Mutex<Vec<Vec<Cell>>>>,
        answer: Option<Cell>,
    }

    impl PlaySearch for Scripted {
        fn choose_play(
            &mut self,
            _card: Card,
            budget: Duration,
            candidates: &[Cell],
            utility: &UtilityGrid,
        ) -> Option<Cell> {
            assert!(budget <= BUDGET);
            assert!(candidates.iter().all(|&c| utility.is_eligible(c)));
            self.calls.lock().unwrap().push(candidates.to_vec());
            self.answer.or(candidates.last().copied())
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn first_card_goes_to_anchor() {
        let mut player =
            ProbabilityPlayer::new(PlayMode::SearchAssisted(Box::new(UtilityHintSearch)));
        let played = player.choose_play(card("TD"), BUDGET).unwrap();
        assert_eq!(played, cell(0, 0));
        assert_eq!(player.last_decision(), Some(Decision::Anchor));
        assert!(player.last_grid().is_none());
        assert_eq!(player.engine().turn(), 1);
    }

    #[test]
    fn fallback_when_nothing_is_critical() {
        // tiny weights keep every utility below the threshold
        let rewards = RewardVector::new([1e-6; 9]).unwrap();
        let mut player = ProbabilityPlayer::new(PlayMode::ProbabilityOnly(rewards));
        player.choose_play(card("TD"), BUDGET).unwrap();
        let played = player.choose_play(card("3C"), BUDGET).unwrap();
        assert_eq!(played, cell(0, 1));
        assert_eq!(player.last_decision(), Some(Decision::FirstEmpty));
    }

    #[test]
    fn search_sees_only_critical_cells() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let search = Scripted {
            calls: calls.clone(),
            answer: None,
        };
        let mut player = ProbabilityPlayer::new(PlayMode::SearchAssisted(Box::new(search)));
        let deal = ["TD", "TS", "TH", "JD", "QD", "KD", "9C", "2H"];
        for s in deal {
            let played = player.choose_play(card(s), BUDGET).unwrap();
            let calls = calls.lock().unwrap();
            if player.last_decision() == Some(Decision::Search) {
                let candidates = calls.last().unwrap();
                assert!(candidates.len() > 1 && candidates.len() < MAX_SEARCH_CANDIDATES);
                assert_eq!(Some(&played), candidates.last());
            }
        }
        for candidates in calls.lock().unwrap().iter() {
            assert!(candidates.windows(2).all(|w| w[0].index() < w[1].index()));
        }
    }

    #[test]
    fn non_candidate_answer_falls_back_to_max_cell() {
        let search = Scripted {
            calls: Arc::new(Mutex::new(Vec::new())),
            answer: Some(cell(0, 0)),
        };
        let mut player = ProbabilityPlayer::new(PlayMode::SearchAssisted(Box::new(search)));
        player.choose_play(card("TD"), BUDGET).unwrap();
        for s in ["TS", "TH", "9D", "JD"] {
            let played = player.choose_play(card(s), BUDGET).unwrap();
            assert_ne!(played, cell(0, 0));
            assert_ne!(player.last_decision(), Some(Decision::Search));
        }
    }

    #[test]
    fn names_follow_mode() {
        let p = ProbabilityPlayer::new(PlayMode::ProbabilityOnly(RewardVector::baseline()));
        assert_eq!(PlacementPolicy::name(&p), "probability");
        assert!(!p.is_search_assisted());
        let s = ProbabilityPlayer::new(PlayMode::SearchAssisted(Box::new(UtilityHintSearch)));
        assert_eq!(PlacementPolicy::name(&s), "probability-search");
    }
}
