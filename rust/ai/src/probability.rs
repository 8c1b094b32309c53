//! Probability engine: per-hand category estimates and per-cell utility.

use std::fmt;

use squares_engine::cards::Card;
use squares_engine::errors::GameError;
use squares_engine::grid::{Cell, Line, NUM_CELLS, NUM_HANDS, SIZE};
use squares_engine::hand::HAND_SIZE;
use tracing::trace;

use crate::estimate::{estimate, weighted, CategoryVector, Reachability};
use crate::pool::UnseenPool;
use crate::rewards::{RewardVector, NUM_CATEGORIES};

type HandSlots = [Option<Card>; HAND_SIZE];

/// Utility of placing the dealt card in each cell.
///
/// Filled cells hold [`UtilityGrid::INELIGIBLE`] so they never win a
/// maximisation.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilityGrid {
    values: [f64; NUM_CELLS],
}

impl UtilityGrid {
    pub const INELIGIBLE: f64 = f64::NEG_INFINITY;

    pub fn get(&self, cell: Cell) -> f64 {
        self.values[cell.index()]
    }

    pub fn is_eligible(&self, cell: Cell) -> bool {
        self.get(cell) > Self::INELIGIBLE
    }

    /// Eligible cells in row-major order.
    pub fn eligible(&self) -> impl Iterator<Item = Cell> + '_ {
        Cell::all().filter(|&c| self.is_eligible(c))
    }

    /// Eligible cells whose utility is at least `threshold`, row-major.
    pub fn at_least(&self, threshold: f64) -> Vec<Cell> {
        self.eligible().filter(|&c| self.get(c) >= threshold).collect()
    }

    /// Highest-utility eligible cell; the first in row-major order wins ties.
    pub fn argmax(&self) -> Option<Cell> {
        let mut best: Option<(Cell, f64)> = None;
        for cell in self.eligible() {
            let u = self.get(cell);
            if best.is_none_or(|(_, b)| u > b) {
                best = Some((cell, u));
            }
        }
        best.map(|(c, _)| c)
    }
}

impl fmt::Display for UtilityGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.values.chunks(SIZE) {
            let cols: Vec<String> = row
                .iter()
                .map(|&u| {
                    if u == Self::INELIGIBLE {
                        format!("{:>9}", "--")
                    } else {
                        format!("{:>9.4}", u)
                    }
                })
                .collect();
            writeln!(f, "{}", cols.join(" "))?;
        }
        Ok(())
    }
}

/// Tracks the placed cards and unseen pool for one game and turns them into
/// per-cell utilities.
///
/// `baseline` holds the weighted vectors of the board as committed;
/// `preview` holds the vectors with the pending card tentatively added to
/// every open hand. A cell's utility is the summed preview-minus-baseline
/// gain of its row and column. Only [`commit_placement`] moves the baseline,
/// so repeated previews of the same card agree.
///
/// [`commit_placement`]: ProbabilityEngine::commit_placement
#[derive(Debug, Clone)]
pub struct ProbabilityEngine {
    rewards: RewardVector,
    hands: [HandSlots; NUM_HANDS],
    pool: UnseenPool,
    baseline: [CategoryVector; NUM_HANDS],
    preview: [CategoryVector; NUM_HANDS],
    reach: [Reachability; NUM_HANDS],
    turn: usize,
    last_grid: Option<UtilityGrid>,
}

impl ProbabilityEngine {
    pub fn new(rewards: RewardVector) -> Self {
        let mut engine = Self {
            rewards,
            hands: [[None; HAND_SIZE]; NUM_HANDS],
            pool: UnseenPool::new(),
            baseline: [[0.0; NUM_CATEGORIES]; NUM_HANDS],
            preview: [[0.0; NUM_CATEGORIES]; NUM_HANDS],
            reach: [Reachability::all(); NUM_HANDS],
            turn: 0,
            last_grid: None,
        };
        engine.recompute_baseline();
        engine
    }

    pub fn rewards(&self) -> &RewardVector {
        &self.rewards
    }

    /// Cards committed so far.
    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn pool(&self) -> &UnseenPool {
        &self.pool
    }

    /// Weighted category vector of hand `h` as committed.
    pub fn hand_probabilities(&self, h: usize) -> Option<&CategoryVector> {
        self.baseline.get(h)
    }

    /// Weighted category vector of hand `h` from the latest preview.
    pub fn preview_probabilities(&self, h: usize) -> Option<&CategoryVector> {
        self.preview.get(h)
    }

    pub fn reachability(&self, h: usize) -> Option<&Reachability> {
        self.reach.get(h)
    }

    /// Grid from the latest preview; survives the commit that follows it.
    pub fn last_grid(&self) -> Option<&UtilityGrid> {
        self.last_grid.as_ref()
    }

    pub fn is_filled(&self, cell: Cell) -> bool {
        self.hands[cell.row()][cell.col()].is_some()
    }

    /// Score every empty cell for `card` without committing it.
    pub fn refresh_probabilities(&mut self, card: Card) -> Result<UtilityGrid, GameError> {
        if !self.pool.contains(card) {
            return Err(GameError::CardAlreadyDrawn(card));
        }
        let pool = self.pool.without(card);
        let weights = *self.rewards.as_array();

        for h in 0..NUM_HANDS {
            let mut slots = self.hands[h];
            match slots.iter_mut().find(|s| s.is_none()) {
                Some(open) => *open = Some(card),
                None => {
                    self.preview[h] = self.baseline[h];
                    continue;
                }
            }
            let reach = Reachability::of(&slots);
            self.preview[h] = weighted(&estimate(&slots, &pool, &reach), &weights);
            self.reach[h] = reach;
        }

        let mut gains = [0.0; NUM_HANDS];
        for (h, gain) in gains.iter_mut().enumerate() {
            *gain = self.preview[h]
                .iter()
                .zip(&self.baseline[h])
                .map(|(p, b)| p - b)
                .sum();
        }

        let mut values = [UtilityGrid::INELIGIBLE; NUM_CELLS];
        for cell in Cell::all().filter(|&c| !self.is_filled(c)) {
            values[cell.index()] = cell.lines().iter().map(|l| gains[l.hand_index()]).sum();
        }
        let grid = UtilityGrid { values };
        trace!(card = %card, turn = self.turn, "utility grid\n{}", grid);
        self.last_grid = Some(grid.clone());
        Ok(grid)
    }

    /// Record `card` at `cell`, draw it from the pool and rebuild the
    /// baseline vectors of every hand.
    pub fn commit_placement(&mut self, card: Card, cell: Cell) -> Result<(), GameError> {
        if self.is_filled(cell) {
            return Err(GameError::CellOccupied(cell));
        }
        self.pool.remove(card)?;
        for line in cell.lines() {
            let slot = match line {
                Line::Row(_) => cell.col(),
                Line::Col(_) => cell.row(),
            };
            self.hands[line.hand_index()][slot] = Some(card);
        }
        self.turn += 1;
        self.recompute_baseline();
        Ok(())
    }

    fn recompute_baseline(&mut self) {
        let weights = *self.rewards.as_array();
        for h in 0..NUM_HANDS {
            let slots = self.hands[h];
            let reach = Reachability::of(&slots);
            self.baseline[h] = weighted(&estimate(&slots, &self.pool, &reach), &weights);
            self.reach[h] = reach;
        }
        self.preview = self.baseline;
    }
}
