//! Seam for a time-bounded search over a short list of candidate cells.

use std::fmt::Debug;
use std::time::Duration;

use squares_engine::cards::Card;
use squares_engine::grid::Cell;

use crate::probability::UtilityGrid;

/// A search routine the policy delegates to when a handful of cells are
/// worth comparing more carefully.
///
/// Implementations must return one of `candidates` and should stay within
/// `budget`. Returning `None` or a cell outside `candidates` makes the
/// caller fall back to the highest-utility cell.
pub trait PlaySearch: Send + Debug {
    fn choose_play(
        &mut self,
        card: Card,
        budget: Duration,
        candidates: &[Cell],
        utility: &UtilityGrid,
    ) -> Option<Cell>;

    fn name(&self) -> &str;
}

/// Picks the candidate with the best utility hint, first in row-major
/// order on ties. Does not use its budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtilityHintSearch;

impl PlaySearch for UtilityHintSearch {
    fn choose_play(
        &mut self,
        _card: Card,
        _budget: Duration,
        candidates: &[Cell],
        utility: &UtilityGrid,
    ) -> Option<Cell> {
        let mut best: Option<(Cell, f64)> = None;
        for &cell in candidates {
            let u = utility.get(cell);
            if best.is_none_or(|(_, b)| u > b) {
                best = Some((cell, u));
            }
        }
        best.map(|(c, _)| c)
    }

    fn name(&self) -> &str {
        "utility-hint"
    }
}
