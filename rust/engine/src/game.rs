use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::grid::{Cell, Grid, NUM_HANDS};
use crate::hand::HandCategory;

/// Turn-based harness: deals one card at a time and enforces that each card
/// is placed into an empty cell before the next one is dealt.
///
/// # Examples
///
/// ```
/// use squares_engine::game::Game;
///
/// let mut game = Game::new(7);
/// while !game.is_complete() {
///     let _card = game.deal().unwrap();
///     let cell = game.grid().empty_cells()[0];
///     game.place(cell).unwrap();
/// }
/// assert_eq!(game.placements().len(), 25);
/// ```
#[derive(Debug)]
pub struct Game {
    seed: u64,
    deck: Deck,
    grid: Grid,
    pending: Option<Card>,
    placements: Vec<(Card, Cell)>,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        Self {
            seed,
            deck,
            grid: Grid::new(),
            pending: None,
            placements: Vec::with_capacity(25),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of cards placed so far; also the index of the current turn.
    pub fn turn(&self) -> usize {
        self.placements.len()
    }

    pub fn pending(&self) -> Option<Card> {
        self.pending
    }

    pub fn placements(&self) -> &[(Card, Cell)] {
        &self.placements
    }

    pub fn deal(&mut self) -> Result<Card, GameError> {
        if self.is_complete() {
            return Err(GameError::GameComplete);
        }
        if let Some(c) = self.pending {
            return Err(GameError::CardAlreadyDealt(c));
        }
        let card = self.deck.deal_card().ok_or(GameError::DeckExhausted)?;
        self.pending = Some(card);
        Ok(card)
    }

    pub fn place(&mut self, cell: Cell) -> Result<(), GameError> {
        let card = self.pending.ok_or(GameError::NoCardDealt)?;
        self.grid.place(cell, card)?;
        self.pending = None;
        self.placements.push((card, cell));
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.grid.is_full()
    }

    pub fn categories(&self) -> [HandCategory; NUM_HANDS] {
        self.grid.categories()
    }

    pub fn summary(&self) -> CategoryHistogram {
        CategoryHistogram::from_categories(&self.categories())
    }
}

/// Count of hands per category, indexed by [`HandCategory::id`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryHistogram {
    pub counts: [u32; 10],
}

impl CategoryHistogram {
    pub fn from_categories(categories: &[HandCategory]) -> Self {
        let mut h = Self::default();
        for c in categories {
            h.counts[c.id()] += 1;
        }
        h
    }

    pub fn merge(&mut self, other: &CategoryHistogram) {
        for (a, b) in self.counts.iter_mut().zip(other.counts) {
            *a += b;
        }
    }

    pub fn count(&self, category: HandCategory) -> u32 {
        self.counts[category.id()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_without_deal_is_rejected() {
        let mut game = Game::new(1);
        let cell = Cell::new(0, 0).unwrap();
        assert_eq!(game.place(cell), Err(GameError::NoCardDealt));
    }

    #[test]
    fn second_deal_before_place_is_rejected() {
        let mut game = Game::new(1);
        let card = game.deal().unwrap();
        assert_eq!(game.deal(), Err(GameError::CardAlreadyDealt(card)));
    }

    #[test]
    fn occupied_cell_keeps_card_pending() {
        let mut game = Game::new(3);
        let cell = Cell::new(1, 1).unwrap();
        game.deal().unwrap();
        game.place(cell).unwrap();
        let second = game.deal().unwrap();
        assert_eq!(game.place(cell), Err(GameError::CellOccupied(cell)));
        assert_eq!(game.pending(), Some(second));
    }

    #[test]
    fn histogram_counts_ten_hands() {
        let mut game = Game::new(11);
        while !game.is_complete() {
            game.deal().unwrap();
            let cell = game.grid().empty_cells()[0];
            game.place(cell).unwrap();
        }
        assert_eq!(game.summary().total(), 10);
        assert_eq!(game.deal(), Err(GameError::GameComplete));
    }
}
