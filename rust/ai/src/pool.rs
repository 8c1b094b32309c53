//! Counts of cards not yet drawn.

use squares_engine::cards::{Card, Rank, Suit, NUM_CARDS, NUM_RANKS, NUM_SUITS};
use squares_engine::errors::GameError;

/// The unseen pool: every card that has not been drawn this game.
///
/// Rank and suit totals are kept alongside a 52-bit membership mask so the
/// estimators can ask both "how many kings are left" and "is the king of
/// spades still out there". Both totals always sum to [`remaining`].
///
/// [`remaining`]: UnseenPool::remaining
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnseenPool {
    ranks: [u8; NUM_RANKS],
    suits: [u8; NUM_SUITS],
    unseen: u64,
}

impl Default for UnseenPool {
    fn default() -> Self {
        Self::new()
    }
}

impl UnseenPool {
    /// A full pool: four of each rank, thirteen of each suit.
    pub fn new() -> Self {
        Self {
            ranks: [NUM_SUITS as u8; NUM_RANKS],
            suits: [NUM_RANKS as u8; NUM_SUITS],
            unseen: (1u64 << NUM_CARDS) - 1,
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.unseen & (1u64 << card.index()) != 0
    }

    /// Mark `card` as drawn.
    pub fn remove(&mut self, card: Card) -> Result<(), GameError> {
        if !self.contains(card) {
            return Err(GameError::CardAlreadyDrawn(card));
        }
        self.unseen &= !(1u64 << card.index());
        self.ranks[card.rank.index()] -= 1;
        self.suits[card.suit.index()] -= 1;
        Ok(())
    }

    /// Copy of this pool with `card` drawn. A card that is already gone
    /// leaves the copy unchanged.
    pub fn without(&self, card: Card) -> Self {
        let mut next = self.clone();
        let _ = next.remove(card);
        next
    }

    pub fn rank(&self, rank: Rank) -> usize {
        self.ranks[rank.index()] as usize
    }

    pub fn suit(&self, suit: Suit) -> usize {
        self.suits[suit.index()] as usize
    }

    pub fn remaining(&self) -> usize {
        self.unseen.count_ones() as usize
    }

    pub fn drawn(&self) -> usize {
        NUM_CARDS - self.remaining()
    }
}
