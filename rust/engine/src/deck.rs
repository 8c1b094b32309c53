use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// The dealing source for one game. The same seed always yields the same
/// deal order, so a game can be replayed from its seed alone.
#[derive(Debug)]
pub struct Deck {
    order: Vec<Card>,
    dealt: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Unshuffled (index order) until [`Deck::shuffle`] is called.
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            order: full_deck(),
            dealt: 0,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Restore all 52 cards and permute them with the deck's RNG.
    pub fn shuffle(&mut self) {
        let mut order = full_deck();
        order.shuffle(&mut self.rng);
        self.order = order;
        self.dealt = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let card = *self.order.get(self.dealt)?;
        self.dealt += 1;
        Some(card)
    }

    pub fn remaining(&self) -> usize {
        self.order.len() - self.dealt
    }
}
