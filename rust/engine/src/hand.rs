use serde::{Deserialize, Serialize};

use crate::cards::{Card, NUM_RANKS, NUM_SUITS};

/// Number of cards in a completed hand.
pub const HAND_SIZE: usize = 5;

/// Poker hand categories in ascending order of strength.
///
/// `id()` matches the classifier's numeric contract: 0 is "high card / no
/// category yet", 1..=9 are the completed categories.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandCategory {
    /// The nine categories above high card, weakest first.
    pub const ALL_SCORING: [HandCategory; 9] = [
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
        HandCategory::RoyalFlush,
    ];

    pub fn id(self) -> usize {
        self as usize
    }

    pub fn from_id(id: usize) -> Option<HandCategory> {
        match id {
            0 => Some(HandCategory::HighCard),
            _ => Self::ALL_SCORING.get(id - 1).copied(),
        }
    }

    /// Position in a nine-entry per-category vector; `None` for high card.
    pub fn reward_index(self) -> Option<usize> {
        self.id().checked_sub(1)
    }

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "high card",
            HandCategory::OnePair => "one pair",
            HandCategory::TwoPair => "two pair",
            HandCategory::ThreeOfAKind => "three of a kind",
            HandCategory::Straight => "straight",
            HandCategory::Flush => "flush",
            HandCategory::FullHouse => "full house",
            HandCategory::FourOfAKind => "four of a kind",
            HandCategory::StraightFlush => "straight flush",
            HandCategory::RoyalFlush => "royal flush",
        }
    }
}

/// Classify up to five slots into a [`HandCategory`].
///
/// Pairs, two pair, trips, full houses and quads are recognised on partial
/// hands. Straights and flushes need all five cards.
///
/// # Examples
///
/// ```
/// use squares_engine::cards::Card;
/// use squares_engine::hand::{classify, HandCategory};
///
/// let slots: Vec<Option<Card>> = ["AS", "AH", "KD"]
///     .iter()
///     .map(|s| Some(s.parse().unwrap()))
///     .chain([None, None])
///     .collect();
/// assert_eq!(classify(&slots), HandCategory::OnePair);
/// ```
pub fn classify(slots: &[Option<Card>]) -> HandCategory {
    let mut rank_counts = [0u8; NUM_RANKS];
    let mut suit_counts = [0u8; NUM_SUITS];
    let mut rank_mask: u16 = 0;
    let mut n = 0usize;
    for c in slots.iter().flatten() {
        rank_counts[c.rank.index()] += 1;
        suit_counts[c.suit.index()] += 1;
        rank_mask |= 1 << c.rank.index();
        n += 1;
    }

    if n == HAND_SIZE {
        let flush = suit_counts.iter().any(|&c| c as usize == HAND_SIZE);
        let distinct = rank_mask.count_ones() as usize == HAND_SIZE;
        if distinct {
            if let Some(royal) = straight_kind(rank_mask) {
                return match (flush, royal) {
                    (true, true) => HandCategory::RoyalFlush,
                    (true, false) => HandCategory::StraightFlush,
                    _ => HandCategory::Straight,
                };
            }
        }
        if flush {
            return HandCategory::Flush;
        }
    }

    let (quads, trips, pairs) = classify_multiples(&rank_counts);
    if quads > 0 {
        HandCategory::FourOfAKind
    } else if trips > 0 && pairs > 0 {
        HandCategory::FullHouse
    } else if trips > 0 {
        HandCategory::ThreeOfAKind
    } else if pairs >= 2 {
        HandCategory::TwoPair
    } else if pairs == 1 {
        HandCategory::OnePair
    } else {
        HandCategory::HighCard
    }
}

/// Rank masks of the ten straights; the last one is the royal T-J-Q-K-A.
pub fn straight_windows() -> [u16; 10] {
    let mut windows = [0u16; 10];
    for (low, w) in windows.iter_mut().enumerate().take(9) {
        *w = 0b1_1111 << low;
    }
    // T J Q K plus the ace at bit 0
    windows[9] = (0b1111 << 9) | 1;
    windows
}

pub const ROYAL_WINDOW: usize = 9;

// Some(true) for the royal straight, Some(false) for any other straight.
fn straight_kind(rank_mask: u16) -> Option<bool> {
    straight_windows()
        .iter()
        .position(|&w| w == rank_mask)
        .map(|i| i == ROYAL_WINDOW)
}

fn classify_multiples(rank_counts: &[u8; NUM_RANKS]) -> (usize, usize, usize) {
    let mut quads = 0;
    let mut trips = 0;
    let mut pairs = 0;
    for &c in rank_counts {
        match c {
            4 => quads += 1,
            3 => trips += 1,
            2 => pairs += 1,
            _ => {}
        }
    }
    (quads, trips, pairs)
}
