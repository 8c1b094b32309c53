use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of cards in a standard deck.
pub const NUM_CARDS: usize = 52;
/// Number of distinct ranks.
pub const NUM_RANKS: usize = 13;
/// Number of distinct suits.
pub const NUM_SUITS: usize = 4;

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Suit> {
        all_suits().get(i).copied()
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

/// Represents the rank (face value) of a playing card.
///
/// The ace sits at index 0 so that ranks line up with the usual
/// `A23456789TJQK` ordering of the game: the ace plays low in A-2-3-4-5 and
/// high in T-J-Q-K-A.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace (0)
    Ace = 0,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10 (9)
    Ten,
    /// Jack (10)
    Jack,
    /// Queen (11)
    Queen,
    /// King (12)
    King,
}

impl Rank {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Rank> {
        all_ranks().get(i).copied()
    }

    pub fn symbol(self) -> char {
        b"A23456789TJQK"[self.index()] as char
    }
}

/// Represents a single playing card with a suit and rank.
/// Every card is dealt at most once per game, so cards double as unique ids.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The rank of the card (Ace through King)
    pub rank: Rank,
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Dense index in `[0, 52)`: `suit * 13 + rank`.
    pub fn index(self) -> usize {
        self.suit.index() * NUM_RANKS + self.rank.index()
    }

    pub fn from_index(i: usize) -> Option<Card> {
        if i >= NUM_CARDS {
            return None;
        }
        let rank = Rank::from_index(i % NUM_RANKS)?;
        let suit = Suit::from_index(i / NUM_RANKS)?;
        Some(Card { rank, suit })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardParseError {
    #[error("card text must be two characters, got {0:?}")]
    Length(String),
    #[error("unknown rank {0:?}")]
    Rank(char),
    #[error("unknown suit {0:?}")]
    Suit(char),
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        let &[r, su] = chars.as_slice() else {
            return Err(CardParseError::Length(s.to_string()));
        };
        let r = r.to_ascii_uppercase();
        let rank = all_ranks()
            .into_iter()
            .find(|rank| rank.symbol() == r)
            .ok_or(CardParseError::Rank(r))?;
        let su = su.to_ascii_uppercase();
        let suit = all_suits()
            .into_iter()
            .find(|suit| suit.symbol() == su)
            .ok_or(CardParseError::Suit(su))?;
        Ok(Card { rank, suit })
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

/// All 52 cards ordered by [`Card::index`].
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(NUM_CARDS);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { rank: r, suit: s });
        }
    }
    v
}
