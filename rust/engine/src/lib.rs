//! # squares-engine: Poker Squares Game Core
//!
//! Game model for the 5x5 card-placement game: each of 25 dealt cards is
//! placed immediately into an empty cell, forming ten five-card poker hands
//! (five rows and five columns).
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`grid`] - Cells, row/column hands and the placement grid
//! - [`hand`] - Hand category classification on partial or full hands
//! - [`game`] - Turn-based harness that deals and places cards
//! - [`logger`] - GameRecord serialization to JSONL
//! - [`errors`] - Error types for protocol violations
//!
//! ## Quick Start
//!
//! ```rust
//! use squares_engine::cards::Card;
//! use squares_engine::hand::{classify, HandCategory};
//!
//! let hand: Vec<Option<Card>> = ["TH", "JH", "QH", "KH", "AH"]
//!     .iter()
//!     .map(|s| s.parse().ok())
//!     .collect();
//! assert_eq!(classify(&hand), HandCategory::RoyalFlush);
//! ```
//!
//! ## Deterministic Games
//!
//! ```rust
//! use squares_engine::game::Game;
//!
//! let mut a = Game::new(42);
//! let mut b = Game::new(42);
//! assert_eq!(a.deal().unwrap(), b.deal().unwrap());
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod grid;
pub mod hand;
pub mod logger;
