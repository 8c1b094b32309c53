//! # squares-ai: Placement Policies for Poker Squares
//!
//! Decides where each dealt card goes on the 5x5 grid. A probability
//! engine estimates, for every row and column hand, how likely each poker
//! category is by the time the hand fills up; the policy turns the change
//! in those reward-weighted estimates into a per-cell utility and plays.
//!
//! ## Core Components
//!
//! - [`PlacementPolicy`] - Trait every placement policy implements
//! - [`policy`] - [`ProbabilityPlayer`](policy::ProbabilityPlayer) and its turn logic
//! - [`probability`] - Probability engine and utility grid
//! - [`estimate`] - Exact completion counting for a single hand
//! - [`search`] - Seam for a bounded search over critical cells
//! - [`rewards`] - Per-category reward weights
//! - [`create_policy`] - Factory keyed by policy name
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use squares_ai::{create_policy, PlacementPolicy};
//! use squares_ai::rewards::RewardVector;
//! use squares_engine::game::Game;
//!
//! let mut policy = create_policy("search", RewardVector::trained()).unwrap();
//! let mut game = Game::new(42);
//! while !game.is_complete() {
//!     let card = game.deal().unwrap();
//!     let cell = policy.choose_play(card, Duration::from_millis(100)).unwrap();
//!     game.place(cell).unwrap();
//! }
//! assert_eq!(game.summary().total(), 10);
//! ```
//!
//! ## Policies
//!
//! - `"search"` - trained weights, critical cells handed to the search
//! - `"probability"` - caller-supplied weights, always the best cell

use std::time::Duration;

use squares_engine::cards::Card;
use squares_engine::errors::GameError;
use squares_engine::grid::Cell;
use thiserror::Error;

pub mod combinatorics;
pub mod estimate;
pub mod policy;
pub mod pool;
pub mod probability;
pub mod rewards;
pub mod search;

use policy::{Decision, PlayMode, ProbabilityPlayer};
use rewards::RewardVector;
use search::UtilityHintSearch;

/// Names accepted by [`create_policy`].
pub const POLICY_NAMES: [&str; 2] = ["search", "probability"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("unknown policy '{0}' (expected one of: search, probability)")]
    UnknownPolicy(String),
}

/// A stateful player for one game.
///
/// Each call receives the dealt card and must return an empty cell; the
/// policy records the placement in its own state before returning, so the
/// harness must place the card where it was told.
///
/// # Example Implementation
///
/// ```rust
/// use std::time::Duration;
/// use squares_ai::PlacementPolicy;
/// use squares_engine::cards::Card;
/// use squares_engine::errors::GameError;
/// use squares_engine::grid::Cell;
///
/// struct RowMajor(usize);
///
/// impl PlacementPolicy for RowMajor {
///     fn choose_play(&mut self, _card: Card, _remaining: Duration) -> Result<Cell, GameError> {
///         let cell = Cell::from_index(self.0).ok_or(GameError::GameComplete)?;
///         self.0 += 1;
///         Ok(cell)
///     }
///
///     fn name(&self) -> &str {
///         "row-major"
///     }
/// }
/// ```
pub trait PlacementPolicy: Send {
    /// Pick and record the cell for `card`. `remaining` is the time budget
    /// for this move.
    fn choose_play(&mut self, card: Card, remaining: Duration) -> Result<Cell, GameError>;

    /// Which branch produced the last play, for policies that report it.
    fn last_decision(&self) -> Option<Decision> {
        None
    }

    fn name(&self) -> &str;
}

/// Build a fresh policy by name.
///
/// `rewards` weights the probability-only policy; search-assisted play
/// always uses [`RewardVector::trained`].
///
/// ```rust
/// use squares_ai::{create_policy, PolicyError};
/// use squares_ai::rewards::RewardVector;
///
/// let p = create_policy("probability", RewardVector::baseline()).unwrap();
/// assert_eq!(p.name(), "probability");
/// assert!(matches!(
///     create_policy("mcts", RewardVector::trained()),
///     Err(PolicyError::UnknownPolicy(_))
/// ));
/// ```
pub fn create_policy(
    name: &str,
    rewards: RewardVector,
) -> Result<Box<dyn PlacementPolicy>, PolicyError> {
    let mode = match name {
        "search" => PlayMode::SearchAssisted(Box::new(UtilityHintSearch)),
        "probability" => PlayMode::ProbabilityOnly(rewards),
        other => return Err(PolicyError::UnknownPolicy(other.to_string())),
    };
    Ok(Box::new(ProbabilityPlayer::new(mode)))
}
