use thiserror::Error;

use crate::cards::Card;
use crate::grid::Cell;

/// Precondition violations of the one-card-per-turn protocol.
///
/// These indicate a harness bug rather than a recoverable state, so callers
/// abort the turn when they see one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("cell ({row}, {col}) is outside the 5x5 grid")]
    CellOutOfRange { row: usize, col: usize },
    #[error("cell {0} is already filled")]
    CellOccupied(Cell),
    #[error("card {0} has already been drawn")]
    CardAlreadyDrawn(Card),
    #[error("no card has been dealt for this turn")]
    NoCardDealt,
    #[error("card {0} is still waiting to be placed")]
    CardAlreadyDealt(Card),
    #[error("game already complete")]
    GameComplete,
    #[error("deck exhausted")]
    DeckExhausted,
}
