//! Error types for the crapshoot engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong at the table.
///
/// A failed operation never leaves partial mutation behind: a rejected
/// `place_bet` has not touched the ledger, a rejected `roll` has not touched
/// phase or balance.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid bet amount: wager must be positive")]
    InvalidAmount,

    #[error("Insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("Unknown bet type: {0}")]
    InvalidBetType(String),

    #[error("Round already resolved: start a new round to keep playing")]
    RoundAlreadyResolved,

    #[error("No active bets on the table")]
    NoActiveBets,

    #[error("Round still in progress")]
    RoundInProgress,

    #[error("Invalid die value: {0}, must be 1-6")]
    InvalidDie(u8),

    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
