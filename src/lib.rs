//! Crapshoot - single-player craps against the house.
//!
//! The crate is the betting/resolution engine for a craps table: a round
//! state machine driven by dice rolls plus a closed set of bet variants,
//! each with its own payout and carry-over rule. Presentation layers (the
//! bundled console binary, or anything else) collect bets and render
//! outcomes; every rule lives here.
//!
//! - `dice`: the two-die roll value and the roller with its injectable RNG
//! - `bets`: bet variants and their per-roll resolution rules
//! - `ledger`: the player's chip balance
//! - `round`: the phase machine and the per-roll payout resolution pass
//! - `table`: the session facade tying ledger, round, and dice together

pub mod bets;
pub mod dice;
pub mod error;
pub mod ledger;
pub mod round;
pub mod table;

pub use bets::{Bet, BetId, BetType, Resolution};
pub use dice::{DiceRoll, DiceRoller};
pub use error::{Error, Result};
pub use ledger::ChipLedger;
pub use round::{Phase, Round, RoundOutcome, Settlement};
pub use table::CrapsTable;
