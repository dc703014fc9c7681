//! The table session: one player, one chip ledger, successive rounds.

use rand::rngs::StdRng;
use rand::RngCore;
use tracing::{debug, info};

use crate::bets::{BetId, BetType};
use crate::dice::{DiceRoll, DiceRoller};
use crate::error::{Error, Result};
use crate::ledger::ChipLedger;
use crate::round::{Phase, Round, RoundOutcome};

/// A craps table for a single player against the house.
///
/// Owns the ledger, the current round, and the dice. Presentation layers
/// call `place_bet` and `roll` and render the returned outcomes; no rule
/// logic lives outside this crate.
pub struct CrapsTable<R: RngCore = StdRng> {
    ledger: ChipLedger,
    round: Round,
    roller: DiceRoller<R>,
}

impl CrapsTable<StdRng> {
    /// Open a table with dice drawn from OS entropy.
    pub fn new(starting_chips: u64) -> Self {
        Self::with_roller(starting_chips, DiceRoller::from_entropy())
    }

    /// Open a table with seeded dice, for reproducible sessions.
    pub fn seeded(starting_chips: u64, seed: u64) -> Self {
        Self::with_roller(starting_chips, DiceRoller::from_seed(seed))
    }
}

impl<R: RngCore> CrapsTable<R> {
    /// Open a table with a caller-supplied roller.
    pub fn with_roller(starting_chips: u64, roller: DiceRoller<R>) -> Self {
        Self {
            ledger: ChipLedger::new(starting_chips),
            round: Round::new(),
            roller,
        }
    }

    /// Place a wager on the current round. Valid in any phase except
    /// `Resolved`; the ledger is debited only once every check has passed.
    pub fn place_bet(&mut self, bet_type: BetType, amount: u64) -> Result<BetId> {
        if self.round.is_resolved() {
            return Err(Error::RoundAlreadyResolved);
        }
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }
        self.ledger.debit(amount)?;
        let id = self.round.add_bet(bet_type, amount)?;
        debug!(bet = %id, %bet_type, amount, balance = self.ledger.balance(), "bet placed");
        Ok(id)
    }

    /// Throw the dice and resolve every active bet.
    ///
    /// With no bets on the table this is a no-op success: no dice are
    /// consumed, nothing mutates, and the settlement list comes back empty.
    pub fn roll(&mut self) -> Result<RoundOutcome> {
        if self.round.is_resolved() {
            return Err(Error::RoundAlreadyResolved);
        }
        if self.round.active_bets().is_empty() {
            return Ok(RoundOutcome {
                roll: None,
                phase: self.round.phase(),
                settlements: Vec::new(),
            });
        }
        let roll = self.roller.roll();
        self.apply_roll(roll)
    }

    /// Resolve every active bet against a specific roll.
    ///
    /// This is the seam `roll` feeds; callers with an external dice source
    /// (or a test with a scripted sequence) drive it directly.
    pub fn apply_roll(&mut self, roll: DiceRoll) -> Result<RoundOutcome> {
        if self.round.is_resolved() {
            return Err(Error::RoundAlreadyResolved);
        }
        if self.round.active_bets().is_empty() {
            return Ok(RoundOutcome {
                roll: None,
                phase: self.round.phase(),
                settlements: Vec::new(),
            });
        }

        let settlements = self.round.process_roll(roll)?;
        for settlement in &settlements {
            let chip_return = settlement.chip_return();
            if chip_return > 0 {
                self.ledger.credit(chip_return as i64)?;
            }
        }

        if self.round.is_resolved() {
            info!(balance = self.ledger.balance(), "round resolved");
        }

        Ok(RoundOutcome {
            roll: Some(roll),
            phase: self.round.phase(),
            settlements,
        })
    }

    /// Begin the next betting round once the current one has resolved. The
    /// ledger carries over; the round state resets.
    pub fn new_round(&mut self) -> Result<()> {
        if !self.round.is_resolved() {
            return Err(Error::RoundInProgress);
        }
        self.round = Round::new();
        Ok(())
    }

    /// Current chip count.
    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    /// Whether the current round has ended.
    pub fn is_resolved(&self) -> bool {
        self.round.is_resolved()
    }

    pub fn phase(&self) -> Phase {
        self.round.phase()
    }

    /// The established point, if any.
    pub fn point(&self) -> Option<u8> {
        self.round.point()
    }

    /// Read-only view of the current round.
    pub fn round(&self) -> &Round {
        &self.round
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(d1: u8, d2: u8) -> DiceRoll {
        DiceRoll::new(d1, d2).unwrap()
    }

    #[test]
    fn test_place_bet_debits_ledger() {
        let mut table = CrapsTable::new(100);
        table.place_bet(BetType::PassLine, 10).unwrap();
        assert_eq!(table.balance(), 90);
    }

    #[test]
    fn test_place_bet_rejects_zero_wager() {
        let mut table = CrapsTable::new(100);
        assert!(matches!(
            table.place_bet(BetType::Field, 0),
            Err(Error::InvalidAmount)
        ));
        assert_eq!(table.balance(), 100);
    }

    #[test]
    fn test_place_bet_rejects_overdraw() {
        let mut table = CrapsTable::new(5);
        assert!(matches!(
            table.place_bet(BetType::Field, 10),
            Err(Error::InsufficientFunds { .. })
        ));
        assert_eq!(table.balance(), 5);
        assert!(table.round().active_bets().is_empty());
    }

    #[test]
    fn test_roll_without_bets_is_noop() {
        let mut table = CrapsTable::new(100);
        let outcome = table.roll().unwrap();
        assert!(outcome.roll.is_none());
        assert!(outcome.settlements.is_empty());
        assert_eq!(outcome.phase, Phase::ComeOut);
        assert!(!table.is_resolved());
        assert_eq!(table.balance(), 100);
    }

    #[test]
    fn test_natural_pays_even_money() {
        let mut table = CrapsTable::new(100);
        table.place_bet(BetType::PassLine, 10).unwrap();
        let outcome = table.apply_roll(roll(3, 4)).unwrap();
        assert_eq!(outcome.settlements[0].net, 10);
        assert_eq!(outcome.phase, Phase::Resolved);
        assert_eq!(table.balance(), 110);
    }

    #[test]
    fn test_seeded_tables_replay_identically() {
        let mut a = CrapsTable::seeded(100, 7);
        let mut b = CrapsTable::seeded(100, 7);
        a.place_bet(BetType::Field, 5).unwrap();
        b.place_bet(BetType::Field, 5).unwrap();
        let oa = a.roll().unwrap();
        let ob = b.roll().unwrap();
        assert_eq!(oa.roll, ob.roll);
        assert_eq!(a.balance(), b.balance());
    }

    #[test]
    fn test_new_round_carries_balance() {
        let mut table = CrapsTable::new(100);
        table.place_bet(BetType::Field, 20).unwrap();
        table.apply_roll(roll(1, 1)).unwrap();
        assert!(table.is_resolved());
        assert_eq!(table.balance(), 140);

        table.new_round().unwrap();
        assert_eq!(table.phase(), Phase::ComeOut);
        assert_eq!(table.balance(), 140);
        assert!(table.round().active_bets().is_empty());
        assert!(table.round().roll_history().is_empty());
    }

    #[test]
    fn test_new_round_requires_resolution() {
        let mut table = CrapsTable::new(100);
        table.place_bet(BetType::PassLine, 10).unwrap();
        assert!(matches!(table.new_round(), Err(Error::RoundInProgress)));
    }
}
