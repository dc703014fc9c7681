//! Round state machine and per-roll payout resolution.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bets::{Bet, BetId, BetType};
use crate::dice::DiceRoll;
use crate::error::{Error, Result};

/// Phase of a betting round.
///
/// Transitions only run forward: `ComeOut` to `Point(n)` to `Resolved`, or
/// `ComeOut` straight to `Resolved`. A point is always one of 4, 5, 6, 8,
/// 9, 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    ComeOut,
    Point(u8),
    Resolved,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::ComeOut
    }
}

impl Phase {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Phase::Resolved)
    }

    /// The established point, if any.
    pub fn point(&self) -> Option<u8> {
        match self {
            Phase::Point(point) => Some(*point),
            _ => None,
        }
    }
}

/// Per-bet result of one roll, as reported to presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub bet: BetId,
    pub bet_type: BetType,
    pub wager: u64,
    /// Signed chip result: win (+), loss (-), push (0).
    pub net: i64,
    /// Whether the bet stayed active for the next roll.
    pub carries: bool,
}

impl Settlement {
    pub fn is_win(&self) -> bool {
        self.net > 0
    }

    pub fn is_loss(&self) -> bool {
        self.net < 0
    }

    pub fn is_push(&self) -> bool {
        self.net == 0 && !self.carries
    }

    /// Chips returned to the ledger for this settlement: stake plus profit
    /// on a win, stake alone on a push, nothing on a loss or while the bet
    /// still rides.
    pub(crate) fn chip_return(&self) -> u64 {
        if self.carries {
            0
        } else {
            (self.wager as i64 + self.net).max(0) as u64
        }
    }
}

/// What a single roll produced: the dice (absent for the bet-less no-op),
/// the phase after resolution, and each bet's settlement in placement order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub roll: Option<DiceRoll>,
    pub phase: Phase,
    pub settlements: Vec<Settlement>,
}

/// A single betting round: the phase machine, the active bets it owns, and
/// the rolls it has consumed.
#[derive(Debug, Clone, Default)]
pub struct Round {
    phase: Phase,
    bets: Vec<Bet>,
    rolls: Vec<DiceRoll>,
    next_bet_id: u32,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn point(&self) -> Option<u8> {
        self.phase.point()
    }

    pub fn is_resolved(&self) -> bool {
        self.phase.is_resolved()
    }

    /// Bets still riding, in placement order.
    pub fn active_bets(&self) -> &[Bet] {
        &self.bets
    }

    /// Every roll this round has consumed, in order.
    pub fn roll_history(&self) -> &[DiceRoll] {
        &self.rolls
    }

    /// Add a bet to the round. The ledger debit happens at the table before
    /// the bet becomes active.
    pub(crate) fn add_bet(&mut self, bet_type: BetType, wager: u64) -> Result<BetId> {
        if self.is_resolved() {
            return Err(Error::RoundAlreadyResolved);
        }
        let id = BetId::new(self.next_bet_id);
        let bet = Bet::new(id, bet_type, wager)?;
        self.next_bet_id += 1;
        self.bets.push(bet);
        Ok(id)
    }

    /// Resolve every active bet against one roll and advance the phase.
    ///
    /// Each bet's own rule decides its settlement; bets that carry stay
    /// active unless the roll forced the round to resolve (point made or
    /// seven-out), in which case would-be carriers are cut off with their
    /// stake refunded. The round resolves exactly when no bets remain.
    pub(crate) fn process_roll(&mut self, roll: DiceRoll) -> Result<Vec<Settlement>> {
        if self.is_resolved() {
            return Err(Error::RoundAlreadyResolved);
        }
        if self.bets.is_empty() {
            return Err(Error::NoActiveBets);
        }

        let phase = self.phase;
        let total = roll.total();
        self.rolls.push(roll);

        let mut settlements = Vec::with_capacity(self.bets.len());
        let mut carriers = Vec::new();
        let mut pass_carried = false;

        for bet in self.bets.drain(..) {
            let resolution = bet.resolve(total, phase);
            if resolution.carries {
                if bet.bet_type == BetType::PassLine {
                    pass_carried = true;
                }
                carriers.push(bet);
            }
            settlements.push(Settlement {
                bet: bet.id,
                bet_type: bet.bet_type,
                wager: bet.wager,
                net: resolution.net,
                carries: resolution.carries,
            });
        }

        let next_phase = match phase {
            Phase::ComeOut => {
                if pass_carried {
                    Phase::Point(total)
                } else {
                    Phase::ComeOut
                }
            }
            Phase::Point(point) => {
                if total == point || total == 7 {
                    Phase::Resolved
                } else {
                    Phase::Point(point)
                }
            }
            Phase::Resolved => Phase::Resolved,
        };

        if next_phase == Phase::Resolved && !carriers.is_empty() {
            // Point made or seven-out cuts off anything still riding; the
            // stake comes back as a push.
            for settlement in &mut settlements {
                if settlement.carries {
                    settlement.carries = false;
                }
            }
            carriers.clear();
        }

        self.bets = carriers;
        self.phase = if self.bets.is_empty() {
            Phase::Resolved
        } else {
            next_phase
        };

        debug!(
            %roll,
            phase = ?self.phase,
            settled = settlements.iter().filter(|s| !s.carries).count(),
            riding = self.bets.len(),
            "processed roll"
        );

        Ok(settlements)
    }
}
