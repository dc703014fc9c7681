//! Bet variants and their per-roll resolution rules.
//!
//! The variant set is closed and known at design time, so it is an enum with
//! an exhaustive rule match rather than open-ended dispatch. Every rule is a
//! pure function of `(total, phase)`; the round applies it and handles the
//! chips.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::round::Phase;

// Proposition pay tables ("to 1").
const SNAKE_EYES_PAYS_TO_1: i64 = 30;
const ANY_SEVEN_PAYS_TO_1: i64 = 4;
const YO_PAYS_TO_1: i64 = 15;
const FIELD_DOUBLE_PAYS_TO_1: i64 = 2;

/// Supported bet types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BetType {
    /// Come-out: 7/11 win, 2/3/12 lose, else the sum becomes the point.
    /// Point phase: point wins, 7 loses, else keep rolling.
    PassLine = 0,
    /// Single roll: 3,4,9,10,11 pay even, 2 and 12 pay double.
    Field = 1,
    /// Single roll: 2 pays 30:1.
    SnakeEyes = 2,
    /// Single roll: any 7 pays 4:1.
    AnySeven = 3,
    /// Single roll: 11 pays 15:1.
    Yo = 4,
}

impl BetType {
    /// Every variant, in table-menu order.
    pub const ALL: [BetType; 5] = [
        BetType::PassLine,
        BetType::Field,
        BetType::SnakeEyes,
        BetType::AnySeven,
        BetType::Yo,
    ];

    /// Display name, as printed on the table layout.
    pub fn name(&self) -> &'static str {
        match self {
            BetType::PassLine => "Pass Line",
            BetType::Field => "Field",
            BetType::SnakeEyes => "Snake Eyes (2)",
            BetType::AnySeven => "Any Seven (7)",
            BetType::Yo => "Yo (11)",
        }
    }

    /// Resolve this bet type against a roll.
    ///
    /// `net` is the signed chip result for a wager of `wager`: positive is a
    /// win, negative a loss, zero a push. `carries` says whether the bet
    /// stays active for the next roll. Only `PassLine` distinguishes phases
    /// and only `PassLine` carries; the propositions settle on every roll.
    pub fn resolve(&self, total: u8, phase: Phase, wager: u64) -> Resolution {
        let wager = wager as i64;
        match self {
            BetType::PassLine => match phase {
                Phase::ComeOut => match total {
                    7 | 11 => Resolution::settled(wager),
                    2 | 3 | 12 => Resolution::settled(-wager),
                    _ => Resolution::carried(),
                },
                Phase::Point(point) => {
                    if total == point {
                        Resolution::settled(wager)
                    } else if total == 7 {
                        Resolution::settled(-wager)
                    } else {
                        Resolution::carried()
                    }
                }
                Phase::Resolved => Resolution::settled(0),
            },
            BetType::Field => match total {
                3 | 4 | 9 | 10 | 11 => Resolution::settled(wager),
                2 | 12 => Resolution::settled(wager * FIELD_DOUBLE_PAYS_TO_1),
                _ => Resolution::settled(-wager),
            },
            BetType::SnakeEyes => {
                if total == 2 {
                    Resolution::settled(wager * SNAKE_EYES_PAYS_TO_1)
                } else {
                    Resolution::settled(-wager)
                }
            }
            BetType::AnySeven => {
                if total == 7 {
                    Resolution::settled(wager * ANY_SEVEN_PAYS_TO_1)
                } else {
                    Resolution::settled(-wager)
                }
            }
            BetType::Yo => {
                if total == 11 {
                    Resolution::settled(wager * YO_PAYS_TO_1)
                } else {
                    Resolution::settled(-wager)
                }
            }
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for BetType {
    type Error = Error;

    fn try_from(v: u8) -> Result<Self> {
        match v {
            0 => Ok(BetType::PassLine),
            1 => Ok(BetType::Field),
            2 => Ok(BetType::SnakeEyes),
            3 => Ok(BetType::AnySeven),
            4 => Ok(BetType::Yo),
            _ => Err(Error::InvalidBetType(v.to_string())),
        }
    }
}

impl FromStr for BetType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pass" | "pass-line" | "passline" => Ok(BetType::PassLine),
            "field" => Ok(BetType::Field),
            "snake-eyes" | "snakeeyes" => Ok(BetType::SnakeEyes),
            "any-seven" | "anyseven" => Ok(BetType::AnySeven),
            "yo" => Ok(BetType::Yo),
            _ => Err(Error::InvalidBetType(s.to_string())),
        }
    }
}

/// Outcome of resolving a single bet against a single roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Signed chip result: win (+), loss (-), or push (0).
    pub net: i64,
    /// Whether the bet stays active for the next roll.
    pub carries: bool,
}

impl Resolution {
    fn settled(net: i64) -> Self {
        Self { net, carries: false }
    }

    fn carried() -> Self {
        Self {
            net: 0,
            carries: true,
        }
    }
}

/// Handle identifying a bet within its round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BetId(u32);

impl BetId {
    pub(crate) fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for BetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A wager on one bet type, owned by the round that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub id: BetId,
    pub bet_type: BetType,
    pub wager: u64,
}

impl Bet {
    pub(crate) fn new(id: BetId, bet_type: BetType, wager: u64) -> Result<Self> {
        if wager == 0 {
            return Err(Error::InvalidAmount);
        }
        Ok(Self {
            id,
            bet_type,
            wager,
        })
    }

    /// Apply this bet's rule to a roll.
    pub fn resolve(&self, total: u8, phase: Phase) -> Resolution {
        self.bet_type.resolve(total, phase, self.wager)
    }
}
