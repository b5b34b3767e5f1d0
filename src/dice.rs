//! Dice primitives for the combat engine.
//!
//! Two entry points: the d20 roller with advantage/disadvantage used by
//! attacks and saving throws, and the `NdM+K` damage-notation roller.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for dice parsing.
#[derive(Debug, Error)]
pub enum DiceError {
    #[error("Invalid damage notation: {0}")]
    InvalidNotation(String),
}

/// Advantage state for d20 rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Advantage {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl Advantage {
    /// Combine two advantage states (advantage + disadvantage = normal).
    pub fn combine(self, other: Advantage) -> Advantage {
        match (self, other) {
            (Advantage::Normal, x) | (x, Advantage::Normal) => x,
            (Advantage::Advantage, Advantage::Disadvantage) => Advantage::Normal,
            (Advantage::Disadvantage, Advantage::Advantage) => Advantage::Normal,
            (Advantage::Advantage, Advantage::Advantage) => Advantage::Advantage,
            (Advantage::Disadvantage, Advantage::Disadvantage) => Advantage::Disadvantage,
        }
    }

    /// Collapse a pair of flags. Both set cancel out to a plain roll.
    pub fn from_flags(advantage: bool, disadvantage: bool) -> Advantage {
        match (advantage, disadvantage) {
            (true, false) => Advantage::Advantage,
            (false, true) => Advantage::Disadvantage,
            _ => Advantage::Normal,
        }
    }
}

/// A resolved d20 roll.
///
/// `dice` holds every die rolled, in roll order; `value` is the face the
/// advantage rule selected. A plain roll (and a cancelled
/// advantage/disadvantage pair) rolls a single die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct D20Roll {
    pub dice: Vec<u32>,
    pub value: u32,
}

impl D20Roll {
    /// The first die rolled, regardless of which one was selected.
    pub fn first_die(&self) -> u32 {
        self.dice[0]
    }

    /// A fixed result that never touched the dice, used for auto-fails.
    pub fn fixed(value: u32) -> Self {
        Self {
            dice: vec![value],
            value,
        }
    }
}

impl fmt::Display for D20Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dice.len() > 1 {
            let shown: Vec<String> = self
                .dice
                .iter()
                .map(|d| {
                    if *d == self.value {
                        d.to_string()
                    } else {
                        format!("({d})")
                    }
                })
                .collect();
            write!(f, "[{}] = {}", shown.join(", "), self.value)
        } else {
            write!(f, "[{}]", self.value)
        }
    }
}

/// Roll a d20 with advantage/disadvantage flags.
pub fn roll_d20(advantage: bool, disadvantage: bool) -> D20Roll {
    roll_d20_with_rng(advantage, disadvantage, &mut rand::thread_rng())
}

/// Roll with a specific RNG (useful for testing).
pub fn roll_d20_with_rng<R: Rng>(advantage: bool, disadvantage: bool, rng: &mut R) -> D20Roll {
    match Advantage::from_flags(advantage, disadvantage) {
        Advantage::Normal => {
            let r1 = rng.gen_range(1..=20);
            D20Roll {
                dice: vec![r1],
                value: r1,
            }
        }
        state => {
            let r1 = rng.gen_range(1..=20);
            let r2 = rng.gen_range(1..=20);
            let value = if state == Advantage::Advantage {
                r1.max(r2)
            } else {
                r1.min(r2)
            };
            D20Roll {
                dice: vec![r1, r2],
                value,
            }
        }
    }
}

/// A parsed `NdM+K` damage expression (e.g. `2d6+3`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageExpression {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
    pub original: String,
}

impl DamageExpression {
    /// Parse a damage notation string.
    ///
    /// The grammar is `<count>d<sides>` with an optional `+`/`-` integer
    /// modifier. A missing count means one die. Anything else is
    /// [`DiceError::InvalidNotation`].
    pub fn parse(notation: &str) -> Result<Self, DiceError> {
        let cleaned: String = notation
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let invalid = || DiceError::InvalidNotation(notation.to_string());

        let d_pos = cleaned.find('d').ok_or_else(invalid)?;
        let count_str = &cleaned[..d_pos];
        let rest = &cleaned[d_pos + 1..];

        let count: u32 = if count_str.is_empty() {
            1
        } else {
            count_str.parse().map_err(|_| invalid())?
        };

        let (sides_str, modifier) = match rest.find(|c| c == '+' || c == '-') {
            Some(pos) => {
                let magnitude: u32 = rest[pos + 1..].parse().map_err(|_| invalid())?;
                let sign = if rest.as_bytes()[pos] == b'+' { 1 } else { -1 };
                (&rest[..pos], sign * magnitude as i32)
            }
            None => (rest, 0),
        };

        let sides: u32 = sides_str.parse().map_err(|_| invalid())?;
        if count == 0 || sides < 2 {
            return Err(invalid());
        }

        Ok(DamageExpression {
            count,
            sides,
            modifier,
            original: cleaned,
        })
    }

    /// Roll the expression.
    ///
    /// A critical hit doubles the number of dice rolled; the modifier is
    /// added exactly once. A negative modifier can't push the total below
    /// zero.
    pub fn roll(&self, critical: bool) -> DamageRoll {
        self.roll_with_rng(critical, &mut rand::thread_rng())
    }

    /// Roll with a specific RNG (useful for testing).
    pub fn roll_with_rng<R: Rng>(&self, critical: bool, rng: &mut R) -> DamageRoll {
        let count = if critical { self.count * 2 } else { self.count };
        let dice: Vec<u32> = (0..count).map(|_| rng.gen_range(1..=self.sides)).collect();
        let total = (dice.iter().sum::<u32>() as i32 + self.modifier).max(0);
        DamageRoll {
            dice,
            total,
            critical,
        }
    }
}

impl FromStr for DamageExpression {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DamageExpression::parse(s)
    }
}

impl fmt::Display for DamageExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// Result of rolling a damage expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRoll {
    pub dice: Vec<u32>,
    pub total: i32,
    pub critical: bool,
}

impl fmt::Display for DamageRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.dice.iter().map(|d| d.to_string()).collect();
        write!(f, "[{}] = {}", faces.join(", "), self.total)
    }
}

/// Convenience function to roll damage from a notation string.
pub fn roll_damage(notation: &str, critical: bool) -> Result<DamageRoll, DiceError> {
    let expr = DamageExpression::parse(notation)?;
    Ok(expr.roll(critical))
}
