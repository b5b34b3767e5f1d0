//! Turn and initiative tracking for a combat encounter.

use crate::combatant::CombatantId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry in the initiative order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatParticipant {
    pub id: CombatantId,
    pub name: String,
    pub initiative: i32,
    pub is_player: bool,
}

/// Result of advancing the turn cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAdvance {
    /// The cursor landed on a participant who can act.
    Turn {
        round: u32,
        participant: CombatParticipant,
    },
    /// Every participant is unconscious or dead; the cursor did not move
    /// to an eligible turn.
    NoEligibleCombatant,
}

/// Combat encounter state: the initiative order and the turn cursor.
///
/// The order is fixed at creation. Initiative-altering effects mid-combat
/// do not re-sort it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatEncounter {
    pub active: bool,
    pub round: u32,
    pub turn_index: usize,
    participants: Vec<CombatParticipant>,
}

impl CombatEncounter {
    /// Build an encounter from rolled participants.
    ///
    /// Each entry pairs a participant with its raw Dexterity score. Sorts
    /// descending by initiative, breaking ties by Dexterity score (not
    /// modifier); fully tied entries keep their insertion order, which
    /// the stable sort preserves. The scores are used only for the
    /// tie-break and then dropped.
    pub fn from_initiative(mut entries: Vec<(CombatParticipant, u8)>) -> Self {
        entries.sort_by(|(a, a_dex), (b, b_dex)| {
            b.initiative.cmp(&a.initiative).then(b_dex.cmp(a_dex))
        });
        Self {
            active: true,
            round: 1,
            turn_index: 0,
            participants: entries.into_iter().map(|(p, _)| p).collect(),
        }
    }

    pub fn participants(&self) -> &[CombatParticipant] {
        &self.participants
    }

    /// The participant whose turn it is.
    pub fn current(&self) -> Option<&CombatParticipant> {
        self.participants.get(self.turn_index)
    }

    /// Advance the turn cursor to the next participant the predicate
    /// accepts, wrapping into a new round as needed.
    ///
    /// Bounded: visits each participant at most once, then reports that
    /// nobody can act rather than cycling forever.
    pub fn advance(&mut self, mut eligible: impl FnMut(&CombatParticipant) -> bool) -> TurnAdvance {
        for _ in 0..self.participants.len() {
            self.turn_index += 1;
            if self.turn_index >= self.participants.len() {
                self.turn_index = 0;
                self.round += 1;
            }
            let participant = &self.participants[self.turn_index];
            if eligible(participant) {
                return TurnAdvance::Turn {
                    round: self.round,
                    participant: participant.clone(),
                };
            }
        }
        TurnAdvance::NoEligibleCombatant
    }
}

impl fmt::Display for CombatEncounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Round {}, {} combatants, turn {}",
            self.round,
            self.participants.len(),
            self.turn_index + 1
        )
    }
}
