//! Death saving throws: the dying/stabilizing/death arc for a combatant
//! at 0 HP.
//!
//! The record and its transitions are free-standing so hazard code can
//! drive them even when no initiative tracker is running. Counters reset
//! to zero on stabilization and on regaining hit points; a stable
//! combatant who takes damage reverts to dying and resumes failure
//! accrual from zero.

use serde::{Deserialize, Serialize};

/// Death saving throw record.
///
/// Lives on the combatant's persistent record: `CombatEngine::end_combat`
/// returns it with the rest of the snapshot for the owner to persist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathSaves {
    pub successes: u8,
    pub failures: u8,
    pub stable: bool,
}

/// A combatant's status in the zero-HP arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZeroHpStatus {
    Conscious,
    Dying,
    Stable,
    Dead,
}

/// What a single transition did to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathSaveOutcome {
    /// Natural 20: the combatant regains 1 HP and wakes.
    Revived,
    Success { successes: u8 },
    Failure { failures: u8 },
    /// Third success: no further saves until damaged again.
    Stabilized,
    /// Third failure: terminal.
    Died,
}

impl DeathSaves {
    pub fn is_dead(&self) -> bool {
        self.failures >= 3
    }

    pub fn is_stable(&self) -> bool {
        self.stable && !self.is_dead()
    }

    /// Status for a combatant whose HP pool currently reads `current_hp`.
    pub fn status(&self, current_hp: i32) -> ZeroHpStatus {
        if self.is_dead() {
            ZeroHpStatus::Dead
        } else if current_hp > 0 {
            ZeroHpStatus::Conscious
        } else if self.stable {
            ZeroHpStatus::Stable
        } else {
            ZeroHpStatus::Dying
        }
    }

    /// Record an unmodified d20 death save.
    ///
    /// Legal only while dying; a dead record is frozen and reports
    /// `Died` without mutating.
    pub fn apply_roll(&mut self, roll: u32) -> DeathSaveOutcome {
        if self.is_dead() {
            return DeathSaveOutcome::Died;
        }
        match roll {
            20 => {
                self.reset();
                DeathSaveOutcome::Revived
            }
            1 => self.add_failures(2),
            10..=19 => {
                self.successes += 1;
                if self.successes >= 3 {
                    self.stabilize();
                    DeathSaveOutcome::Stabilized
                } else {
                    DeathSaveOutcome::Success {
                        successes: self.successes,
                    }
                }
            }
            _ => self.add_failures(1),
        }
    }

    /// Damage taken while at 0 HP: one failure, two on a critical hit.
    /// A stable combatant reverts to dying first.
    pub fn damage_while_dying(&mut self, is_critical: bool) -> DeathSaveOutcome {
        if self.is_dead() {
            return DeathSaveOutcome::Died;
        }
        self.stable = false;
        self.add_failures(if is_critical { 2 } else { 1 })
    }

    /// External stabilization: a passed DC 10 Medicine check or magical
    /// equivalent. Counters reset; no save is consumed.
    pub fn stabilize(&mut self) {
        self.successes = 0;
        self.failures = 0;
        self.stable = true;
    }

    /// Clear the record, as happens on regaining hit points.
    pub fn reset(&mut self) {
        self.successes = 0;
        self.failures = 0;
        self.stable = false;
    }

    fn add_failures(&mut self, count: u8) -> DeathSaveOutcome {
        self.failures = (self.failures + count).min(3);
        if self.is_dead() {
            DeathSaveOutcome::Died
        } else {
            DeathSaveOutcome::Failure {
                failures: self.failures,
            }
        }
    }
}
