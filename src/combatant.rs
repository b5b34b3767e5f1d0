//! Combatant identity, ability scores, and the per-encounter stats record.

use crate::conditions::{Condition, ConditionSet};
use crate::death::{DeathSaves, ZeroHpStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for combatants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub Uuid);

impl CombatantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CombatantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Ability scores container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: u8,
    pub dexterity: u8,
    pub constitution: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
}

impl AbilityScores {
    pub fn new(str: u8, dex: u8, con: u8, int: u8, wis: u8, cha: u8) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    pub fn get(&self, ability: Ability) -> u8 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn modifier(&self, ability: Ability) -> i8 {
        let score = self.get(ability) as i8;
        // Floor division so scores below 10 round toward -infinity:
        // 8-9 = -1, 10-11 = 0, 12-13 = +1, and so on.
        (score - 10).div_euclid(2)
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

/// Hit point pool. `current` never leaves `0..=maximum`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    pub current: i32,
    pub maximum: i32,
}

impl HitPoints {
    pub fn new(maximum: i32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Subtract damage, clamping at zero. Over-damage is not an error.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        let before = self.current;
        self.current = (self.current - amount.max(0)).max(0);
        DamageOutcome {
            damage_taken: before - self.current,
            dropped_to_zero: before > 0 && self.current == 0,
        }
    }

    /// Add healing, clamping at the maximum. Returns the HP actually
    /// restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = (self.current + amount.max(0)).min(self.maximum);
        self.current - before
    }

    /// Short wound descriptor for narrative strings, if one applies.
    pub fn wound_descriptor(&self) -> Option<&'static str> {
        if self.current == 0 || self.maximum <= 0 {
            None
        } else if self.current <= self.maximum / 4 {
            Some("critically wounded")
        } else if self.current <= self.maximum / 2 {
            Some("bloodied")
        } else {
            None
        }
    }
}

impl fmt::Display for HitPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}

/// Result of a single damage application.
#[derive(Debug, Clone, Copy)]
pub struct DamageOutcome {
    pub damage_taken: i32,
    pub dropped_to_zero: bool,
}

/// A combatant's stats for the duration of one encounter.
///
/// This is a snapshot, not a live reference into the caller's character
/// sheet: `CombatEngine::end_combat` hands the mutated records back so
/// the owner can sync and persist them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantStats {
    pub ability_scores: AbilityScores,
    pub armor_class: u8,
    pub hit_points: HitPoints,
    pub speed: u32,
    pub proficiency_bonus: Option<i8>,
}

impl CombatantStats {
    pub fn new(ability_scores: AbilityScores, armor_class: u8, max_hp: i32) -> Self {
        Self {
            ability_scores,
            armor_class,
            hit_points: HitPoints::new(max_hp),
            speed: 30,
            proficiency_bonus: None,
        }
    }

    pub fn dexterity_modifier(&self) -> i8 {
        self.ability_scores.modifier(Ability::Dexterity)
    }

    /// Proficiency bonus, defaulting to +2 when the sheet carries none.
    pub fn proficiency_or_default(&self) -> i8 {
        self.proficiency_bonus.unwrap_or(2)
    }
}

impl Default for CombatantStats {
    fn default() -> Self {
        Self::new(AbilityScores::default(), 10, 10)
    }
}

/// Everything the encounter tracks for one combatant: the stats
/// snapshot, the condition set, and the death-save record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantRecord {
    pub id: CombatantId,
    pub name: String,
    pub is_player: bool,
    pub stats: CombatantStats,
    pub conditions: ConditionSet,
    pub death_saves: DeathSaves,
}

impl CombatantRecord {
    pub fn new(id: CombatantId, name: impl Into<String>, is_player: bool, stats: CombatantStats) -> Self {
        Self {
            id,
            name: name.into(),
            is_player,
            stats,
            conditions: ConditionSet::new(),
            death_saves: DeathSaves::default(),
        }
    }

    /// Where this combatant sits in the zero-HP arc. The synthetic
    /// `Dead` tag (massive damage, slain monsters) counts alongside
    /// three death-save failures.
    pub fn zero_hp_status(&self) -> ZeroHpStatus {
        if self.conditions.has(Condition::Dead) {
            ZeroHpStatus::Dead
        } else {
            self.death_saves.status(self.stats.hit_points.current)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_floors_toward_negative() {
        let scores = AbilityScores::new(8, 9, 10, 11, 12, 30);
        assert_eq!(scores.modifier(Ability::Strength), -1);
        assert_eq!(scores.modifier(Ability::Dexterity), -1);
        assert_eq!(scores.modifier(Ability::Constitution), 0);
        assert_eq!(scores.modifier(Ability::Intelligence), 0);
        assert_eq!(scores.modifier(Ability::Wisdom), 1);
        assert_eq!(scores.modifier(Ability::Charisma), 10);
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut hp = HitPoints::new(10);
        let outcome = hp.take_damage(25);
        assert_eq!(hp.current, 0);
        assert_eq!(outcome.damage_taken, 10);
        assert!(outcome.dropped_to_zero);

        // Already at zero: no further drop is reported.
        let outcome = hp.take_damage(5);
        assert_eq!(outcome.damage_taken, 0);
        assert!(!outcome.dropped_to_zero);
    }

    #[test]
    fn test_heal_clamps_at_maximum() {
        let mut hp = HitPoints::new(10);
        hp.take_damage(4);
        assert_eq!(hp.heal(100), 4);
        assert_eq!(hp.current, 10);
    }

    #[test]
    fn test_negative_amounts_are_ignored() {
        let mut hp = HitPoints::new(10);
        hp.take_damage(-5);
        assert_eq!(hp.current, 10);
        hp.take_damage(3);
        assert_eq!(hp.heal(-5), 0);
        assert_eq!(hp.current, 7);
    }

    #[test]
    fn test_wound_descriptor_thresholds() {
        let mut hp = HitPoints::new(20);
        assert_eq!(hp.wound_descriptor(), None);
        hp.current = 10;
        assert_eq!(hp.wound_descriptor(), Some("bloodied"));
        hp.current = 5;
        assert_eq!(hp.wound_descriptor(), Some("critically wounded"));
        hp.current = 0;
        assert_eq!(hp.wound_descriptor(), None);
    }
}
