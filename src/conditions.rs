//! Condition tags and the roll-modifier table they impose.
//!
//! The registry is a read-only lookup: it answers how a condition bends
//! attack rolls and saving throws. It does not enforce movement or speech
//! restrictions; those stay narrative.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Condition tags a combatant can carry.
///
/// `Unconscious` and `Dead` are synthetic tags managed by the damage
/// lifecycle rather than applied by effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Blinded,
    Charmed,
    Deafened,
    Frightened,
    Grappled,
    Incapacitated,
    Invisible,
    Paralyzed,
    Petrified,
    Poisoned,
    Prone,
    Restrained,
    Stunned,
    Unconscious,
    Dead,
}

impl Condition {
    pub fn name(&self) -> &'static str {
        match self {
            Condition::Blinded => "Blinded",
            Condition::Charmed => "Charmed",
            Condition::Deafened => "Deafened",
            Condition::Frightened => "Frightened",
            Condition::Grappled => "Grappled",
            Condition::Incapacitated => "Incapacitated",
            Condition::Invisible => "Invisible",
            Condition::Paralyzed => "Paralyzed",
            Condition::Petrified => "Petrified",
            Condition::Poisoned => "Poisoned",
            Condition::Prone => "Prone",
            Condition::Restrained => "Restrained",
            Condition::Stunned => "Stunned",
            Condition::Unconscious => "Unconscious",
            Condition::Dead => "Dead",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Roll modifiers a condition imposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionEffects {
    /// Attack rolls against the holder have advantage.
    pub grants_advantage_to_attackers: bool,
    /// The holder's own attack rolls have disadvantage.
    pub attacks_at_disadvantage: bool,
    /// The holder automatically fails Strength and Dexterity saves.
    pub auto_fail_str_dex_saves: bool,
    /// The holder cannot take actions or reactions.
    pub incapacitated: bool,
}

impl ConditionEffects {
    /// OR another set of effects into this one.
    pub fn merge(&mut self, other: ConditionEffects) {
        self.grants_advantage_to_attackers |= other.grants_advantage_to_attackers;
        self.attacks_at_disadvantage |= other.attacks_at_disadvantage;
        self.auto_fail_str_dex_saves |= other.auto_fail_str_dex_saves;
        self.incapacitated |= other.incapacitated;
    }
}

lazy_static! {
    /// Standard 5e condition table.
    static ref STANDARD_EFFECTS: HashMap<Condition, ConditionEffects> = {
        let mut table = HashMap::new();
        table.insert(
            Condition::Blinded,
            ConditionEffects {
                grants_advantage_to_attackers: true,
                attacks_at_disadvantage: true,
                ..Default::default()
            },
        );
        table.insert(
            Condition::Frightened,
            ConditionEffects {
                attacks_at_disadvantage: true,
                ..Default::default()
            },
        );
        table.insert(
            Condition::Incapacitated,
            ConditionEffects {
                incapacitated: true,
                ..Default::default()
            },
        );
        table.insert(
            Condition::Paralyzed,
            ConditionEffects {
                grants_advantage_to_attackers: true,
                auto_fail_str_dex_saves: true,
                incapacitated: true,
                ..Default::default()
            },
        );
        table.insert(
            Condition::Petrified,
            ConditionEffects {
                grants_advantage_to_attackers: true,
                auto_fail_str_dex_saves: true,
                incapacitated: true,
                ..Default::default()
            },
        );
        table.insert(
            Condition::Poisoned,
            ConditionEffects {
                attacks_at_disadvantage: true,
                ..Default::default()
            },
        );
        table.insert(
            Condition::Prone,
            ConditionEffects {
                attacks_at_disadvantage: true,
                ..Default::default()
            },
        );
        table.insert(
            Condition::Restrained,
            ConditionEffects {
                grants_advantage_to_attackers: true,
                attacks_at_disadvantage: true,
                ..Default::default()
            },
        );
        table.insert(
            Condition::Stunned,
            ConditionEffects {
                grants_advantage_to_attackers: true,
                auto_fail_str_dex_saves: true,
                incapacitated: true,
                ..Default::default()
            },
        );
        table.insert(
            Condition::Unconscious,
            ConditionEffects {
                grants_advantage_to_attackers: true,
                auto_fail_str_dex_saves: true,
                incapacitated: true,
                ..Default::default()
            },
        );
        table.insert(
            Condition::Dead,
            ConditionEffects {
                incapacitated: true,
                ..Default::default()
            },
        );
        table
    };
}

/// Immutable lookup table from condition tag to roll modifiers.
///
/// Built once and handed to the engine at construction, so tests can
/// substitute their own table.
#[derive(Debug, Clone)]
pub struct ConditionRegistry {
    effects: HashMap<Condition, ConditionEffects>,
}

impl ConditionRegistry {
    /// The standard 5e table.
    pub fn standard() -> Self {
        Self {
            effects: STANDARD_EFFECTS.clone(),
        }
    }

    /// A registry from an explicit table. Conditions absent from the
    /// table impose no roll modifiers.
    pub fn from_table(effects: HashMap<Condition, ConditionEffects>) -> Self {
        Self { effects }
    }

    pub fn effects(&self, condition: Condition) -> ConditionEffects {
        self.effects.get(&condition).copied().unwrap_or_default()
    }

    /// Fold the effects of every condition in a set.
    pub fn combined(&self, set: &ConditionSet) -> ConditionEffects {
        let mut combined = ConditionEffects::default();
        for condition in set.iter() {
            combined.merge(self.effects(condition));
        }
        combined
    }
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// The set of condition tags attached to a combatant.
///
/// Adds and removes are idempotent; tags coexist freely and carry no
/// ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSet {
    tags: HashSet<Condition>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag. Returns false if it was already present.
    pub fn add(&mut self, condition: Condition) -> bool {
        self.tags.insert(condition)
    }

    /// Remove a tag. Returns false if it was not present.
    pub fn remove(&mut self, condition: Condition) -> bool {
        self.tags.remove(&condition)
    }

    pub fn has(&self, condition: Condition) -> bool {
        self.tags.contains(&condition)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Condition> + '_ {
        self.tags.iter().copied()
    }

    /// Tag names sorted for stable display.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tags.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove_idempotent() {
        let mut set = ConditionSet::new();
        assert!(set.add(Condition::Prone));
        assert!(!set.add(Condition::Prone));
        assert!(set.has(Condition::Prone));
        assert!(set.remove(Condition::Prone));
        assert!(!set.remove(Condition::Prone));
        assert!(set.is_empty());
    }

    #[test]
    fn test_standard_table_auto_fail() {
        let registry = ConditionRegistry::standard();
        for condition in [
            Condition::Paralyzed,
            Condition::Stunned,
            Condition::Unconscious,
            Condition::Petrified,
        ] {
            assert!(
                registry.effects(condition).auto_fail_str_dex_saves,
                "{condition} should force STR/DEX auto-fail"
            );
        }
        assert!(!registry.effects(Condition::Poisoned).auto_fail_str_dex_saves);
    }

    #[test]
    fn test_unmapped_condition_has_no_effects() {
        let registry = ConditionRegistry::standard();
        assert_eq!(registry.effects(Condition::Charmed), ConditionEffects::default());
    }

    #[test]
    fn test_combined_ors_flags() {
        let registry = ConditionRegistry::standard();
        let mut set = ConditionSet::new();
        set.add(Condition::Frightened);
        set.add(Condition::Restrained);
        let effects = registry.combined(&set);
        assert!(effects.attacks_at_disadvantage);
        assert!(effects.grants_advantage_to_attackers);
        assert!(!effects.auto_fail_str_dex_saves);
    }
}
