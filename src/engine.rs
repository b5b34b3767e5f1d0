//! The combat engine facade.
//!
//! Owns the encounter, the combatant snapshot store, and the resolution
//! algorithms for attacks, saving throws, damage, healing, and death
//! saves. Single-threaded and synchronous: every operation is an
//! immediately-returning computation, and each engine instance belongs
//! to one logical game session.

use crate::combatant::{Ability, CombatantId, CombatantRecord, CombatantStats};
use crate::conditions::{Condition, ConditionRegistry};
use crate::death::{DeathSaveOutcome, ZeroHpStatus};
use crate::dice::{self, D20Roll, DamageExpression, DamageRoll, DiceError};
use crate::encounter::{CombatEncounter, CombatParticipant, TurnAdvance};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Error type for engine operations.
#[derive(Debug, Error)]
pub enum CombatError {
    #[error("No combatant with id {0} in the current encounter")]
    CombatantNotFound(CombatantId),
    #[error("No combat in progress")]
    NoActiveCombat,
    #[error("Illegal state transition: {0}")]
    IllegalStateTransition(String),
    #[error(transparent)]
    Dice(#[from] DiceError),
}

/// Which die determines a natural 1 / natural 20 when advantage or
/// disadvantage rolled two.
///
/// `FirstDie` reads the first die rolled even when the other die decided
/// the total; `SelectedDie` reads the die the roll actually kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CritRule {
    #[default]
    FirstDie,
    SelectedDie,
}

impl CritRule {
    /// The die face this rule inspects for naturals.
    pub fn crit_die(&self, roll: &D20Roll) -> u32 {
        match self {
            CritRule::FirstDie => roll.first_die(),
            CritRule::SelectedDie => roll.value,
        }
    }
}

/// Initial combatant data for `start_combat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantSetup {
    pub id: CombatantId,
    pub name: String,
    pub is_player: bool,
    pub stats: CombatantStats,
    /// Initiative bonus override; the Dexterity modifier when absent.
    pub initiative_bonus: Option<i8>,
}

/// Caller-supplied modifiers for an attack roll. Condition-derived
/// advantage and disadvantage are ORed in on top.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AttackOptions {
    pub advantage: bool,
    pub disadvantage: bool,
    /// Overrides the target's stored armor class.
    pub target_ac: Option<u8>,
}

/// Caller-supplied modifiers for a saving throw.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SaveOptions {
    pub advantage: bool,
    pub disadvantage: bool,
    pub proficient: bool,
}

/// Outcome of one resolved attack. Returned to the caller, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackResult {
    pub attacker: String,
    pub target: String,
    pub roll: D20Roll,
    pub total: i32,
    pub target_ac: u8,
    pub hits: bool,
    pub is_critical: bool,
    pub is_critical_miss: bool,
    pub damage: Option<DamageRoll>,
    pub damage_type: String,
    pub narrative: String,
}

/// Outcome of one resolved saving throw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingThrowResult {
    pub ability: Ability,
    pub roll: D20Roll,
    pub modifier: i32,
    pub total: i32,
    pub dc: i32,
    pub success: bool,
    /// The combatant's conditions forced the failure; no dice were rolled.
    pub auto_failed: bool,
    pub narrative: String,
}

/// Outcome of one death saving throw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeathSaveResult {
    pub roll: u32,
    pub outcome: DeathSaveOutcome,
    pub narrative: String,
}

/// An environmental hazard descriptor, executed through the standard
/// save and damage primitives rather than a separate code path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardEffect {
    pub name: String,
    /// Damage notation, e.g. `"2d6"`.
    pub dice: String,
    pub save_dc: Option<i32>,
    pub save_ability: Option<Ability>,
    /// A successful save halves the damage instead of negating it.
    pub save_halves: bool,
}

/// Outcome of resolving a hazard against one combatant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardResult {
    pub save: Option<SavingThrowResult>,
    pub rolled: DamageRoll,
    /// Damage actually applied after the save adjudication.
    pub damage_applied: i32,
    pub narrative: String,
}

/// The combat resolution engine.
///
/// Holds all state in memory for the lifetime of one encounter. The
/// condition registry and crit rule are injected at construction.
pub struct CombatEngine {
    registry: ConditionRegistry,
    crit_rule: CritRule,
    encounter: Option<CombatEncounter>,
    store: HashMap<CombatantId, CombatantRecord>,
}

impl CombatEngine {
    pub fn new() -> Self {
        Self::with_rules(ConditionRegistry::standard(), CritRule::default())
    }

    pub fn with_rules(registry: ConditionRegistry, crit_rule: CritRule) -> Self {
        Self {
            registry,
            crit_rule,
            encounter: None,
            store: HashMap::new(),
        }
    }

    // ========================================================================
    // Turn and initiative
    // ========================================================================

    /// Roll initiative for every combatant and open the encounter.
    ///
    /// Initiative is d20 plus the setup's bonus (Dexterity modifier when
    /// none is given). Ties go to the higher raw Dexterity score; full
    /// ties keep setup order. Any previous encounter is discarded.
    pub fn start_combat(&mut self, setups: Vec<CombatantSetup>) -> &CombatEncounter {
        self.start_combat_with_rng(setups, &mut rand::thread_rng())
    }

    /// `start_combat` with a specific RNG (useful for testing).
    pub fn start_combat_with_rng<R: Rng>(
        &mut self,
        setups: Vec<CombatantSetup>,
        rng: &mut R,
    ) -> &CombatEncounter {
        self.store.clear();
        let mut entries = Vec::with_capacity(setups.len());
        for setup in setups {
            let bonus = setup
                .initiative_bonus
                .unwrap_or_else(|| setup.stats.dexterity_modifier());
            let initiative = rng.gen_range(1..=20) + bonus as i32;
            let dexterity = setup.stats.ability_scores.dexterity;
            entries.push((
                CombatParticipant {
                    id: setup.id,
                    name: setup.name.clone(),
                    initiative,
                    is_player: setup.is_player,
                },
                dexterity,
            ));
            self.store.insert(
                setup.id,
                CombatantRecord::new(setup.id, setup.name, setup.is_player, setup.stats),
            );
        }
        self.encounter.insert(CombatEncounter::from_initiative(entries))
    }

    /// The current encounter, if one is running.
    pub fn encounter(&self) -> Option<&CombatEncounter> {
        self.encounter.as_ref()
    }

    /// The participant whose turn it is, or None outside combat.
    pub fn current_participant(&self) -> Option<&CombatParticipant> {
        self.encounter.as_ref().and_then(|e| e.current())
    }

    /// Advance to the next participant who can act, skipping anyone
    /// tagged unconscious or dead.
    pub fn next_turn(&mut self) -> Result<TurnAdvance, CombatError> {
        let encounter = self.encounter.as_mut().ok_or(CombatError::NoActiveCombat)?;
        let store = &self.store;
        Ok(encounter.advance(|p| {
            store
                .get(&p.id)
                .map(|r| {
                    !r.conditions.has(Condition::Unconscious) && !r.conditions.has(Condition::Dead)
                })
                .unwrap_or(false)
        }))
    }

    /// Close the encounter and hand the mutated combatant records back
    /// to the caller for sync-back. The snapshot store is discarded.
    pub fn end_combat(&mut self) -> Vec<CombatantRecord> {
        self.encounter = None;
        let mut records: Vec<CombatantRecord> = self.store.drain().map(|(_, r)| r).collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }

    // ========================================================================
    // Attack and saving throw resolution
    // ========================================================================

    /// Resolve one attack roll and, on a hit, its damage roll.
    ///
    /// Does not apply the damage; feed `AttackResult` into
    /// `apply_damage_from_attack` to mutate the target.
    pub fn make_attack(
        &self,
        attacker_id: CombatantId,
        target_id: CombatantId,
        attack_bonus: i32,
        damage_notation: &str,
        damage_type: &str,
        options: AttackOptions,
    ) -> Result<AttackResult, CombatError> {
        self.make_attack_with_rng(
            attacker_id,
            target_id,
            attack_bonus,
            damage_notation,
            damage_type,
            options,
            &mut rand::thread_rng(),
        )
    }

    /// `make_attack` with a specific RNG (useful for testing).
    #[allow(clippy::too_many_arguments)]
    pub fn make_attack_with_rng<R: Rng>(
        &self,
        attacker_id: CombatantId,
        target_id: CombatantId,
        attack_bonus: i32,
        damage_notation: &str,
        damage_type: &str,
        options: AttackOptions,
        rng: &mut R,
    ) -> Result<AttackResult, CombatError> {
        let attacker = self.record(attacker_id)?;
        let target = self.record(target_id)?;

        // Bad notation surfaces before any die hits the table.
        let damage_expr = DamageExpression::parse(damage_notation)?;

        let target_ac = options.target_ac.unwrap_or(target.stats.armor_class);

        let advantage = options.advantage
            || self
                .registry
                .combined(&target.conditions)
                .grants_advantage_to_attackers;
        let disadvantage = options.disadvantage
            || self
                .registry
                .combined(&attacker.conditions)
                .attacks_at_disadvantage;

        let roll = dice::roll_d20_with_rng(advantage, disadvantage, rng);
        let total = roll.value as i32 + attack_bonus;

        let crit_die = self.crit_rule.crit_die(&roll);
        let is_critical = crit_die == 20;
        let is_critical_miss = crit_die == 1;

        // Natural 1 always misses; natural 20 always hits (and crits).
        let hits = !is_critical_miss && (is_critical || total >= target_ac as i32);

        let damage = if hits {
            Some(damage_expr.roll_with_rng(is_critical, rng))
        } else {
            None
        };

        let narrative = match (&damage, is_critical, is_critical_miss) {
            (Some(dmg), true, _) => format!(
                "{} lands a CRITICAL HIT on {} ({} vs AC {})! {} {} damage!",
                attacker.name, target.name, total, target_ac, dmg.total, damage_type
            ),
            (Some(dmg), false, _) => format!(
                "{} hits {} ({} vs AC {}) for {} {} damage",
                attacker.name, target.name, total, target_ac, dmg.total, damage_type
            ),
            (None, _, true) => format!(
                "{} rolls a natural 1 and fumbles the attack against {}!",
                attacker.name, target.name
            ),
            (None, _, false) => format!(
                "{} misses {} ({} vs AC {})",
                attacker.name, target.name, total, target_ac
            ),
        };

        Ok(AttackResult {
            attacker: attacker.name.clone(),
            target: target.name.clone(),
            roll,
            total,
            target_ac,
            hits,
            is_critical,
            is_critical_miss,
            damage,
            damage_type: damage_type.to_string(),
            narrative,
        })
    }

    /// Resolve one saving throw against a DC.
    pub fn make_saving_throw(
        &self,
        entity_id: CombatantId,
        ability: Ability,
        dc: i32,
        options: SaveOptions,
    ) -> Result<SavingThrowResult, CombatError> {
        self.make_saving_throw_with_rng(entity_id, ability, dc, options, &mut rand::thread_rng())
    }

    /// `make_saving_throw` with a specific RNG (useful for testing).
    pub fn make_saving_throw_with_rng<R: Rng>(
        &self,
        entity_id: CombatantId,
        ability: Ability,
        dc: i32,
        options: SaveOptions,
        rng: &mut R,
    ) -> Result<SavingThrowResult, CombatError> {
        let record = self.record(entity_id)?;
        let effects = self.registry.combined(&record.conditions);

        // Paralyzed, stunned, petrified, unconscious: no roll, the save
        // just fails.
        if effects.auto_fail_str_dex_saves
            && matches!(ability, Ability::Strength | Ability::Dexterity)
        {
            return Ok(SavingThrowResult {
                ability,
                roll: D20Roll::fixed(1),
                modifier: 0,
                total: 1,
                dc,
                success: false,
                auto_failed: true,
                narrative: format!(
                    "{} automatically fails the {} saving throw!",
                    record.name,
                    ability.abbreviation()
                ),
            });
        }

        let mut modifier = record.stats.ability_scores.modifier(ability) as i32;
        if options.proficient {
            modifier += record.stats.proficiency_or_default() as i32;
        }

        let disadvantage = options.disadvantage || record.conditions.has(Condition::Poisoned);
        let roll = dice::roll_d20_with_rng(options.advantage, disadvantage, rng);
        let total = roll.value as i32 + modifier;
        let success = total >= dc;

        let narrative = format!(
            "{} {} on the {} saving throw ({} vs DC {})",
            record.name,
            if success { "succeeds" } else { "fails" },
            ability.abbreviation(),
            total,
            dc
        );

        Ok(SavingThrowResult {
            ability,
            roll,
            modifier,
            total,
            dc,
            success,
            auto_failed: false,
            narrative,
        })
    }

    // ========================================================================
    // Damage and healing lifecycle
    // ========================================================================

    /// Apply damage from a non-attack source (hazards, raw rulings).
    pub fn apply_damage(&mut self, entity_id: CombatantId, amount: i32) -> Result<String, CombatError> {
        self.damage_impl(entity_id, amount, false)
    }

    /// Apply damage from a resolved attack. A critical hit counts as two
    /// death-save failures against a dying target.
    pub fn apply_damage_from_attack(
        &mut self,
        entity_id: CombatantId,
        amount: i32,
        is_critical: bool,
    ) -> Result<String, CombatError> {
        self.damage_impl(entity_id, amount, is_critical)
    }

    fn damage_impl(
        &mut self,
        entity_id: CombatantId,
        amount: i32,
        is_critical: bool,
    ) -> Result<String, CombatError> {
        let record = self
            .store
            .get_mut(&entity_id)
            .ok_or(CombatError::CombatantNotFound(entity_id))?;
        let amount = amount.max(0);
        let max_hp = record.stats.hit_points.maximum;

        match record.zero_hp_status() {
            ZeroHpStatus::Dead => {
                return Ok(format!("{} is already dead.", record.name));
            }
            ZeroHpStatus::Dying | ZeroHpStatus::Stable => {
                // Massive damage at 0 HP kills outright, counters aside.
                if amount >= max_hp {
                    record.conditions.add(Condition::Dead);
                    return Ok(format!(
                        "{} takes {} damage while down - massive damage! {} dies instantly.",
                        record.name, amount, record.name
                    ));
                }
                let outcome = record.death_saves.damage_while_dying(is_critical);
                return Ok(match outcome {
                    DeathSaveOutcome::Died => {
                        record.conditions.add(Condition::Dead);
                        format!(
                            "{} takes {} damage while down - third death save failure. {} has died.",
                            record.name, amount, record.name
                        )
                    }
                    DeathSaveOutcome::Failure { failures } => format!(
                        "{} takes {} damage while down - death save failure{} ({}/3)",
                        record.name,
                        amount,
                        if is_critical { " x2 (critical hit)" } else { "" },
                        failures
                    ),
                    // damage_while_dying only reports failures or death.
                    _ => unreachable!("damage while dying cannot succeed a save"),
                });
            }
            // Conscious falls through to ordinary HP loss.
            ZeroHpStatus::Conscious => {}
        }

        let outcome = record.stats.hit_points.take_damage(amount);
        let hp = &record.stats.hit_points;

        if outcome.dropped_to_zero {
            if record.is_player {
                record.conditions.add(Condition::Unconscious);
                record.death_saves.reset();
                Ok(format!(
                    "{} takes {} damage (HP: {}) - UNCONSCIOUS! {} falls and begins making death saving throws.",
                    record.name, amount, hp, record.name
                ))
            } else {
                record.conditions.add(Condition::Dead);
                Ok(format!(
                    "{} takes {} damage (HP: {}) and dies!",
                    record.name, amount, hp
                ))
            }
        } else {
            let status = hp
                .wound_descriptor()
                .map(|d| format!(" - {d}"))
                .unwrap_or_default();
            Ok(format!(
                "{} takes {} damage (HP: {}{})",
                record.name, amount, hp, status
            ))
        }
    }

    /// Apply healing, clamped at the maximum. Healing from 0 HP wakes
    /// the combatant and clears any pending death saves.
    pub fn apply_healing(&mut self, entity_id: CombatantId, amount: i32) -> Result<String, CombatError> {
        let record = self
            .store
            .get_mut(&entity_id)
            .ok_or(CombatError::CombatantNotFound(entity_id))?;

        if record.zero_hp_status() == ZeroHpStatus::Dead {
            return Ok(format!("{} is beyond healing.", record.name));
        }

        let was_down = record.stats.hit_points.current == 0;
        let healed = record.stats.hit_points.heal(amount);
        let hp = &record.stats.hit_points;

        if was_down && hp.current > 0 {
            record.conditions.remove(Condition::Unconscious);
            record.death_saves.reset();
            Ok(format!(
                "{} heals {} HP (HP: {}) and regains consciousness!",
                record.name, healed, hp
            ))
        } else if hp.current == hp.maximum {
            Ok(format!(
                "{} heals {} HP (HP: {} - fully healed)",
                record.name, healed, hp
            ))
        } else {
            Ok(format!("{} heals {} HP (HP: {})", record.name, healed, hp))
        }
    }

    /// Attach a condition tag. Idempotent.
    pub fn apply_condition(
        &mut self,
        entity_id: CombatantId,
        condition: Condition,
    ) -> Result<String, CombatError> {
        let record = self
            .store
            .get_mut(&entity_id)
            .ok_or(CombatError::CombatantNotFound(entity_id))?;
        Ok(if record.conditions.add(condition) {
            format!("{} is now {}", record.name, condition.name())
        } else {
            format!("{} is already {}", record.name, condition.name())
        })
    }

    /// Detach a condition tag. Idempotent.
    pub fn remove_condition(
        &mut self,
        entity_id: CombatantId,
        condition: Condition,
    ) -> Result<String, CombatError> {
        let record = self
            .store
            .get_mut(&entity_id)
            .ok_or(CombatError::CombatantNotFound(entity_id))?;
        Ok(if record.conditions.remove(condition) {
            format!("{} is no longer {}", record.name, condition.name())
        } else {
            format!("{} was not {}", record.name, condition.name())
        })
    }

    // ========================================================================
    // Death saves
    // ========================================================================

    /// Roll an unmodified d20 death save for a dying combatant.
    pub fn make_death_save(&mut self, entity_id: CombatantId) -> Result<DeathSaveResult, CombatError> {
        self.make_death_save_with_rng(entity_id, &mut rand::thread_rng())
    }

    /// `make_death_save` with a specific RNG (useful for testing).
    pub fn make_death_save_with_rng<R: Rng>(
        &mut self,
        entity_id: CombatantId,
        rng: &mut R,
    ) -> Result<DeathSaveResult, CombatError> {
        let record = self
            .store
            .get_mut(&entity_id)
            .ok_or(CombatError::CombatantNotFound(entity_id))?;

        let status = record.zero_hp_status();
        if status != ZeroHpStatus::Dying {
            return Err(CombatError::IllegalStateTransition(format!(
                "{} is not dying (status: {:?}) and cannot make a death save",
                record.name, status
            )));
        }

        let roll = rng.gen_range(1..=20);
        let outcome = record.death_saves.apply_roll(roll);

        let narrative = match outcome {
            DeathSaveOutcome::Revived => {
                record.stats.hit_points.current = 1;
                record.conditions.remove(Condition::Unconscious);
                format!(
                    "{} rolls a NATURAL 20 on the death save! They regain 1 HP and wake up!",
                    record.name
                )
            }
            DeathSaveOutcome::Stabilized => format!(
                "{} rolls {} on the death save - third success. {} is STABLE.",
                record.name, roll, record.name
            ),
            DeathSaveOutcome::Died => {
                record.conditions.add(Condition::Dead);
                format!(
                    "{} rolls {} on the death save - third failure. {} has died.",
                    record.name, roll, record.name
                )
            }
            DeathSaveOutcome::Success { successes } => format!(
                "{} rolls {} on the death save - success ({}/3)",
                record.name, roll, successes
            ),
            DeathSaveOutcome::Failure { failures } if roll == 1 => format!(
                "{} rolls a NATURAL 1 on the death save - two failures! ({}/3)",
                record.name, failures
            ),
            DeathSaveOutcome::Failure { failures } => format!(
                "{} rolls {} on the death save - failure ({}/3)",
                record.name, roll, failures
            ),
        };

        Ok(DeathSaveResult {
            roll,
            outcome,
            narrative,
        })
    }

    /// Stabilize a dying combatant without consuming a save: a passed
    /// DC 10 Medicine check or unconditional magical stabilization.
    pub fn stabilize(&mut self, entity_id: CombatantId) -> Result<String, CombatError> {
        let record = self
            .store
            .get_mut(&entity_id)
            .ok_or(CombatError::CombatantNotFound(entity_id))?;

        let status = record.zero_hp_status();
        if status != ZeroHpStatus::Dying {
            return Err(CombatError::IllegalStateTransition(format!(
                "{} is not dying (status: {:?}) and cannot be stabilized",
                record.name, status
            )));
        }

        record.death_saves.stabilize();
        Ok(format!(
            "{} is stabilized - unconscious but no longer dying.",
            record.name
        ))
    }

    // ========================================================================
    // Hazards
    // ========================================================================

    /// Execute a hazard descriptor against one combatant through the
    /// standard save and damage primitives.
    pub fn resolve_hazard(
        &mut self,
        target_id: CombatantId,
        hazard: &HazardEffect,
    ) -> Result<HazardResult, CombatError> {
        self.resolve_hazard_with_rng(target_id, hazard, &mut rand::thread_rng())
    }

    /// `resolve_hazard` with a specific RNG (useful for testing).
    pub fn resolve_hazard_with_rng<R: Rng>(
        &mut self,
        target_id: CombatantId,
        hazard: &HazardEffect,
        rng: &mut R,
    ) -> Result<HazardResult, CombatError> {
        let expr = DamageExpression::parse(&hazard.dice)?;

        let save = match (hazard.save_dc, hazard.save_ability) {
            (Some(dc), Some(ability)) => Some(self.make_saving_throw_with_rng(
                target_id,
                ability,
                dc,
                SaveOptions::default(),
                rng,
            )?),
            _ => {
                // Still validate the target before rolling anything.
                self.record(target_id)?;
                None
            }
        };

        let rolled = expr.roll_with_rng(false, rng);
        let damage_applied = match &save {
            Some(s) if s.success && hazard.save_halves => rolled.total / 2,
            Some(s) if s.success => 0,
            _ => rolled.total,
        };

        let mut narrative = format!("{} ({}):", hazard.name, hazard.dice);
        if let Some(s) = &save {
            narrative.push(' ');
            narrative.push_str(&s.narrative);
            narrative.push('.');
        }
        if damage_applied > 0 {
            let applied = self.damage_impl(target_id, damage_applied, false)?;
            narrative.push(' ');
            narrative.push_str(&applied);
        } else {
            let name = &self.record(target_id)?.name;
            narrative.push_str(&format!(" {name} takes no damage."));
        }

        Ok(HazardResult {
            save,
            rolled,
            damage_applied,
            narrative,
        })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The full record for a combatant in the current encounter.
    pub fn record(&self, entity_id: CombatantId) -> Result<&CombatantRecord, CombatError> {
        self.store
            .get(&entity_id)
            .ok_or(CombatError::CombatantNotFound(entity_id))
    }

    pub fn zero_hp_status(&self, entity_id: CombatantId) -> Result<ZeroHpStatus, CombatError> {
        Ok(self.record(entity_id)?.zero_hp_status())
    }

    pub fn is_dying(&self, entity_id: CombatantId) -> Result<bool, CombatError> {
        Ok(self.zero_hp_status(entity_id)? == ZeroHpStatus::Dying)
    }

    pub fn is_dead(&self, entity_id: CombatantId) -> Result<bool, CombatError> {
        Ok(self.zero_hp_status(entity_id)? == ZeroHpStatus::Dead)
    }

    pub fn is_unconscious(&self, entity_id: CombatantId) -> Result<bool, CombatError> {
        Ok(self
            .record(entity_id)?
            .conditions
            .has(Condition::Unconscious))
    }

    /// Human-readable status block for the whole encounter.
    pub fn get_summary(&self) -> String {
        let Some(encounter) = &self.encounter else {
            return "No combat in progress".to_string();
        };
        let mut lines = vec![format!("Round {} - initiative order:", encounter.round)];
        for (index, participant) in encounter.participants().iter().enumerate() {
            let marker = if index == encounter.turn_index { ">" } else { " " };
            let detail = match self.store.get(&participant.id) {
                Some(record) => {
                    let conditions = if record.conditions.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", record.conditions.names().join(", "))
                    };
                    format!("HP {}{}", record.stats.hit_points, conditions)
                }
                None => "unknown".to_string(),
            };
            lines.push(format!(
                "{} {} (initiative {}) - {}",
                marker, participant.name, participant.initiative, detail
            ));
        }
        lines.join("\n")
    }
}

impl Default for CombatEngine {
    fn default() -> Self {
        Self::new()
    }
}
