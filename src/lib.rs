//! Combat resolution engine for an AI-assisted tabletop RPG.
//!
//! This crate owns the rules that a combat turn mutates:
//! - Turn/initiative state machine with round tracking
//! - Attack and saving-throw resolution
//! - The condition system that bends those rolls
//! - The hit-point damage/healing lifecycle
//! - The death-save state machine for combatants at 0 HP
//!
//! Character construction, encounter budgeting, hazard catalogs, and
//! narration live outside the engine and talk to it through plain
//! function calls. The engine is synchronous and single-session: one
//! `CombatEngine` per logical game session, serialized by the caller.
//!
//! # Quick Start
//!
//! ```
//! use combat_core::{AttackOptions, CombatEngine, CombatantId, CombatantSetup, CombatantStats};
//!
//! let mut engine = CombatEngine::new();
//! let hero = CombatantId::new();
//! let wolf = CombatantId::new();
//! engine.start_combat(vec![
//!     CombatantSetup {
//!         id: hero,
//!         name: "Aria".into(),
//!         is_player: true,
//!         stats: CombatantStats::default(),
//!         initiative_bonus: None,
//!     },
//!     CombatantSetup {
//!         id: wolf,
//!         name: "Wolf".into(),
//!         is_player: false,
//!         stats: CombatantStats::default(),
//!         initiative_bonus: Some(2),
//!     },
//! ]);
//!
//! let attack = engine.make_attack(hero, wolf, 5, "1d8+3", "slashing", AttackOptions::default())?;
//! if let Some(damage) = &attack.damage {
//!     engine.apply_damage_from_attack(wolf, damage.total, attack.is_critical)?;
//! }
//! println!("{}", attack.narrative);
//! # Ok::<(), combat_core::CombatError>(())
//! ```

pub mod combatant;
pub mod conditions;
pub mod death;
pub mod dice;
pub mod encounter;
pub mod engine;

// Re-export the primary public API.
pub use combatant::{
    Ability, AbilityScores, CombatantId, CombatantRecord, CombatantStats, HitPoints,
};
pub use conditions::{Condition, ConditionEffects, ConditionRegistry, ConditionSet};
pub use death::{DeathSaveOutcome, DeathSaves, ZeroHpStatus};
pub use dice::{Advantage, D20Roll, DamageExpression, DamageRoll, DiceError};
pub use encounter::{CombatEncounter, CombatParticipant, TurnAdvance};
pub use engine::{
    AttackOptions, AttackResult, CombatEngine, CombatError, CombatantSetup, CritRule,
    DeathSaveResult, HazardEffect, HazardResult, SaveOptions, SavingThrowResult,
};
