//! End-to-end combat flow through the public API: initiative, attacks,
//! the dying arc, and the sync-back contract at the end of the
//! encounter.

use combat_core::{
    Ability, AbilityScores, AttackOptions, CombatEngine, CombatantId, CombatantRecord,
    CombatantSetup, CombatantStats, Condition, SaveOptions, TurnAdvance, ZeroHpStatus,
};

fn fighter(name: &str, id: CombatantId) -> CombatantSetup {
    let mut stats = CombatantStats::new(AbilityScores::new(16, 14, 14, 10, 12, 8), 16, 24);
    stats.proficiency_bonus = Some(2);
    CombatantSetup {
        id,
        name: name.to_string(),
        is_player: true,
        stats,
        initiative_bonus: None,
    }
}

fn orc(name: &str, id: CombatantId) -> CombatantSetup {
    CombatantSetup {
        id,
        name: name.to_string(),
        is_player: false,
        stats: CombatantStats::new(AbilityScores::new(16, 12, 16, 7, 11, 10), 13, 15),
        initiative_bonus: Some(1),
    }
}

#[test]
fn full_encounter_runs_to_a_kill_and_syncs_back() {
    let mut engine = CombatEngine::new();
    let hero = CombatantId::new();
    let enemy = CombatantId::new();

    let encounter = engine.start_combat(vec![fighter("Roland", hero), orc("Orc", enemy)]);
    assert!(encounter.active);
    assert_eq!(encounter.round, 1);
    assert_eq!(encounter.participants().len(), 2);
    assert!(engine.current_participant().is_some());

    // Hammer the orc until it drops. Hit points only ever move between
    // the clamps, whatever the dice decide.
    let mut rounds = 0;
    while !engine.is_dead(enemy).unwrap() {
        let attack = engine
            .make_attack(hero, enemy, 5, "1d8+3", "slashing", AttackOptions::default())
            .unwrap();
        assert_eq!(attack.target_ac, 13);
        if let Some(damage) = &attack.damage {
            assert!(attack.hits);
            engine
                .apply_damage_from_attack(enemy, damage.total, attack.is_critical)
                .unwrap();
        } else {
            assert!(!attack.hits);
        }

        let record = engine.record(enemy).unwrap();
        assert!(record.stats.hit_points.current >= 0);
        assert!(record.stats.hit_points.current <= record.stats.hit_points.maximum);

        rounds += 1;
        assert!(rounds < 1000, "the orc must eventually fall");
    }

    // A dead monster is skipped by the turn engine; only the hero acts.
    for _ in 0..3 {
        match engine.next_turn().unwrap() {
            TurnAdvance::Turn { participant, .. } => assert_eq!(participant.id, hero),
            other => panic!("unexpected advance result: {other:?}"),
        }
    }

    let records = engine.end_combat();
    assert_eq!(records.len(), 2);
    let enemy_record = records.iter().find(|r| r.id == enemy).unwrap();
    assert_eq!(enemy_record.stats.hit_points.current, 0);
    assert!(enemy_record.conditions.has(Condition::Dead));
    assert!(engine.encounter().is_none());
}

#[test]
fn dying_hero_can_be_stabilized_and_healed() {
    let mut engine = CombatEngine::new();
    let hero = CombatantId::new();
    let enemy = CombatantId::new();
    engine.start_combat(vec![fighter("Roland", hero), orc("Orc", enemy)]);

    engine.apply_damage(hero, 23).unwrap();
    engine.apply_damage(hero, 1).unwrap();
    assert_eq!(engine.zero_hp_status(hero).unwrap(), ZeroHpStatus::Dying);
    assert!(engine.is_unconscious(hero).unwrap());

    // A successful Medicine check from an ally stabilizes without a save.
    engine.stabilize(hero).unwrap();
    assert_eq!(engine.zero_hp_status(hero).unwrap(), ZeroHpStatus::Stable);

    // Stable is not conscious: the turn engine still skips the hero and
    // lands on the orc.
    match engine.next_turn().unwrap() {
        TurnAdvance::Turn { participant, .. } => assert_eq!(participant.id, enemy),
        other => panic!("unexpected advance result: {other:?}"),
    }

    engine.apply_healing(hero, 6).unwrap();
    assert_eq!(engine.zero_hp_status(hero).unwrap(), ZeroHpStatus::Conscious);
    assert!(!engine.is_unconscious(hero).unwrap());

    match engine.next_turn().unwrap() {
        TurnAdvance::Turn { participant, .. } => assert!(participant.id == hero || participant.id == enemy),
        other => panic!("unexpected advance result: {other:?}"),
    }
}

#[test]
fn saving_throws_respect_conditions_across_the_flow() {
    let mut engine = CombatEngine::new();
    let hero = CombatantId::new();
    let enemy = CombatantId::new();
    engine.start_combat(vec![fighter("Roland", hero), orc("Orc", enemy)]);

    engine.apply_condition(enemy, Condition::Paralyzed).unwrap();

    let save = engine
        .make_saving_throw(enemy, Ability::Strength, 14, SaveOptions::default())
        .unwrap();
    assert!(save.auto_failed);
    assert_eq!(save.roll.value, 1);

    engine.remove_condition(enemy, Condition::Paralyzed).unwrap();
    let save = engine
        .make_saving_throw(enemy, Ability::Strength, 14, SaveOptions::default())
        .unwrap();
    assert!(!save.auto_failed);
}

#[test]
fn records_round_trip_through_serde() {
    let mut engine = CombatEngine::new();
    let hero = CombatantId::new();
    let enemy = CombatantId::new();
    engine.start_combat(vec![fighter("Roland", hero), orc("Orc", enemy)]);

    engine.apply_damage(hero, 9).unwrap();
    engine.apply_condition(hero, Condition::Prone).unwrap();

    // The caller persists the records it gets back; they survive a
    // JSON round trip intact.
    let records = engine.end_combat();
    let json = serde_json::to_string(&records).unwrap();
    let restored: Vec<CombatantRecord> = serde_json::from_str(&json).unwrap();

    let hero_record = restored.iter().find(|r| r.id == hero).unwrap();
    assert_eq!(hero_record.stats.hit_points.current, 15);
    assert!(hero_record.conditions.has(Condition::Prone));
    assert_eq!(hero_record.zero_hp_status(), ZeroHpStatus::Conscious);
}
