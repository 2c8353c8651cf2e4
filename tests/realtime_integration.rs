//! Real-time step integration tests
//!
//! Player commands resolve first, then every enemy acts on the opponent
//! policy within the same step.

use grid_skirmish::battle::*;
use grid_skirmish::core::types::{Faction, Position};

fn close_quarters() -> BattleEngine {
    let (mut players, mut enemies) = demo_roster();
    players[0].hp = 50;
    enemies[0] = enemies[0].clone().at((4, 2));
    enemies[0].hp = 20;
    enemies[1] = enemies[1].clone().at((5, 3));
    enemies[1].hp = 20;
    BattleEngine::start_battle(players, enemies, []).unwrap()
}

fn hp(engine: &BattleEngine, name: &str) -> Option<i32> {
    engine.battle_status().by_name(name).map(|unit| unit.hp)
}

#[test]
fn test_real_time_combat_to_victory() {
    let mut engine = close_quarters();
    let hero = engine.unit_named("Hero").unwrap();
    let goblin = engine.unit_named("Goblin").unwrap();
    let orc = engine.unit_named("Orc").unwrap();

    engine.real_time_step([(hero, Action::attack(goblin))]);
    assert_eq!(hp(&engine, "Goblin"), Some(10));
    assert_eq!(hp(&engine, "Hero"), Some(30));

    engine.real_time_step([(hero, Action::attack(goblin))]);
    assert_eq!(hp(&engine, "Goblin"), None);
    assert!(engine.is_in_graveyard(goblin));
    assert_eq!(hp(&engine, "Hero"), Some(20));

    engine.real_time_step([(hero, Action::attack(orc))]);
    assert_eq!(hp(&engine, "Orc"), Some(10));
    assert_eq!(hp(&engine, "Hero"), Some(10));

    engine.real_time_step([(hero, Action::attack(orc))]);
    let status = engine.battle_status();
    assert_eq!(status.winner, Some(Faction::Player));
    assert_eq!(status.by_name("Hero").unwrap().hp, 10);
    assert!(engine.is_concluded());
}

#[test]
fn test_enemies_close_distance_without_commands() {
    let (players, enemies) = demo_roster();
    let mut engine = BattleEngine::start_battle(players, enemies, []).unwrap();
    let goblin = engine.unit_named("Goblin").unwrap();
    let orc = engine.unit_named("Orc").unwrap();

    engine.real_time_step(Vec::new());

    assert_eq!(engine.field().unit(goblin).unwrap().position(), Position::new(2, 2));
    assert_eq!(engine.field().unit(orc).unwrap().position(), Position::new(1, 3));
    let lines: Vec<&str> = engine.turn_logs().collect();
    assert_eq!(lines, vec!["Goblin moved to (2, 2)", "Orc moved to (1, 3)"]);
}

#[test]
fn test_blocked_enemy_passes() {
    // goblin boxed in at the west edge, hero far away
    let hero = Unit::new("Hero", Faction::Player, 30, 5, (6, 4), vec![roster::slash()]);
    let goblin = Unit::new("Goblin", Faction::Enemy, 25, 4, (0, 0), vec![roster::slash()]);
    let mut engine =
        BattleEngine::start_battle(vec![hero], vec![goblin], [Position::new(1, 0), Position::new(0, 1)])
            .unwrap();

    engine.real_time_step(Vec::new());

    assert_eq!(engine.log().last(), Some("Goblin passed"));
    assert!(!engine.is_concluded());
}

#[test]
fn test_commands_for_enemies_and_passives_are_dropped() {
    let mut engine = close_quarters();
    let hero = engine.unit_named("Hero").unwrap();
    let goblin = engine.unit_named("Goblin").unwrap();

    engine.real_time_step([
        (goblin, Action::step(-1, 0)),
        (hero, Action::Surrender),
        (hero, Action::Pass),
    ]);

    assert!(!engine.is_concluded());
    let lines: Vec<&str> = engine.turn_logs().collect();
    assert_eq!(
        lines,
        vec![
            "Goblin used Slash on Hero for 10 damage",
            "Orc used Slash on Hero for 10 damage",
        ]
    );
}

#[test]
fn test_step_after_conclusion_is_noop() {
    let mut engine = close_quarters();
    let hero = engine.unit_named("Hero").unwrap();
    engine.end_battle(false);
    let logged = engine.log().len();

    engine.real_time_step([(hero, Action::step(0, 1))]);

    assert_eq!(engine.log().len(), logged);
    assert_eq!(hp(&engine, "Hero"), Some(50));
}

#[test]
fn test_real_time_does_not_advance_cursor() {
    let mut engine = close_quarters();
    let hero = engine.unit_named("Hero").unwrap();

    engine.real_time_step([(hero, Action::Pass)]);

    assert_eq!(engine.cursor(), 0);
    assert_eq!(engine.next_unit(), engine.unit_named("Mage"));
}

#[test]
fn test_one_command_per_unit_per_step() {
    let (players, enemies) = demo_roster();
    let mut engine = BattleEngine::start_battle(players, enemies, []).unwrap();
    let hero = engine.unit_named("Hero").unwrap();

    engine.real_time_step([
        (hero, Action::step(-1, 0)),
        (hero, Action::step(-1, 0)),
        (hero, Action::step(0, 1)),
    ]);

    assert_eq!(engine.field().unit(hero).unwrap().position(), Position::new(4, 2));
    let hero_lines = engine
        .turn_logs()
        .filter(|line| line.starts_with("Hero"))
        .count();
    assert_eq!(hero_lines, 1);
}

#[test]
fn test_first_command_for_a_unit_wins() {
    // an ignored pass still uses up the hero's command for this step
    let (players, enemies) = demo_roster();
    let mut engine = BattleEngine::start_battle(players, enemies, []).unwrap();
    let hero = engine.unit_named("Hero").unwrap();

    engine.real_time_step([(hero, Action::Pass), (hero, Action::step(-1, 0))]);

    assert_eq!(engine.field().unit(hero).unwrap().position(), Position::new(5, 2));
    assert!(engine.turn_logs().all(|line| !line.starts_with("Hero")));
}
