//! Integration tests for attack-direction classification and cover
//! detection feeding the combat multiplier math.

use skirmish::{
    classify_attack_direction, cover_bonus, detect_cover, evasion_after_hit_check,
    AttackDirection, BattleMap, CoverBonus, CoverStrength, Direction, DirectionModifierConfig,
    GridBounds, Position, Side, SkillTargeting,
};

#[test]
fn test_flank_attack_full_multiplier_chain() {
    // defender at (5, 5) facing south, attacker striking from the east
    let assessment = classify_attack_direction(
        Position::new(8, 5),
        Position::new(5, 5),
        Direction::South,
        false,
    );
    assert_eq!(assessment.direction, AttackDirection::Side);
    assert_eq!(assessment.attacker_facing, Direction::West);
    assert_eq!(assessment.defender_turn(), Direction::East);

    let config = DirectionModifierConfig::default();
    assert_eq!(config.hit_multiplier(assessment.direction, &[]), 1.2);
    assert_eq!(config.damage_multiplier(assessment.direction, &[]), 1.2);
    assert_eq!(config.evasion_multiplier(assessment.direction), 0.8);
}

#[test]
fn test_backstab_with_skill_and_status_bonuses() {
    let assessment = classify_attack_direction(
        Position::new(5, 2),
        Position::new(5, 5),
        Direction::South,
        false,
    );
    assert_eq!(assessment.direction, AttackDirection::Back);

    let skill = SkillTargeting::from_json(
        r#"{
            "name": "Assassinate",
            "direction_bonus": { "back_damage": 0.5, "back_hit": 0.1 }
        }"#,
    )
    .expect("Failed to load skill configuration");
    let bonus = skill
        .direction_bonus
        .expect("Skill should carry a direction bonus");

    let config = DirectionModifierConfig::default();
    let stack = [bonus];
    assert_eq!(config.damage_multiplier(assessment.direction, &stack), 1.9);
    assert_eq!(config.hit_multiplier(assessment.direction, &stack), 1.5);
    // evasion stays on the base table regardless of bonuses
    assert_eq!(config.evasion_multiplier(assessment.direction), 0.6);
}

#[test]
fn test_certain_hit_disables_evasion_entirely() {
    let config = DirectionModifierConfig::default();
    let base_hit = 0.75;
    let modified = base_hit * config.hit_multiplier(AttackDirection::Back, &[]);
    assert!(modified >= 1.0);
    assert_eq!(evasion_after_hit_check(0.25, modified), 0.0);

    let frontal = base_hit * config.hit_multiplier(AttackDirection::Front, &[]);
    assert_eq!(evasion_after_hit_check(0.25, frontal), 0.25);
}

#[test]
fn test_direction_agnostic_skill_stays_frontal_from_behind() {
    let skill = SkillTargeting::from_json(
        r#"{ "name": "Curse", "ignores_direction": true }"#,
    )
    .expect("Failed to load skill configuration");

    let assessment = classify_attack_direction(
        Position::new(5, 2),
        Position::new(5, 5),
        Direction::South,
        skill.ignores_direction,
    );
    assert_eq!(assessment.direction, AttackDirection::Front);

    let config = DirectionModifierConfig::default();
    assert_eq!(config.damage_multiplier(assessment.direction, &[]), 1.0);
}

#[test]
fn test_healing_an_ally_from_behind_takes_no_modifier() {
    // a healer standing behind a south-facing ally
    let assessment = classify_attack_direction(
        Position::new(5, 2),
        Position::new(5, 5),
        Direction::South,
        false,
    );
    assert_eq!(assessment.direction, AttackDirection::Back);

    let graded = assessment.modifier_direction(Side::Ally, Side::Ally);
    assert_eq!(graded, AttackDirection::Front);

    let config = DirectionModifierConfig::default();
    assert_eq!(config.hit_multiplier(graded, &[]), 1.0);
    assert_eq!(config.damage_multiplier(graded, &[]), 1.0);
    assert_eq!(config.evasion_multiplier(graded), 1.0);

    // the same geometry against an enemy keeps the backstab grade
    let hostile = assessment.modifier_direction(Side::Ally, Side::Enemy);
    assert_eq!(config.damage_multiplier(hostile, &[]), 1.4);
}

#[test]
fn test_cover_between_attacker_and_defender_grants_bonus() {
    let mut map = BattleMap::new(GridBounds::new(20, 20));
    // attacker due north, cover tile directly between the two
    map.set_cover(Position::new(5, 6), CoverStrength::Medium);
    let attacker = Position::new(5, 9);
    let defender = Position::new(5, 5);

    // the attack arrives from the south, so the tile south of the
    // defender shields it
    let found = detect_cover(&map, attacker, defender);
    assert_eq!(found, Some((Position::new(5, 6), CoverStrength::Medium)));

    let bonus = cover_bonus(&map, attacker, defender);
    assert_eq!(bonus.damage_mult, 0.85);
    assert_eq!(bonus.evasion_mult, 1.07);
    assert_eq!(bonus.attacker_hit_mult, 0.85);
}

#[test]
fn test_perpendicular_cover_grants_nothing() {
    let mut map = BattleMap::new(GridBounds::new(20, 20));
    map.set_cover(Position::new(6, 5), CoverStrength::Heavy);
    let bonus = cover_bonus(&map, Position::new(5, 0), Position::new(5, 5));
    assert_eq!(bonus, CoverBonus::NEUTRAL);
}

#[test]
fn test_cover_tiles_refuse_movement_but_grant_protection() {
    let mut map = BattleMap::new(GridBounds::new(20, 20));
    let tile = Position::new(5, 4);
    map.set_cover(tile, CoverStrength::Light);

    assert!(!map.is_valid_destination(tile));
    assert!(map.is_valid_destination(Position::new(5, 5)));

    let found = detect_cover(&map, Position::new(5, 0), Position::new(5, 5));
    assert_eq!(found, Some((tile, CoverStrength::Light)));
}

#[test]
fn test_flanking_around_cover_bypasses_it() {
    let mut map = BattleMap::new(GridBounds::new(20, 20));
    map.set_cover(Position::new(5, 4), CoverStrength::Heavy);
    let defender = Position::new(5, 5);

    // head on, the cover shields
    assert!(detect_cover(&map, Position::new(5, 0), defender).is_some());
    // from the opposite side the same tile is behind the defender
    assert!(detect_cover(&map, Position::new(5, 9), defender).is_none());
}
