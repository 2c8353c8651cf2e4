//! Units and the skills they attack with
//!
//! A unit's position is owned by the field: callers set it once at
//! construction and only `BattleField` moves it afterwards.

use serde::{Deserialize, Serialize};

use crate::core::types::{Faction, Position};

/// Attack descriptor shared between units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Flat damage dealt on hit
    pub power: i32,
    /// Maximum Manhattan distance to the target
    pub range: u32,
}

impl Skill {
    pub fn new(name: impl Into<String>, power: i32, range: u32) -> Self {
        Self {
            name: name.into(),
            power,
            range,
        }
    }

    /// Can this skill reach a target `distance` cells away?
    pub fn reaches(&self, distance: u32) -> bool {
        distance <= self.range
    }
}

/// A combatant on the battle field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    pub faction: Faction,
    pub hp: i32,
    /// Only used to compute the initial turn order
    pub speed: u32,
    position: Position,
    pub skills: Vec<Skill>,
}

impl Unit {
    pub fn new(
        name: impl Into<String>,
        faction: Faction,
        hp: i32,
        speed: u32,
        position: impl Into<Position>,
        skills: Vec<Skill>,
    ) -> Self {
        Self {
            name: name.into(),
            faction,
            hp,
            speed,
            position: position.into(),
            skills,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Builder-style override of the starting cell, before placement
    pub fn at(mut self, position: impl Into<Position>) -> Self {
        self.position = position.into();
        self
    }

    pub(in crate::battle) fn relocate(&mut self, position: Position) {
        self.position = position;
    }

    /// Skill used when an attack names none
    pub fn primary_skill(&self) -> Option<&Skill> {
        self.skills.first()
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtract damage; returns true if the unit dropped to zero or below
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        !self.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slash() -> Skill {
        Skill::new("Slash", 10, 1)
    }

    #[test]
    fn test_skill_reach_boundary() {
        let skill = Skill::new("Fireball", 8, 2);
        assert!(skill.reaches(2));
        assert!(!skill.reaches(3));
    }

    #[test]
    fn test_unit_creation() {
        let unit = Unit::new("Hero", Faction::Player, 30, 5, (5, 2), vec![slash()]);
        assert_eq!(unit.position(), Position::new(5, 2));
        assert_eq!(unit.primary_skill().map(|s| s.name.as_str()), Some("Slash"));
        assert!(unit.is_alive());
    }

    #[test]
    fn test_take_damage_to_exactly_zero_is_lethal() {
        let mut unit = Unit::new("Goblin", Faction::Enemy, 10, 4, (0, 0), vec![slash()]);
        assert!(unit.take_damage(10));
        assert_eq!(unit.hp, 0);
    }

    #[test]
    fn test_take_damage_leaving_one_hp_survives() {
        let mut unit = Unit::new("Goblin", Faction::Enemy, 11, 4, (0, 0), vec![slash()]);
        assert!(!unit.take_damage(10));
        assert_eq!(unit.hp, 1);
    }

    #[test]
    fn test_at_overrides_position() {
        let unit = Unit::new("Orc", Faction::Enemy, 35, 3, (0, 3), vec![slash()]).at((5, 3));
        assert_eq!(unit.position(), Position::new(5, 3));
    }
}
