//! Demo roster used by the CLI and tests
//!
//! Two players on the east side, two enemies on the west.

use crate::battle::units::{Skill, Unit};
use crate::core::types::Faction;

pub fn slash() -> Skill {
    Skill::new("Slash", 10, 1)
}

pub fn fireball() -> Skill {
    Skill::new("Fireball", 8, 2)
}

/// Player and enemy units with their starting cells
///
/// Speed order: Mage (7) > Hero (5) > Goblin (4) > Orc (3).
pub fn demo_roster() -> (Vec<Unit>, Vec<Unit>) {
    let players = vec![
        Unit::new("Hero", Faction::Player, 30, 5, (5, 2), vec![slash()]),
        Unit::new("Mage", Faction::Player, 20, 7, (6, 1), vec![fireball()]),
    ];
    let enemies = vec![
        Unit::new("Goblin", Faction::Enemy, 25, 4, (1, 2), vec![slash()]),
        Unit::new("Orc", Faction::Enemy, 35, 3, (0, 3), vec![slash()]),
    ];
    (players, enemies)
}
