//! Automated opponent policy
//!
//! Chase the nearest opposing unit: attack with the first skill when in
//! range, otherwise step toward it along x, then along y, else pass.
//! No pathfinding beyond that single step.

use crate::battle::actions::Action;
use crate::battle::field::BattleField;
use crate::core::types::{Position, UnitId};

/// Nearest opposing unit by Manhattan distance; ties go to placement order
pub fn nearest_opponent(field: &BattleField, unit_id: UnitId) -> Option<UnitId> {
    let unit = field.unit(unit_id)?;
    let origin = unit.position();
    let opponent = unit.faction.opponent();

    field
        .units()
        .filter(|(_, other)| other.faction == opponent)
        .min_by_key(|(_, other)| origin.distance(&other.position()))
        .map(|(id, _)| id)
}

/// First enterable single step from `from` toward `to`, x axis first
pub fn approach_step(field: &BattleField, from: Position, to: Position) -> Option<(i32, i32)> {
    let dx = (to.x - from.x).signum();
    let dy = (to.y - from.y).signum();

    [(dx, 0), (0, dy)]
        .into_iter()
        .filter(|&(sx, sy)| sx != 0 || sy != 0)
        .find(|&(sx, sy)| field.can_enter(from.offset(sx, sy)))
}

/// Pick the action the policy would take for `unit_id`
///
/// Returns `None` when the unit is not on the field or has nobody left to
/// fight.
pub fn choose_action(field: &BattleField, unit_id: UnitId) -> Option<Action> {
    let unit = field.unit(unit_id)?;
    let target_id = nearest_opponent(field, unit_id)?;
    let target = field.unit(target_id)?;

    let distance = unit.position().distance(&target.position());
    if unit.primary_skill().is_some_and(|skill| skill.reaches(distance)) {
        return Some(Action::attack(target_id));
    }

    match approach_step(field, unit.position(), target.position()) {
        Some((dx, dy)) => Some(Action::step(dx, dy)),
        None => Some(Action::Pass),
    }
}
