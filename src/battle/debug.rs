//! Debug helpers for manipulating a running battle
//!
//! Built only on the engine's public operations; nothing here reaches into
//! engine internals.

use crate::battle::engine::BattleEngine;
use crate::core::types::{Faction, UnitId};

pub struct DebugPanel<'a> {
    engine: &'a mut BattleEngine,
}

impl<'a> DebugPanel<'a> {
    pub fn new(engine: &'a mut BattleEngine) -> Self {
        Self { engine }
    }

    /// Skip the current unit's turn
    pub fn skip_turn(&mut self) -> Option<UnitId> {
        self.engine.skip_turn()
    }

    /// Remove every unit opposing `side`, then end the battle in its favour
    pub fn force_win(&mut self, side: Faction) {
        if self.engine.is_concluded() {
            return;
        }
        for id in self.engine.field().units_of(side.opponent()) {
            self.engine.withdraw_unit(id);
        }
        tracing::debug!("Debug force win for {}", side);
        self.engine.end_battle(side == Faction::Player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::roster::demo_roster;

    #[test]
    fn test_skip_turn_passes_for_next_unit() {
        let (players, enemies) = demo_roster();
        let mut engine = BattleEngine::start_battle(players, enemies, []).unwrap();

        let skipped = DebugPanel::new(&mut engine).skip_turn();
        assert_eq!(skipped, engine.unit_named("Mage"));
        assert_eq!(engine.log().last(), Some("Mage passed"));
    }

    #[test]
    fn test_force_win_clears_opponents() {
        let (players, enemies) = demo_roster();
        let mut engine = BattleEngine::start_battle(players, enemies, []).unwrap();

        DebugPanel::new(&mut engine).force_win(Faction::Enemy);

        assert!(!engine.field().has_faction(Faction::Player));
        assert!(engine.graveyard().is_empty());
        assert_eq!(engine.check_victory(), Some(Faction::Enemy));
        assert_eq!(engine.log().last(), Some("enemy wins!"));
        assert!(engine.turn_order().is_empty());
    }
}
