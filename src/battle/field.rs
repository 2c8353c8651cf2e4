//! Battle field: a fixed grid with obstacles and one-unit-per-cell occupancy
//!
//! The field never looks at combat semantics. It owns the live units keyed
//! by id and keeps the position index in lockstep with each unit's stored
//! position.

use std::collections::BTreeMap;

use ahash::{AHashMap, AHashSet};

use crate::battle::units::Unit;
use crate::core::config::BattleConfig;
use crate::core::error::{BattleError, Result};
use crate::core::types::{Faction, Position, UnitId};

/// The full battle field
#[derive(Debug, Clone)]
pub struct BattleField {
    width: i32,
    height: i32,
    player_base: Position,
    enemy_base: Position,
    obstacles: AHashSet<Position>,
    units: BTreeMap<UnitId, Unit>,
    occupancy: AHashMap<Position, UnitId>,
    next_id: u32,
}

impl Default for BattleField {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

impl BattleField {
    /// Create an empty field with the default layout
    pub fn new(obstacles: impl IntoIterator<Item = Position>) -> Self {
        Self::with_config(&BattleConfig::default(), obstacles)
    }

    /// Create an empty field using the geometry from `config`
    pub fn with_config(config: &BattleConfig, obstacles: impl IntoIterator<Item = Position>) -> Self {
        Self {
            width: config.width,
            height: config.height,
            player_base: config.player_base,
            enemy_base: config.enemy_base,
            obstacles: obstacles.into_iter().collect(),
            units: BTreeMap::new(),
            occupancy: AHashMap::new(),
            next_id: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Cell the enemy must hold to accrue base control
    pub fn player_base(&self) -> Position {
        self.player_base
    }

    /// Cell the player must hold to accrue base control
    pub fn enemy_base(&self) -> Position {
        self.enemy_base
    }

    /// Base cell belonging to `faction`
    pub fn base_of(&self, faction: Faction) -> Position {
        match faction {
            Faction::Player => self.player_base,
            Faction::Enemy => self.enemy_base,
        }
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    /// Obstacle cells, sorted for stable output
    pub fn obstacles(&self) -> Vec<Position> {
        let mut cells: Vec<Position> = self.obstacles.iter().copied().collect();
        cells.sort();
        cells
    }

    /// Check if a cell is within grid bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// In bounds, not an obstacle and not occupied
    pub fn can_enter(&self, pos: Position) -> bool {
        self.in_bounds(pos) && !self.is_obstacle(pos) && !self.occupancy.contains_key(&pos)
    }

    /// Id of the unit standing on `pos`, if any
    pub fn unit_at(&self, pos: Position) -> Option<UnitId> {
        self.occupancy.get(&pos).copied()
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub(in crate::battle) fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    /// Every placed unit, in placement order
    pub fn all_units(&self) -> Vec<UnitId> {
        self.units.keys().copied().collect()
    }

    /// Iterate placed units with their ids, in placement order
    pub fn units(&self) -> impl Iterator<Item = (UnitId, &Unit)> {
        self.units.iter().map(|(id, unit)| (*id, unit))
    }

    /// Ids of every placed unit belonging to `faction`
    pub fn units_of(&self, faction: Faction) -> Vec<UnitId> {
        self.units()
            .filter(|(_, unit)| unit.faction == faction)
            .map(|(id, _)| id)
            .collect()
    }

    /// Does `faction` have any unit left on the field?
    pub fn has_faction(&self, faction: Faction) -> bool {
        self.units.values().any(|unit| unit.faction == faction)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Place a unit at its stored position and return its new id
    pub fn add_unit(&mut self, unit: Unit) -> Result<UnitId> {
        let pos = unit.position();
        if !self.can_enter(pos) {
            return Err(BattleError::OccupiedOrOutOfBounds(pos));
        }

        let id = UnitId::new(self.next_id);
        self.next_id += 1;
        self.occupancy.insert(pos, id);
        self.units.insert(id, unit);
        Ok(id)
    }

    /// Move a unit to `new_pos`; nothing changes if the move is rejected
    pub fn move_unit(&mut self, id: UnitId, new_pos: Position) -> Result<()> {
        if !self.can_enter(new_pos) {
            return Err(BattleError::OccupiedOrOutOfBounds(new_pos));
        }
        let unit = self
            .units
            .get_mut(&id)
            .ok_or(BattleError::UnitNotOnField(id))?;

        self.occupancy.remove(&unit.position());
        unit.relocate(new_pos);
        self.occupancy.insert(new_pos, id);
        Ok(())
    }

    /// Take a unit off the field. Removing an absent unit is a no-op.
    pub fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        let unit = self.units.remove(&id)?;
        self.occupancy.remove(&unit.position());
        Some(unit)
    }

    /// Units sorted by speed, fastest first; ties keep placement order
    pub fn turn_order(&self) -> Vec<UnitId> {
        let mut order: Vec<(UnitId, u32)> = self.units().map(|(id, unit)| (id, unit.speed)).collect();
        // sort_by is stable
        order.sort_by(|a, b| b.1.cmp(&a.1));
        order.into_iter().map(|(id, _)| id).collect()
    }

    /// Occupancy index and stored unit positions describe the same bijection
    pub fn is_consistent(&self) -> bool {
        if self.occupancy.len() != self.units.len() {
            return false;
        }
        self.units.iter().all(|(id, unit)| {
            let pos = unit.position();
            self.occupancy.get(&pos) == Some(id) && self.in_bounds(pos) && !self.is_obstacle(pos)
        })
    }
}
