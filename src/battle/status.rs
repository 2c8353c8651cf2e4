//! Point-in-time battle snapshot for presentation and debug layers

use serde::{Deserialize, Serialize};

use crate::core::types::{Faction, Position, UnitId};

/// Hit points and side of one unit still on the field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStatus {
    pub id: UnitId,
    pub name: String,
    pub hp: i32,
    pub faction: Faction,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStatus {
    pub units: Vec<UnitStatus>,
    pub winner: Option<Faction>,
}

impl BattleStatus {
    pub fn unit(&self, id: UnitId) -> Option<&UnitStatus> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Look a unit up by display name (first match)
    pub fn by_name(&self, name: &str) -> Option<&UnitStatus> {
        self.units.iter().find(|u| u.name == name)
    }
}
