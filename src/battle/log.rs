//! Turn log: append-only record of every resolved sub-event

use serde::{Deserialize, Serialize};

use crate::core::types::{Faction, Position, UnitId};

/// Log entry for battle events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleEvent {
    pub event_type: BattleEventType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEventType {
    Moved { unit_id: UnitId, to: Position },
    MoveFailed { unit_id: UnitId },
    Missed { attacker: UnitId, target: UnitId },
    Damaged { attacker: UnitId, target: UnitId, amount: i32 },
    Defeated { unit_id: UnitId },
    Passed { unit_id: UnitId },
    Surrendered { unit_id: UnitId },
    Idle { unit_id: UnitId },
    Withdrawn { unit_id: UnitId },
    BattleEnded { winner: Faction },
}

/// Ordered log of events for a whole match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnLog {
    pub events: Vec<BattleEvent>,
}

impl TurnLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event_type: BattleEventType, description: String) {
        self.events.push(BattleEvent {
            event_type,
            description,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Most recent line, if any
    pub fn last(&self) -> Option<&str> {
        self.events.last().map(|e| e.description.as_str())
    }

    /// Human-readable lines in resolution order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.description.as_str())
    }

    /// Lines appended after the first `from` entries
    pub fn lines_since(&self, from: usize) -> impl Iterator<Item = &str> {
        self.events.iter().skip(from).map(|e| e.description.as_str())
    }
}
