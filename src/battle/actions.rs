//! Actions a unit can take on its turn
//!
//! Well-typed callers build variants directly. `Action::parse_kind` covers
//! external tag strings; anything it does not recognise becomes
//! `Action::Unrecognized` and resolves as a logged no-op.

use crate::battle::units::Skill;
use crate::core::types::UnitId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Single step; only the four orthogonal unit vectors succeed
    Move { dx: i32, dy: i32 },
    /// Attack each target in order; `None` uses the attacker's first skill
    Attack {
        targets: Vec<UnitId>,
        skill: Option<Skill>,
    },
    Pass,
    Surrender,
    /// Unknown or malformed input, kept for the log
    Unrecognized(String),
}

impl Action {
    pub fn step(dx: i32, dy: i32) -> Self {
        Action::Move { dx, dy }
    }

    /// Attack a single target with the default skill
    pub fn attack(target: UnitId) -> Self {
        Action::Attack {
            targets: vec![target],
            skill: None,
        }
    }

    pub fn attack_with(target: UnitId, skill: Skill) -> Self {
        Action::Attack {
            targets: vec![target],
            skill: Some(skill),
        }
    }

    pub fn attack_all(targets: impl IntoIterator<Item = UnitId>, skill: Option<Skill>) -> Self {
        Action::Attack {
            targets: targets.into_iter().collect(),
            skill,
        }
    }

    /// Build a parameterless action from an external tag
    ///
    /// `move` and `attack` need a payload, so a bare tag for them is
    /// malformed and maps to `Unrecognized` like any unknown tag.
    pub fn parse_kind(kind: &str) -> Self {
        match kind {
            "pass" | "wait" | "pass_turn" => Action::Pass,
            "surrender" => Action::Surrender,
            other => Action::Unrecognized(other.to_string()),
        }
    }

    /// Short tag used in tracing output
    pub fn kind(&self) -> &str {
        match self {
            Action::Move { .. } => "move",
            Action::Attack { .. } => "attack",
            Action::Pass => "pass",
            Action::Surrender => "surrender",
            Action::Unrecognized(tag) => tag,
        }
    }
}
