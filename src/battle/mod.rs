//! Battle system - grid skirmish with speed-ordered turns
//!
//! The field owns occupancy and bounds; the engine owns turn order, action
//! resolution, base control and victory. The engine only changes unit
//! state through field calls.

pub mod actions;
pub mod ai;
pub mod constants;
pub mod debug;
pub mod engine;
pub mod field;
pub mod log;
pub mod roster;
pub mod scenario;
pub mod status;
pub mod units;

// Re-exports for convenient access
pub use actions::Action;
pub use ai::{approach_step, choose_action, nearest_opponent};
pub use constants::*;
pub use debug::DebugPanel;
pub use engine::{BaseControl, BattleEngine, BattlePhase};
pub use field::BattleField;
pub use log::{BattleEvent, BattleEventType, TurnLog};
pub use roster::demo_roster;
pub use scenario::{Scenario, SkillDef, UnitDef};
pub use status::{BattleStatus, UnitStatus};
pub use units::{Skill, Unit};
