pub mod config;
pub mod error;
pub mod types;

pub use config::BattleConfig;
pub use error::{BattleError, Result};
pub use types::{Faction, Position, UnitId};
