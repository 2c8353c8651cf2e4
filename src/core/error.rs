use thiserror::Error;

use crate::core::types::{Position, UnitId};

#[derive(Error, Debug)]
pub enum BattleError {
    #[error("Cell {0} is occupied, blocked or out of bounds")]
    OccupiedOrOutOfBounds(Position),

    #[error("Unit {0} is not on the field")]
    UnitNotOnField(UnitId),

    #[error("Unit '{0}' has no skills")]
    NoSkills(String),

    #[error("Unit '{0}' starts with no hit points")]
    NotAlive(String),

    #[error("Unit '{unit}' references unknown skill '{skill}'")]
    UnknownSkill { unit: String, skill: String },

    #[error("Invalid battle config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario parse error: {0}")]
    ScenarioParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BattleError>;
