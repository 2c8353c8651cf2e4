//! Scenario files: skills, units and obstacles loaded from TOML
//!
//! Units reference skills by id so that one skill definition can be shared
//! by many units.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battle::engine::BattleEngine;
use crate::battle::units::{Skill, Unit};
use crate::core::config::BattleConfig;
use crate::core::error::{BattleError, Result};
use crate::core::types::{Faction, Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    pub power: i32,
    pub range: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDef {
    pub name: String,
    pub faction: Faction,
    pub hp: i32,
    pub speed: u32,
    pub position: Position,
    /// Skill ids; the first one is the default attack
    pub skills: Vec<String>,
}

/// A complete starting setup for one match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub obstacles: Vec<Position>,
    #[serde(default)]
    pub config: BattleConfig,
    #[serde(default)]
    pub skills: Vec<SkillDef>,
    #[serde(default)]
    pub units: Vec<UnitDef>,
}

impl Scenario {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a scenario from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let scenario = Self::from_toml_str(&contents)?;
        tracing::debug!(
            "Loaded scenario {:?}: {} units, {} skills",
            path,
            scenario.units.len(),
            scenario.skills.len()
        );
        Ok(scenario)
    }

    fn skill(&self, id: &str) -> Option<Skill> {
        self.skills
            .iter()
            .find(|def| def.id == id)
            .map(|def| Skill::new(def.name.clone(), def.power, def.range))
    }

    /// Resolve skill references and split units by faction
    pub fn build_units(&self) -> Result<(Vec<Unit>, Vec<Unit>)> {
        let mut players = Vec::new();
        let mut enemies = Vec::new();

        for def in &self.units {
            let skills = def
                .skills
                .iter()
                .map(|id| {
                    self.skill(id).ok_or_else(|| BattleError::UnknownSkill {
                        unit: def.name.clone(),
                        skill: id.clone(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let unit = Unit::new(def.name.clone(), def.faction, def.hp, def.speed, def.position, skills);
            match def.faction {
                Faction::Player => players.push(unit),
                Faction::Enemy => enemies.push(unit),
            }
        }

        Ok((players, enemies))
    }

    /// Place the scenario's units and start the battle
    pub fn start(&self) -> Result<BattleEngine> {
        let (players, enemies) = self.build_units()?;
        BattleEngine::start_battle_with_config(
            &self.config,
            players,
            enemies,
            self.obstacles.iter().copied(),
        )
    }
}
