//! Battle configuration
//!
//! Grid geometry, base cells and the base-control threshold for one match.
//! A config is fixed once the field is built.

use serde::{Deserialize, Serialize};

use crate::battle::constants::{
    BASE_CONTROL_TO_WIN, DEFAULT_ENEMY_BASE, DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH,
    DEFAULT_PLAYER_BASE,
};
use crate::core::error::{BattleError, Result};
use crate::core::types::Position;

/// Configuration for a single match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Number of columns on the grid
    pub width: i32,

    /// Number of rows on the grid
    pub height: i32,

    /// Cell the enemy captures to accrue base control
    pub player_base: Position,

    /// Cell the player captures to accrue base control
    pub enemy_base: Position,

    /// Consecutive post-action checks on the opposing base needed to win
    pub base_control_threshold: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
            player_base: DEFAULT_PLAYER_BASE,
            enemy_base: DEFAULT_ENEMY_BASE,
            base_control_threshold: BASE_CONTROL_TO_WIN,
        }
    }
}

impl BattleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(BattleError::InvalidConfig(format!(
                "grid must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }

        for (label, base) in [("player_base", self.player_base), ("enemy_base", self.enemy_base)] {
            if !self.contains(base) {
                return Err(BattleError::InvalidConfig(format!(
                    "{} {} lies outside the {}x{} grid",
                    label, base, self.width, self.height
                )));
            }
        }

        if self.player_base == self.enemy_base {
            return Err(BattleError::InvalidConfig(
                "player_base and enemy_base must be different cells".into(),
            ));
        }

        if self.base_control_threshold == 0 {
            return Err(BattleError::InvalidConfig(
                "base_control_threshold must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BattleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 7);
        assert_eq!(config.height, 5);
        assert_eq!(config.base_control_threshold, 3);
    }

    #[test]
    fn test_base_outside_grid_rejected() {
        let config = BattleConfig {
            enemy_base: Position::new(9, 9),
            ..BattleConfig::default()
        };
        assert!(matches!(config.validate(), Err(BattleError::InvalidConfig(_))));
    }

    #[test]
    fn test_shared_base_rejected() {
        let config = BattleConfig {
            enemy_base: DEFAULT_PLAYER_BASE,
            ..BattleConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = BattleConfig {
            base_control_threshold: 0,
            ..BattleConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: BattleConfig = toml::from_str("width = 9").expect("parse");
        assert_eq!(config.width, 9);
        assert_eq!(config.height, DEFAULT_FIELD_HEIGHT);
        assert_eq!(config.player_base, DEFAULT_PLAYER_BASE);
    }
}
