//! Simulation configuration, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enums::AttackModel;
use crate::error::ConfigError;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Resample enemy/powerup spawn points that land on an obstacle.
    pub reject_obstacle_spawns: bool,
    /// How enemies damage the player.
    pub attack: AttackModel,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            reject_obstacle_spawns: true,
            attack: AttackModel::default(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file. Missing keys take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject attack parameters the simulation cannot use. TOML accepts
    /// `nan` and `inf`, so parsing alone does not rule them out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.attack {
            AttackModel::Probabilistic { chance, damage } => {
                check_finite("attack.chance", chance)?;
                if !(0.0..=1.0).contains(&chance) {
                    return Err(invalid("attack.chance", format!("{chance} outside 0..=1")));
                }
                check_damage(damage)
            }
            AttackModel::Melee {
                range,
                cooldown_secs,
                damage,
            } => {
                check_finite("attack.range", range)?;
                check_finite("attack.cooldown_secs", cooldown_secs)?;
                if range < 0.0 {
                    return Err(invalid("attack.range", format!("{range} is negative")));
                }
                if cooldown_secs < 0.0 {
                    return Err(invalid(
                        "attack.cooldown_secs",
                        format!("{cooldown_secs} is negative"),
                    ));
                }
                check_damage(damage)
            }
        }
    }

    /// Save configuration to a TOML file.
    /// Returns `ConfigError::Invalid` without writing if the config would not load back.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        self.validate()?;
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

fn invalid(field: &'static str, detail: String) -> ConfigError {
    ConfigError::Invalid { field, detail }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is not finite")))
    }
}

fn check_damage(damage: i32) -> Result<(), ConfigError> {
    if damage < 0 {
        Err(invalid("attack.damage", format!("{damage} is negative")))
    } else {
        Ok(())
    }
}
