//! # Level Configuration
//!
//! Options parsed once at environment construction. Difficulty modes map to
//! the world dimensions each game family member uses; the remaining knobs
//! feed the cavern pipeline.

use serde::{Deserialize, Serialize};

use crate::error::LevelResult;

/// Which level builder the environment runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Game {
    /// Perfect-maze levels with a single goal.
    #[default]
    Maze,
    /// Cellular-automata cavern levels with a carved corridor.
    Cavern,
}

/// Difficulty distribution the episode seeds draw from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionMode {
    /// Small worlds.
    #[default]
    Easy,
    /// Full-size worlds.
    Hard,
    /// Oversized worlds with no corridor pruning, for memory tasks.
    Memory,
}

/// All level-generation options.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Which builder to run.
    pub game: Game,
    /// Difficulty distribution.
    pub mode: DistributionMode,
    /// Cellular-automaton generations before room extraction.
    pub ca_iterations: u32,
    /// Rings of corridor dilation around the guide path.
    pub corridor_radius: u32,
    /// Probability that a seeded cavern cell starts as wall.
    pub wall_probability: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            game: Game::default(),
            mode: DistributionMode::default(),
            ca_iterations: 2,
            corridor_radius: 4,
            wall_probability: 0.5,
        }
    }
}

impl LevelConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// [`LevelError::Config`](crate::LevelError::Config) on malformed input.
    pub fn from_toml_str(text: &str) -> LevelResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// World dimension for maze levels under the current mode.
    #[must_use]
    pub const fn maze_world_dim(&self) -> i32 {
        match self.mode {
            DistributionMode::Easy => 15,
            DistributionMode::Hard => 25,
            DistributionMode::Memory => 31,
        }
    }

    /// World dimension for cavern levels under the current mode.
    #[must_use]
    pub const fn cavern_world_dim(&self) -> i32 {
        match self.mode {
            DistributionMode::Easy => 20,
            DistributionMode::Hard => 40,
            DistributionMode::Memory => 45,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = LevelConfig::default();
        assert_eq!(cfg.game, Game::Maze);
        assert_eq!(cfg.mode, DistributionMode::Easy);
        assert_eq!(cfg.maze_world_dim(), 15);
        assert_eq!(cfg.cavern_world_dim(), 20);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg = LevelConfig::from_toml_str("game = \"cavern\"\nmode = \"hard\"").unwrap();
        assert_eq!(cfg.game, Game::Cavern);
        assert_eq!(cfg.mode, DistributionMode::Hard);
        assert_eq!(cfg.ca_iterations, 2);
        assert!((cfg.wall_probability - 0.5).abs() < f32::EPSILON);
        assert_eq!(cfg.cavern_world_dim(), 40);
    }

    #[test]
    fn test_malformed_toml_is_reported() {
        assert!(LevelConfig::from_toml_str("game = \"pinball\"").is_err());
        assert!(LevelConfig::from_toml_str("ca_iterations = \"lots\"").is_err());
    }
}
