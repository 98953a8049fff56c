//! # Environment Error Types

use thiserror::Error;

use gridgym_core::EcsError;
use gridgym_procedural::GenError;

/// Errors that can occur while building or resetting an environment.
#[derive(Error, Debug)]
pub enum LevelError {
    /// The entity system rejected an operation; this is a wiring bug, not a
    /// bad draw, and retrying cannot fix it.
    #[error("entity system failure: {0}")]
    Ecs(#[from] EcsError),

    /// A generator reported failure for the current draw.
    #[error("level generation failed: {0}")]
    Generation(#[from] GenError),

    /// The level configuration did not parse.
    #[error("invalid level configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Every retry attempt produced an unsatisfiable level.
    #[error("no viable level for seed {seed} after {attempts} attempts")]
    Unsatisfiable {
        /// The episode seed that failed.
        seed: u64,
        /// How many derived sub-seeds were tried.
        attempts: u32,
    },
}

/// Result type for environment operations.
pub type LevelResult<T> = Result<T, LevelError>;
