//! # GRIDGYM Environments
//!
//! Level assembly for the procedurally generated grid-world family: drives
//! the generators in `gridgym_procedural`, spawns the result into a
//! `gridgym_core` coordinator, and exposes a reset loop with seed-derived
//! retries when a draw produces an unsatisfiable level.
//!
//! Rendering, input mapping and physics tuning live with the embedding
//! runtime; this crate ends at "a populated world and a tile map".
//!
//! ## Example
//!
//! ```rust,ignore
//! use gridgym::{Environment, LevelConfig};
//! use gridgym_procedural::LevelSeed;
//!
//! let mut env = Environment::new(LevelConfig::default())?;
//! let level = env.reset(LevelSeed::new(42))?;
//! assert!(level.tilemap.width() > 0);
//! ```

pub mod components;
pub mod config;
pub mod env;
pub mod error;
pub mod level;
pub mod tilemap;

pub use components::{
    Agent, Collision, Dynamics, Goal, Hazard, Rect, Rgba8, Sprite, Transform, Vec2,
};
pub use config::{DistributionMode, Game, LevelConfig};
pub use env::{Environment, MAX_RESET_ATTEMPTS};
pub use error::{LevelError, LevelResult};
pub use level::Level;
pub use tilemap::{TileId, Tilemap};
