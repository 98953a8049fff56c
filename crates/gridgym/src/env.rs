//! # Environment
//!
//! One environment instance owns one coordinator. Construction registers
//! the component set and the membership systems; `reset` clears all
//! entities and assembles a fresh level from the episode seed, retrying
//! derived sub-seeds when a draw turns out unsatisfiable.

use gridgym_core::{Component, Coordinator, Signature, SystemTag, MAX_ENTITIES};
use gridgym_procedural::LevelSeed;

use crate::components::{Agent, Collision, Dynamics, Goal, Hazard, Sprite, Transform};
use crate::config::{Game, LevelConfig};
use crate::error::{LevelError, LevelResult};
use crate::level::{build_cavern_level, build_maze_level, Level};

/// How many derived sub-seeds a reset tries before giving up.
pub const MAX_RESET_ATTEMPTS: u32 = 8;

/// Collects every entity with a sprite, in draw order by entity id.
pub struct SpriteRender;
impl SystemTag for SpriteRender {}

/// Collects goal entities for the agent's contact checks.
pub struct Goals;
impl SystemTag for Goals {}

/// Collects hazard entities for the agent's contact checks.
pub struct Hazards;
impl SystemTag for Hazards {}

/// Collects the player-controlled entities.
pub struct AgentControl;
impl SystemTag for AgentControl {}

/// A procedurally generated grid-world environment.
pub struct Environment {
    world: Coordinator,
    config: LevelConfig,
    level: Option<Level>,
}

impl Environment {
    /// Creates an environment and wires up its component and system
    /// registrations.
    ///
    /// # Errors
    ///
    /// Registration errors surface here; they indicate conflicting kind
    /// indices or duplicate tags and cannot be retried away.
    pub fn new(config: LevelConfig) -> LevelResult<Self> {
        let mut world = Coordinator::new(MAX_ENTITIES);

        world.register_component::<Transform>()?;
        world.register_component::<Collision>()?;
        world.register_component::<Dynamics>()?;
        world.register_component::<Sprite>()?;
        world.register_component::<Goal>()?;
        world.register_component::<Hazard>()?;
        world.register_component::<Agent>()?;

        world.register_system::<SpriteRender>()?;
        world.set_system_signature::<SpriteRender>(Signature::EMPTY.with(Sprite::KIND))?;

        world.register_system::<Goals>()?;
        world.set_system_signature::<Goals>(Signature::EMPTY.with(Goal::KIND))?;

        world.register_system::<Hazards>()?;
        world.set_system_signature::<Hazards>(Signature::EMPTY.with(Hazard::KIND))?;

        world.register_system::<AgentControl>()?;
        world.set_system_signature::<AgentControl>(Signature::EMPTY.with(Agent::KIND))?;

        Ok(Self {
            world,
            config,
            level: None,
        })
    }

    /// Creates an environment from TOML configuration text.
    ///
    /// # Errors
    ///
    /// Parse errors and registration errors.
    pub fn from_toml_str(text: &str) -> LevelResult<Self> {
        Self::new(LevelConfig::from_toml_str(text)?)
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Returns the coordinator, for system iteration.
    #[must_use]
    pub const fn world(&self) -> &Coordinator {
        &self.world
    }

    /// Returns the coordinator mutably, for per-step component updates.
    pub fn world_mut(&mut self) -> &mut Coordinator {
        &mut self.world
    }

    /// Returns the current level, if a reset has completed.
    #[must_use]
    pub const fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    /// Clears every entity and assembles a fresh level for the seed.
    ///
    /// Seed-driven generation can legitimately fail (no room, no free
    /// cell); each attempt runs on a sub-seed derived from the episode
    /// seed and the attempt number, so the retry sequence itself is
    /// reproducible.
    ///
    /// # Errors
    ///
    /// [`LevelError::Unsatisfiable`] when every attempt fails on a
    /// retryable generation error; other errors abort immediately.
    pub fn reset(&mut self, seed: LevelSeed) -> LevelResult<&Level> {
        self.level = None;

        for attempt in 0..MAX_RESET_ATTEMPTS {
            self.world.clear_entities();

            let mut rng = seed.derive(u64::from(attempt)).rng();
            let built = match self.config.game {
                Game::Maze => build_maze_level(&mut self.world, &self.config, &mut rng),
                Game::Cavern => build_cavern_level(&mut self.world, &self.config, &mut rng),
            };

            match built {
                Ok(level) => {
                    tracing::debug!(
                        "level ready: {:?} seed {} attempt {}",
                        self.config.game,
                        seed.value(),
                        attempt
                    );
                    return Ok(self.level.insert(level));
                }
                Err(LevelError::Generation(err)) if err.is_retryable() => {
                    tracing::warn!(
                        "generation attempt {} for seed {} failed: {}",
                        attempt,
                        seed.value(),
                        err
                    );
                }
                Err(err) => return Err(err),
            }
        }

        Err(LevelError::Unsatisfiable {
            seed: seed.value(),
            attempts: MAX_RESET_ATTEMPTS,
        })
    }
}
