//! # GRIDGYM Core ECS
//!
//! Entity Component System kernel shared by every GRIDGYM environment.
//!
//! ## Architecture Rules
//!
//! 1. **Fixed capacity** - entity ids come from a pool sized at creation
//! 2. **Dense storage** - component arrays stay packed via swap-remove
//! 3. **Eager membership** - system sets are updated on every signature
//!    change, never recomputed lazily
//! 4. **One coordinator per environment** - no globals, instances coexist
//!
//! ## Example
//!
//! ```rust,ignore
//! use gridgym_core::{Coordinator, Signature};
//!
//! let mut world = Coordinator::new(1000);
//! world.register_component::<Transform>()?;
//! let e = world.create_entity()?;
//! world.add_component(e, Transform::default())?;
//! ```

pub mod ecs;
pub mod error;

pub use ecs::{
    Component, Coordinator, DenseStore, Entity, EntityRegistry, Signature, SystemRegistry,
    SystemTag, MAX_COMPONENT_KINDS, MAX_ENTITIES,
};
pub use error::{EcsError, EcsResult};
