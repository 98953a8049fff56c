//! # ECS Error Types
//!
//! All errors that can occur in the entity component system.

use thiserror::Error;

use crate::ecs::Entity;

/// Errors that can occur in the entity component system.
///
/// Every variant is a contract violation by the caller or an exhausted
/// fixed-capacity resource; none of them are recoverable mid-operation, but
/// all of them are reported as values so an embedding environment can fail a
/// reset instead of aborting the process.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcsError {
    /// The fixed entity pool has no free ids left.
    #[error("entity pool exhausted: capacity {capacity}")]
    EntityCapacityExhausted {
        /// Configured pool capacity.
        capacity: usize,
    },

    /// The entity id is not currently live.
    #[error("entity {0:?} is not live")]
    UnknownEntity(Entity),

    /// The entity already owns a component of this kind.
    #[error("entity {entity:?} already has component kind {kind}")]
    DuplicateComponent {
        /// Entity that was targeted.
        entity: Entity,
        /// Component kind index.
        kind: u8,
    },

    /// The entity owns no component of this kind.
    #[error("entity {entity:?} has no component kind {kind}")]
    MissingComponent {
        /// Entity that was targeted.
        entity: Entity,
        /// Component kind index.
        kind: u8,
    },

    /// A component kind was registered twice.
    #[error("component kind {kind} is already registered")]
    ComponentAlreadyRegistered {
        /// Component kind index.
        kind: u8,
    },

    /// A component kind was used before registration.
    #[error("component kind {kind} is not registered")]
    ComponentNotRegistered {
        /// Component kind index.
        kind: u8,
    },

    /// A component kind index does not fit the signature width.
    #[error("component kind {kind} is out of range (max {max})")]
    ComponentKindOutOfRange {
        /// Offending kind index.
        kind: u8,
        /// Exclusive upper bound.
        max: u8,
    },

    /// Two distinct component types claim the same kind index.
    #[error("component kind {kind} is claimed by a different component type")]
    ComponentKindCollision {
        /// Contested kind index.
        kind: u8,
    },

    /// A system tag was registered twice.
    #[error("system {0} is already registered")]
    SystemAlreadyRegistered(&'static str),

    /// A system tag was used before registration.
    #[error("system {0} is not registered")]
    SystemNotRegistered(&'static str),

    /// A system's required signature was configured twice.
    #[error("system {0} already has a required signature")]
    SystemSignatureAlreadySet(&'static str),

    /// A system's required signature arrived after entity activity began.
    ///
    /// Membership is maintained incrementally, so a signature configured
    /// late would silently miss every entity that changed before it.
    #[error("system {0} received its required signature after entity activity")]
    SystemSignatureTooLate(&'static str),
}

/// Result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;
