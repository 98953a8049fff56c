//! # Entity Management
//!
//! Entities are opaque integer ids drawn from a fixed-capacity pool.
//! They carry no data of their own; components attached through the
//! coordinator give them state, and the per-entity [`Signature`] records
//! which kinds are attached.

use std::collections::VecDeque;

use super::signature::Signature;
use crate::error::{EcsError, EcsResult};

/// Default entity pool capacity used by the environments.
pub const MAX_ENTITIES: usize = 1000;

/// Opaque identifier for one simulated object.
///
/// Ids are recycled: after [`EntityRegistry::destroy`] the same id will be
/// handed out again by a later [`EntityRegistry::create`]. Holding an
/// `Entity` across a destroy is a caller bug and is reported as
/// [`EcsError::UnknownEntity`] on the next use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Entity(u32);

impl Entity {
    /// Creates an entity handle from a raw index.
    ///
    /// Only storage and tests should need this; live handles come from
    /// [`EntityRegistry::create`].
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw index behind this handle.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Allocator and signature table for entity ids.
///
/// The pool is FIFO: ids are handed out in ascending order from a fresh
/// registry, and destroyed ids re-enter at the back of the queue.
/// [`clear_all`](Self::clear_all) restores the pristine ascending order, so
/// a level reset always replays the same id sequence.
pub struct EntityRegistry {
    /// Recycled id queue.
    free: VecDeque<Entity>,
    /// One signature per pool slot.
    signatures: Box<[Signature]>,
    /// Liveness flag per pool slot.
    alive: Box<[bool]>,
    /// Number of currently live entities.
    live_count: usize,
    /// Pool capacity.
    capacity: usize,
}

impl EntityRegistry {
    /// Creates a registry with the given pool capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or exceeds `u32::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than zero");
        assert!(capacity <= u32::MAX as usize, "capacity exceeds u32::MAX");

        let free = (0..capacity as u32).map(Entity::from_raw).collect();

        Self {
            free,
            signatures: vec![Signature::EMPTY; capacity].into_boxed_slice(),
            alive: vec![false; capacity].into_boxed_slice(),
            live_count: 0,
            capacity,
        }
    }

    /// Returns the pool capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of live entities.
    #[inline]
    #[must_use]
    pub const fn live_count(&self) -> usize {
        self.live_count
    }

    /// Checks whether an entity id is currently live.
    #[inline]
    #[must_use]
    pub fn is_live(&self, e: Entity) -> bool {
        self.alive.get(e.index() as usize).copied().unwrap_or(false)
    }

    /// Takes a fresh entity from the pool.
    ///
    /// The new entity starts with an empty signature.
    ///
    /// # Errors
    ///
    /// [`EcsError::EntityCapacityExhausted`] when the pool is empty.
    pub fn create(&mut self) -> EcsResult<Entity> {
        let e = self
            .free
            .pop_front()
            .ok_or(EcsError::EntityCapacityExhausted {
                capacity: self.capacity,
            })?;

        let idx = e.index() as usize;
        self.signatures[idx] = Signature::EMPTY;
        self.alive[idx] = true;
        self.live_count += 1;

        Ok(e)
    }

    /// Returns an entity to the pool.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`] if `e` is not live.
    pub fn destroy(&mut self, e: Entity) -> EcsResult<()> {
        let idx = e.index() as usize;
        if !self.is_live(e) {
            return Err(EcsError::UnknownEntity(e));
        }

        self.signatures[idx] = Signature::EMPTY;
        self.alive[idx] = false;
        self.live_count -= 1;
        self.free.push_back(e);

        Ok(())
    }

    /// Returns every live entity to the pool in one pass.
    ///
    /// Used at level-reset boundaries instead of per-entity destroys: it is
    /// cheaper and it restores the pool's pristine ascending id order, so
    /// every episode allocates the same id sequence.
    pub fn clear_all(&mut self) {
        self.free.clear();
        self.free
            .extend((0..self.capacity as u32).map(Entity::from_raw));

        for sig in self.signatures.iter_mut() {
            *sig = Signature::EMPTY;
        }
        for flag in self.alive.iter_mut() {
            *flag = false;
        }
        self.live_count = 0;
    }

    /// Returns the signature of a live entity.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`] if `e` is not live.
    pub fn signature(&self, e: Entity) -> EcsResult<Signature> {
        if !self.is_live(e) {
            return Err(EcsError::UnknownEntity(e));
        }
        Ok(self.signatures[e.index() as usize])
    }

    /// Overwrites the signature of a live entity.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`] if `e` is not live.
    pub fn set_signature(&mut self, e: Entity, sig: Signature) -> EcsResult<()> {
        if !self.is_live(e) {
            return Err(EcsError::UnknownEntity(e));
        }
        self.signatures[e.index() as usize] = sig;
        Ok(())
    }

    /// Iterates over live entities in ascending id order.
    pub fn iter_live(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, live)| **live)
            .map(|(idx, _)| Entity::from_raw(idx as u32))
    }
}
