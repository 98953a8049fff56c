//! # Coordinator
//!
//! Composition root for the ECS kernel. Owns the entity registry, the
//! component registry and the system registry, and keeps the three
//! consistent: every component add/remove flips the entity's signature bit
//! and re-notifies system membership; every destroy cascades everywhere.
//!
//! One coordinator is constructed per environment instance and passed down
//! explicitly; there is no global state, so environments coexist freely in
//! one process. Single-threaded by design - nothing here suspends, blocks
//! or locks.

use std::collections::BTreeSet;

use super::component::Component;
use super::entity::{Entity, EntityRegistry};
use super::signature::Signature;
use super::storage::ComponentRegistry;
use super::system::{SystemRegistry, SystemTag};
use crate::error::EcsResult;

/// Facade over entity, component and system registries.
pub struct Coordinator {
    entities: EntityRegistry,
    components: ComponentRegistry,
    systems: SystemRegistry,
}

impl Coordinator {
    /// Creates a coordinator with the given entity pool capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or exceeds `u32::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entities: EntityRegistry::new(capacity),
            components: ComponentRegistry::new(),
            systems: SystemRegistry::new(),
        }
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Takes a fresh entity from the pool.
    ///
    /// # Errors
    ///
    /// [`EcsError::EntityCapacityExhausted`](crate::EcsError::EntityCapacityExhausted)
    /// when the pool is empty.
    pub fn create_entity(&mut self) -> EcsResult<Entity> {
        self.entities.create()
    }

    /// Destroys an entity, cascading to every store and system.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`](crate::EcsError::UnknownEntity) if `e` is
    /// not live.
    pub fn destroy_entity(&mut self, e: Entity) -> EcsResult<()> {
        self.entities.destroy(e)?;
        self.components.on_entity_destroyed(e);
        self.systems.notify_entity_destroyed(e);
        Ok(())
    }

    /// Destroys every entity in one pass.
    ///
    /// This is the level-reset path: pool order is restored, all stores are
    /// emptied and every system's membership set is cleared.
    pub fn clear_entities(&mut self) {
        self.entities.clear_all();
        self.components.clear_all();
        self.systems.clear_all();
    }

    /// Returns the number of live entities.
    #[inline]
    #[must_use]
    pub fn live_entities(&self) -> usize {
        self.entities.live_count()
    }

    /// Returns a live entity's signature.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`](crate::EcsError::UnknownEntity) if `e` is
    /// not live.
    pub fn signature(&self, e: Entity) -> EcsResult<Signature> {
        self.entities.signature(e)
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Registers a component kind.
    ///
    /// # Errors
    ///
    /// See [`ComponentRegistry::register`].
    pub fn register_component<C: Component>(&mut self) -> EcsResult<()> {
        self.components.register::<C>()
    }

    /// Attaches a component to an entity.
    ///
    /// Inserts into the kind's dense store, sets the signature bit and
    /// re-evaluates system membership.
    ///
    /// # Errors
    ///
    /// Unknown entity, unregistered kind, or duplicate component.
    pub fn add_component<C: Component>(&mut self, e: Entity, value: C) -> EcsResult<()> {
        let sig = self.entities.signature(e)?;
        self.components.store_mut::<C>()?.insert(e, value)?;

        let sig = sig.with(C::KIND);
        self.entities.set_signature(e, sig)?;
        self.systems.notify_signature_changed(e, sig);
        Ok(())
    }

    /// Detaches a component from an entity.
    ///
    /// Removes from the kind's dense store, clears the signature bit and
    /// re-evaluates system membership.
    ///
    /// # Errors
    ///
    /// Unknown entity, unregistered kind, or missing component.
    pub fn remove_component<C: Component>(&mut self, e: Entity) -> EcsResult<()> {
        let sig = self.entities.signature(e)?;
        self.components.store_mut::<C>()?.remove(e)?;

        let sig = sig.without(C::KIND);
        self.entities.set_signature(e, sig)?;
        self.systems.notify_signature_changed(e, sig);
        Ok(())
    }

    /// Returns a shared reference to an entity's component.
    ///
    /// # Errors
    ///
    /// Unregistered kind or missing component.
    pub fn get_component<C: Component>(&self, e: Entity) -> EcsResult<&C> {
        self.components.store::<C>()?.get(e)
    }

    /// Returns a mutable reference to an entity's component.
    ///
    /// # Errors
    ///
    /// Unregistered kind or missing component.
    pub fn get_component_mut<C: Component>(&mut self, e: Entity) -> EcsResult<&mut C> {
        self.components.store_mut::<C>()?.get_mut(e)
    }

    /// Checks whether an entity currently owns a component of this kind.
    #[must_use]
    pub fn has_component<C: Component>(&self, e: Entity) -> bool {
        self.entities
            .signature(e)
            .map(|sig| sig.contains(C::KIND))
            .unwrap_or(false)
    }

    /// Returns the number of live components of one kind.
    ///
    /// # Errors
    ///
    /// Unregistered kind.
    pub fn component_count<C: Component>(&self) -> EcsResult<usize> {
        Ok(self.components.store::<C>()?.len())
    }

    // =========================================================================
    // Systems
    // =========================================================================

    /// Registers a system tag.
    ///
    /// # Errors
    ///
    /// See [`SystemRegistry::register`].
    pub fn register_system<S: SystemTag>(&mut self) -> EcsResult<()> {
        self.systems.register::<S>()
    }

    /// Configures a system's required signature, once, before activity.
    ///
    /// # Errors
    ///
    /// See [`SystemRegistry::set_required`].
    pub fn set_system_signature<S: SystemTag>(&mut self, sig: Signature) -> EcsResult<()> {
        self.systems.set_required::<S>(sig)
    }

    /// Returns a system's membership set, in ascending entity order.
    ///
    /// # Errors
    ///
    /// See [`SystemRegistry::members`].
    pub fn system_members<S: SystemTag>(&self) -> EcsResult<&BTreeSet<Entity>> {
        self.systems.members::<S>()
    }
}
