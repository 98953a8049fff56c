//! # Component Storage
//!
//! One dense array per registered component kind. The array is always
//! packed: removal swaps the victim with the last occupied slot instead of
//! leaving a hole, so iteration touches live components only and stays
//! cache-friendly.

use std::any::Any;
use std::collections::HashMap;

use super::component::Component;
use super::entity::Entity;
use super::signature::MAX_COMPONENT_KINDS;
use crate::error::{EcsError, EcsResult};

/// Dense storage for a single component kind.
///
/// Maintains two mappings alongside the packed array so insert, lookup and
/// remove are all O(1):
/// - entity -> slot index
/// - slot index -> entity (needed to patch the entity moved by swap-remove)
pub struct DenseStore<C: Component> {
    /// The packed component array. No holes, ever.
    components: Vec<C>,
    /// Entity to slot index.
    entity_to_index: HashMap<Entity, usize>,
    /// Slot index to entity, parallel to `components`.
    index_to_entity: Vec<Entity>,
}

impl<C: Component> DenseStore<C> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            entity_to_index: HashMap::new(),
            index_to_entity: Vec::new(),
        }
    }

    /// Returns the number of live components.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Checks whether the store holds no components.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Checks whether the entity has an entry in this store.
    #[inline]
    #[must_use]
    pub fn contains(&self, e: Entity) -> bool {
        self.entity_to_index.contains_key(&e)
    }

    /// Appends a component for an entity.
    ///
    /// # Errors
    ///
    /// [`EcsError::DuplicateComponent`] if the entity already has an entry.
    pub fn insert(&mut self, e: Entity, component: C) -> EcsResult<()> {
        if self.contains(e) {
            return Err(EcsError::DuplicateComponent {
                entity: e,
                kind: C::KIND,
            });
        }

        let new_index = self.components.len();
        self.entity_to_index.insert(e, new_index);
        self.index_to_entity.push(e);
        self.components.push(component);

        Ok(())
    }

    /// Removes an entity's component, keeping the array packed.
    ///
    /// The last occupied slot is swapped into the vacated position and the
    /// moved entity's index mapping is patched.
    ///
    /// # Errors
    ///
    /// [`EcsError::MissingComponent`] if the entity has no entry.
    pub fn remove(&mut self, e: Entity) -> EcsResult<()> {
        let removed_index =
            self.entity_to_index
                .remove(&e)
                .ok_or(EcsError::MissingComponent {
                    entity: e,
                    kind: C::KIND,
                })?;

        self.components.swap_remove(removed_index);
        self.index_to_entity.swap_remove(removed_index);

        // Unless the victim was the last slot, the former last entity now
        // occupies the vacated index; patch its mapping.
        if removed_index < self.index_to_entity.len() {
            let moved_entity = self.index_to_entity[removed_index];
            self.entity_to_index.insert(moved_entity, removed_index);
        }

        Ok(())
    }

    /// Returns a shared reference to an entity's component.
    ///
    /// # Errors
    ///
    /// [`EcsError::MissingComponent`] if the entity has no entry.
    pub fn get(&self, e: Entity) -> EcsResult<&C> {
        let index = self
            .entity_to_index
            .get(&e)
            .ok_or(EcsError::MissingComponent {
                entity: e,
                kind: C::KIND,
            })?;
        Ok(&self.components[*index])
    }

    /// Returns a mutable reference to an entity's component.
    ///
    /// Callers must not hold this reference across structural mutation of
    /// the same store; the borrow checker enforces that within one function,
    /// and storing raw indices across inserts/removes is a caller bug.
    ///
    /// # Errors
    ///
    /// [`EcsError::MissingComponent`] if the entity has no entry.
    pub fn get_mut(&mut self, e: Entity) -> EcsResult<&mut C> {
        let index = self
            .entity_to_index
            .get(&e)
            .ok_or(EcsError::MissingComponent {
                entity: e,
                kind: C::KIND,
            })?;
        Ok(&mut self.components[*index])
    }

    /// Iterates over `(entity, component)` pairs in packed order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &C)> {
        self.index_to_entity
            .iter()
            .copied()
            .zip(self.components.iter())
    }

    /// Drops every component.
    pub fn clear(&mut self) {
        self.components.clear();
        self.entity_to_index.clear();
        self.index_to_entity.clear();
    }

    /// Removes the entity's component if it has one; no-op otherwise.
    ///
    /// Invoked for every registered store on every entity destruction.
    pub fn on_entity_destroyed(&mut self, e: Entity) {
        if self.contains(e) {
            // Presence was just checked.
            let _ = self.remove(e);
        }
    }
}

impl<C: Component> Default for DenseStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Object-safe view of a dense store, for kind-indexed dispatch.
trait ErasedStore: Send + Sync {
    fn on_entity_destroyed(&mut self, e: Entity);
    fn clear(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> ErasedStore for DenseStore<C> {
    fn on_entity_destroyed(&mut self, e: Entity) {
        DenseStore::on_entity_destroyed(self, e);
    }

    fn clear(&mut self) {
        DenseStore::clear(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// All registered component stores, indexed by `Component::KIND`.
///
/// The kind index is assigned at compile time by each component type, so
/// lookup is a slot access plus a downcast; there is no type-name hashing.
pub struct ComponentRegistry {
    stores: [Option<Box<dyn ErasedStore>>; MAX_COMPONENT_KINDS],
}

impl ComponentRegistry {
    /// Creates a registry with no component kinds registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stores: std::array::from_fn(|_| None),
        }
    }

    /// Registers a component kind, creating its dense store.
    ///
    /// # Errors
    ///
    /// [`EcsError::ComponentKindOutOfRange`] if `C::KIND` does not fit the
    /// signature width, [`EcsError::ComponentAlreadyRegistered`] if the slot
    /// is taken.
    pub fn register<C: Component>(&mut self) -> EcsResult<()> {
        let kind = C::KIND as usize;
        if kind >= MAX_COMPONENT_KINDS {
            return Err(EcsError::ComponentKindOutOfRange {
                kind: C::KIND,
                max: MAX_COMPONENT_KINDS as u8,
            });
        }
        if self.stores[kind].is_some() {
            return Err(EcsError::ComponentAlreadyRegistered { kind: C::KIND });
        }

        self.stores[kind] = Some(Box::new(DenseStore::<C>::new()));
        Ok(())
    }

    /// Returns the typed store for a component kind.
    ///
    /// # Errors
    ///
    /// [`EcsError::ComponentNotRegistered`] if the kind was never
    /// registered, [`EcsError::ComponentKindCollision`] if a different
    /// component type claimed the same kind index.
    pub fn store<C: Component>(&self) -> EcsResult<&DenseStore<C>> {
        let kind = C::KIND as usize;
        let erased = self
            .stores
            .get(kind)
            .and_then(Option::as_ref)
            .ok_or(EcsError::ComponentNotRegistered { kind: C::KIND })?;

        erased
            .as_any()
            .downcast_ref::<DenseStore<C>>()
            .ok_or(EcsError::ComponentKindCollision { kind: C::KIND })
    }

    /// Returns the typed store for a component kind, mutably.
    ///
    /// # Errors
    ///
    /// Same as [`store`](Self::store).
    pub fn store_mut<C: Component>(&mut self) -> EcsResult<&mut DenseStore<C>> {
        let kind = C::KIND as usize;
        let erased = self
            .stores
            .get_mut(kind)
            .and_then(Option::as_mut)
            .ok_or(EcsError::ComponentNotRegistered { kind: C::KIND })?;

        erased
            .as_any_mut()
            .downcast_mut::<DenseStore<C>>()
            .ok_or(EcsError::ComponentKindCollision { kind: C::KIND })
    }

    /// Notifies every registered store that an entity was destroyed.
    pub fn on_entity_destroyed(&mut self, e: Entity) {
        for store in self.stores.iter_mut().flatten() {
            store.on_entity_destroyed(e);
        }
    }

    /// Drops every component from every registered store.
    pub fn clear_all(&mut self) {
        for store in self.stores.iter_mut().flatten() {
            store.clear();
        }
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
