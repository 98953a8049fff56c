//! # System Membership
//!
//! A system, as far as the kernel is concerned, is a required signature plus
//! the set of entities currently satisfying it. Game logic iterates the set;
//! the registry keeps it consistent on every signature change and every
//! destruction, eagerly, so per-frame iteration never filters.
//!
//! Membership sets are ordered (`BTreeSet`), which makes iteration
//! deterministic. That matters: episode reproducibility from a seed depends
//! on game systems visiting their entities in a stable order.

use std::any::TypeId;
use std::collections::{BTreeSet, HashMap};

use super::entity::Entity;
use super::signature::Signature;
use crate::error::{EcsError, EcsResult};

/// Marker trait identifying one system.
///
/// The type itself carries no behavior; it is the registration key. Each tag
/// may be registered once per registry.
pub trait SystemTag: 'static {
    /// Display name used in error reporting.
    #[must_use]
    fn name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Per-system bookkeeping.
struct SystemEntry {
    /// Display name of the tag type.
    name: &'static str,
    /// Signature an entity must be a superset of to belong.
    /// `None` until configured; unconfigured systems accept nothing.
    required: Option<Signature>,
    /// Entities currently satisfying `required`.
    members: BTreeSet<Entity>,
}

/// Registry of all systems and their membership sets.
///
/// Systems are notified in registration order, which is deterministic.
pub struct SystemRegistry {
    entries: Vec<SystemEntry>,
    index: HashMap<TypeId, usize>,
    /// Set once the first signature event arrives; guards late configuration.
    activity_seen: bool,
}

impl SystemRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            activity_seen: false,
        }
    }

    /// Registers a system tag.
    ///
    /// # Errors
    ///
    /// [`EcsError::SystemAlreadyRegistered`] on a repeated tag.
    pub fn register<S: SystemTag>(&mut self) -> EcsResult<()> {
        let type_id = TypeId::of::<S>();
        if self.index.contains_key(&type_id) {
            return Err(EcsError::SystemAlreadyRegistered(S::name()));
        }

        self.index.insert(type_id, self.entries.len());
        self.entries.push(SystemEntry {
            name: S::name(),
            required: None,
            members: BTreeSet::new(),
        });
        Ok(())
    }

    /// Configures a system's required signature, once.
    ///
    /// Must happen before any entity activity: membership is maintained
    /// incrementally from signature events, so a requirement configured
    /// after the first event would miss entities silently. Activity resets
    /// at [`clear_all`](Self::clear_all), i.e. at level boundaries.
    ///
    /// # Errors
    ///
    /// [`EcsError::SystemNotRegistered`] for an unknown tag,
    /// [`EcsError::SystemSignatureAlreadySet`] on reconfiguration,
    /// [`EcsError::SystemSignatureTooLate`] after entity activity.
    pub fn set_required<S: SystemTag>(&mut self, required: Signature) -> EcsResult<()> {
        if self.activity_seen {
            return Err(EcsError::SystemSignatureTooLate(S::name()));
        }

        let entry = self.entry_mut::<S>()?;
        if entry.required.is_some() {
            return Err(EcsError::SystemSignatureAlreadySet(entry.name));
        }
        entry.required = Some(required);
        Ok(())
    }

    /// Returns a system's membership set.
    ///
    /// # Errors
    ///
    /// [`EcsError::SystemNotRegistered`] for an unknown tag.
    pub fn members<S: SystemTag>(&self) -> EcsResult<&BTreeSet<Entity>> {
        let idx = self
            .index
            .get(&TypeId::of::<S>())
            .ok_or(EcsError::SystemNotRegistered(S::name()))?;
        Ok(&self.entries[*idx].members)
    }

    /// Re-evaluates one entity against every system after a signature change.
    pub fn notify_signature_changed(&mut self, e: Entity, new_sig: Signature) {
        self.activity_seen = true;

        for entry in &mut self.entries {
            match entry.required {
                Some(required) if new_sig.is_superset_of(required) => {
                    let _ = entry.members.insert(e);
                }
                _ => {
                    let _ = entry.members.remove(&e);
                }
            }
        }
    }

    /// Removes one entity from every membership set.
    pub fn notify_entity_destroyed(&mut self, e: Entity) {
        for entry in &mut self.entries {
            let _ = entry.members.remove(&e);
        }
    }

    /// Empties every membership set and re-arms late-configuration checks.
    pub fn clear_all(&mut self) {
        for entry in &mut self.entries {
            entry.members.clear();
        }
        self.activity_seen = false;
    }

    fn entry_mut<S: SystemTag>(&mut self) -> EcsResult<&mut SystemEntry> {
        let idx = self
            .index
            .get(&TypeId::of::<S>())
            .ok_or(EcsError::SystemNotRegistered(S::name()))?;
        Ok(&mut self.entries[*idx])
    }
}

impl Default for SystemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Movers;
    impl SystemTag for Movers {}

    struct Everything;
    impl SystemTag for Everything {}

    fn e(raw: u32) -> Entity {
        Entity::from_raw(raw)
    }

    #[test]
    fn test_membership_tracks_signature() {
        let mut reg = SystemRegistry::new();
        reg.register::<Movers>().unwrap();
        reg.set_required::<Movers>(Signature::EMPTY.with(0).with(1))
            .unwrap();

        reg.notify_signature_changed(e(0), Signature::EMPTY.with(0));
        assert!(reg.members::<Movers>().unwrap().is_empty());

        reg.notify_signature_changed(e(0), Signature::EMPTY.with(0).with(1));
        assert!(reg.members::<Movers>().unwrap().contains(&e(0)));

        reg.notify_signature_changed(e(0), Signature::EMPTY.with(1));
        assert!(reg.members::<Movers>().unwrap().is_empty());
    }

    #[test]
    fn test_destruction_clears_membership() {
        let mut reg = SystemRegistry::new();
        reg.register::<Movers>().unwrap();
        reg.set_required::<Movers>(Signature::EMPTY.with(2)).unwrap();

        reg.notify_signature_changed(e(3), Signature::EMPTY.with(2));
        reg.notify_entity_destroyed(e(3));
        assert!(reg.members::<Movers>().unwrap().is_empty());
    }

    #[test]
    fn test_empty_requirement_accepts_any_signature_event() {
        let mut reg = SystemRegistry::new();
        reg.register::<Everything>().unwrap();
        reg.set_required::<Everything>(Signature::EMPTY).unwrap();

        reg.notify_signature_changed(e(1), Signature::EMPTY.with(5));
        assert!(reg.members::<Everything>().unwrap().contains(&e(1)));
    }

    #[test]
    fn test_double_registration_is_reported() {
        let mut reg = SystemRegistry::new();
        reg.register::<Movers>().unwrap();
        assert!(matches!(
            reg.register::<Movers>(),
            Err(EcsError::SystemAlreadyRegistered(_))
        ));
    }

    #[test]
    fn test_late_signature_is_reported() {
        let mut reg = SystemRegistry::new();
        reg.register::<Movers>().unwrap();

        reg.notify_signature_changed(e(0), Signature::EMPTY.with(0));
        assert!(matches!(
            reg.set_required::<Movers>(Signature::EMPTY.with(0)),
            Err(EcsError::SystemSignatureTooLate(_))
        ));

        // A level boundary re-arms configuration.
        reg.clear_all();
        assert!(reg.set_required::<Movers>(Signature::EMPTY.with(0)).is_ok());
    }

    #[test]
    fn test_reconfiguration_is_reported() {
        let mut reg = SystemRegistry::new();
        reg.register::<Movers>().unwrap();
        reg.set_required::<Movers>(Signature::EMPTY.with(0)).unwrap();
        assert!(matches!(
            reg.set_required::<Movers>(Signature::EMPTY.with(1)),
            Err(EcsError::SystemSignatureAlreadySet(_))
        ));
    }
}
