//! # ECS Lifecycle Tests
//!
//! End-to-end checks of the coordinator contract: signature/membership
//! consistency across adds, removes and destroys, and dense-store packing
//! under churn.

use bytemuck::{Pod, Zeroable};
use gridgym_core::{Component, Coordinator, Entity, Signature, SystemTag};

#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
struct Position {
    x: f32,
    y: f32,
}
impl Component for Position {
    const KIND: u8 = 0;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
struct Velocity {
    x: f32,
    y: f32,
}
impl Component for Velocity {
    const KIND: u8 = 1;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
struct Health {
    points: f32,
}
impl Component for Health {
    const KIND: u8 = 2;
}

struct Movers;
impl SystemTag for Movers {}

struct Mortals;
impl SystemTag for Mortals {}

fn world() -> Coordinator {
    let mut c = Coordinator::new(64);
    c.register_component::<Position>().unwrap();
    c.register_component::<Velocity>().unwrap();
    c.register_component::<Health>().unwrap();

    c.register_system::<Movers>().unwrap();
    c.set_system_signature::<Movers>(
        Signature::EMPTY.with(Position::KIND).with(Velocity::KIND),
    )
    .unwrap();

    c.register_system::<Mortals>().unwrap();
    c.set_system_signature::<Mortals>(Signature::EMPTY.with(Health::KIND))
        .unwrap();
    c
}

/// Membership must equal the superset test for every live entity, always.
fn assert_membership_consistent(c: &Coordinator, entities: &[Entity]) {
    let movers_required = Signature::EMPTY.with(Position::KIND).with(Velocity::KIND);
    let members = c.system_members::<Movers>().unwrap();

    for &e in entities {
        let Ok(sig) = c.signature(e) else {
            assert!(!members.contains(&e));
            continue;
        };
        assert_eq!(
            members.contains(&e),
            sig.is_superset_of(movers_required),
            "membership out of sync for {e:?}"
        );
    }
}

#[test]
fn three_entities_partial_overlap() {
    let mut c = world();

    // Three entities, Position on all, Velocity on the first and third.
    let entities: Vec<Entity> = (0..3).map(|_| c.create_entity().unwrap()).collect();
    for &e in &entities {
        c.add_component(e, Position::default()).unwrap();
    }
    c.add_component(entities[0], Velocity::default()).unwrap();
    c.add_component(entities[2], Velocity::default()).unwrap();

    let members = c.system_members::<Movers>().unwrap();
    let expect: Vec<Entity> = vec![entities[0], entities[2]];
    assert_eq!(members.iter().copied().collect::<Vec<_>>(), expect);
    assert_membership_consistent(&c, &entities);

    // Destroying the first mover shrinks the set and the dense store.
    assert_eq!(c.component_count::<Position>().unwrap(), 3);
    c.destroy_entity(entities[0]).unwrap();

    let members = c.system_members::<Movers>().unwrap();
    assert_eq!(members.iter().copied().collect::<Vec<_>>(), vec![entities[2]]);
    assert_eq!(c.component_count::<Position>().unwrap(), 2);
    assert_membership_consistent(&c, &entities);
}

#[test]
fn membership_stays_consistent_under_churn() {
    let mut c = world();
    let entities: Vec<Entity> = (0..16).map(|_| c.create_entity().unwrap()).collect();

    for (i, &e) in entities.iter().enumerate() {
        c.add_component(e, Position::default()).unwrap();
        if i % 2 == 0 {
            c.add_component(e, Velocity::default()).unwrap();
        }
        if i % 3 == 0 {
            c.add_component(e, Health { points: 10.0 }).unwrap();
        }
        assert_membership_consistent(&c, &entities);
    }

    for (i, &e) in entities.iter().enumerate() {
        match i % 4 {
            0 => c.remove_component::<Velocity>(e).unwrap(),
            1 => c.add_component(e, Velocity::default()).unwrap(),
            2 => c.destroy_entity(e).unwrap(),
            _ => {}
        }
        assert_membership_consistent(&c, &entities);
    }
}

#[test]
fn clear_entities_resets_everything() {
    let mut c = world();
    for _ in 0..8 {
        let e = c.create_entity().unwrap();
        c.add_component(e, Position::default()).unwrap();
        c.add_component(e, Velocity::default()).unwrap();
        c.add_component(e, Health { points: 1.0 }).unwrap();
    }

    c.clear_entities();

    assert_eq!(c.live_entities(), 0);
    assert_eq!(c.component_count::<Position>().unwrap(), 0);
    assert_eq!(c.component_count::<Velocity>().unwrap(), 0);
    assert_eq!(c.component_count::<Health>().unwrap(), 0);
    assert!(c.system_members::<Movers>().unwrap().is_empty());
    assert!(c.system_members::<Mortals>().unwrap().is_empty());
}

#[test]
fn episode_id_sequences_replay_after_clear() {
    let mut c = world();

    let first: Vec<u32> = (0..5)
        .map(|_| c.create_entity().unwrap().index())
        .collect();
    c.clear_entities();
    let second: Vec<u32> = (0..5)
        .map(|_| c.create_entity().unwrap().index())
        .collect();

    assert_eq!(first, second);
}
