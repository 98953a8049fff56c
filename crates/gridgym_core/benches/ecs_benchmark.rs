//! ECS churn benchmarks: spawn/despawn cycles and component add/remove with
//! membership maintenance, the two paths a level reset exercises.

use bytemuck::{Pod, Zeroable};
use criterion::{criterion_group, criterion_main, Criterion};
use gridgym_core::{Component, Coordinator, Signature, SystemTag};
use std::hint::black_box;

#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
#[repr(C)]
struct Position {
    x: f32,
    y: f32,
}
impl Component for Position {
    const KIND: u8 = 0;
}

#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
#[repr(C)]
struct Velocity {
    x: f32,
    y: f32,
}
impl Component for Velocity {
    const KIND: u8 = 1;
}

struct Movers;
impl SystemTag for Movers {}

fn world() -> Coordinator {
    let mut c = Coordinator::new(1000);
    c.register_component::<Position>().unwrap();
    c.register_component::<Velocity>().unwrap();
    c.register_system::<Movers>().unwrap();
    c.set_system_signature::<Movers>(
        Signature::EMPTY.with(Position::KIND).with(Velocity::KIND),
    )
    .unwrap();
    c
}

fn bench_spawn_clear(c: &mut Criterion) {
    c.bench_function("spawn_500_then_clear", |b| {
        let mut world = world();
        b.iter(|| {
            for _ in 0..500 {
                let e = world.create_entity().unwrap();
                world.add_component(e, Position::default()).unwrap();
                world.add_component(e, Velocity::default()).unwrap();
            }
            world.clear_entities();
            black_box(world.live_entities())
        });
    });
}

fn bench_component_churn(c: &mut Criterion) {
    c.bench_function("velocity_toggle_200", |b| {
        let mut world = world();
        let entities: Vec<_> = (0..200)
            .map(|_| {
                let e = world.create_entity().unwrap();
                world.add_component(e, Position::default()).unwrap();
                e
            })
            .collect();

        b.iter(|| {
            for &e in &entities {
                world.add_component(e, Velocity::default()).unwrap();
            }
            for &e in &entities {
                world.remove_component::<Velocity>(e).unwrap();
            }
            black_box(world.system_members::<Movers>().unwrap().len())
        });
    });
}

criterion_group!(benches, bench_spawn_clear, bench_component_churn);
criterion_main!(benches);
