use bytemuck::{Pod, Zeroable};
use sable_ecs::prelude::*;
use criterion::*;

const COUNT: usize = 10000;

#[repr(C)]
#[derive(Default, Clone, Copy, Pod, Zeroable, Attribute)]
struct Position([f32; 3]);

#[repr(C)]
#[derive(Default, Clone, Copy, Pod, Zeroable, Attribute)]
struct Rotation([f32; 3]);

#[repr(C)]
#[derive(Default, Clone, Copy, Pod, Zeroable, Attribute)]
struct Velocity([f32; 3]);

#[derive(Default)]
struct Movement;

impl System for Movement {
    fn tick_archetype(&mut self, ctx: &mut SystemContext, delta_time: f32) -> EcsResult<()> {
        ctx.for_each(|ctx, id, _| {
            let Velocity(v) = ctx.get(id)?;
            ctx.update(id, |Position(p): &mut Position| {
                for (p, v) in p.iter_mut().zip(v) {
                    *p += v * delta_time;
                }
            })
        })
    }
}

fn world() -> EcsManager {
    let mut ecs = EcsManager::new();
    ecs.register_attribute::<Position>().unwrap();
    ecs.register_attribute::<Rotation>().unwrap();
    ecs.register_attribute::<Velocity>().unwrap();
    ecs
}

fn populate(ecs: &mut EcsManager) -> Vec<Entity> {
    (0..COUNT)
        .map(|i| {
            let entity = ecs.create_entity().unwrap();
            ecs.add_attribute(entity, Position::default()).unwrap();
            ecs.add_attribute(entity, Rotation::default()).unwrap();
            ecs.add_attribute(entity, Velocity([i as f32, 1.0, 0.0])).unwrap();
            entity
        })
        .collect()
}

fn create_entities(c: &mut Criterion) {
    c.bench_function("Create entities", |b| {
        b.iter_batched(world, |mut ecs| populate(&mut ecs), BatchSize::PerIteration);
    });
}

fn destroy_entities(c: &mut Criterion) {
    c.bench_function("Destroy entities", |b| {
        b.iter_batched(
            || {
                let mut ecs = world();
                let entities = populate(&mut ecs);
                (ecs, entities)
            },
            |(mut ecs, entities)| {
                for entity in entities {
                    ecs.destroy_entity(entity).unwrap();
                }
            },
            BatchSize::PerIteration,
        );
    });
}

fn update_systems(c: &mut Criterion) {
    c.bench_function("Update systems", |b| {
        let mut ecs = world();
        let signature = ecs.signature_of::<(Position, Velocity)>().unwrap();
        ecs.register_system::<Movement>(signature);
        populate(&mut ecs);

        b.iter(|| ecs.update_systems(1.0 / 60.0).unwrap());
    });
}

criterion_group!(benchmarks, create_entities, destroy_entities, update_systems);
criterion_main!(benchmarks);
