use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rs_rigidbody::interactions::{box_box, box_sphere, gjk_epa, sphere_sphere, ALL_AXES};
use rs_rigidbody::models::{Body, Shape, Transform};
use rs_rigidbody::utils::DEFAULT_PHYSICS_CONSTANTS;
use rs_rigidbody::world::Scene;

fn placed(shape: Shape, position: (f64, f64, f64), rotation: (f64, f64, f64)) -> Body {
    let mut body = Body::new(shape);
    body.set_parent_transform(Transform::from_translation_rotation(position, rotation));
    body
}

pub fn bench_narrow_phase(c: &mut Criterion) {
    let mut group = c.benchmark_group("narrow_phase");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(100);

    let a = Transform::identity();
    let b = Transform::from_translation_rotation((1.2, 0.3, -0.4), (0.3, 0.7, 0.1));
    let unit = (1.0, 1.0, 1.0);

    group.bench_function("sphere_sphere", |bench| bench.iter(|| {
        sphere_sphere(black_box((0.0, 0.0, 0.0)), 1.0, black_box((1.5, 0.0, 0.0)), 1.0)
    }));

    group.bench_function("box_sphere", |bench| bench.iter(|| {
        box_sphere(black_box(&b), unit, black_box((0.0, 0.0, 0.0)), 1.0)
    }));

    group.bench_function("sat_box_box", |bench| bench.iter(|| {
        let mut state = ALL_AXES;
        box_box(black_box(&a), unit, black_box(&b), unit, &mut state, 1e-6)
    }));

    group.bench_function("sat_early_exit", |bench| {
        let far = Transform::from_translation((100.0, 0.0, 0.0));
        bench.iter(|| {
            let mut state = ALL_AXES;
            box_box(black_box(&a), unit, black_box(&far), unit, &mut state, 1e-6)
        })
    });

    let box_a = placed(Shape::new_box(unit), (0.0, 0.0, 0.0), (0.0, 0.0, 0.0));
    let box_b = placed(Shape::new_box(unit), (1.2, 0.3, -0.4), (0.3, 0.7, 0.1));
    group.bench_function("gjk_epa_box_box", |bench| bench.iter(|| {
        gjk_epa(black_box(&box_a), black_box(&box_b), &DEFAULT_PHYSICS_CONSTANTS)
    }));

    group.finish();
}

pub fn bench_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");
    group.sample_size(20);

    for scene in Scene::ALL {
        group.bench_function(scene.name(), |bench| {
            bench.iter_batched(
                || scene.build(DEFAULT_PHYSICS_CONSTANTS).unwrap(),
                |mut world| {
                    for _ in 0..10 {
                        world.step(1.0 / 60.0);
                    }
                    world
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_narrow_phase, bench_world_step);
criterion_main!(benches);
