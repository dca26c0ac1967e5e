// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::{Quat, Vec3};
use grasp_utils::{
    EntityProperties, EntityType, Placement, distance_to_box, is_distance_grabbable,
    project_onto_plane,
};

fn gen_points(n: usize) -> Vec<Vec3> {
    (0..n)
        .map(|i| {
            let t = i as f32 * 0.37;
            Vec3::new(t.sin() * 3.0, t.cos() * 2.0, (t * 0.5).sin())
        })
        .collect()
}

fn rotated_box() -> EntityProperties {
    EntityProperties {
        entity_type: EntityType::Box,
        position: Vec3::new(0.5, 1.0, -2.0),
        rotation: Quat::from_rotation_y(0.7) * Quat::from_rotation_x(0.2),
        dimensions: Vec3::new(1.0, 0.5, 2.0),
        registration_point: Vec3::new(0.5, 0.0, 0.5),
        ..Default::default()
    }
}

fn bench_distance(c: &mut Criterion) {
    let points = gen_points(1024);
    let placement = Placement::from_entity(&rotated_box());
    c.bench_function("distance_to_box_1024", |b| {
        b.iter(|| {
            points
                .iter()
                .map(|&p| distance_to_box(black_box(p), &placement))
                .sum::<f32>()
        });
    });
}

fn bench_projection(c: &mut Criterion) {
    let points = gen_points(1024);
    let placement = Placement::from_entity(&rotated_box());
    c.bench_function("project_onto_plane_1024", |b| {
        b.iter(|| {
            points
                .iter()
                .map(|&p| project_onto_plane(black_box(p), &placement).x)
                .sum::<f64>()
        });
    });
}

fn bench_grabbable(c: &mut Criterion) {
    let mut props = rotated_box();
    props.dynamic = true;
    props.shape_type = Some("box".to_owned());
    props.user_data = Some(
        r#"{"grabbableKey":{"grabbable":true,"kinematic":false,"wantsTrigger":true},"other":[1,2,3]}"#
            .to_owned(),
    );
    c.bench_function("is_distance_grabbable_user_data", |b| {
        b.iter(|| is_distance_grabbable(black_box(&props)));
    });
}

criterion_group!(benches, bench_distance, bench_projection, bench_grabbable);
criterion_main!(benches);
