//! Benchmarks for beam contact elements

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use beam_contact::prelude::*;
use nalgebra::DVector;

fn create_planar_element() -> BeamContact2D {
    let nodes = [
        Node::planar(1, 0.0, 0.0, 3),
        Node::planar(2, 1.0, 0.0, 3),
        Node::planar(3, 0.4, 0.05, 2),
        Node::planar(4, 0.4, 0.05, 2),
    ];
    let material = ContactMaterial2D::new(FrictionParams::coulomb(0.3, 1.0e3)).unwrap();
    BeamContact2D::new(1, nodes.each_ref(), material, ContactSettings::planar(0.1)).unwrap()
}

fn create_spatial_element() -> BeamContact3D {
    let nodes = [
        Node::new(1, 0.0, 0.0, 0.0, 6),
        Node::new(2, 1.0, 0.0, 0.0, 6),
        Node::new(3, 0.4, 0.1, 0.0, 3),
        Node::new(4, 0.4, 0.1, 0.0, 3),
    ];
    let material = ContactMaterial3D::new(FrictionParams::new(0.3, 1.0e3, 0.1, 0.1)).unwrap();
    BeamContact3D::new(
        1,
        nodes.each_ref(),
        CoordTransform::new(1, [0.0, 0.0, 1.0]),
        material,
        ContactSettings::spatial(0.1),
    )
    .unwrap()
}

fn benchmark_planar_update(c: &mut Criterion) {
    let mut element = create_planar_element();
    let mut disp = [0.0; 10];
    disp[2] = 0.05;
    disp[6] = 0.02;
    disp[8] = 10.0;
    c.bench_function("planar_update_and_tangent", |b| {
        b.iter(|| {
            element.update(black_box(&disp)).unwrap();
            black_box(element.stiffness());
            black_box(element.force());
        })
    });
}

fn benchmark_spatial_update(c: &mut Criterion) {
    let mut element = create_spatial_element();
    let mut disp = [0.0; 18];
    disp[3] = 0.02;
    disp[11] = -0.03;
    disp[12] = 0.02;
    disp[14] = 0.01;
    disp[15] = 10.0;
    c.bench_function("spatial_update_and_tangent", |b| {
        b.iter(|| {
            element.update(black_box(&disp)).unwrap();
            black_box(element.stiffness());
            black_box(element.force());
        })
    });
}

fn benchmark_spatial_step(c: &mut Criterion) {
    let driver = NewtonDriver::default();
    let mut load = DVector::<f64>::zeros(18);
    load[13] = -10.0;
    let mut prescribed: Vec<(usize, f64)> = (0..12).map(|dof| (dof, 0.0)).collect();
    prescribed.push((12, 0.03));
    prescribed.push((14, 0.0));

    c.bench_function("spatial_newton_step", |b| {
        b.iter(|| {
            let mut element = create_spatial_element();
            let mut u = DVector::<f64>::zeros(18);
            driver.solve_step(&mut element, &load, &prescribed, &mut u).unwrap();
            black_box(&u);
        })
    });
}

criterion_group!(
    benches,
    benchmark_planar_update,
    benchmark_spatial_update,
    benchmark_spatial_step
);
criterion_main!(benches);
