//! Benchmarks for the CPU simulation and rasterizer.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use motes::{DrawContext, FieldConfig, ParticleField, PixelSurface, Vec2};

fn field(count: u32) -> ParticleField {
    let mut field = ParticleField::new(
        FieldConfig::default().with_particle_count(count).with_seed(1),
        1280,
        720,
    );
    field.set_pointer(Vec2::new(640.0, 360.0));
    field
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for count in [55u32, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut field = field(count);
            b.iter(|| {
                field.step();
                black_box(field.particles().len())
            })
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for count in [55u32, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let field = field(count);
            let mut surface = PixelSurface::new(1280, 720);
            b.iter(|| {
                field.render(&mut surface);
                black_box(surface.size())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step, bench_render);
criterion_main!(benches);
