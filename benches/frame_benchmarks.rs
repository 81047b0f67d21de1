//! 帧渲染性能基准测试
//!
//! 测试颜色场、拖尾渲染和整帧渲染的性能

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::IVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use starburst::config::{PopulationConfig, StarConfig, TrailConfig};
use starburst::particles::{Population, StarSpawner, TrailBuffer};
use starburst::platform::Viewport;
use starburst::render::{color_at, Canvas, FrameRenderer, Rgb};
use std::hint::black_box;

fn bench_color_field(c: &mut Criterion) {
    c.bench_function("color_at", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for i in 0..1000 {
                let color = color_at(black_box(i as f64), black_box(i as f64 * 0.5), 1.3, 4.2);
                acc = acc.wrapping_add(color.r as u32);
            }
            black_box(acc)
        });
    });
}

fn bench_trail_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("trail_render");

    for sample_count in [1_000usize, 10_000, 100_000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(sample_count),
            sample_count,
            |b, &count| {
                let mut trail = TrailBuffer::default();
                for i in 0..count {
                    trail.push(
                        IVec2::new((i % 640) as i32, ((i / 640) % 480) as i32),
                        Rgb::new(200, 120, 40),
                        0.0,
                    );
                }
                let mut canvas = Canvas::new(Viewport::new(640, 480));

                // 时间不推进，采样点不会被剪枝
                b.iter(|| black_box(trail.render(&mut canvas, 1.0, 3)));
            },
        );
    }

    group.finish();
}

fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");
    group.sample_size(20);

    for star_count in [10u32, 50, 100].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(star_count),
            star_count,
            |b, &count| {
                let viewport = Viewport::new(800, 600);
                let population_config = PopulationConfig {
                    min_stars: count,
                    max_stars: count,
                    retarget_interval: f64::MAX,
                };
                let mut rng = StdRng::seed_from_u64(17);
                let spawner =
                    StarSpawner::new(&StarConfig::default(), &TrailConfig::default()).unwrap();
                let mut population =
                    Population::new(spawner, &population_config, viewport, 0.0, &mut rng)
                        .unwrap();
                let renderer = FrameRenderer::default();
                let mut canvas = Canvas::new(viewport);

                let mut now = 0.0;
                b.iter(|| {
                    now = (now + 1.0 / 60.0) % 4.0;
                    population.stars_mut().iter_mut().for_each(|s| s.trail.clear());
                    black_box(renderer.render_frame(&mut canvas, &mut population, now, &mut rng))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_color_field,
    bench_trail_render,
    bench_render_frame
);
criterion_main!(benches);
