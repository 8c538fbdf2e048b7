use brushline::api::{ChartEngine, ChartEngineConfig};
use brushline::core::{
    LinearScale, NearestPointIndex, Sample, TimeScale, ValueScale, Viewport, project_line_path,
};
use brushline::interaction::ChartMode;
use brushline::render::NullRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn wave_samples(count: usize) -> Vec<Sample> {
    (0..count)
        .map(|i| {
            let t = i as f64 * 60.0;
            Sample::new(t, 500.0 + (t / 3_600.0).sin() * 120.0 + (t / 600.0).cos() * 15.0)
        })
        .collect()
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new(0.0, 10_000.0, 0.0, 1_920.0).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.map(black_box(4_321.123));
            let _ = scale.invert(px);
        })
    });
}

fn bench_nearest_lookup_100k(c: &mut Criterion) {
    let viewport = Viewport::new(1920, 1080);
    let samples = wave_samples(100_000);
    let index = NearestPointIndex::new(&samples);
    let time_scale = TimeScale::new(
        samples[0].time,
        samples[samples.len() - 1].time,
        viewport,
    )
    .expect("valid time scale");

    c.bench_function("nearest_lookup_100k", |b| {
        b.iter(|| {
            let _ = index.nearest_to_x(black_box(1_234.5), time_scale);
        })
    });
}

fn bench_line_projection_10k(c: &mut Criterion) {
    let viewport = Viewport::new(1920, 1080);
    let samples = wave_samples(10_000);
    let time_scale = TimeScale::new(
        samples[0].time,
        samples[samples.len() - 1].time,
        viewport,
    )
    .expect("valid time scale");
    let value_scale = ValueScale::new(700.0, viewport).expect("valid value scale");

    c.bench_function("line_projection_10k", |b| {
        b.iter(|| {
            let _ = project_line_path(
                black_box(&samples),
                black_box(time_scale),
                black_box(value_scale),
            );
        })
    });
}

fn bench_pointer_move_render_2k(c: &mut Criterion) {
    let config = ChartEngineConfig::new(Viewport::new(1600, 900));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine
        .create(wave_samples(2_000), ChartMode::Tooltip, "Revenue")
        .expect("create chart");

    c.bench_function("pointer_move_render_2k", |b| {
        b.iter(|| {
            let _ = engine
                .pointer_move(black_box(812.0), black_box(300.0))
                .expect("pointer move should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_nearest_lookup_100k,
    bench_line_projection_10k,
    bench_pointer_move_render_2k
);
criterion_main!(benches);
