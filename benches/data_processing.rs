//! Benchmarks for channel data operations
//!
//! Run with: cargo bench

use chanvis_rs::config::{DisplayConfig, GenerationConfig, ValueRange};
use chanvis_rs::generator::sampler::append_tick;
use chanvis_rs::persistence::{export_json, parse_channels};
use chanvis_rs::render::ChannelView;
use chanvis_rs::{Channel, ChannelSet, Generator};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

fn filled(channels: usize, samples: usize) -> ChannelSet {
    let mut set = ChannelSet::with_count(channels);
    let mut rng = StdRng::seed_from_u64(1);
    let range = ValueRange::new(0, 100).unwrap();
    for _ in 0..samples {
        append_tick(&mut rng, range, &mut set);
    }
    set
}

fn bench_tick_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_generation");

    for channels in [1, 8, 32].iter() {
        group.throughput(Throughput::Elements(*channels as u64));
        group.bench_with_input(
            BenchmarkId::new("append_tick", channels),
            channels,
            |b, &channels| {
                let mut set = ChannelSet::with_count(channels);
                let mut rng = StdRng::seed_from_u64(7);
                let range = ValueRange::new(-1000, 1000).unwrap();
                b.iter(|| {
                    append_tick(&mut rng, black_box(range), &mut set);
                    if set.total_samples() > 1_000_000 {
                        set.clear();
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_generator_poll(c: &mut Criterion) {
    c.bench_function("generator_poll_due", |b| {
        let config = GenerationConfig {
            interval_ms: 1,
            range: ValueRange::new(0, 10).unwrap(),
        };
        let mut generator = Generator::seeded(config, 3);
        let mut set = ChannelSet::with_count(3);
        let mut now = Instant::now();
        generator.start(now);
        b.iter(|| {
            now += Duration::from_millis(1);
            black_box(generator.poll(&mut set, now));
            if set.total_samples() > 1_000_000 {
                set.clear();
            }
        });
    });
}

fn bench_channel_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("channel_view");
    let display = DisplayConfig::default();

    for samples in [100, 1_000, 10_000].iter() {
        let channel = Channel::from(filled(1, *samples).get(0).unwrap().values().to_vec());
        group.throughput(Throughput::Elements(*samples as u64));
        group.bench_with_input(BenchmarkId::new("derive", samples), &channel, |b, channel| {
            b.iter(|| {
                let view = ChannelView::derive(0, black_box(channel), &display);
                black_box(view.track_height())
            });
        });
    }

    group.finish();
}

fn bench_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("json");

    for samples in [100, 10_000].iter() {
        let set = filled(3, *samples);
        let text = export_json(&set).unwrap();

        group.bench_with_input(BenchmarkId::new("export", samples), &set, |b, set| {
            b.iter(|| export_json(black_box(set)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("import", samples), &text, |b, text| {
            b.iter(|| parse_channels(black_box(text)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tick_generation,
    bench_generator_poll,
    bench_channel_view,
    bench_json,
);

criterion_main!(benches);
