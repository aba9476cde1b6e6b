use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sqd_benchmark::synthetic_recording;
use sqd_core::{BlockSize, ExtractConfig, SqdDocument};

const CHANNELS: usize = 192;
const SAMPLES: usize = 60_000;

fn bench_open(c: &mut Criterion) {
    let image = synthetic_recording(CHANNELS, 1_000, 1000.0);

    c.bench_function("open_header", |b| {
        b.iter(|| SqdDocument::from_source(black_box(image.as_slice()), ExtractConfig::default()))
    });
}

fn bench_extract_channel(c: &mut Criterion) {
    let image = synthetic_recording(CHANNELS, SAMPLES, 1000.0);
    let mut group = c.benchmark_group("extract_channel");
    group.throughput(Throughput::Elements(SAMPLES as u64));

    for block in [64usize, 1000, 8192] {
        let cfg = ExtractConfig::default().with_block_size(BlockSize::Fixed(block));
        let doc = SqdDocument::from_source(image.as_slice(), cfg).unwrap();

        group.bench_with_input(BenchmarkId::new("raw", block), &doc, |b, doc| {
            b.iter(|| doc.extract_channel_raw(black_box(CHANNELS / 2)).unwrap())
        });
    }

    let doc = SqdDocument::from_source(image.as_slice(), ExtractConfig::default()).unwrap();
    group.bench_function("scaled", |b| {
        b.iter(|| doc.extract_channel_scaled(black_box(7)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_open, bench_extract_channel);
criterion_main!(benches);
