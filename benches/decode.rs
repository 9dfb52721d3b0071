//! Benchmarks for bitstream decoding.
//!
//! Run with: `cargo bench`
//! Compare with baseline: `cargo bench -- --save-baseline main`
//! Compare against baseline: `cargo bench -- --baseline main`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use bitlz::{decode, generate_bitstream, sweep, BitstreamWriter, DecoderParams, Lz77Decoder, SweepConfig};

const TEXT: &[u8] = b"the rain in spain falls mainly on the plain the rain in spain falls mainly";

/// Literal tokens only.
fn literal_stream(repeat: usize) -> String {
    let mut writer = BitstreamWriter::new(DecoderParams::default());
    for _ in 0..repeat {
        writer.literals(TEXT);
    }
    writer.finish()
}

/// One literal run followed by long self-overlapping copies.
fn copy_stream(copies: usize) -> String {
    let params = DecoderParams::new(12, 8);
    let mut writer = BitstreamWriter::new(params);
    writer.literals(TEXT);
    for _ in 0..copies {
        writer.back_reference(TEXT.len() as u64, 255);
    }
    writer.finish()
}

/// Benchmark literal-only decoding
fn bench_literals(c: &mut Criterion) {
    let bits = literal_stream(64);

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes((TEXT.len() * 64) as u64));

    group.bench_function("literals", |b| {
        b.iter(|| black_box(decode(black_box(bits.as_bytes()), 9, 3)));
    });

    group.finish();
}

/// Benchmark back-reference copies through a full window
fn bench_copies(c: &mut Criterion) {
    let bits = copy_stream(256);
    let expected = decode(bits.as_bytes(), 12, 8).output.len();

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(expected as u64));

    group.bench_function("copies_fresh", |b| {
        b.iter(|| black_box(decode(black_box(bits.as_bytes()), 12, 8)));
    });

    group.bench_function("copies_reused", |b| {
        let mut decoder = Lz77Decoder::new(DecoderParams::new(12, 8));
        b.iter(|| black_box(decoder.decode(black_box(bits.as_bytes()))));
    });

    group.finish();
}

/// Benchmark the default 3x3 sweep over the plain demonstration bitstream
fn bench_sweep(c: &mut Criterion) {
    let bits = generate_bitstream(TEXT);
    let config = SweepConfig::default();

    c.bench_function("sweep_default_grid", |b| {
        b.iter(|| black_box(sweep(black_box(bits.as_bytes()), &config)));
    });
}

criterion_group!(benches, bench_literals, bench_copies, bench_sweep);
criterion_main!(benches);
