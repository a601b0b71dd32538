use base91_codec_core::{decode, encode, encode_to_vec, OutputBuffer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::StdRng;
use rand::{Rng, SeedableRng};

fn random_record(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(len as u64);
    (0..len).map(|_| rng.gen::<u8>()).collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("base91");
    for len in [64, 1024, 64 * 1024] {
        let record = random_record(len);
        let encoded = encode_to_vec(&record);
        group.throughput(Throughput::Bytes(len as u64));

        // One buffer per benchmark, reset per iteration like a per-record caller
        let mut buffer = OutputBuffer::new();
        group.bench_with_input(BenchmarkId::new("encode", len), &record, |b, record| {
            b.iter(|| {
                buffer.reset();
                encode(black_box(record), &mut buffer);
            })
        });
        group.bench_with_input(BenchmarkId::new("decode", len), &encoded, |b, encoded| {
            b.iter(|| {
                buffer.reset();
                decode(black_box(encoded), &mut buffer).unwrap();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
