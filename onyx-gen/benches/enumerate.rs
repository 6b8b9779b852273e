use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use onyx_gen::{Alphabet, CharClass, Enumerator, ExclusionRule, ExclusionSet, LengthRange, Sampler};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn lowercase() -> Alphabet {
    Alphabet::from_classes(&[CharClass::Lower], "").unwrap()
}

/// 26^4 = 456,976 candidates per iteration
fn bench_enumerate(c: &mut Criterion) {
    let alphabet = lowercase();
    let lengths = LengthRange::single(4).unwrap();

    let mut group = c.benchmark_group("enumerate");
    group.throughput(Throughput::Elements(26u64.pow(4)));
    group.bench_function("lower_len4", |b| {
        b.iter(|| {
            for candidate in Enumerator::new(&alphabet, lengths) {
                black_box(candidate);
            }
        })
    });
    group.finish();
}

fn bench_enumerate_filtered(c: &mut Criterion) {
    let alphabet = Alphabet::from_classes(&CharClass::ALL, "").unwrap();
    let lengths = LengthRange::single(3).unwrap();
    let exclusions: ExclusionSet = ExclusionRule::ALL.into_iter().collect();

    c.bench_function("enumerate_filtered_all_rules_len3", |b| {
        b.iter(|| {
            Enumerator::new(&alphabet, lengths)
                .filter(|candidate| !exclusions.is_excluded(black_box(candidate)))
                .count()
        })
    });
}

fn bench_sample(c: &mut Criterion) {
    let alphabet = Alphabet::from_classes(&CharClass::ALL, "").unwrap();
    let lengths = LengthRange::new(8, 16).unwrap();

    let mut group = c.benchmark_group("sample");
    group.throughput(Throughput::Elements(100_000));
    group.bench_function("all_classes_8_16", |b| {
        b.iter(|| {
            // Fixed seed for reproducible benchmark results
            let sampler = Sampler::with_rng(&alphabet, lengths, StdRng::seed_from_u64(42));
            for candidate in sampler.take(100_000) {
                black_box(candidate);
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_enumerate, bench_enumerate_filtered, bench_sample);
criterion_main!(benches);
