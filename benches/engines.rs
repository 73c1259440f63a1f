use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use memokit::builder::{Engine, PolicyConfig};
use memokit::policy::mq::MqConfig;
use memokit::policy::tlru::TlruConfig;
use memokit::traits::CacheEngine;

const CAPACITY: usize = 1024;
const KEY_SPACE: u64 = 4096;
const OPS: usize = 8192;

/// Skewed get/put trace: a small hot set plus a uniform cold tail.
fn workload(seed: u64) -> Vec<(bool, u64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..OPS)
        .map(|_| {
            let key = if rng.gen_bool(0.8) {
                rng.gen_range(0..KEY_SPACE / 16)
            } else {
                rng.gen_range(0..KEY_SPACE)
            };
            (rng.gen_bool(0.7), key)
        })
        .collect()
}

fn run_trace(cache: &mut Engine<u64, u64>, trace: &[(bool, u64)]) {
    for &(is_get, key) in trace {
        if is_get {
            if cache.get(&key).is_none() {
                // Simulate the facade: miss, compute, store
                cache.put(key, key);
            }
        } else {
            cache.put(key, key);
        }
    }
}

fn bench_policies(c: &mut Criterion) {
    let policies: Vec<(&str, PolicyConfig)> = vec![
        ("fifo", PolicyConfig::Fifo { size: CAPACITY }),
        ("lru", PolicyConfig::Lru { size: CAPACITY }),
        ("lfu", PolicyConfig::Lfu { size: CAPACITY }),
        (
            "slru",
            PolicyConfig::Slru {
                protected_size: CAPACITY / 2,
                probationary_size: CAPACITY / 2,
            },
        ),
        (
            "two_q_full",
            PolicyConfig::TwoQFull {
                primary_size: CAPACITY / 2,
                secondary_in_size: CAPACITY / 4,
                secondary_out_size: CAPACITY / 2,
            },
        ),
        ("mq", PolicyConfig::Mq(MqConfig::new(CAPACITY, CAPACITY / 2, 512))),
        (
            "tlru",
            PolicyConfig::Tlru(TlruConfig::new(CAPACITY, 100_000).access_based(true)),
        ),
        ("rr", PolicyConfig::Rr { size: CAPACITY }),
    ];

    let trace = workload(0xCAFE);
    let mut group = c.benchmark_group("memoization_trace");
    for (name, config) in policies {
        group.bench_function(name, |b| {
            b.iter_batched(
                || Engine::new(config).unwrap(),
                |mut cache| run_trace(&mut cache, &trace),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_hot_get(c: &mut Criterion) {
    c.bench_function("lru_hot_get", |b| {
        b.iter_batched(
            || {
                let mut cache = Engine::new(PolicyConfig::Lru { size: CAPACITY }).unwrap();
                for i in 0..CAPACITY as u64 {
                    cache.put(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..CAPACITY as u64 {
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_policies, bench_hot_get);
criterion_main!(benches);
