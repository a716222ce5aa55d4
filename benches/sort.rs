//! Benchmark comparing the two sort engines of `ring_queue`: the recursive
//! in-place merge sort against the generic non-recursive comparator
//! adapter.
//!
//! Run with: cargo bench --bench sort

use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ring_queue::{Order, Queue};

const SIZES: [usize; 3] = [100, 1_000, 10_000];

fn random_words(len: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    (0..len)
        .map(|_| {
            let word_len = rng.gen_range(1..12);
            (0..word_len)
                .map(|_| rng.gen_range(b'a'..=b'z') as char)
                .collect()
        })
        .collect()
}

fn bench_sort_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    for &size in SIZES.iter() {
        let words = random_words(size);

        group.bench_with_input(BenchmarkId::new("recursive", size), &words, |b, words| {
            b.iter(|| {
                let mut queue: Queue<String> = words.iter().cloned().collect();
                queue.sort(Order::Ascending);
                black_box(queue.pop_front())
            })
        });

        group.bench_with_input(BenchmarkId::new("adapter", size), &words, |b, words| {
            b.iter(|| {
                let mut queue: Queue<String> = words.iter().cloned().collect();
                queue.sort_by(|a, b| a.cmp(b));
                black_box(queue.pop_front())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sort_engines);
criterion_main!(benches);
