use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sb_tree::SBTree;
use std::collections::BTreeSet;
use std::hint::black_box;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_sets() -> [(&'static str, Vec<i64>); 3] {
    [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ]
}

// ─── Insertion ──────────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    for (name, keys) in key_sets() {
        let mut group = c.benchmark_group(format!("insert_{name}"));

        group.bench_function(BenchmarkId::new("SBTree::insert_unique", N), |b| {
            b.iter(|| {
                let mut tree = SBTree::new();
                for &k in &keys {
                    tree.insert_unique(k);
                }
                tree
            });
        });

        group.bench_function(BenchmarkId::new("SBTree::insert_equal", N), |b| {
            b.iter(|| {
                let mut tree = SBTree::new();
                for &k in &keys {
                    tree.insert_equal(k);
                }
                tree
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.finish();
    }
}

// ─── Lookup ─────────────────────────────────────────────────────────────────

fn bench_contains(c: &mut Criterion) {
    for (name, keys) in key_sets() {
        let mut group = c.benchmark_group(format!("contains_{name}"));
        let tree: SBTree<i64> = keys.iter().copied().collect();
        let set: BTreeSet<i64> = keys.iter().copied().collect();

        group.bench_function(BenchmarkId::new("SBTree", N), |b| {
            b.iter(|| {
                for k in &keys {
                    black_box(tree.contains(k));
                }
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| {
                for k in &keys {
                    black_box(set.contains(k));
                }
            });
        });

        group.finish();
    }
}

// ─── Removal ────────────────────────────────────────────────────────────────

fn bench_remove(c: &mut Criterion) {
    for (name, keys) in key_sets() {
        let mut group = c.benchmark_group(format!("remove_{name}"));
        let tree: SBTree<i64> = keys.iter().copied().collect();
        let set: BTreeSet<i64> = keys.iter().copied().collect();

        group.bench_function(BenchmarkId::new("SBTree", N), |b| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    for k in &keys {
                        tree.erase_key(k);
                    }
                    tree
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter_batched(
                || set.clone(),
                |mut set| {
                    for k in &keys {
                        set.remove(k);
                    }
                    set
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.finish();
    }
}

// ─── Order statistics ───────────────────────────────────────────────────────

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_random");
    let keys = random_keys(N);
    let tree: SBTree<i64> = keys.iter().copied().collect();
    let set: BTreeSet<i64> = keys.iter().copied().collect();
    let len = tree.len();

    group.bench_function(BenchmarkId::new("SBTree", N), |b| {
        b.iter(|| {
            for i in (0..len).step_by(97) {
                black_box(tree.get_by_rank(i));
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet::iter().nth", N), |b| {
        b.iter(|| {
            for i in (0..len).step_by(97) {
                black_box(set.iter().nth(i));
            }
        });
    });

    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_random");
    let keys = random_keys(N);
    let tree: SBTree<i64> = keys.iter().copied().collect();
    let set: BTreeSet<i64> = keys.iter().copied().collect();

    group.bench_function(BenchmarkId::new("SBTree", N), |b| {
        b.iter(|| {
            for k in keys.iter().step_by(97) {
                black_box(tree.rank(k));
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet::range().count", N), |b| {
        b.iter(|| {
            for k in keys.iter().step_by(97) {
                black_box(set.range(..k).count());
            }
        });
    });

    group.finish();
}

fn bench_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_random");
    let keys = random_keys(N);
    let tree: SBTree<i64> = keys.iter().copied().collect();
    let set: BTreeSet<i64> = keys.iter().copied().collect();

    group.bench_function(BenchmarkId::new("SBTree", N), |b| b.iter(|| tree.clone()));
    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| b.iter(|| set.clone()));

    group.finish();
}

criterion_group!(crud_benches, bench_insert, bench_contains, bench_remove);

criterion_group!(order_statistic_benches, bench_select, bench_rank, bench_clone);

criterion_main!(crud_benches, order_statistic_benches);
