//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full searches with varying iteration counts
//! - Searches through chance nodes
//! - Tree operations (selection, backpropagation)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use games_toy::{Nim, NimEvaluator};
use mcts::{BackupMode, MctsConfig, MctsSearch, MctsTree};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

// =============================================================================
// Full MCTS Search Benchmarks
// =============================================================================

fn bench_mcts_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_iterations");
    let state = Nim::new(40);
    let evaluator = NimEvaluator;

    for iterations in [100u32, 400, 1600] {
        group.throughput(Throughput::Elements(u64::from(iterations)));
        group.bench_with_input(
            BenchmarkId::new("nim", iterations),
            &iterations,
            |b, &iterations| {
                let config = MctsConfig::default().with_iterations(iterations);
                b.iter(|| {
                    let mut rng = ChaCha20Rng::seed_from_u64(42);
                    let mut search = MctsSearch::new(&state, &evaluator, config.clone());
                    black_box(search.run(&mut rng, None).unwrap())
                });
            },
        );
    }

    group.finish();
}

fn bench_mcts_chance_nodes(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_chance_nodes");
    let state = Nim::with_gamble(40);
    let evaluator = NimEvaluator;

    for samples in [1u32, 4, 10] {
        group.bench_with_input(BenchmarkId::new("nim_gamble", samples), &samples, |b, &k| {
            let config = MctsConfig::default()
                .with_iterations(400)
                .with_chance_samples(k)
                .with_backup(BackupMode::ActingPlayer);
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                let mut search = MctsSearch::new(&state, &evaluator, config.clone());
                black_box(search.run(&mut rng, None).unwrap())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Tree Operation Benchmarks
// =============================================================================

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_tree_ops");

    group.bench_function("allocate_node", |b| {
        b.iter(|| {
            let mut tree = MctsTree::new(0);
            for i in 0..100u32 {
                tree.add_child(tree.root(), i % 9, 0);
            }
            black_box(tree.len())
        });
    });

    group.bench_function("select_child", |b| {
        let mut tree = MctsTree::new(0);
        for i in 0..9u32 {
            let child_id = tree.add_child(tree.root(), i, 0);
            let child = tree.get_mut(child_id);
            child.visit_count = (i + 1) * 10;
            child.value_sum = f64::from(i) * 0.1 * f64::from(child.visit_count);
        }
        tree.get_mut(tree.root()).visit_count = 450;

        b.iter(|| black_box(tree.select_child(tree.root(), 2.0)));
    });

    group.bench_function("backpropagate_depth_5", |b| {
        b.iter_batched(
            || {
                let mut tree = MctsTree::new(0);
                let mut parent = tree.root();
                for i in 0..5 {
                    parent = tree.add_child(parent, i, (i % 2) as usize);
                }
                (tree, parent)
            },
            |(mut tree, leaf)| {
                tree.backpropagate(leaf, |node| if node.player == 0 { 1.0 } else { 0.0 });
                black_box(tree)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_mcts_search_iterations,
    bench_mcts_chance_nodes,
    bench_tree_operations,
);
criterion_main!(benches);
