use std::time::Duration;

use alphabeta::{AlphaBeta, AlphaBetaConfig};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use engine_core::{random_rollout, GameState, TimeManagerConfig, ZobristTable};
use flat_mc::{FlatMcConfig, FlatMonteCarlo};
use games_petersburg::{PetersburgEvaluator, PetersburgState};
use mcts::{Mcts, MctsConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("petersburg_rules");

    group.bench_function("deal", |b| {
        b.iter_batched(
            || ChaCha20Rng::seed_from_u64(42),
            |mut rng| black_box(PetersburgState::new(&mut rng)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("legal_actions", |b| {
        let state = PetersburgState::seeded(7);
        b.iter(|| black_box(state.legal_actions()));
    });

    group.bench_function("random_playout", |b| {
        let state = PetersburgState::seeded(7);
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        b.iter_batched(
            || state.clone(),
            |mut s| random_rollout(&mut s, None, &mut rng).unwrap(),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("zobrist_hash", |b| {
        let table = ZobristTable::for_state::<PetersburgState>();
        let state = PetersburgState::seeded(7);
        b.iter(|| black_box(table.hash(&state)));
    });

    group.finish();
}

fn bench_engine_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("petersburg_engine_move");
    group.sample_size(10);

    let state = PetersburgState::seeded(7);
    let time = TimeManagerConfig::default().with_default_move_time(Duration::from_millis(50));

    group.bench_function("flat_mc_200", |b| {
        let config = FlatMcConfig::default().with_simulations(200);
        let mut engine = FlatMonteCarlo::new(config, PetersburgEvaluator::default()).with_seed(1);
        b.iter(|| black_box(engine.search(&state, None).unwrap()));
    });

    group.bench_function("alphabeta_50ms", |b| {
        let config = AlphaBetaConfig::default().with_time(time.clone());
        let mut engine = AlphaBeta::<PetersburgState, _>::new(config, PetersburgEvaluator::default()).with_seed(1);
        b.iter(|| black_box(engine.search(&state, None).unwrap()));
    });

    group.bench_function("mcts_1000", |b| {
        let config = MctsConfig::default().with_iterations(1_000);
        let mut engine = Mcts::new(config, PetersburgEvaluator::default()).with_seed(1);
        b.iter(|| black_box(engine.search(&state, None).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_rules, bench_engine_moves);
criterion_main!(benches);
