use super::*;
use engine_core::{ConstantEvaluator, TimeManagerConfig};
use games_toy::{Fork, ForkAction, ForkEvaluator, Nim, NimEvaluator};

fn iteration_config(iterations: u32) -> MctsConfig {
    MctsConfig::for_testing().with_iterations(iterations)
}

#[test]
fn test_mcts_picks_winning_fork_in_either_order() {
    for state in [Fork::win_first(), Fork::lose_first()] {
        let mut mcts = Mcts::new(iteration_config(10), ForkEvaluator).with_seed(3);
        let result = mcts.search(&state, None).unwrap();

        assert_eq!(result.action, state.winning_index());
        assert!(!result.fallback);
        assert!((result.value - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_three_iterations_are_enough_for_fork() {
    // Both children get one visit, then UCT prefers the winner.
    for state in [Fork::win_first(), Fork::lose_first()] {
        let mut mcts = Mcts::new(iteration_config(3), ForkEvaluator).with_seed(0);
        let result = mcts.search(&state, None).unwrap();

        let win = state.winning_index();
        assert_eq!(result.action, win);
        assert_eq!(result.visits[win], 2);
        assert_eq!(result.visits[1 - win], 1);
    }
}

#[test]
fn test_root_visits_sum_to_iterations() {
    let state = Nim::new(10);
    let mut mcts = Mcts::new(iteration_config(300), NimEvaluator).with_seed(5);
    let result = mcts.search(&state, None).unwrap();

    assert_eq!(result.stats.iterations, 300);
    assert_eq!(result.visits.len(), 3);
    assert_eq!(result.visits.iter().sum::<u32>(), 300);
    assert!(result.visits[result.action] > 0);
    assert!(result.stats.nodes > 4);
    assert!(result.stats.max_depth >= 1);
}

#[test]
fn test_chance_actions_get_outcome_children() {
    let state = Nim::with_gamble(6);
    let evaluator = NimEvaluator;
    let config = iteration_config(400).with_chance_samples(3);
    let mut rng = ChaCha20Rng::seed_from_u64(9);

    let mut search = MctsSearch::new(&state, &evaluator, config);
    let result = search.run(&mut rng, None).unwrap();
    assert_eq!(result.visits.iter().sum::<u32>(), 400);

    let tree = search.tree();
    let root = tree.get(tree.root());
    assert_eq!(root.children.len(), 4);

    let gamble = tree.get(root.children[3]);
    assert!(gamble.is_chance());
    assert_eq!(gamble.children.len(), 3);
    assert!(gamble.visit_count > 0);

    let outcome_visits: u32 = gamble
        .children
        .iter()
        .map(|&id| tree.get(id).visit_count)
        .sum();
    assert_eq!(outcome_visits, gamble.visit_count);

    for &id in &root.children[..3] {
        assert!(!tree.get(id).is_chance());
    }
}

#[test]
fn test_backup_modes_differ_on_opponent_wins() {
    // Nim(2): Take(1) hands the last token to the opponent, Take(2) wins.
    let state = Nim::new(2);
    let evaluator = NimEvaluator;

    let run = |mode: BackupMode| {
        let config = iteration_config(200).with_backup(mode);
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut search = MctsSearch::new(&state, &evaluator, config);
        let result = search.run(&mut rng, None).unwrap();
        let tree = search.tree();
        let root = tree.get(tree.root());
        let means: Vec<f64> = root
            .children
            .iter()
            .map(|&id| tree.get(id).mean_value())
            .collect();
        (result, means)
    };

    // Raw credits the opponent's win to the losing edge too.
    let (_, raw_means) = run(BackupMode::Raw);
    assert!((raw_means[0] - 1.0).abs() < 1e-12);
    assert!((raw_means[1] - 1.0).abs() < 1e-12);

    let (result, means) = run(BackupMode::ActingPlayer);
    assert!(means[0].abs() < 1e-12);
    assert!((means[1] - 1.0).abs() < 1e-12);
    assert_eq!(result.action, 1);
}

#[test]
fn test_seeded_search_is_reproducible() {
    let state = Nim::with_gamble(9);
    let search = |seed| {
        let mut mcts = Mcts::new(iteration_config(250), NimEvaluator).with_seed(seed);
        mcts.search(&state, None).unwrap()
    };

    let a = search(11);
    let b = search(11);
    assert_eq!(a.action, b.action);
    assert_eq!(a.visits, b.visits);
    assert_eq!(a.stats.nodes, b.stats.nodes);
}

#[test]
fn test_no_legal_actions() {
    let mut state = Fork::win_first();
    ForkAction::Win.apply_seeded(&mut state, 0);
    assert!(state.is_terminal());

    let mut mcts = Mcts::new(iteration_config(10), ForkEvaluator);
    assert!(matches!(
        mcts.search(&state, None),
        Err(SearchError::NoLegalActions)
    ));
}

#[test]
fn test_zero_budget_falls_back_to_random() {
    let state = Nim::new(7);
    let config = MctsConfig::for_testing().unlimited_iterations();
    let mut mcts = Mcts::new(config, ConstantEvaluator::default()).with_seed(2);
    let result = mcts.search(&state, Some(Duration::ZERO)).unwrap();

    assert!(result.fallback);
    assert_eq!(result.stats.iterations, 0);
    assert!(result.action < 3);
    assert_eq!(result.visits, vec![0, 0, 0]);
}

#[test]
fn test_time_limited_search_respects_budget() {
    let state = Nim::new(10_000);
    let time = TimeManagerConfig::default()
        .with_default_move_time(Duration::from_millis(30))
        .with_check_interval(8);
    let config = MctsConfig::default().with_time(time);
    let mut mcts = Mcts::new(config, NimEvaluator).with_seed(4);

    let start = Instant::now();
    let result = mcts.search(&state, None).unwrap();

    assert!(start.elapsed() < Duration::from_secs(1));
    assert!(result.stats.iterations > 0);
    assert_eq!(result.visits.iter().sum::<u32>(), result.stats.iterations);
}

#[test]
fn test_slow_evaluator_stops_within_one_iteration_of_budget() {
    // Default check interval: the deadline must still be seen every iteration.
    let slow = |_: &Nim| {
        std::thread::sleep(Duration::from_millis(1));
        0.5
    };
    let budget = Duration::from_millis(5);
    let time = TimeManagerConfig::default().with_default_move_time(budget);
    let config = MctsConfig::default().unlimited_iterations().with_time(time);
    let mut mcts = Mcts::new(config, slow).with_seed(4);

    let start = Instant::now();
    let result = mcts.search(&Nim::new(10_000), None).unwrap();
    let elapsed = start.elapsed();

    assert!(result.stats.iterations > 0);
    assert!(
        result.stats.iterations < 50,
        "{} iterations for a {budget:?} budget",
        result.stats.iterations
    );
    assert!(elapsed < Duration::from_millis(60), "took {elapsed:?}");
}

#[test]
fn test_iteration_cap_applies_with_clock() {
    let state = Nim::new(20);
    let mut mcts = Mcts::new(iteration_config(50), NimEvaluator).with_seed(8);
    let result = mcts
        .search(&state, Some(Duration::from_secs(600)))
        .unwrap();
    assert_eq!(result.stats.iterations, 50);
}

#[test]
fn test_mcts_as_move_selector() {
    let mut selector: Box<dyn MoveSelector<Fork>> =
        Box::new(Mcts::new(iteration_config(10), ForkEvaluator).with_seed(6));
    assert_eq!(selector.name(), "mcts");

    let state = Fork::lose_first();
    assert_eq!(selector.select_action(&state, None).unwrap(), 1);
}

#[test]
fn test_run_mcts_convenience() {
    let state = Fork::win_first();
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    let result = run_mcts(&state, &ForkEvaluator, iteration_config(5), None, &mut rng).unwrap();
    assert_eq!(result.action, 0);
    assert_eq!(result.stats.iterations, 5);
}
