//! Tests verifying the search plays known positions correctly.
//!
//! - The subtraction game has a closed-form solution: the mover loses exactly
//!   when the pile is a multiple of K + 1.
//! - Tic-tac-toe positions with an immediate win or a forced block.
//! - Connection game win detection through a full search.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uct_core::{GameState, Outcome, Player};
use uct_mcts::games::subtraction::is_losing_position;
use uct_mcts::games::{Cell, HexState, SubtractionState, TicTacToeAction, TicTacToeState};
use uct_mcts::{best, Mcts, MctsConfig, NodeStore, RolloutEvaluator, TreePolicy};

/// Create an MCTS instance with the given seed.
fn create_mcts<S: GameState>(
    seed: u64,
    iterations: usize,
) -> Mcts<S, RolloutEvaluator<ChaCha8Rng>> {
    let config = MctsConfig::with_iterations(iterations);
    Mcts::new(config, RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(seed)))
}

/// From a winning pile the search must leave the opponent a multiple of K + 1.
#[test]
fn test_subtraction_matches_closed_form() {
    for max_take in 1..=3u32 {
        for pile in 1..=9u32 {
            let state = SubtractionState::new(pile, max_take, Player::One).unwrap();
            let mut mcts = create_mcts(u64::from(pile * 10 + max_take), 4000);
            let mut store = NodeStore::new();

            let result = mcts.search(&mut store, &state);
            let action = result.best_action.unwrap();
            let stats = result.best_stats().unwrap();

            if is_losing_position(pile, max_take) {
                assert!(
                    stats.win_rate < 0.5,
                    "pile {} max {} is lost, but best move {} scored {}",
                    pile,
                    max_take,
                    action,
                    stats.win_rate
                );
            } else {
                assert!(
                    is_losing_position(pile - action, max_take),
                    "pile {} max {}: took {} instead of {}",
                    pile,
                    max_take,
                    action,
                    pile % (max_take + 1)
                );
            }
        }
    }
}

#[test]
fn test_single_counter_game() {
    let mut state = SubtractionState::new(1, 1, Player::One).unwrap();
    assert_eq!(state.actions(), vec![1]);

    let mut mcts = create_mcts(0, 10);
    let mut store = NodeStore::new();
    let result = mcts.search(&mut store, &state);
    assert_eq!(result.best_action, Some(1));

    state.apply(1);
    assert!(state.is_terminal());
    assert_eq!(state.winner(), Some(Outcome::Winner(Player::One)));
}

/// X X _
/// O O _
/// _ _ _
/// X to move wins at cell 2.
#[test]
fn test_finds_winning_move() {
    let state = TicTacToeState::from_rows(["XX ", "OO ", "   "], Player::One).unwrap();

    let hits = (0..10)
        .filter(|&seed| {
            let mut mcts = create_mcts(seed, 1000);
            let mut store = NodeStore::new();
            mcts.search(&mut store, &state).best_action == Some(TicTacToeAction(2))
        })
        .count();

    assert!(hits >= 9, "winning move found in only {} of 10 searches", hits);
}

/// X X _
/// O _ _
/// _ _ _
/// O to move must block at cell 2.
#[test]
fn test_blocks_winning_move() {
    let state = TicTacToeState::from_rows(["XX ", "O  ", "   "], Player::Two).unwrap();
    let mut mcts = create_mcts(42, 3000);
    let mut store = NodeStore::new();

    let result = mcts.search(&mut store, &state);

    assert_eq!(
        result.best_action,
        Some(TicTacToeAction(2)),
        "search should block X's winning move at cell 2"
    );
}

/// The worst move from a position with a single winning move is a losing one.
#[test]
fn test_worst_move_is_not_the_win() {
    let state = TicTacToeState::from_rows(["XX ", "OO ", "   "], Player::One).unwrap();
    let mut mcts = create_mcts(8, 1000);
    let mut store = NodeStore::new();

    let root = mcts.run(&mut store, &state, 1000);

    assert_ne!(uct_mcts::worst(&store, root), Some(TicTacToeAction(2)));
    assert_eq!(best(&store, root), Some(TicTacToeAction(2)));
}

/// Statistics persist in the store across the moves of one game.
#[test]
fn test_store_reused_between_moves() {
    let mut state = TicTacToeState::new(Player::One);
    let mut mcts = create_mcts(11, 300);
    let mut store = NodeStore::new();

    let first = mcts.search(&mut store, &state);
    let action = first.best_action.unwrap();
    let visits_before = first.best_stats().unwrap().traversals;

    state.apply(action);
    let child = store.get(&state).expect("child node was created during search");
    assert_eq!(store.node(child).traversals(), visits_before);

    // Searching from the child keeps adding to the same node
    let second = mcts.search(&mut store, &state);
    assert_eq!(second.root_traversals, visits_before + 300);
}

/// Two searchers with separate stores finish a game without illegal moves.
#[test]
fn test_self_play_game_completes() {
    let mut state = TicTacToeState::new(Player::One);
    let mut players = [create_mcts(1, 200), create_mcts(2, 200)];
    let mut stores = [NodeStore::new(), NodeStore::new()];

    while !state.is_terminal() {
        let idx = usize::from(state.next_player().id() - 1);
        let result = players[idx].search(&mut stores[idx], &state);
        let action = result.best_action.unwrap();
        assert!(state.actions().contains(&action));
        state.apply(action);
    }

    assert!(state.winner().is_some());
}

#[test]
fn test_hex_size_two_connection() {
    // 1 .
    //  1 2
    let state = HexState::from_rows(&["1 .", "1 2"], Player::Two).unwrap();

    assert!(state.is_terminal());
    assert_eq!(state.winner(), Some(Outcome::Winner(Player::One)));
}

#[test]
fn test_hex_winning_cell_scores_perfectly() {
    // Player One completes column 0 with (2, 0)
    let state = HexState::from_rows(&["1 . .", "1 2 .", ". 2 ."], Player::One).unwrap();
    let mut mcts = create_mcts(5, 2000);
    let mut store = NodeStore::new();

    let result = mcts.search(&mut store, &state);

    let winning = result
        .children
        .iter()
        .find(|c| c.action == Cell::new(2, 0))
        .unwrap();
    assert!(winning.traversals > 0);
    assert!((winning.win_rate - 1.0).abs() < 1e-12);
    assert!((result.best_stats().unwrap().win_rate - 1.0).abs() < 1e-12);
}

#[test]
fn test_hex_game_with_exploration_only_policy() {
    let config = MctsConfig::from_names("exploration", "zero-one")
        .unwrap()
        .iterations(100);
    assert_eq!(config.tree_policy, TreePolicy::ExplorationOnly);

    let mut mcts = Mcts::new(config, RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(3)));
    let mut store = NodeStore::new();
    let mut state = HexState::new(3, Player::One).unwrap();

    while !state.is_terminal() {
        let action = mcts.search(&mut store, &state).best_action.unwrap();
        state.apply(action);
    }

    assert!(matches!(state.winner(), Some(Outcome::Winner(_))));
}
