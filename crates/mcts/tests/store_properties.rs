//! Property-based tests for the game variants and the node store.
//!
//! These tests check the contracts the search relies on, over positions
//! reached by random legal play:
//! - clones are independent of the original
//! - equal canonical keys resolve to the same node, different keys do not
//! - expanding a node twice leaves one child per legal action
//! - only terminal positions have no legal actions

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uct_core::{GameState, Player};
use uct_mcts::games::{HexState, SubtractionState, TicTacToeState};
use uct_mcts::{Mcts, MctsConfig, NodeStore, RolloutEvaluator, TreePolicy};

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

fn arb_player() -> impl Strategy<Value = Player> {
    prop_oneof![Just(Player::One), Just(Player::Two)]
}

/// Play up to `moves` random legal actions.
fn random_play<S: GameState>(mut state: S, moves: usize, seed: u64) -> S {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for _ in 0..moves {
        if state.is_terminal() {
            break;
        }
        let actions = state.actions();
        state.apply(actions[rng.gen_range(0..actions.len())]);
    }
    state
}

fn arb_subtraction() -> impl Strategy<Value = SubtractionState> {
    (1u32..40, 1u32..7, arb_player(), 0usize..20, any::<u64>()).prop_map(
        |(pile, max_take, player, moves, seed)| {
            let state = SubtractionState::new(pile, max_take, player).unwrap();
            random_play(state, moves, seed)
        },
    )
}

fn arb_tictactoe() -> impl Strategy<Value = TicTacToeState> {
    (arb_player(), 0usize..9, any::<u64>()).prop_map(|(player, moves, seed)| {
        random_play(TicTacToeState::new(player), moves, seed)
    })
}

fn arb_hex() -> impl Strategy<Value = HexState> {
    (1usize..6, arb_player(), 0usize..25, any::<u64>()).prop_map(|(size, player, moves, seed)| {
        random_play(HexState::new(size, player).unwrap(), moves, seed)
    })
}

// =============================================================================
// Shared checks
// =============================================================================

fn check_clone_independent<S: GameState>(state: &S) -> Result<(), TestCaseError> {
    let key = state.canonical_key();
    let mut copy = state.clone();
    prop_assert_eq!(copy.canonical_key(), key.clone());

    if let Some(&action) = state.actions().first() {
        copy.apply(action);
        prop_assert_eq!(state.canonical_key(), key.clone());
        prop_assert_ne!(copy.canonical_key(), key);
        prop_assert_eq!(copy.next_player(), state.next_player().opponent());
    }
    Ok(())
}

fn check_terminal_contract<S: GameState>(state: &S) -> Result<(), TestCaseError> {
    prop_assert_eq!(state.actions().is_empty(), state.is_terminal());
    prop_assert_eq!(state.winner().is_some(), state.is_terminal());
    Ok(())
}

fn check_store_identity<S: GameState>(state: &S) -> Result<(), TestCaseError> {
    let mut store = NodeStore::new();
    let id = store.get_or_create(state);
    prop_assert_eq!(store.get_or_create(&state.clone()), id);

    for action in state.actions() {
        let mut child = state.clone();
        child.apply(action);
        prop_assert_ne!(store.get_or_create(&child), id);
    }
    Ok(())
}

fn check_expand_idempotent<S: GameState>(state: &S) -> Result<(), TestCaseError> {
    let mut store = NodeStore::new();
    let id = store.get_or_create(state);
    let expected = state.actions();

    store.expand(id);
    store.expand(id);

    let actions: Vec<S::Action> = store.node(id).children().iter().map(|(a, _)| *a).collect();
    prop_assert_eq!(actions, expected);
    prop_assert_eq!(store.len(), 1 + state.actions().len());
    Ok(())
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_subtraction_contracts(state in arb_subtraction()) {
        check_clone_independent(&state)?;
        check_terminal_contract(&state)?;
        check_store_identity(&state)?;
        check_expand_idempotent(&state)?;
    }

    #[test]
    fn prop_tictactoe_contracts(state in arb_tictactoe()) {
        check_clone_independent(&state)?;
        check_terminal_contract(&state)?;
        check_store_identity(&state)?;
        check_expand_idempotent(&state)?;
    }

    #[test]
    fn prop_hex_contracts(state in arb_hex()) {
        check_clone_independent(&state)?;
        check_terminal_contract(&state)?;
        check_store_identity(&state)?;
        check_expand_idempotent(&state)?;
    }

    /// Subtraction positions are lost for the mover exactly on multiples of K + 1.
    #[test]
    fn prop_subtraction_winner_is_last_taker(
        pile in 1u32..30,
        max_take in 1u32..5,
        seed in any::<u64>(),
    ) {
        let start = SubtractionState::new(pile, max_take, Player::One).unwrap();
        let mut state = start.clone();
        let mut last_mover = None;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        while !state.is_terminal() {
            let actions = state.actions();
            last_mover = Some(state.next_player());
            state.apply(actions[rng.gen_range(0..actions.len())]);
        }

        prop_assert_eq!(
            state.winner(),
            last_mover.map(uct_core::Outcome::Winner)
        );
    }

    /// Every search returns a legal move and accounts for every iteration.
    #[test]
    fn prop_search_returns_legal_action(
        state in arb_tictactoe(),
        seed in any::<u64>(),
        iterations in 1usize..150,
        exploration_only in any::<bool>(),
    ) {
        if state.is_terminal() {
            return Ok(());
        }

        let policy = if exploration_only { TreePolicy::ExplorationOnly } else { TreePolicy::Uct };
        let config = MctsConfig::with_iterations(iterations).tree_policy(policy);
        let mut mcts = Mcts::new(config, RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(seed)));
        let mut store = NodeStore::new();

        let result = mcts.search(&mut store, &state);

        let best = result.best_action.expect("non-terminal root has a best action");
        prop_assert!(state.actions().contains(&best));
        prop_assert_eq!(result.root_traversals as usize, iterations);
        let child_visits: u32 = result.children.iter().map(|c| c.traversals).sum();
        prop_assert_eq!(child_visits as usize, iterations);
        for child in &result.children {
            prop_assert!(child.win_rate >= 0.0 && child.win_rate <= 1.0);
        }
    }
}
