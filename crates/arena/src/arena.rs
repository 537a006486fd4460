//! Series of games between two searchers.
//!
//! Each player owns a search engine and a node store. Stores live for one
//! game, so statistics gathered on earlier moves are reused on later ones but
//! never leak into the next game.

use crate::settings::ArenaSettings;
use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt::Display;
use tracing::info;
use uct_core::{GameState, Outcome, Player};
use uct_mcts::{Mcts, NodeStore, RolloutEvaluator};

type Searcher<S> = Mcts<S, RolloutEvaluator<ChaCha8Rng>>;

/// Results of a finished series.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    wins: [usize; 2],
    ties: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(player) => self.wins[slot(player)] += 1,
            Outcome::Tie => self.ties += 1,
        }
    }

    pub fn wins(&self, player: Player) -> usize {
        self.wins[slot(player)]
    }

    pub fn ties(&self) -> usize {
        self.ties
    }

    pub fn games(&self) -> usize {
        self.wins.iter().sum::<usize>() + self.ties
    }

    /// Log the per-player summary.
    pub fn report(&self) {
        let games = self.games();
        let percent = |count: usize| {
            if games == 0 {
                0.0
            } else {
                count as f64 / games as f64 * 100.0
            }
        };

        for player in [Player::One, Player::Two] {
            let wins = self.wins(player);
            info!(
                "Player {} won {} of {} games ({:.2}%)",
                player,
                wins,
                games,
                percent(wins)
            );
        }
        let ties = self.ties();
        if ties > 0 {
            info!("{} of {} games tied ({:.2}%)", ties, games, percent(ties));
        }
    }
}

fn slot(player: Player) -> usize {
    match player {
        Player::One => 0,
        Player::Two => 1,
    }
}

/// Play `settings.games` games, building each starting position with `new_game`.
pub fn play_series<S, F>(settings: &ArenaSettings, new_game: F) -> Result<Tally>
where
    S: GameState + Display,
    S::Action: Display,
    F: Fn(Player) -> uct_core::Result<S>,
{
    // Fail before the first game on bad policy names or parameters
    let config = settings.mcts_config()?;

    let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
    let mut players: [Searcher<S>; 2] = [1u64, 2].map(|offset| {
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(
            settings.seed.wrapping_add(offset),
        ));
        Mcts::new(config.clone(), evaluator)
    });

    info!(
        game = %settings.game,
        games = settings.games,
        iterations = config.iterations,
        tree_policy = %config.tree_policy,
        score_policy = %config.score_policy,
        "Starting series"
    );

    let mut tally = Tally::default();
    for number in 1..=settings.games {
        let first = settings.starting_player.pick(&mut rng);
        let state = new_game(first)?;
        let outcome = play_game(&mut players, state, number, settings.verbose);
        tally.record(outcome);
    }
    Ok(tally)
}

fn play_game<S>(players: &mut [Searcher<S>; 2], mut state: S, number: usize, verbose: bool) -> Outcome
where
    S: GameState + Display,
    S::Action: Display,
{
    let mut stores = [NodeStore::new(), NodeStore::new()];

    if verbose {
        info!("GAME NUMBER {}:", number);
        info!("Start state:\n{}", state);
    }

    while !state.is_terminal() {
        let mover = state.next_player();
        let idx = slot(mover);
        let store = &mut stores[idx];

        let result = players[idx].search(store, &state);
        let action = result
            .best_action
            .expect("BUG: search from a non-terminal position returned no action");
        state.apply(action);

        if verbose {
            let id = store.get_or_create(&state);
            let node = store.node(id);
            info!("Player {} selected {}", mover, action);
            info!("\n{}", state);
            info!(
                "Action stats: ({}/{}) = {:.2}%",
                node.score(),
                node.traversals(),
                node.win_rate() * 100.0
            );
        }
    }

    let outcome = state
        .winner()
        .expect("BUG: terminal position has no outcome");
    match outcome {
        Outcome::Winner(player) => info!("Player {} won game {}!", player, number),
        Outcome::Tie => info!("Game {} ended in a tie", number),
    }
    outcome
}
