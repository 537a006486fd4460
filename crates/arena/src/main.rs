//! Play series of games between two UCT searchers.
//!
//! Each game is set up from a preset, optionally layered with a TOML settings
//! file and command-line overrides, and the per-player results are reported
//! at the end.

mod arena;
mod settings;

use anyhow::Result;
use arena::play_series;
use clap::{Args, Parser, Subcommand};
use settings::{resolve, ArenaSettings, GameKind, SettingsOverlay};
use std::path::PathBuf;
use tracing::info;
use uct_mcts::games::{HexState, SubtractionState, TicTacToeState};

/// UCT tree search arena.
#[derive(Parser, Debug)]
#[command(name = "uct-arena")]
#[command(about = "Play two-player games between UCT tree searchers")]
struct Cli {
    /// TOML settings file layered over the game's preset.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Game to play; defaults to the settings file's game.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take 1..=K stones from a pile; whoever takes the last stone wins.
    Subtraction {
        /// Initial number of stones.
        #[arg(long)]
        pile: Option<u32>,

        /// Largest number of stones taken per turn.
        #[arg(long)]
        max_take: Option<u32>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Three in a row on a 3x3 board.
    #[command(name = "tictactoe")]
    TicTacToe {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Connect your two sides of a rhombus board.
    Hex {
        /// Board side.
        #[arg(long)]
        size: Option<usize>,

        #[command(flatten)]
        common: CommonArgs,
    },
}

/// Overrides shared by every game.
#[derive(Args, Debug, Default)]
struct CommonArgs {
    /// Number of games to play.
    #[arg(short, long)]
    games: Option<usize>,

    /// Search iterations per move.
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Exploration constant of the tree policy.
    #[arg(long)]
    exploration: Option<f64>,

    /// First player: 1, 2 or random.
    #[arg(short = 'p', long)]
    starting_player: Option<String>,

    /// Tree policy name (uct, exploration).
    #[arg(long)]
    tree_policy: Option<String>,

    /// Score policy name (zero-one, plus-minus).
    #[arg(long)]
    score_policy: Option<String>,

    /// Random seed for reproducibility.
    #[arg(long)]
    seed: Option<u64>,

    /// Only report game results.
    #[arg(short, long)]
    quiet: bool,
}

impl CommonArgs {
    fn overlay(self) -> SettingsOverlay {
        SettingsOverlay {
            games: self.games,
            iterations: self.iterations,
            exploration: self.exploration,
            starting_player: self.starting_player,
            tree_policy: self.tree_policy,
            score_policy: self.score_policy,
            seed: self.seed,
            verbose: self.quiet.then_some(false),
            ..Default::default()
        }
    }
}

impl Commands {
    /// The chosen game and its command-line overrides.
    fn into_overlay(self) -> (GameKind, SettingsOverlay) {
        match self {
            Commands::Subtraction {
                pile,
                max_take,
                common,
            } => (
                GameKind::Subtraction,
                SettingsOverlay {
                    pile,
                    max_take,
                    ..common.overlay()
                },
            ),
            Commands::TicTacToe { common } => (GameKind::TicTacToe, common.overlay()),
            Commands::Hex { size, common } => (
                GameKind::Hex,
                SettingsOverlay {
                    size,
                    ..common.overlay()
                },
            ),
        }
    }
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn load_settings(cli: Cli) -> Result<ArenaSettings> {
    let file = cli
        .config
        .as_deref()
        .map(SettingsOverlay::load)
        .transpose()?;
    let (game, overrides) = match cli.command {
        Some(command) => {
            let (game, overlay) = command.into_overlay();
            (Some(game), overlay)
        }
        None => (None, SettingsOverlay::default()),
    };
    resolve(game, file.as_ref(), &overrides)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let settings = load_settings(cli)?;
    info!(
        game = %settings.game,
        starting_player = %settings.starting_player,
        seed = settings.seed,
        "Settings loaded"
    );

    let tally = match settings.game {
        GameKind::Subtraction => play_series(&settings, |first| {
            SubtractionState::new(settings.pile, settings.max_take, first)
        })?,
        GameKind::TicTacToe => play_series(&settings, |first| Ok(TicTacToeState::new(first)))?,
        GameKind::Hex => play_series(&settings, |first| HexState::new(settings.size, first))?,
    };

    tally.report();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::StartingPlayer;
    use uct_core::Player;

    fn settings_from(args: &[&str]) -> ArenaSettings {
        let cli = Cli::try_parse_from(args).unwrap();
        load_settings(cli).unwrap()
    }

    #[test]
    fn test_defaults_to_subtraction_preset() {
        let settings = settings_from(&["uct-arena"]);
        assert_eq!(settings, ArenaSettings::subtraction());
    }

    #[test]
    fn test_subcommand_overrides() {
        let settings = settings_from(&[
            "uct-arena",
            "subtraction",
            "--pile",
            "21",
            "--max-take",
            "3",
            "--games",
            "5",
            "--starting-player",
            "random",
            "--quiet",
        ]);

        assert_eq!(settings.game, GameKind::Subtraction);
        assert_eq!((settings.pile, settings.max_take), (21, 3));
        assert_eq!(settings.games, 5);
        assert_eq!(settings.starting_player, StartingPlayer::Random);
        assert!(!settings.verbose);
    }

    #[test]
    fn test_tictactoe_and_hex_subcommands() {
        let settings = settings_from(&["uct-arena", "tictactoe", "-i", "200"]);
        assert_eq!(settings.game, GameKind::TicTacToe);
        assert_eq!(settings.iterations, 200);
        assert!(settings.verbose);

        let settings = settings_from(&[
            "uct-arena",
            "hex",
            "--size",
            "7",
            "-p",
            "2",
            "--tree-policy",
            "uct-lecture",
        ]);
        assert_eq!(settings.size, 7);
        assert_eq!(settings.starting_player, StartingPlayer::Fixed(Player::Two));
        assert_eq!(settings.tree_policy, "uct-lecture");
    }

    #[test]
    fn test_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["uct-arena", "chess"]).is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["uct-arena", "--config", "/nonexistent/arena.toml"]).unwrap();
        assert!(load_settings(cli).is_err());
    }
}
