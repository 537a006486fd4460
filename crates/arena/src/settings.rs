//! Match settings.
//!
//! Settings are resolved in three layers: the preset of the chosen game, an
//! optional TOML file, then command-line overrides. The file and the command
//! line both produce a [`SettingsOverlay`] whose present fields replace the
//! values underneath.

use anyhow::{Context, Result};
use rand::Rng;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};
use uct_core::{Player, UctError};
use uct_mcts::MctsConfig;

/// The games the arena can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameKind {
    Subtraction,
    TicTacToe,
    Hex,
}

impl GameKind {
    pub fn name(self) -> &'static str {
        match self {
            GameKind::Subtraction => "subtraction",
            GameKind::TicTacToe => "tictactoe",
            GameKind::Hex => "hex",
        }
    }
}

impl FromStr for GameKind {
    type Err = UctError;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        match name {
            "subtraction" | "nim" => Ok(GameKind::Subtraction),
            "tictactoe" => Ok(GameKind::TicTacToe),
            "hex" => Ok(GameKind::Hex),
            other => Err(UctError::UnknownGame(other.to_string())),
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Who moves first in each game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartingPlayer {
    Fixed(Player),
    /// Drawn per game from the arena's seeded RNG.
    Random,
}

impl StartingPlayer {
    pub fn pick<R: Rng>(self, rng: &mut R) -> Player {
        match self {
            StartingPlayer::Fixed(player) => player,
            StartingPlayer::Random => {
                if rng.gen_bool(0.5) {
                    Player::One
                } else {
                    Player::Two
                }
            }
        }
    }
}

impl FromStr for StartingPlayer {
    type Err = UctError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim() {
            "1" => Ok(StartingPlayer::Fixed(Player::One)),
            "2" => Ok(StartingPlayer::Fixed(Player::Two)),
            v if v.eq_ignore_ascii_case("random") => Ok(StartingPlayer::Random),
            other => Err(UctError::InvalidParameter(format!(
                "starting player must be 1, 2 or random, got {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for StartingPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartingPlayer::Fixed(player) => write!(f, "{}", player),
            StartingPlayer::Random => f.write_str("random"),
        }
    }
}

/// Fully resolved settings for a series of games.
#[derive(Clone, Debug, PartialEq)]
pub struct ArenaSettings {
    pub game: GameKind,
    /// Initial pile for the subtraction game.
    pub pile: u32,
    /// Largest number of stones taken per turn.
    pub max_take: u32,
    /// Hex board side.
    pub size: usize,
    pub starting_player: StartingPlayer,
    /// Number of games in the series.
    pub games: usize,
    /// Search iterations per move.
    pub iterations: usize,
    pub exploration: f64,
    /// Log every move and its statistics.
    pub verbose: bool,
    pub tree_policy: String,
    pub score_policy: String,
    pub seed: u64,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self::subtraction()
    }
}

impl ArenaSettings {
    pub fn subtraction() -> Self {
        Self {
            game: GameKind::Subtraction,
            pile: 99,
            max_take: 6,
            size: 5,
            starting_player: StartingPlayer::Fixed(Player::One),
            games: 3,
            iterations: 1000,
            exploration: 1.0,
            verbose: true,
            tree_policy: "uct".to_string(),
            score_policy: "zero-one".to_string(),
            seed: 42,
        }
    }

    pub fn tictactoe() -> Self {
        Self {
            game: GameKind::TicTacToe,
            starting_player: StartingPlayer::Random,
            games: 10,
            ..Self::subtraction()
        }
    }

    pub fn hex() -> Self {
        Self {
            game: GameKind::Hex,
            size: 5,
            games: 1,
            ..Self::subtraction()
        }
    }

    pub fn preset(game: GameKind) -> Self {
        match game {
            GameKind::Subtraction => Self::subtraction(),
            GameKind::TicTacToe => Self::tictactoe(),
            GameKind::Hex => Self::hex(),
        }
    }

    /// Replace every field the overlay sets.
    pub fn apply(&mut self, overlay: &SettingsOverlay) -> Result<()> {
        if let Some(pile) = overlay.pile {
            self.pile = pile;
        }
        if let Some(max_take) = overlay.max_take {
            self.max_take = max_take;
        }
        if let Some(size) = overlay.size {
            self.size = size;
        }
        if let Some(starting_player) = &overlay.starting_player {
            self.starting_player = starting_player.parse()?;
        }
        if let Some(games) = overlay.games {
            self.games = games;
        }
        if let Some(iterations) = overlay.iterations {
            self.iterations = iterations;
        }
        if let Some(exploration) = overlay.exploration {
            self.exploration = exploration;
        }
        if let Some(verbose) = overlay.verbose {
            self.verbose = verbose;
        }
        if let Some(tree_policy) = &overlay.tree_policy {
            self.tree_policy = tree_policy.clone();
        }
        if let Some(score_policy) = &overlay.score_policy {
            self.score_policy = score_policy.clone();
        }
        if let Some(seed) = overlay.seed {
            self.seed = seed;
        }
        Ok(())
    }

    /// Resolve the policy names into a search configuration.
    ///
    /// Unknown policy names and invalid parameters are reported here, before
    /// any game is played.
    pub fn mcts_config(&self) -> Result<MctsConfig> {
        let config = MctsConfig::from_names(&self.tree_policy, &self.score_policy)?
            .iterations(self.iterations)
            .exploration(self.exploration);
        config.validate()?;
        if config.iterations == 0 {
            return Err(UctError::InvalidParameter(
                "iterations must be at least 1".to_string(),
            )
            .into());
        }
        Ok(config)
    }
}

/// Partial settings, as read from a TOML file or the command line.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsOverlay {
    pub game: Option<String>,
    pub pile: Option<u32>,
    pub max_take: Option<u32>,
    pub size: Option<usize>,
    pub starting_player: Option<String>,
    pub games: Option<usize>,
    pub iterations: Option<usize>,
    pub exploration: Option<f64>,
    pub verbose: Option<bool>,
    pub tree_policy: Option<String>,
    pub score_policy: Option<String>,
    pub seed: Option<u64>,
}

impl SettingsOverlay {
    /// Parse an overlay from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse settings")
    }

    /// Load an overlay from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading settings from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    /// The game named in the overlay, if any.
    pub fn game(&self) -> Result<Option<GameKind>> {
        self.game
            .as_deref()
            .map(str::parse::<GameKind>)
            .transpose()
            .map_err(Into::into)
    }
}

/// Layer the preset, the file and the command line.
///
/// `cli_game` wins over the file's `game`; with neither, the subtraction
/// game is played.
pub fn resolve(
    cli_game: Option<GameKind>,
    file: Option<&SettingsOverlay>,
    cli: &SettingsOverlay,
) -> Result<ArenaSettings> {
    let file_game = match file {
        Some(overlay) => overlay.game()?,
        None => None,
    };
    let game = cli_game.or(file_game).unwrap_or(GameKind::Subtraction);

    let mut settings = ArenaSettings::preset(game);
    if let Some(overlay) = file {
        settings.apply(overlay)?;
    }
    settings.apply(cli)?;
    debug!(?settings, "Resolved settings");
    Ok(settings)
}
