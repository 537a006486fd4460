use thiserror::Error;

/// Errors raised while configuring a search or constructing a game.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UctError {
    #[error("Invalid tree policy: \"{0}\"")]
    UnknownTreePolicy(String),

    #[error("Invalid score policy: \"{0}\"")]
    UnknownScorePolicy(String),

    #[error("Unknown game: \"{0}\"")]
    UnknownGame(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid board: {0}")]
    InvalidBoard(String),
}

/// Convenience Result type for UCT operations
pub type Result<T> = std::result::Result<T, UctError>;
