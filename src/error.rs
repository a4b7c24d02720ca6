use thiserror::Error;

/// Failure kinds raised by the game substrate and the search engines.
/// All are synchronous validation failures; none is transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PentagoError {
    /// Placement on an occupied cell.
    #[error("cell ({row}, {col}) is not empty")]
    InvalidMove { row: usize, col: usize },

    /// Unrecognized quadrant or rotation token.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// A move or search was requested on a terminal game.
    #[error("game is over")]
    IllegalState,

    /// Malformed external input, such as a cell outside the board.
    #[error("invalid configuration: {0}")]
    ConfigurationError(String),
}
