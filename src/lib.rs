#![doc = include_str!("../README.md")]

/// Board representation: cells, quadrants, rotations and line detection.
pub mod board;

/// Turn sequencing and terminal-state bookkeeping on top of the board.
pub mod game;

/// Compound move representation and legal move enumeration.
pub mod moves;

/// Static evaluation: center weights and the segment-based heuristic.
pub mod eval;

/// Textual cell/quadrant/rotation notation for moves.
pub mod notation;

/// Contract between the game substrate and the search engines.
pub mod game_tree_search;

mod error;
pub use error::PentagoError;

/// Re-exports the `rand` crate
pub use rand;

/// Re-exports the `smallvec` crate
pub use smallvec;

/// Re-exports the `thiserror` crate
pub use thiserror;

pub mod prelude {
    pub use crate::board::{Board, Player, PositionKey, Quadrant, Rotation, BOARD_SIZE};
    pub use crate::error::PentagoError;
    pub use crate::eval::{evaluate, segment_score, Score, CENTER_WEIGHTS, WIN_SCORE};
    pub use crate::game::{Game, GameStatus};
    pub use crate::game_tree_search::{
        report_progress, GameTreeSearch, ProgressCallback, SearchCounter, SearchLimits,
        SearchProgress, SearchResult,
    };
    pub use crate::moves::{apply, legal_moves, Move, MoveOutcome};
}

#[cfg(test)]
mod tests;
