//! Move-search engines for Pentago: iterative-deepening alpha-beta minimax
//! with a transposition table, Monte-Carlo tree search (UCT) with a
//! persistent rebaseable tree, and a policy-biased PUCT variant.
//!
//! Engines run single-threaded and synchronously on the calling thread.
//! Their caches (transposition table, search trees) are owned per engine
//! instance and are not thread-safe; give each concurrent game its own
//! engine.

use std::str::FromStr;

use pentago::prelude::*;

/// Implementation for Monte-Carlo Tree Search
pub mod mcts;

/// Implementation for minimax search
pub mod minimax;

pub mod transposition_table;

use mcts::puct::{PUCTConfig, PUCT};
use mcts::{MCTSConfig, MCTS};
use minimax::{MinimaxConfig, MinimaxSearch};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchAlgorithm {
    #[default]
    Minimax,
    Mcts,
    Puct,
}

impl FromStr for SearchAlgorithm {
    type Err = PentagoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimax" => Ok(Self::Minimax),
            "mcts" => Ok(Self::Mcts),
            "puct" => Ok(Self::Puct),
            _ => Err(PentagoError::InvalidCommand(format!("unknown engine: {s:?}"))),
        }
    }
}

/// The closed set of engine variants behind the one "choose best move"
/// capability. Variant choice happens once at configuration time, not by
/// string lookup during search.
pub enum GenericSearch {
    Minimax(MinimaxSearch),
    Mcts(MCTS),
    Puct(PUCT),
}

impl GenericSearch {
    /// New-game boundary: clears the transposition table or search tree.
    pub fn reset(&mut self) {
        match self {
            Self::Minimax(s) => s.reset(),
            Self::Mcts(s) => s.reset(),
            Self::Puct(s) => s.reset(),
        }
    }

    /// After a ply is played, re-roots the persistent tree engines on the new
    /// position, pruning unreachable nodes. The minimax table needs no
    /// rebasing: its entries are keyed by position alone.
    pub fn rebase(&mut self, board: &Board, to_move: Player, prune: bool) {
        match self {
            Self::Minimax(_) => {}
            Self::Mcts(s) => s.rebase(board, to_move, prune),
            Self::Puct(s) => s.rebase(board, to_move, prune),
        }
    }

    /// Cumulative statistics snapshot.
    pub fn counter(&self) -> SearchCounter {
        match self {
            Self::Minimax(s) => s.counter(),
            Self::Mcts(s) => s.counter(),
            Self::Puct(s) => s.counter(),
        }
    }

    pub fn reset_counter(&mut self) {
        match self {
            Self::Minimax(s) => s.reset_counter(),
            Self::Mcts(s) => s.reset_counter(),
            Self::Puct(s) => s.reset_counter(),
        }
    }

    pub fn set_progress_callback(&mut self, callback: Option<ProgressCallback>) {
        match self {
            Self::Minimax(s) => s.set_progress_callback(callback),
            Self::Mcts(s) => s.set_progress_callback(callback),
            Self::Puct(s) => s.set_progress_callback(callback),
        }
    }
}

impl GameTreeSearch for GenericSearch {
    fn search(&mut self, board: &Board, to_move: Player) -> Result<SearchResult, PentagoError> {
        match self {
            Self::Minimax(s) => s.search(board, to_move),
            Self::Mcts(s) => s.search(board, to_move),
            Self::Puct(s) => s.search(board, to_move),
        }
    }
}

/// External configuration surface translating the recognized options into
/// per-engine configs.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub algorithm: SearchAlgorithm,
    /// Minimax: iterative-deepening depth cap.
    pub depth: u8,
    /// Wall-clock budget per move.
    pub time_limit_ms: Option<u128>,
    /// Minimax: positions-visited cap.
    pub max_positions: Option<u64>,
    /// MCTS/PUCT: simulation cap.
    pub simulations: Option<u64>,
    /// UCT/PUCT exploration constant; engine default when unset.
    pub exploration: Option<f64>,
    pub tt_size_mb: u32,
    pub debug: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: SearchAlgorithm::default(),
            depth: 3,
            time_limit_ms: None,
            max_positions: None,
            simulations: None,
            exploration: None,
            tt_size_mb: minimax::transposition_table::DEFAULT_SIZE_MB,
            debug: false,
        }
    }
}

impl SearchConfig {
    pub fn get_limits(&self) -> Option<SearchLimits> {
        if self.time_limit_ms.is_none() && self.max_positions.is_none() && self.simulations.is_none()
        {
            return None;
        }
        Some(SearchLimits {
            max_time_ms: self.time_limit_ms,
            max_positions: self.max_positions,
            max_simulations: self.simulations,
        })
    }

    pub fn make_search(&self) -> GenericSearch {
        let limits = self.get_limits();
        match self.algorithm {
            SearchAlgorithm::Minimax => {
                let config = MinimaxConfig {
                    depth: self.depth,
                    tt_size_mb: self.tt_size_mb,
                    limits,
                    debug: self.debug,
                };
                GenericSearch::Minimax(MinimaxSearch::new(config))
            }
            SearchAlgorithm::Mcts => {
                let config = MCTSConfig {
                    exploration: self.exploration.unwrap_or(MCTSConfig::default().exploration),
                    limits,
                    debug: self.debug,
                    ..Default::default()
                };
                GenericSearch::Mcts(MCTS::new(config))
            }
            SearchAlgorithm::Puct => {
                let config = PUCTConfig {
                    exploration: self.exploration.unwrap_or(PUCTConfig::default().exploration),
                    limits,
                    debug: self.debug,
                };
                GenericSearch::Puct(PUCT::new(config))
            }
        }
    }
}

#[cfg(test)]
mod tests;
