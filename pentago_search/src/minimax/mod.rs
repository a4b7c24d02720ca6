use pentago::prelude::*;

/// Implementation of the alpha-beta search.
pub mod search;

pub mod transposition_table;

use transposition_table::{DEFAULT_SIZE_MB, TT};

#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinimaxConfig {
    /// Maximum iterative-deepening depth.
    pub depth: u8,
    pub tt_size_mb: u32,
    pub limits: Option<SearchLimits>,
    pub debug: bool,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            tt_size_mb: DEFAULT_SIZE_MB,
            limits: None,
            debug: false,
        }
    }
}

/// Iterative-deepening alpha-beta engine. The transposition table is owned by
/// the engine instance, persists across searches within a game and is cleared
/// by `reset` at new-game boundaries. Not thread-safe: one game per instance.
pub struct MinimaxSearch {
    pub tt: TT,
    pub config: MinimaxConfig,
    counter: SearchCounter,
    progress: Option<ProgressCallback>,
}

impl MinimaxSearch {
    pub fn new(config: MinimaxConfig) -> Self {
        let tt = TT::new(config.tt_size_mb);
        Self {
            tt,
            config,
            counter: SearchCounter::ZERO,
            progress: None,
        }
    }

    /// Clears the transposition table for a new game.
    pub fn reset(&mut self) {
        self.tt.clear();
    }

    /// Cumulative statistics across all searches since the last reset.
    pub fn counter(&self) -> SearchCounter {
        self.counter
    }

    pub fn reset_counter(&mut self) {
        self.counter = SearchCounter::ZERO;
    }

    pub fn set_progress_callback(&mut self, callback: Option<ProgressCallback>) {
        self.progress = callback;
    }
}

impl GameTreeSearch for MinimaxSearch {
    fn search(&mut self, board: &Board, to_move: Player) -> Result<SearchResult, PentagoError> {
        let MinimaxSearch {
            tt,
            config,
            counter,
            progress,
        } = self;
        let result = search::iterative_deepening(board, to_move, *config, tt, progress)?;
        counter.add_in_place(&result.counter);
        Ok(result)
    }
}
