use std::ops::Add;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use crate::board::{Board, Player};
use crate::error::PentagoError;
use crate::eval::Score;
use crate::moves::Move;

/// Search statistics. Engines keep a cumulative counter that callers can
/// inspect and reset between measurements; each search call also returns the
/// counter for that call alone.
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchCounter {
    /// Number of positions visited through move applications.
    pub states_visited: u64,
    /// Number of times a board position was statically evaluated.
    pub evals: u64,
    /// Number of times the pruning condition has been reached.
    pub beta_prunes: u64,
    /// Number of transposition table probes.
    pub tt_probes: u64,
    /// Number of transposition table hits.
    pub tt_hits: u64,
    /// Last finished depth for iterative deepening.
    pub last_depth: u8,
}

impl SearchCounter {
    pub const ZERO: SearchCounter = SearchCounter {
        states_visited: 0,
        evals: 0,
        beta_prunes: 0,
        tt_probes: 0,
        tt_hits: 0,
        last_depth: 0,
    };

    #[inline]
    pub fn add_in_place(&mut self, c: &SearchCounter) {
        self.states_visited += c.states_visited;
        self.evals += c.evals;
        self.beta_prunes += c.beta_prunes;
        self.tt_probes += c.tt_probes;
        self.tt_hits += c.tt_hits;
        self.last_depth = self.last_depth.max(c.last_depth);
    }

    pub fn summary(&self, dt_ns: u128) -> String {
        let dt_ms: f64 = 1e-6 * (dt_ns as f64);
        let rate: f64 = (1e-6_f64 * 1e9_f64) * (self.states_visited as f64) / (dt_ns as f64);
        format!("dt={dt_ms:.2}ms rate={rate:.4} Mstates/s")
    }
}

impl Add for SearchCounter {
    type Output = SearchCounter;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let mut a = self;
        a.add_in_place(&rhs);
        a
    }
}

/// Budget for a single search call. `max_simulations` bounds MCTS/PUCT
/// playouts; the other limits apply to every engine.
#[derive(Debug, Default, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchLimits {
    pub max_time_ms: Option<u128>,
    pub max_positions: Option<u64>,
    pub max_simulations: Option<u64>,
}

impl SearchLimits {
    pub fn should_terminate(&self, start_time: Instant, positions_searched: u64) -> bool {
        if let Some(max_time_ms) = self.max_time_ms {
            if start_time.elapsed().as_millis() >= max_time_ms {
                return true;
            }
        }
        if let Some(max_positions) = self.max_positions {
            return positions_searched >= max_positions;
        }
        false
    }
}

/// Periodic snapshot handed to a progress callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchProgress {
    pub elapsed_ms: u128,
    pub states_visited: u64,
    pub simulations: u64,
    pub depth: u8,
}

pub type ProgressCallback = Box<dyn FnMut(SearchProgress)>;

/// Invokes the callback, swallowing any panic it raises: monitoring must
/// never abort a search.
pub fn report_progress(callback: &mut Option<ProgressCallback>, progress: SearchProgress) {
    if let Some(cb) = callback {
        let _ = catch_unwind(AssertUnwindSafe(|| cb(progress)));
    }
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// The chosen legal move.
    pub best: Move,
    pub eval: Score,
    pub counter: SearchCounter,
}

impl SearchResult {
    #[inline]
    pub fn new(best: Move, eval: Score, counter: SearchCounter) -> Self {
        SearchResult { best, eval, counter }
    }
}

/// The single capability every engine variant provides: choose one legal move
/// for `to_move` on a private copy of `board`.
///
/// Fails with `IllegalState` when called on a terminal position; on any
/// non-terminal board a move is always produced, falling back to an arbitrary
/// legal move under a near-zero budget.
pub trait GameTreeSearch {
    fn search(&mut self, board: &Board, to_move: Player) -> Result<SearchResult, PentagoError>;
}
