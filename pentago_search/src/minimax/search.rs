use std::cmp::Reverse;
use std::time::Instant;

use itertools::Itertools;

use pentago::prelude::*;

use super::transposition_table::{TTEntry, TTFlag, TT};
use super::MinimaxConfig;

/// Nodes between two wall-clock deadline samples; the deadline is not checked
/// on every node to bound the cost of the check itself.
const DEADLINE_CHECK_INTERVAL: u64 = 1024;

/// Nodes between two progress reports.
const REPORT_EVERY_NODES: u64 = 2048;

/// Per-ply adjustment of terminal scores so that earlier wins outrank later
/// ones and earlier losses rank below later ones.
const WIN_DELAY: Score = 10_000;

/// Window bound strictly above any reachable score.
pub const INFINITY: Score = 2_000_000_000;

struct SearchContext<'a> {
    config: MinimaxConfig,
    counter: SearchCounter,
    start_time: Instant,
    timed_out: bool,
    last_report: u64,
    tt: &'a mut TT,
    progress: &'a mut Option<ProgressCallback>,
}

impl<'a> SearchContext<'a> {
    #[inline]
    fn should_terminate(&mut self) -> bool {
        if self.timed_out {
            return true;
        }
        if self.counter.states_visited % DEADLINE_CHECK_INTERVAL != 0 {
            return false;
        }
        self.check_deadline()
    }

    /// Samples the limits directly; used at root-move granularity.
    fn check_deadline(&mut self) -> bool {
        let Some(limits) = self.config.limits else {
            return false;
        };
        if limits.should_terminate(self.start_time, self.counter.states_visited) {
            self.timed_out = true;
        }
        self.timed_out
    }

    fn maybe_report(&mut self, depth: u8) {
        if self.progress.is_none() {
            return;
        }
        if self.counter.states_visited - self.last_report < REPORT_EVERY_NODES {
            return;
        }
        self.report(depth);
    }

    fn report(&mut self, depth: u8) {
        self.last_report = self.counter.states_visited;
        report_progress(
            self.progress,
            SearchProgress {
                elapsed_ms: self.start_time.elapsed().as_millis(),
                states_visited: self.counter.states_visited,
                simulations: 0,
                depth,
            },
        );
    }
}

#[inline]
fn win_value(mover_wins: bool, depth: u8) -> Score {
    let value = WIN_SCORE - (WIN_DELAY - depth as Score);
    if mover_wins {
        value
    } else {
        -value
    }
}

/// The remembered best move is tried first with the rest in generation order;
/// without one, moves are ordered by descending center weight.
fn ordered_moves(board: &Board, tt_move: Option<Move>) -> Vec<Move> {
    let moves = legal_moves(board);
    match tt_move {
        Some(tt_mv) => {
            let mut out = Vec::with_capacity(moves.len());
            out.push(tt_mv);
            out.extend(moves.into_iter().filter(|&mv| mv != tt_mv));
            out
        }
        None => moves
            .into_iter()
            .sorted_by_key(|mv| Reverse(CENTER_WEIGHTS[mv.row][mv.col]))
            .collect(),
    }
}

/// Fail-soft alpha-beta. Values are always from the side-to-move's
/// perspective, so transposition entries stay valid when the root player
/// alternates between searches.
fn negamax(
    board: &Board,
    to_move: Player,
    depth: u8,
    mut alpha: Score,
    beta: Score,
    ctx: &mut SearchContext,
) -> Score {
    if ctx.should_terminate() || depth == 0 {
        ctx.counter.evals += 1;
        return evaluate(board, to_move);
    }
    ctx.maybe_report(depth);

    let key = board.position_key(to_move);
    ctx.counter.tt_probes += 1;
    let mut tt_move = None;
    if let Some(entry) = ctx.tt.get(&key) {
        if let Some(value) = entry.cutoff(depth, alpha, beta) {
            ctx.counter.tt_hits += 1;
            return value;
        }
        tt_move = entry.best_move;
    }

    let alpha0 = alpha;
    let mut best = -INFINITY;
    let mut best_move = None;
    for mv in ordered_moves(board, tt_move) {
        if ctx.should_terminate() {
            break;
        }
        let (next, outcome) = apply(board, to_move, mv).expect("move from enumeration");
        ctx.counter.states_visited += 1;
        let value = match outcome {
            MoveOutcome::Won(winner) => win_value(winner == to_move, depth),
            MoveOutcome::Draw => 0,
            MoveOutcome::Ongoing => -negamax(&next, to_move.opposite(), depth - 1, -beta, -alpha, ctx),
        };
        if value > best {
            best = value;
            best_move = Some(mv);
        }
        if best > alpha {
            alpha = best;
        }
        if beta <= alpha {
            ctx.counter.beta_prunes += 1;
            break;
        }
    }

    let Some(best_move) = best_move else {
        // Deadline elapsed before any child completed.
        ctx.counter.evals += 1;
        return evaluate(board, to_move);
    };
    if !ctx.timed_out {
        let flag = if best <= alpha0 {
            TTFlag::Upper
        } else if best >= beta {
            TTFlag::Lower
        } else {
            TTFlag::Exact
        };
        ctx.tt.insert(key, TTEntry::new(flag, depth, best, Some(best_move)));
    }
    best
}

pub(crate) fn iterative_deepening(
    board: &Board,
    to_move: Player,
    config: MinimaxConfig,
    tt: &mut TT,
    progress: &mut Option<ProgressCallback>,
) -> Result<SearchResult, PentagoError> {
    if board.is_terminal_position() {
        return Err(PentagoError::IllegalState);
    }
    let mut ctx = SearchContext {
        config,
        counter: SearchCounter::ZERO,
        start_time: Instant::now(),
        timed_out: false,
        last_report: 0,
        tt,
        progress,
    };
    // First heartbeat so callers can render progress immediately.
    ctx.report(0);

    let root_key = board.position_key(to_move);
    let mut best: Option<(Move, Score)> = None;
    for depth in 1..=config.depth.max(1) {
        if ctx.check_deadline() {
            break;
        }
        let tt_move = ctx
            .tt
            .get(&root_key)
            .filter(|entry| entry.depth >= depth.saturating_sub(1))
            .and_then(|entry| entry.best_move);
        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut depth_best: Option<(Move, Score)> = None;
        for mv in ordered_moves(board, tt_move) {
            if ctx.check_deadline() {
                break;
            }
            let (next, outcome) = apply(board, to_move, mv).expect("move from enumeration");
            ctx.counter.states_visited += 1;
            let value = match outcome {
                MoveOutcome::Won(winner) => win_value(winner == to_move, depth),
                MoveOutcome::Draw => 0,
                MoveOutcome::Ongoing => {
                    -negamax(&next, to_move.opposite(), depth - 1, -beta, -alpha, &mut ctx)
                }
            };
            // A subtree cut short by the deadline is not a completed evaluation.
            let completed = !ctx.timed_out || depth == 1 || outcome.is_terminal();
            if completed && depth_best.map_or(true, |(_, b)| value > b) {
                depth_best = Some((mv, value));
            }
            if let Some((_, b)) = depth_best {
                if b > alpha {
                    alpha = b;
                }
            }
            ctx.maybe_report(depth);
        }
        let Some((mv, value)) = depth_best else { break };
        best = Some((mv, value));
        ctx.counter.last_depth = depth;
        if config.debug {
            println!(" - Depth {depth}: eval={value} best={mv}");
        }
        if ctx.timed_out {
            break;
        }
    }
    let last_depth = ctx.counter.last_depth;
    ctx.report(last_depth);

    let (best_move, eval) = match best {
        Some(found) => found,
        // Nothing completed before the deadline: still return a legal move.
        None => {
            let mv = ordered_moves(board, None)
                .into_iter()
                .next()
                .expect("non-terminal position has moves");
            (mv, 0)
        }
    };
    Ok(SearchResult::new(best_move, eval, ctx.counter))
}
