use pentago::prelude::*;
use pentago::rand::Rng;
use pentago::smallvec::SmallVec;

/// Scale that squashes segment scores into the [-1, 1] reward range.
const LEAF_VALUE_SCALE: f64 = 100_000.0;

/// Chooses one rollout move for `side`:
/// an immediately winning move if one exists, otherwise denial of the
/// opponent's immediately winning cell, otherwise the highest center weight
/// with ties broken at random.
pub fn rollout_move<R: Rng>(board: &Board, side: Player, rng: &mut R) -> Option<Move> {
    let moves = legal_moves(board);
    if moves.is_empty() {
        return None;
    }
    for &mv in &moves {
        let (_, outcome) = apply(board, side, mv).expect("move from enumeration");
        if outcome == MoveOutcome::Won(side) {
            return Some(mv);
        }
    }
    let opponent = side.opposite();
    let threat = moves.iter().copied().find(|&mv| {
        let (_, outcome) = apply(board, opponent, mv).expect("move from enumeration");
        outcome == MoveOutcome::Won(opponent)
    });
    if let Some(threat) = threat {
        // Deny the winning cell, preferring a rotation that does not hand the
        // opponent the win anyway.
        let candidates: SmallVec<[Move; 8]> = moves
            .iter()
            .copied()
            .filter(|mv| mv.row == threat.row && mv.col == threat.col)
            .collect();
        let safe = candidates.iter().copied().find(|&mv| {
            let (_, outcome) = apply(board, side, mv).expect("move from enumeration");
            outcome != MoveOutcome::Won(opponent)
        });
        return safe.or_else(|| candidates.first().copied());
    }
    let top_weight = moves
        .iter()
        .map(|mv| CENTER_WEIGHTS[mv.row][mv.col])
        .max()
        .expect("moves are non-empty");
    let top: SmallVec<[Move; 32]> = moves
        .iter()
        .copied()
        .filter(|mv| CENTER_WEIGHTS[mv.row][mv.col] == top_weight)
        .collect();
    Some(top[rng.gen_range(0..top.len())])
}

pub struct RolloutOutcome {
    /// Reward from the root mover's perspective: +1 win, -1 loss, 0 draw or
    /// step-limit tie.
    pub reward: f64,
    pub steps: u64,
    pub used_static_eval: bool,
}

/// Plays the heuristic policy to a terminal position or the step limit.
/// Hitting the limit falls back to the sign of the static evaluation.
pub fn rollout<R: Rng>(
    board: &Board,
    to_move: Player,
    root_player: Player,
    max_steps: u32,
    rng: &mut R,
) -> RolloutOutcome {
    let mut cur_board = *board;
    let mut cur_player = to_move;
    let mut steps = 0u64;
    for _ in 0..max_steps {
        let Some(mv) = rollout_move(&cur_board, cur_player, rng) else {
            return RolloutOutcome {
                reward: 0.0,
                steps,
                used_static_eval: false,
            };
        };
        let (next, outcome) = apply(&cur_board, cur_player, mv).expect("rollout move is legal");
        steps += 1;
        match outcome {
            MoveOutcome::Won(winner) => {
                return RolloutOutcome {
                    reward: if winner == root_player { 1.0 } else { -1.0 },
                    steps,
                    used_static_eval: false,
                };
            }
            MoveOutcome::Draw => {
                return RolloutOutcome {
                    reward: 0.0,
                    steps,
                    used_static_eval: false,
                };
            }
            MoveOutcome::Ongoing => {
                cur_board = next;
                cur_player = cur_player.opposite();
            }
        }
    }
    RolloutOutcome {
        reward: evaluate(&cur_board, root_player).signum() as f64,
        steps,
        used_static_eval: true,
    }
}

/// Move priors from the center-weight table, normalized to sum to 1. A
/// static stand-in for a trained policy network.
pub fn heuristic_priors(board: &Board) -> Vec<(Move, f32)> {
    let moves = legal_moves(board);
    if moves.is_empty() {
        return Vec::new();
    }
    let total: Score = moves.iter().map(|mv| CENTER_WEIGHTS[mv.row][mv.col]).sum();
    if total <= 0 {
        let uniform = 1.0 / moves.len() as f32;
        return moves.into_iter().map(|mv| (mv, uniform)).collect();
    }
    moves
        .into_iter()
        .map(|mv| {
            let prior = CENTER_WEIGHTS[mv.row][mv.col] as f32 / total as f32;
            (mv, prior)
        })
        .collect()
}

/// Leaf value estimate in [-1, 1] from `side`'s perspective, derived from the
/// same segment heuristic the priors come from. No rollout is involved.
pub fn leaf_value(board: &Board, side: Player) -> f64 {
    (segment_score(board, side) as f64 / LEAF_VALUE_SCALE).clamp(-1.0, 1.0)
}
