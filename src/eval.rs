use crate::board::{Board, Player, BOARD_SIZE, SEGMENTS};

pub type Score = i64;

/// Score of an already-won position. Search adjusts this by remaining depth
/// so that earlier wins outrank later ones.
pub const WIN_SCORE: Score = 1_000_000_000;

/// Cells closer to the center participate in more winning segments.
pub const CENTER_WEIGHTS: [[Score; BOARD_SIZE]; BOARD_SIZE] = [
    [1, 2, 3, 3, 2, 1],
    [2, 3, 4, 4, 3, 2],
    [3, 4, 5, 5, 4, 3],
    [3, 4, 5, 5, 4, 3],
    [2, 3, 4, 4, 3, 2],
    [1, 2, 3, 3, 2, 1],
];

/// Segment-based heuristic: every five-cell segment exclusively occupied by
/// one side contributes 10^(stones in the segment), positive for `side` and
/// negative for the opponent. Contested segments contribute zero.
///
/// The exponential rewards concentrating stones into unblocked lines. The
/// score is antisymmetric: `segment_score(b, s) == -segment_score(b, s.opposite())`.
pub fn segment_score(board: &Board, side: Player) -> Score {
    let opponent = side.opposite();
    let mut score = 0;
    for seg in SEGMENTS.iter() {
        let mut mine = 0u32;
        let mut theirs = 0u32;
        for &(r, c) in seg {
            match board.at(r, c) {
                Some(owner) if owner == side => mine += 1,
                Some(owner) if owner == opponent => theirs += 1,
                _ => {}
            }
        }
        if theirs == 0 && mine > 0 {
            score += (10 as Score).pow(mine);
        } else if mine == 0 && theirs > 0 {
            score -= (10 as Score).pow(theirs);
        }
    }
    score
}

/// Static evaluation from `side`'s perspective: an existing five scores
/// `WIN_SCORE` outright, otherwise the segment heuristic applies.
pub fn evaluate(board: &Board, side: Player) -> Score {
    if board.check_five(side) {
        return WIN_SCORE;
    }
    if board.check_five(side.opposite()) {
        return -WIN_SCORE;
    }
    segment_score(board, side)
}
