use crate::board::{Board, Player, Quadrant, Rotation, QUADRANTS, ROTATIONS};
use crate::error::PentagoError;

/// A compound move: a placement on an empty cell followed by a mandatory
/// quadrant rotation, applied as one atomic transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub quadrant: Quadrant,
    pub rotation: Rotation,
}

impl Move {
    #[inline]
    pub fn new(row: usize, col: usize, quadrant: Quadrant, rotation: Rotation) -> Self {
        Self {
            row,
            col,
            quadrant,
            rotation,
        }
    }
}

/// Result of applying a move, with the mover-priority tie-break already
/// resolved: a move that completes lines for both sides counts as a win for
/// the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Ongoing,
    Won(Player),
    Draw,
}

impl MoveOutcome {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, MoveOutcome::Ongoing)
    }
}

/// Every legal compound move from this position: 8 moves per empty cell, one
/// per (quadrant, rotation) pair. Rotation is mandatory even when it leaves
/// the board visually unchanged, so all 8 are distinct moves.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let placements = board.legal_placements();
    let mut out = Vec::with_capacity(placements.len() * 8);
    for (row, col) in placements {
        for quadrant in QUADRANTS {
            for rotation in ROTATIONS {
                out.push(Move::new(row, col, quadrant, rotation));
            }
        }
    }
    out
}

/// Applies `mv` for `side` on a copy of `board` and resolves the outcome.
pub fn apply(board: &Board, side: Player, mv: Move) -> Result<(Board, MoveOutcome), PentagoError> {
    let mut next = *board;
    next.place(mv.row, mv.col, side)?;
    next.rotate(mv.quadrant, mv.rotation);
    let mover_five = next.check_five(side);
    let opponent_five = next.check_five(side.opposite());
    let outcome = if mover_five {
        // Mover priority: a simultaneous double alignment is a win for the
        // side that made the move.
        MoveOutcome::Won(side)
    } else if opponent_five {
        MoveOutcome::Won(side.opposite())
    } else if next.is_full() {
        MoveOutcome::Draw
    } else {
        MoveOutcome::Ongoing
    };
    Ok((next, outcome))
}
