use crate::board::{Board, Player};
use crate::error::PentagoError;
use crate::moves::{self, Move, MoveOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    #[default]
    InProgress,
    Won(Player),
    Draw,
}

/// A match in progress: board, side to move and terminal bookkeeping.
/// Once terminal, the status is immutable and further moves are rejected.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    board: Board,
    to_move: Player,
    status: GameStatus,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes from an arbitrary non-terminal position.
    pub fn from_position(board: Board, to_move: Player) -> Self {
        Self {
            board,
            to_move,
            status: GameStatus::InProgress,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Won(side) => Some(side),
            _ => None,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        moves::legal_moves(&self.board)
    }

    /// Plays one compound move for the side to move.
    ///
    /// If the mover completes a line the mover wins, even when the rotation
    /// simultaneously completes the opponent's line elsewhere. If only the
    /// opponent's line completes, the opponent wins. A full board with no
    /// line is a draw.
    pub fn play(&mut self, mv: Move) -> Result<(), PentagoError> {
        if self.is_terminal() {
            return Err(PentagoError::IllegalState);
        }
        let (next, outcome) = moves::apply(&self.board, self.to_move, mv)?;
        self.board = next;
        match outcome {
            MoveOutcome::Won(side) => self.status = GameStatus::Won(side),
            MoveOutcome::Draw => self.status = GameStatus::Draw,
            MoveOutcome::Ongoing => self.to_move = self.to_move.opposite(),
        }
        Ok(())
    }
}
