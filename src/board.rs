use std::fmt::{Display, Formatter};

use lazy_static::lazy_static;
use smallvec::SmallVec;

use crate::error::PentagoError;

pub const BOARD_SIZE: usize = 6;
pub const QUADRANT_SIZE: usize = 3;
pub const SEGMENT_LENGTH: usize = 5;

/// The side owning a stone. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Player {
    #[default]
    Black = 0,
    White = 1,
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Black => f.write_str("B"),
            Player::White => f.write_str("W"),
        }
    }
}

impl Player {
    #[inline]
    pub fn opposite(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

/// One of the four non-overlapping 3x3 sub-grids tiling the board,
/// identified by its origin offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

pub const QUADRANTS: [Quadrant; 4] = [
    Quadrant::TopLeft,
    Quadrant::TopRight,
    Quadrant::BottomLeft,
    Quadrant::BottomRight,
];

impl Quadrant {
    /// Grid offset of the quadrant's top-left cell.
    #[inline]
    pub fn origin(self) -> (usize, usize) {
        match self {
            Quadrant::TopLeft => (0, 0),
            Quadrant::TopRight => (0, 3),
            Quadrant::BottomLeft => (3, 0),
            Quadrant::BottomRight => (3, 3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

pub const ROTATIONS: [Rotation; 2] = [Rotation::Clockwise, Rotation::CounterClockwise];

impl Rotation {
    #[inline]
    pub fn opposite(self) -> Rotation {
        match self {
            Rotation::Clockwise => Rotation::CounterClockwise,
            Rotation::CounterClockwise => Rotation::Clockwise,
        }
    }
}

/// Canonical identifier of (side to move, full board contents).
///
/// The base-3 packing of the 36 cells fits into 62 bits, so the encoding is
/// injective: two keys are equal exactly when the layouts and the mover are
/// equal. Transposition sharing between search paths is therefore deliberate
/// and never the result of hash aliasing.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionKey(pub u64);

impl From<PositionKey> for usize {
    #[inline]
    fn from(value: PositionKey) -> Self {
        value.0 as usize
    }
}

lazy_static! {
    /// All 32 five-cell lines on the 6x6 grid: 12 horizontal, 12 vertical,
    /// 4 diagonal and 4 anti-diagonal. Fixed at startup and shared by every
    /// win check and evaluation pass.
    pub static ref SEGMENTS: Vec<[(usize, usize); SEGMENT_LENGTH]> = compute_segments();
}

fn compute_segments() -> Vec<[(usize, usize); SEGMENT_LENGTH]> {
    let mut segments = Vec::with_capacity(32);
    for r in 0..BOARD_SIZE {
        for c in 0..=BOARD_SIZE - SEGMENT_LENGTH {
            let mut seg = [(0, 0); SEGMENT_LENGTH];
            for (k, cell) in seg.iter_mut().enumerate() {
                *cell = (r, c + k);
            }
            segments.push(seg);
        }
    }
    for c in 0..BOARD_SIZE {
        for r in 0..=BOARD_SIZE - SEGMENT_LENGTH {
            let mut seg = [(0, 0); SEGMENT_LENGTH];
            for (k, cell) in seg.iter_mut().enumerate() {
                *cell = (r + k, c);
            }
            segments.push(seg);
        }
    }
    for r in 0..=BOARD_SIZE - SEGMENT_LENGTH {
        for c in 0..BOARD_SIZE {
            if c + SEGMENT_LENGTH <= BOARD_SIZE {
                let mut seg = [(0, 0); SEGMENT_LENGTH];
                for (k, cell) in seg.iter_mut().enumerate() {
                    *cell = (r + k, c + k);
                }
                segments.push(seg);
            }
            if c + 1 >= SEGMENT_LENGTH {
                let mut seg = [(0, 0); SEGMENT_LENGTH];
                for (k, cell) in seg.iter_mut().enumerate() {
                    *cell = (r + k, c - k);
                }
                segments.push(seg);
            }
        }
    }
    segments
}

/// The 6x6 Pentago board. A plain value type: search engines copy boards
/// instead of mutating shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: [[Option<Player>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> Option<Player> {
        self.cells[row][col]
    }

    /// Places a stone for `side` on an empty cell.
    pub fn place(&mut self, row: usize, col: usize, side: Player) -> Result<(), PentagoError> {
        if self.cells[row][col].is_some() {
            return Err(PentagoError::InvalidMove { row, col });
        }
        self.cells[row][col] = Some(side);
        Ok(())
    }

    /// Rotates a quadrant's 9 cells by 90 degrees. Cells outside the quadrant
    /// are untouched, and a clockwise rotation followed by a counter-clockwise
    /// one is the identity.
    pub fn rotate(&mut self, quadrant: Quadrant, rotation: Rotation) {
        let (r0, c0) = quadrant.origin();
        let mut sub = [[None; QUADRANT_SIZE]; QUADRANT_SIZE];
        for (i, row) in sub.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.cells[r0 + i][c0 + j];
            }
        }
        for (i, row) in sub.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                let (i1, j1) = match rotation {
                    Rotation::Clockwise => (j, QUADRANT_SIZE - 1 - i),
                    Rotation::CounterClockwise => (QUADRANT_SIZE - 1 - j, i),
                };
                self.cells[r0 + i1][c0 + j1] = *cell;
            }
        }
    }

    /// Whether any precomputed segment is uniformly owned by `side`.
    pub fn check_five(&self, side: Player) -> bool {
        SEGMENTS
            .iter()
            .any(|seg| seg.iter().all(|&(r, c)| self.cells[r][c] == Some(side)))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| cell.is_some())
    }

    /// Whether this position is terminal on its own: either side already has
    /// a five, or the board is full.
    pub fn is_terminal_position(&self) -> bool {
        self.is_full() || self.check_five(Player::Black) || self.check_five(Player::White)
    }

    /// All currently empty cells in row-major order.
    pub fn legal_placements(&self) -> SmallVec<[(usize, usize); 36]> {
        let mut out = SmallVec::new();
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                if self.cells[r][c].is_none() {
                    out.push((r, c));
                }
            }
        }
        out
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// Canonical cache key for this layout with `to_move` as the mover.
    pub fn position_key(&self, to_move: Player) -> PositionKey {
        let mut packed: u64 = 0;
        for cell in self.cells.iter().flatten() {
            let code = match cell {
                None => 0,
                Some(Player::Black) => 1,
                Some(Player::White) => 2,
            };
            packed = packed * 3 + code;
        }
        PositionKey((packed << 1) | to_move as u64)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                match cell {
                    None => f.write_str(". ")?,
                    Some(side) => write!(f, "{side} ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
