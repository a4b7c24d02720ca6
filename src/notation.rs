//! Textual move notation used by external service layers: a cell written as
//! column letter `A`..`F` plus row digit `1`..`6`, a quadrant token
//! `Q00`/`Q01`/`Q10`/`Q11` and a rotation token `CW`/`CCW`, e.g. `"C4 Q01 CW"`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::board::{Quadrant, Rotation};
use crate::error::PentagoError;
use crate::moves::Move;

const COLUMNS: &str = "ABCDEF";
const ROWS: &str = "123456";

/// Parses a cell like `"C4"` into `(row, col)`.
pub fn parse_cell(cell: &str) -> Result<(usize, usize), PentagoError> {
    let s = cell.trim().to_ascii_uppercase();
    let invalid = || PentagoError::ConfigurationError(format!("invalid cell: {cell:?}"));
    let mut chars = s.chars();
    let (Some(col_ch), Some(row_ch), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(invalid());
    };
    let col = COLUMNS.find(col_ch).ok_or_else(invalid)?;
    let row = ROWS.find(row_ch).ok_or_else(invalid)?;
    Ok((row, col))
}

pub fn format_cell(row: usize, col: usize) -> String {
    format!(
        "{}{}",
        COLUMNS.as_bytes()[col] as char,
        ROWS.as_bytes()[row] as char
    )
}

impl FromStr for Quadrant {
    type Err = PentagoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q00" => Ok(Quadrant::TopLeft),
            "Q01" => Ok(Quadrant::TopRight),
            "Q10" => Ok(Quadrant::BottomLeft),
            "Q11" => Ok(Quadrant::BottomRight),
            _ => Err(PentagoError::InvalidCommand(format!("invalid quadrant: {s:?}"))),
        }
    }
}

impl Display for Quadrant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Quadrant::TopLeft => "Q00",
            Quadrant::TopRight => "Q01",
            Quadrant::BottomLeft => "Q10",
            Quadrant::BottomRight => "Q11",
        })
    }
}

impl FromStr for Rotation {
    type Err = PentagoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CW" => Ok(Rotation::Clockwise),
            "CCW" => Ok(Rotation::CounterClockwise),
            _ => Err(PentagoError::InvalidCommand(format!("invalid direction: {s:?}"))),
        }
    }
}

impl Display for Rotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Rotation::Clockwise => "CW",
            Rotation::CounterClockwise => "CCW",
        })
    }
}

impl FromStr for Move {
    type Err = PentagoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(cell), Some(quadrant), Some(rotation), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(PentagoError::ConfigurationError(format!("invalid move: {s:?}")));
        };
        let (row, col) = parse_cell(cell)?;
        Ok(Move::new(row, col, quadrant.parse()?, rotation.parse()?))
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            format_cell(self.row, self.col),
            self.quadrant,
            self.rotation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_round_trip() {
        assert_eq!((3, 2), parse_cell("C4").unwrap());
        assert_eq!((0, 0), parse_cell("a1").unwrap());
        assert_eq!((5, 5), parse_cell(" F6 ").unwrap());
        for row in 0..6 {
            for col in 0..6 {
                assert_eq!((row, col), parse_cell(&format_cell(row, col)).unwrap());
            }
        }
    }

    #[test]
    fn test_cell_outside_board() {
        for bad in ["G1", "A7", "A0", "11", "", "A12"] {
            assert!(matches!(
                parse_cell(bad),
                Err(PentagoError::ConfigurationError(_))
            ));
        }
    }

    #[test]
    fn test_move_round_trip() {
        let mv: Move = "C4 Q01 CW".parse().unwrap();
        assert_eq!(
            Move::new(3, 2, Quadrant::TopRight, Rotation::Clockwise),
            mv
        );
        assert_eq!("C4 Q01 CW", mv.to_string());
    }

    #[test]
    fn test_unrecognized_tokens() {
        assert!(matches!(
            "Q22".parse::<Quadrant>(),
            Err(PentagoError::InvalidCommand(_))
        ));
        assert!(matches!(
            "CWW".parse::<Rotation>(),
            Err(PentagoError::InvalidCommand(_))
        ));
        assert!(matches!(
            "C4 Q05 CW".parse::<Move>(),
            Err(PentagoError::InvalidCommand(_))
        ));
    }
}
