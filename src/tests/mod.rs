pub use crate::board::{Board, Player};

pub mod game_flow;

pub mod rotation;


pub mod prop_tests;

pub const B: Option<Player> = Some(Player::Black);

/// Builds a board from 6 rows of `B`/`W`/`.` characters (spaces ignored).
pub fn board_from_rows(rows: [&str; 6]) -> Board {
    let mut board = Board::new();
    for (r, row) in rows.iter().enumerate() {
        for (c, ch) in row.chars().filter(|ch| !ch.is_whitespace()).enumerate() {
            match ch {
                'B' => board.place(r, c, Player::Black).unwrap(),
                'W' => board.place(r, c, Player::White).unwrap(),
                '.' => {}
                _ => panic!("unexpected cell char: {ch}"),
            }
        }
    }
    board
}
