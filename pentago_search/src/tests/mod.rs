pub use pentago::prelude::*;



pub mod minimax;


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

pub fn has_immediate_win(board: &Board, side: Player) -> bool {
    legal_moves(board).into_iter().any(|mv| {
        let (_, outcome) = apply(board, side, mv).unwrap();
        outcome == MoveOutcome::Won(side)
    })
}

/// Black to move with a completed-four on the top row: (0,4) plus any
/// rotation that leaves the row alone wins at once. Three empty cells keep
/// the branching small.
pub fn black_wins_in_one() -> Board {
    board_from_rows([
        "B B B B . W",
        "W W B B W W",
        "B B W W B B",
        "W W B B W W",
        "B B W W B B",
        ". W B B W .",
    ])
}

/// White threatens to win by taking (0,5); black must deny the cell.
pub fn white_threatens_top_row() -> Board {
    board_from_rows([
        "B W W W W .",
        ". . . . . .",
        ". . . . . .",
        ". . . . . .",
        "B . . . . B",
        ". . B . . .",
    ])
}
