use super::*;
use crate::board::{Quadrant, Rotation};
use crate::game::{Game, GameStatus};
use crate::moves::Move;
use crate::PentagoError;

#[test]
fn test_turns_alternate_and_stones_accumulate() {
    let mut game = Game::new();
    assert_eq!(Player::Black, game.to_move());
    game.play(Move::new(2, 2, Quadrant::BottomRight, Rotation::Clockwise))
        .unwrap();
    assert_eq!(Player::White, game.to_move());
    assert_eq!(1, game.board().stone_count());
    game.play(Move::new(3, 3, Quadrant::TopLeft, Rotation::CounterClockwise))
        .unwrap();
    assert_eq!(Player::Black, game.to_move());
    assert_eq!(2, game.board().stone_count());
    assert_eq!(GameStatus::InProgress, game.status());
}

#[test]
fn test_placement_on_occupied_cell_is_rejected() {
    let mut game = Game::new();
    let mv = Move::new(2, 2, Quadrant::BottomRight, Rotation::Clockwise);
    game.play(mv).unwrap();
    // (2, 2) is outside the rotated quadrant, so the stone is still there.
    assert_eq!(
        Err(PentagoError::InvalidMove { row: 2, col: 2 }),
        game.play(mv)
    );
    // The failed move must not have flipped the turn.
    assert_eq!(Player::White, game.to_move());
}

#[test]
fn test_moves_are_rejected_once_terminal() {
    let board = board_from_rows([
        "B B B B . .",
        ". . . . . .",
        ". . . . . .",
        "W W W . . .",
        ". . . . . .",
        ". . . . . .",
    ]);
    let mut game = Game::from_position(board, Player::Black);
    game.play(Move::new(0, 4, Quadrant::BottomRight, Rotation::Clockwise))
        .unwrap();
    assert_eq!(GameStatus::Won(Player::Black), game.status());
    assert_eq!(Some(Player::Black), game.winner());
    assert!(game.legal_moves().is_empty());
    assert_eq!(
        Err(PentagoError::IllegalState),
        game.play(Move::new(5, 5, Quadrant::TopLeft, Rotation::Clockwise))
    );
}

#[test]
fn test_full_board_without_a_line_is_a_draw() {
    // Striped layout with no five anywhere; the final placement fills the
    // board and the rotation does not create a line.
    let board = board_from_rows([
        "B B W W B B",
        "W W B B W W",
        "B B W W B B",
        "W W B B W W",
        "B B W W B B",
        "W W B B W .",
    ]);
    let mut game = Game::from_position(board, Player::White);
    game.play(Move::new(5, 5, Quadrant::BottomRight, Rotation::Clockwise))
        .unwrap();
    assert_eq!(GameStatus::Draw, game.status());
    assert_eq!(None, game.winner());
    assert!(game.is_terminal());
}

#[test]
fn test_legal_move_enumeration_counts() {
    let game = Game::new();
    assert_eq!(36 * 8, game.legal_moves().len());

    let mut game = Game::new();
    game.play(Move::new(0, 0, Quadrant::TopLeft, Rotation::Clockwise))
        .unwrap();
    assert_eq!(35 * 8, game.legal_moves().len());
}
