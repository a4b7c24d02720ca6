use super::*;
use crate::board::{Quadrant, Rotation, BOARD_SIZE, QUADRANTS};

#[test]
fn test_rotate_clockwise_then_counter_clockwise_restores() {
    let mut board = Board::new();
    for r in 0..3 {
        for c in 0..3 {
            if (r + c) % 2 == 0 {
                board.place(r, c, Player::Black).unwrap();
            }
        }
    }
    let reference = board;
    board.rotate(Quadrant::TopLeft, Rotation::Clockwise);
    board.rotate(Quadrant::TopLeft, Rotation::CounterClockwise);
    assert_eq!(reference, board);
}

#[test]
fn test_rotate_affects_only_chosen_quadrant() {
    let mut board = Board::new();
    for r in 3..6 {
        for c in 3..6 {
            board.place(r, c, Player::White).unwrap();
        }
    }
    board.place(0, 1, Player::Black).unwrap();
    let reference = board;
    board.rotate(Quadrant::TopLeft, Rotation::Clockwise);
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            if r < 3 && c < 3 {
                continue;
            }
            assert_eq!(reference.at(r, c), board.at(r, c), "cell ({r}, {c}) changed");
        }
    }
}

#[test]
fn test_rotate_mapping_examples() {
    // A stone in a quadrant's top-left corner ends up in its top-right corner
    // after a clockwise rotation of that quadrant.
    for quadrant in QUADRANTS {
        let (r0, c0) = quadrant.origin();
        let mut board = Board::new();
        board.place(r0, c0, Player::Black).unwrap();
        board.rotate(quadrant, Rotation::Clockwise);
        assert_eq!(B, board.at(r0, c0 + 2));
        assert_eq!(None, board.at(r0, c0));
    }

    let mut board = Board::new();
    board.place(0, 1, Player::Black).unwrap();
    board.rotate(Quadrant::TopLeft, Rotation::Clockwise);
    assert_eq!(B, board.at(1, 2));
}

#[test]
fn test_rotate_empty_quadrant_is_noop_in_appearance() {
    let mut board = Board::new();
    board.place(5, 5, Player::White).unwrap();
    let reference = board;
    board.rotate(Quadrant::TopLeft, Rotation::Clockwise);
    assert_eq!(reference, board);
}
