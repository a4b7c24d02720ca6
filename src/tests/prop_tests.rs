use proptest::prelude::*;

use crate::board::{Board, Player, Quadrant, Rotation, BOARD_SIZE, QUADRANTS};

fn arb_board() -> impl Strategy<Value = Board> {
    proptest::collection::vec(0u8..3, BOARD_SIZE * BOARD_SIZE).prop_map(|cells| {
        let mut board = Board::new();
        for (index, code) in cells.into_iter().enumerate() {
            let (r, c) = (index / BOARD_SIZE, index % BOARD_SIZE);
            match code {
                1 => board.place(r, c, Player::Black).unwrap(),
                2 => board.place(r, c, Player::White).unwrap(),
                _ => {}
            }
        }
        board
    })
}

fn arb_quadrant() -> impl Strategy<Value = Quadrant> {
    (0usize..4).prop_map(|i| QUADRANTS[i])
}

fn arb_rotation() -> impl Strategy<Value = Rotation> {
    proptest::bool::ANY.prop_map(|clockwise| {
        if clockwise {
            Rotation::Clockwise
        } else {
            Rotation::CounterClockwise
        }
    })
}

proptest! {
    #[test]
    fn test_rotation_round_trip(
        board in arb_board(),
        quadrant in arb_quadrant(),
        rotation in arb_rotation(),
    ) {
        let mut rotated = board;
        rotated.rotate(quadrant, rotation);
        rotated.rotate(quadrant, rotation.opposite());
        prop_assert_eq!(board, rotated);
    }

    #[test]
    fn test_four_rotations_are_identity(board in arb_board(), quadrant in arb_quadrant()) {
        let mut rotated = board;
        for _ in 0..4 {
            rotated.rotate(quadrant, Rotation::Clockwise);
        }
        prop_assert_eq!(board, rotated);
    }

    #[test]
    fn test_rotation_preserves_stone_count(board in arb_board(), quadrant in arb_quadrant()) {
        let mut rotated = board;
        rotated.rotate(quadrant, Rotation::Clockwise);
        prop_assert_eq!(board.stone_count(), rotated.stone_count());
    }

    #[test]
    fn test_rotation_is_local_to_the_quadrant(board in arb_board(), quadrant in arb_quadrant()) {
        let mut rotated = board;
        rotated.rotate(quadrant, Rotation::Clockwise);
        let (r0, c0) = quadrant.origin();
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let inside = (r0..r0 + 3).contains(&r) && (c0..c0 + 3).contains(&c);
                if !inside {
                    prop_assert_eq!(board.at(r, c), rotated.at(r, c));
                }
            }
        }
    }

    #[test]
    fn test_position_key_distinguishes_mover(board in arb_board()) {
        prop_assert_ne!(
            board.position_key(Player::Black),
            board.position_key(Player::White)
        );
    }

    #[test]
    fn test_position_key_distinguishes_layouts(
        board in arb_board(),
        r in 0usize..BOARD_SIZE,
        c in 0usize..BOARD_SIZE,
    ) {
        // Flipping a single cell must always change the key: the packing is
        // injective, so transpositions never alias distinct layouts.
        let mut changed = board;
        match board.at(r, c) {
            None => changed.place(r, c, Player::Black).unwrap(),
            Some(_) => {
                let mut rebuilt = Board::new();
                for r1 in 0..BOARD_SIZE {
                    for c1 in 0..BOARD_SIZE {
                        if (r1, c1) == (r, c) {
                            continue;
                        }
                        if let Some(side) = board.at(r1, c1) {
                            rebuilt.place(r1, c1, side).unwrap();
                        }
                    }
                }
                changed = rebuilt;
            }
        }
        prop_assert_ne!(
            board.position_key(Player::Black),
            changed.position_key(Player::Black)
        );
    }
}
