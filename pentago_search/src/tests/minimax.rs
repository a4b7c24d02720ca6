use super::*;
use crate::minimax::{MinimaxConfig, MinimaxSearch};

fn engine(depth: u8) -> MinimaxSearch {
    MinimaxSearch::new(MinimaxConfig {
        depth,
        tt_size_mb: 4,
        ..Default::default()
    })
}

#[test]
fn test_depth_one_prefers_the_center_on_an_empty_board() {
    let board = Board::new();
    let result = engine(1).search(&board, Player::Black).unwrap();
    assert!((2..=3).contains(&result.best.row), "row {}", result.best.row);
    assert!((2..=3).contains(&result.best.col), "col {}", result.best.col);
}

#[test]
fn test_takes_a_one_move_win() {
    let board = black_wins_in_one();
    let result = engine(2).search(&board, Player::Black).unwrap();
    let (_, outcome) = apply(&board, Player::Black, result.best).unwrap();
    assert_eq!(MoveOutcome::Won(Player::Black), outcome);
    assert!(result.eval > WIN_SCORE / 2);
}

#[test]
fn test_depth_two_blocks_an_immediate_threat() {
    let board = white_threatens_top_row();
    assert!(has_immediate_win(&board, Player::White));
    assert!(!has_immediate_win(&board, Player::Black));

    let result = engine(2).search(&board, Player::Black).unwrap();
    let (after, outcome) = apply(&board, Player::Black, result.best).unwrap();
    assert_ne!(MoveOutcome::Won(Player::White), outcome);
    if outcome == MoveOutcome::Ongoing {
        assert!(
            !has_immediate_win(&after, Player::White),
            "move {} leaves white a win",
            result.best
        );
    }
}

#[test]
fn test_returns_a_legal_move_under_a_near_zero_budget() {
    let board = Board::new();
    let mut engine = MinimaxSearch::new(MinimaxConfig {
        depth: 3,
        tt_size_mb: 4,
        limits: Some(SearchLimits {
            max_time_ms: Some(0),
            ..Default::default()
        }),
        ..Default::default()
    });
    let result = engine.search(&board, Player::Black).unwrap();
    assert!(board.at(result.best.row, result.best.col).is_none());
    assert_eq!(0, result.counter.last_depth);
}

#[test]
fn test_rejects_a_terminal_position() {
    let mut board = Board::new();
    for c in 0..5 {
        board.place(0, c, Player::Black).unwrap();
    }
    assert_eq!(
        Err(PentagoError::IllegalState),
        engine(2).search(&board, Player::White).map(|r| r.best)
    );
}

#[test]
fn test_counters_accumulate_and_reset() {
    let board = black_wins_in_one();
    let mut engine = engine(2);
    let result = engine.search(&board, Player::Black).unwrap();
    assert!(result.counter.states_visited > 0);
    assert!(result.counter.evals > 0);
    assert!(result.counter.tt_probes > 0);
    assert_eq!(2, result.counter.last_depth);

    let cumulative = engine.counter();
    assert_eq!(result.counter.states_visited, cumulative.states_visited);
    engine.reset_counter();
    assert_eq!(0, engine.counter().states_visited);
}

#[test]
fn test_transposition_table_persists_across_searches() {
    let board = black_wins_in_one();
    let mut engine = engine(2);
    engine.search(&board, Player::Black).unwrap();
    // Entries survive the first call; the repeat search cuts on them.
    assert!(engine.tt.occupied_count() > 0);
    let second = engine.search(&board, Player::Black).unwrap();
    assert!(second.counter.tt_hits > 0);

    engine.reset();
    assert_eq!(0, engine.tt.occupied_count());
}

#[test]
fn test_progress_callback_panics_are_swallowed() {
    let board = black_wins_in_one();
    let mut engine = engine(2);
    engine.set_progress_callback(Some(Box::new(|_| panic!("monitoring failure"))));
    let result = engine.search(&board, Player::Black).unwrap();
    let (_, outcome) = apply(&board, Player::Black, result.best).unwrap();
    assert_eq!(MoveOutcome::Won(Player::Black), outcome);
}
