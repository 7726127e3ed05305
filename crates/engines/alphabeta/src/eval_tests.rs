use super::*;
use isola_core::{legal_moves, Pos, StartFieldPolicy};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Text layout of `board` flipped top-to-bottom with the players' roles swapped.
fn mirrored_layout(board: &Board) -> Vec<String> {
    (0..board.rows())
        .rev()
        .map(|row| {
            (0..board.cols())
                .map(|col| {
                    let pos = Pos::new(row, col);
                    let cell = board.cell(row, col).unwrap_or(Cell::Empty);
                    match (board.player_at(pos), cell) {
                        (Some(Player::One), Cell::Start(Player::One)) => '2',
                        (Some(Player::Two), Cell::Start(Player::Two)) => '1',
                        (Some(Player::One), Cell::Start(Player::Two)) => 'y',
                        (Some(Player::Two), Cell::Start(Player::One)) => 'x',
                        (Some(Player::One), _) => 'b',
                        (Some(Player::Two), _) => 'a',
                        (None, Cell::Start(Player::One)) => 'T',
                        (None, Cell::Start(Player::Two)) => 'S',
                        (None, Cell::Tile) => 'o',
                        (None, Cell::Empty) => '.',
                    }
                })
                .collect()
        })
        .collect()
}

fn mirror(board: &Board) -> Board {
    let layout = mirrored_layout(board);
    let rows: Vec<&str> = layout.iter().map(String::as_str).collect();
    Board::from_layout(&rows, board.policy()).unwrap()
}

#[test]
fn test_start_position_is_balanced() {
    let board = Board::standard();
    assert_eq!(Evaluator::default().evaluate(&board, Player::One), 0.0);
    assert_eq!(Evaluator::mobility_only().evaluate(&board, Player::Two), 0.0);
}

#[test]
fn test_isolated_players_score_infinite() {
    let eval = Evaluator::default();

    let p1_stuck = Board::from_layout(&["1 . o", ". . o", "o o b"], StartFieldPolicy::Protected)
        .unwrap();
    assert_eq!(eval.evaluate(&p1_stuck, Player::One), f64::NEG_INFINITY);
    assert_eq!(eval.evaluate(&p1_stuck, Player::Two), f64::NEG_INFINITY);

    let p2_stuck = mirror(&p1_stuck);
    assert_eq!(eval.evaluate(&p2_stuck, Player::One), f64::INFINITY);
}

#[test]
fn test_both_isolated_side_to_move_loses() {
    let board = Board::from_layout(&["1 . .", ". . .", ". . 2"], StartFieldPolicy::Protected)
        .unwrap();
    let eval = Evaluator::default();
    assert_eq!(eval.evaluate(&board, Player::One), f64::NEG_INFINITY);
    assert_eq!(eval.evaluate(&board, Player::Two), f64::INFINITY);
}

#[test]
fn test_mobility_difference() {
    // Player one has a full neighbourhood, player two is in a corner
    let board = Board::from_layout(&["o o o .", "o a o .", "o o o b"], StartFieldPolicy::Protected)
        .unwrap();
    let eval = Evaluator::mobility_only();
    let expected = count_moves(&board, Player::One) as f64 - count_moves(&board, Player::Two) as f64;
    assert!(expected > 0.0);
    assert_eq!(eval.evaluate(&board, Player::One), expected);
}

#[test]
fn test_start_distance_term_is_small_and_signed() {
    let board = Board::from_layout(
        &["o o T o o o", "o o o o o o", "o a o o o o", "o o o b o o", "o S o o o o"],
        StartFieldPolicy::Protected,
    )
    .unwrap();
    let plain = Evaluator::mobility_only().evaluate(&board, Player::One);
    let weighted = Evaluator::new(EvalWeights {
        start_distance_weight: 0.1,
    })
    .evaluate(&board, Player::One);
    // Player one is 2 away from S, player two is 3 away from T/S
    assert!((weighted - plain - 0.1).abs() < 1e-9);
}

#[test]
fn test_finite_unless_isolated() {
    let eval = Evaluator::default();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..8 {
        let mut board = Board::standard();
        let mut player = Player::One;
        loop {
            let score = eval.evaluate(&board, player);
            let stuck1 = board.is_player_isolated(Player::One);
            let stuck2 = board.is_player_isolated(Player::Two);
            assert_eq!(score.is_finite(), !stuck1 && !stuck2);
            let Some(mv) = legal_moves(&board, player).choose(&mut rng).copied() else {
                break;
            };
            assert!(board.apply_move(player, &mv));
            player = player.other();
        }
    }
}

#[test]
fn test_mobility_is_antisymmetric_under_mirroring() {
    let eval = Evaluator::mobility_only();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..6 {
        let mut board = Board::standard();
        let mut player = Player::One;
        loop {
            let mirrored = mirror(&board);
            let score = eval.evaluate(&board, player);
            let flipped = eval.evaluate(&mirrored, player.other());
            assert_eq!(score, -flipped);
            let Some(mv) = legal_moves(&board, player).choose(&mut rng).copied() else {
                break;
            };
            assert!(board.apply_move(player, &mv));
            player = player.other();
        }
    }
}
