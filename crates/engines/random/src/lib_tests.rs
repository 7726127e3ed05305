use super::*;
use isola_core::{legal_moves, StartFieldPolicy};

#[test]
fn random_engine_returns_legal_move() {
    let mut engine = RandomEngine::new();
    let board = Board::standard();

    let result = engine.search(&board, Player::One, SearchLimits::depth(1));

    let mv = result.best_move.unwrap();
    assert!(legal_moves(&board, Player::One).contains(&mv));
}

#[test]
fn random_engine_handles_isolation() {
    let mut engine = RandomEngine::with_seed(3);
    let board = Board::from_layout(&["1 . o", ". . o", "o o b"], StartFieldPolicy::Protected)
        .unwrap();

    let result = engine.search(&board, Player::One, SearchLimits::depth(1));

    assert!(result.best_move.is_none());
}

#[test]
fn seeded_engines_agree() {
    let board = Board::standard();
    let mut a = RandomEngine::with_seed(11);
    let mut b = RandomEngine::with_seed(11);
    for player in [Player::One, Player::Two, Player::One] {
        let ma = a.search(&board, player, SearchLimits::depth(1)).best_move;
        let mb = b.search(&board, player, SearchLimits::depth(1)).best_move;
        assert_eq!(ma, mb);
    }
}
