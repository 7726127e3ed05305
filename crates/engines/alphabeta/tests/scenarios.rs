//! End-to-end engine behaviour on full boards.

use std::time::{Duration, Instant};

use alphabeta_engine::{limits_for, seeded_engine, AlphaBetaEngine, SearchConfig};
use isola_core::{legal_moves, Board, BoardConfig, Engine, Player, Pos, StartFieldPolicy};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[test]
fn fresh_board_depth_one_steps_off_the_start() {
    let board = Board::standard();
    let mut engine = seeded_engine(1, 1).unwrap();
    let mv = engine.find_best_move(&board, Player::One).unwrap();

    assert_eq!(mv.from, Pos::new(5, 3));
    assert_eq!(mv.to.chebyshev(mv.from), 1);
    assert!(board.in_bounds(mv.to.row, mv.to.col));
    assert!(board.clone().apply_move(Player::One, &mv));
}

#[test]
fn isolated_player_gets_no_move() {
    let board = Board::from_layout(
        &[
            "o o o o 2 o o o",
            "o o o o o o o o",
            "o o o o o o o o",
            ". . . . . o o o",
            ". . . . . o o o",
            ". . . 1 . o o o",
        ],
        StartFieldPolicy::Protected,
    )
    .unwrap();
    let mut engine = AlphaBetaEngine::new(SearchConfig::default()).unwrap();
    assert!(engine.find_best_move(&board, Player::One).is_none());

    let result = engine.search(&board, Player::One, limits_for(3, None));
    assert!(result.best_move.is_none());
    assert_eq!(result.score, f64::NEG_INFINITY);
}

#[test]
fn unique_move_is_found_at_every_depth() {
    let board = Board::from_layout(
        &[
            ". . . . 2 o . .",
            ". . . . . . . .",
            ". . . . . . . .",
            "o . . . . . . .",
            ". . . . . . . .",
            ". . . 1 . . . .",
        ],
        StartFieldPolicy::Protected,
    )
    .unwrap();
    let moves = legal_moves(&board, Player::Two);
    assert_eq!(moves.len(), 1);

    for depth in 1..=3 {
        let mut engine = AlphaBetaEngine::new(SearchConfig {
            max_search_depth: depth,
            ..SearchConfig::default()
        })
        .unwrap();
        assert_eq!(engine.find_best_move(&board, Player::Two), Some(moves[0]));
    }
}

#[test]
fn seeded_search_is_idempotent() {
    let board = Board::standard();
    let config = SearchConfig {
        seed: Some(2024),
        max_search_depth: 2,
        ..SearchConfig::default()
    };
    let mut engine = AlphaBetaEngine::new(config.clone()).unwrap();
    let first = engine.find_best_move(&board, Player::One);
    let second = engine.find_best_move(&board, Player::One);
    assert!(first.is_some());
    assert_eq!(first, second);

    let mut other = AlphaBetaEngine::new(config).unwrap();
    assert_eq!(other.find_best_move(&board, Player::One), first);
    assert_eq!(board, Board::standard(), "search must not touch the caller's board");
}

#[test]
fn returned_moves_are_legal_on_random_boards() {
    let config = BoardConfig {
        rows: 5,
        cols: 5,
        player1_start: Pos::new(4, 2),
        player2_start: Pos::new(0, 2),
        start_fields: StartFieldPolicy::RemovableWhenVacated,
    };
    let mut engine = AlphaBetaEngine::new(SearchConfig {
        seed: Some(9),
        max_search_depth: 2,
        threads: Some(2),
        ..SearchConfig::default()
    })
    .unwrap();
    let mut rng = StdRng::seed_from_u64(77);

    for _ in 0..12 {
        let mut board = Board::new(&config).unwrap();
        let mut player = Player::One;
        for _ in 0..rng.gen_range(0..10) {
            let Some(mv) = legal_moves(&board, player).choose(&mut rng).copied() else {
                break;
            };
            board.apply_move(player, &mv);
            player = player.other();
        }

        let legal = legal_moves(&board, player);
        match engine.find_best_move(&board, player) {
            Some(mv) => assert!(legal.contains(&mv), "{mv} not legal"),
            None => assert!(legal.is_empty()),
        }
    }
}

#[test]
fn time_budget_still_returns_a_move() {
    let board = Board::standard();
    let mut engine = AlphaBetaEngine::new(SearchConfig::default()).unwrap();

    let started = Instant::now();
    let result = engine.search(&board, Player::One, limits_for(5, Some(20)));
    assert!(started.elapsed() < Duration::from_secs(30));

    let mv = result.best_move.unwrap();
    assert!(legal_moves(&board, Player::One).contains(&mv));
    assert!(result.depth >= 1);
    assert!(result.nodes > 0);
}

#[test]
fn options_and_shutdown() {
    let mut engine = AlphaBetaEngine::new(SearchConfig {
        threads: Some(2),
        ..SearchConfig::default()
    })
    .unwrap();
    assert_eq!(engine.threads(), 2);
    assert_eq!(engine.name(), "AlphaBeta v1.0");

    assert!(engine.set_option("depth", "3"));
    assert_eq!(engine.config().max_search_depth, 3);
    assert!(engine.set_option("seed", "5"));
    assert_eq!(engine.config().seed, Some(5));
    assert!(engine.set_option("time", "0"));
    assert_eq!(engine.config().time_limit_ms, None);
    assert!(!engine.set_option("depth", "deep"));
    assert!(!engine.set_option("hash", "64"));

    engine.shutdown();
}

#[test]
fn depth_option_caps_trait_searches() {
    let board = Board::standard();
    let mut engine = AlphaBetaEngine::new(SearchConfig {
        threads: Some(2),
        ..SearchConfig::default()
    })
    .unwrap();

    assert!(engine.set_option("depth", "1"));
    let result = engine.search(&board, Player::One, limits_for(3, None));
    assert_eq!(result.depth, 1);
    assert!(result.best_move.is_some());

    // Limits below the configured cap still win
    assert!(engine.set_option("depth", "4"));
    let result = engine.search(&board, Player::One, limits_for(1, None));
    assert_eq!(result.depth, 1);

    // A zero limit is clamped rather than rejected
    let result = engine.search(&board, Player::One, limits_for(0, None));
    assert_eq!(result.depth, 1);
}
