use super::*;
use alphabeta_engine::{seeded_engine, AlphaBetaEngine, SearchConfig};
use isola_core::{Pos, SearchResult, StartFieldPolicy};
use random_engine::RandomEngine;

fn small_board() -> BoardConfig {
    BoardConfig {
        rows: 4,
        cols: 5,
        player1_start: Pos::new(3, 2),
        player2_start: Pos::new(0, 2),
        start_fields: StartFieldPolicy::Protected,
    }
}

/// Engine that never produces a move.
struct Resigner;

impl Engine for Resigner {
    fn search(&mut self, _board: &Board, player: Player, _limits: SearchLimits) -> SearchResult {
        SearchResult {
            best_move: None,
            score: alphabeta_engine::loss_for(player),
            depth: 0,
            nodes: 0,
            stopped: false,
        }
    }

    fn name(&self) -> &str {
        "Resigner"
    }
}

#[test]
fn test_random_self_play_finishes() {
    let mut engine1 = RandomEngine::with_seed(1);
    let mut engine2 = RandomEngine::with_seed(2);

    let config = MatchConfig {
        num_games: 4,
        board: small_board(),
        ..Default::default()
    };
    let runner = MatchRunner::new(config).unwrap();
    let result = runner.run_match(&mut engine1, &mut engine2);

    // Isola cannot draw on a board this small: tiles run out first
    assert_eq!(result.total_games(), 4);
    assert_eq!(result.draws, 0);
    assert_eq!(result.forfeits, 0);
}

#[test]
fn test_no_move_forfeits() {
    let runner = MatchRunner::new(MatchConfig {
        num_games: 2,
        board: small_board(),
        ..Default::default()
    })
    .unwrap();
    let mut random = RandomEngine::with_seed(4);
    let mut resigner = Resigner;

    let result = runner.run_match(&mut resigner, &mut random);
    assert_eq!(result.losses, 2);
    assert_eq!(result.forfeits, 2);

    let outcome = runner.play_game(&mut random, &mut resigner, 0);
    assert_eq!(outcome.result, GameResult::Win);
    assert!(outcome.forfeit);
    assert_eq!(outcome.turns, 1);
}

#[test]
fn test_alphabeta_beats_random() {
    let mut alphabeta = AlphaBetaEngine::new(SearchConfig {
        seed: Some(3),
        threads: Some(2),
        ..SearchConfig::default()
    })
    .unwrap();
    let mut random = RandomEngine::with_seed(5);

    let runner = MatchRunner::new(MatchConfig {
        num_games: 2,
        depth: 2,
        board: small_board(),
        ..Default::default()
    })
    .unwrap();
    let result = runner.run_match(&mut alphabeta, &mut random);
    assert_eq!(result.total_games(), 2);
    assert!(result.wins >= 1);
}

#[test]
fn test_turn_cap_scores_a_draw() {
    let runner = MatchRunner::new(MatchConfig {
        num_games: 1,
        max_turns: 2,
        ..Default::default()
    })
    .unwrap();
    let mut a = seeded_engine(1, 1).unwrap();
    let mut b = RandomEngine::with_seed(6);

    let outcome = runner.play_game(&mut a, &mut b, 0);
    assert_eq!(outcome.result, GameResult::Draw);
    assert_eq!(outcome.turns, 2);
}

#[test]
fn test_openings_are_shared_by_pairs() {
    let runner = MatchRunner::new(MatchConfig {
        opening_turns: 3,
        opening_seed: 10,
        ..Default::default()
    })
    .unwrap();
    let opening = |game_num| {
        let mut game = Game::new(Board::standard(), Player::One);
        let played = runner.play_opening(&mut game, game_num);
        (played, game.board().clone())
    };
    assert_eq!(opening(0), opening(1));
    assert_eq!(opening(0).0, 3);
    assert_ne!(opening(0).1, Board::standard());
}

#[test]
fn test_invalid_board_is_rejected() {
    let config = MatchConfig {
        board: BoardConfig {
            rows: 0,
            ..BoardConfig::default()
        },
        ..Default::default()
    };
    assert!(matches!(
        MatchRunner::new(config),
        Err(TournamentError::Board(_))
    ));
}

#[test]
fn test_config_from_toml() {
    let config: MatchConfig = toml::from_str(
        r#"
        num_games = 6
        time_per_move_ms = 250

        [board]
        rows = 5
        cols = 5
        player1_start = { row = 4, col = 2 }
        player2_start = { row = 0, col = 2 }
        start_fields = "removable_when_vacated"
        "#,
    )
    .unwrap();
    assert_eq!(config.num_games, 6);
    assert_eq!(config.depth, 4);
    assert_eq!(config.board.rows, 5);
    assert_eq!(config.board.start_fields, StartFieldPolicy::RemovableWhenVacated);
    assert!(config.search_limits().move_time.is_some());
    assert!(MatchRunner::new(config).is_ok());
}
