use super::*;

#[test]
fn test_equal_ratings_expect_half() {
    let tracker = EloTracker::new();
    let expected = tracker.expected_score("alphabeta:4", "random");
    assert!((expected - 0.5).abs() < 1e-9);
}

#[test]
fn test_update_is_zero_sum() {
    let mut tracker = EloTracker::new();
    let result = MatchResult {
        wins: 8,
        losses: 1,
        draws: 1,
        forfeits: 0,
    };
    tracker.update_ratings("alphabeta:4", "random", &result);

    let winner = tracker.rating("alphabeta:4");
    let loser = tracker.rating("random");
    assert!(winner > DEFAULT_ELO);
    assert!(loser < DEFAULT_ELO);
    assert!((winner + loser - 2.0 * DEFAULT_ELO).abs() < 1e-9);
    assert_eq!(tracker.games_played["random"], 10);
    assert_eq!(tracker.history.len(), 1);
}

#[test]
fn test_leaderboard_is_sorted() {
    let mut tracker = EloTracker::new();
    let mut sweep = MatchResult::new();
    for _ in 0..4 {
        sweep.record(GameResult::Win);
    }
    tracker.update_ratings("b", "a", &sweep);
    tracker.update_ratings("c", "b", &sweep);

    let names: Vec<String> = tracker.leaderboard().into_iter().map(|e| e.0).collect();
    assert_eq!(names[0], "c");
    assert_eq!(names[2], "a");
    assert!(tracker.format_leaderboard().contains("Engine Leaderboard"));
}

#[test]
fn test_score_and_flip() {
    let mut result = MatchResult::new();
    assert_eq!(result.score(), 0.5);
    result.record(GameResult::Win.flipped());
    result.record(GameResult::Draw.flipped());
    assert_eq!(result.losses, 1);
    assert_eq!(result.draws, 1);
    assert!((result.score() - 0.25).abs() < 1e-9);
}

#[test]
fn test_save_and_load() {
    let path = std::env::temp_dir().join(format!("isola_elo_{}.json", std::process::id()));
    let mut tracker = EloTracker::new();
    tracker.update_ratings("x", "y", &MatchResult { wins: 1, ..Default::default() });
    tracker.save(&path).unwrap();

    let loaded = EloTracker::load(&path).unwrap();
    assert_eq!(loaded.rating("x"), tracker.rating("x"));
    assert_eq!(loaded.history.len(), 1);
    std::fs::remove_file(&path).unwrap();

    assert!(EloTracker::load_or_default(&path).unwrap().ratings.is_empty());
    assert!(matches!(EloTracker::load(&path), Err(TournamentError::Io { .. })));
}

#[test]
fn test_ratings_stay_in_memory_without_a_file() {
    let mut tracker = EloTracker::load_optional(None).unwrap();
    assert!(tracker.ratings.is_empty());
    tracker.update_ratings("x", "y", &MatchResult { wins: 2, ..Default::default() });
    assert!(!tracker.save_optional(None).unwrap());

    let path = std::env::temp_dir().join(format!("isola_elo_opt_{}.json", std::process::id()));
    assert!(tracker.save_optional(Some(&path)).unwrap());
    let loaded = EloTracker::load_optional(Some(&path)).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded.rating("x"), tracker.rating("x"));
}
