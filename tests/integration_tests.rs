//! Integration tests for the hangman-ledger service
//!
//! These tests validate the entire system working together, including:
//! - Complete game lifecycle from creation to recorded score
//! - Exactly-once application of results to user counters
//! - Rankings and high score tables
//! - Guess history, cancellation and error handling

mod fixtures;

use hangman_ledger::config::Difficulty;
use hangman_ledger::error::as_hangman_error;
use hangman_ledger::types::{GameStatus, GuessOutcome};
use hangman_ledger::HangmanError;

use fixtures::{create_test_service, play_game, play_letters, ELEPHANT_MISSES};

fn error_of(err: &anyhow::Error) -> &HangmanError {
    as_hangman_error(err).expect("expected a HangmanError")
}

#[test]
fn test_complete_win_workflow() {
    let (service, store) = create_test_service();
    service
        .create_user("alice", Some("alice@example.com".to_string()))
        .unwrap();

    // Step 1: Start a game
    let game = service.new_game("alice", "elephant", None).unwrap();
    assert_eq!(game.word_progress, "********");
    assert_eq!(game.wrong_guesses_remaining, 10);
    assert_eq!(game.target_word, None);

    // Step 2: Three misses, then every letter of the word
    let moves = play_letters(&service, &game.game_id, "xyzelphant");
    assert_eq!(moves.len(), 10);
    assert!(moves[..9].iter().all(|m| m.score.is_none()));

    // Step 3: The last move ends the game and records the score
    let last = moves.last().unwrap();
    assert_eq!(last.game.status, GameStatus::Won);
    assert_eq!(last.game.word_progress, "elephant");
    let score = last.score.as_ref().unwrap();
    assert!(score.won);
    assert_eq!(score.wrong_guesses, 3);
    assert_eq!(score.final_score, 7);

    // Step 4: The user counters reflect the game exactly once
    let user = service.get_user("alice").unwrap();
    assert_eq!((user.wins, user.games_played, user.total_score), (1, 1, 7));

    let ranking = service.get_user_ranking("alice").unwrap();
    assert_eq!(ranking.win_percentage, 1.0);
    assert_eq!(ranking.average_score, 7.0);
    assert_eq!(store.commits_applied(), 1);
}

#[test]
fn test_complete_loss_workflow() {
    let (service, _store) = create_test_service();
    let (game_id, moves) = play_game(&service, "bob", "elephant", ELEPHANT_MISSES, None);

    let last = moves.last().unwrap();
    assert_eq!(last.game.status, GameStatus::Lost);
    assert_eq!(last.game.wrong_guesses_remaining, 0);
    assert_eq!(last.message, "Wrong letter guess! Game over!");
    assert_eq!(last.game.target_word.as_deref(), Some("elephant"));

    let score = last.score.as_ref().unwrap();
    assert!(!score.won);
    assert_eq!(score.final_score, 0);

    let user = service.get_user("bob").unwrap();
    assert_eq!((user.wins, user.games_played, user.total_score), (0, 1, 0));

    let ranking = service.get_user_ranking("bob").unwrap();
    assert_eq!(ranking.win_percentage, 0.0);
    assert_eq!(ranking.average_score, 0.0);

    // An eleventh guess is refused and leaves the game unchanged
    let err = service.make_move(&game_id, "e").unwrap_err();
    assert!(matches!(error_of(&err), HangmanError::InvalidState { .. }));
    assert_eq!(service.get_game_history(&game_id).unwrap().len(), 10);
}

#[test]
fn test_repeated_completion_applies_once() {
    let (service, store) = create_test_service();
    let (game_id, _) = play_game(&service, "alice", "elephant", "xyzelphant", None);

    for _ in 0..5 {
        let score = service.complete_game(&game_id).unwrap();
        assert_eq!(score.final_score, 7);
    }

    let user = service.get_user("alice").unwrap();
    assert_eq!((user.wins, user.games_played, user.total_score), (1, 1, 7));
    assert_eq!(service.get_scores().unwrap().len(), 1);
    assert_eq!(store.commits_applied(), 1);
}

#[test]
fn test_invalid_guesses_leave_game_unchanged() {
    let (service, _store) = create_test_service();
    service.create_user("alice", None).unwrap();
    let game = service.new_game("alice", "elephant", None).unwrap();

    for bad in ["", "ab", "1", "é", " "] {
        let err = service.make_move(&game.game_id, bad).unwrap_err();
        assert!(
            matches!(error_of(&err), HangmanError::InvalidGuess { .. }),
            "'{}' should be an invalid guess",
            bad
        );
    }

    service.make_move(&game.game_id, "E").unwrap();
    let err = service.make_move(&game.game_id, "e").unwrap_err();
    assert!(matches!(error_of(&err), HangmanError::InvalidGuess { .. }));

    let view = service.get_game(&game.game_id).unwrap();
    assert_eq!(view.wrong_guesses_remaining, 10);
    assert_eq!(view.word_progress, "e*e*****");
    assert_eq!(service.get_game_history(&game.game_id).unwrap().len(), 1);
}

#[test]
fn test_guess_history_records_every_move() {
    let (service, _store) = create_test_service();
    let (game_id, _) = play_game(&service, "alice", "elephant", "ezl", None);

    let history = service.get_game_history(&game_id).unwrap();
    let summary: Vec<(char, GuessOutcome, u32)> = history
        .iter()
        .map(|record| (record.letter, record.outcome, record.wrong_guesses_remaining))
        .collect();

    assert_eq!(
        summary,
        vec![
            ('e', GuessOutcome::Correct, 10),
            ('z', GuessOutcome::Wrong, 9),
            ('l', GuessOutcome::Correct, 9),
        ]
    );
}

#[test]
fn test_target_word_validation() {
    let (service, _store) = create_test_service();
    service.create_user("alice", None).unwrap();

    for word in ["cat", "elephants!", "elep hant", "", "  elephant  "] {
        let err = service.new_game("alice", word, None).unwrap_err();
        assert!(
            matches!(error_of(&err), HangmanError::InvalidTargetWord { .. }),
            "'{}' should be rejected",
            word
        );
    }

    let game = service.new_game("alice", "ElePhant", None).unwrap();
    assert_eq!(game.target_word_length, 8);
}

#[test]
fn test_difficulty_sets_allowance() {
    let (service, _store) = create_test_service();
    let (_, moves) = play_game(&service, "alice", "elephant", "bcdfg", Some(Difficulty::Hard));

    let last = moves.last().unwrap();
    assert_eq!(last.game.wrong_guesses_allowed, 5);
    assert_eq!(last.game.status, GameStatus::Lost);
    assert_eq!(last.score.as_ref().unwrap().final_score, 0);

    let err = service
        .new_game("alice", "elephant", Some(Difficulty::Custom(11)))
        .unwrap_err();
    assert!(matches!(error_of(&err), HangmanError::InvalidDifficulty { .. }));
}

#[test]
fn test_rankings_order() {
    let (service, _store) = create_test_service();

    // alice: one perfect win and one loss
    play_game(&service, "alice", "elephant", "elphant", None);
    play_game(&service, "alice", "elephant", ELEPHANT_MISSES, None);
    // bob: one win with one miss
    play_game(&service, "bob", "elephant", "zelphant", None);
    // carol: one loss
    play_game(&service, "carol", "elephant", ELEPHANT_MISSES, None);
    // dave never finishes a game and is left out
    play_game(&service, "dave", "elephant", "e", None);

    let rankings = service.get_user_rankings().unwrap();
    let order: Vec<&str> = rankings.iter().map(|r| r.user_id.as_str()).collect();
    assert_eq!(order, vec!["bob", "alice", "carol"]);

    assert_eq!(rankings[1].win_percentage, 0.5);
    assert_eq!(rankings[1].average_score, 10.0);
    assert_eq!(rankings[0].average_score, 9.0);
}

#[test]
fn test_high_scores() {
    let (service, _store) = create_test_service();

    play_game(&service, "alice", "elephant", "xyzelphant", None); // 7
    play_game(&service, "bob", "elephant", "elphant", None); // 10
    play_game(&service, "carol", "elephant", ELEPHANT_MISSES, None); // 0
    play_game(&service, "alice", "elephant", "zelphant", None); // 9

    let scores: Vec<u32> = service
        .get_high_scores(None)
        .unwrap()
        .iter()
        .map(|s| s.final_score)
        .collect();
    assert_eq!(scores, vec![10, 9, 7, 0]);

    let top: Vec<u32> = service
        .get_high_scores(Some(2))
        .unwrap()
        .iter()
        .map(|s| s.final_score)
        .collect();
    assert_eq!(top, vec![10, 9]);

    let alice_scores = service.get_user_scores("alice").unwrap();
    assert_eq!(alice_scores.len(), 2);
    assert!(alice_scores.iter().all(|s| s.user_id == "alice"));
}

#[test]
fn test_user_games_and_cancellation() {
    let (service, _store) = create_test_service();
    service.create_user("alice", None).unwrap();

    let first = service.new_game("alice", "elephant", None).unwrap();
    let second = service.new_game("alice", "mountain", None).unwrap();
    play_letters(&service, &second.game_id, "z");
    assert_eq!(service.average_wrong_guesses_remaining(), Some(10.0));
    assert_eq!(service.refresh_average_cache().unwrap(), Some(9.5));

    let active = service.get_user_games("alice").unwrap();
    assert_eq!(active.len(), 2);

    service.cancel_game(&first.game_id).unwrap();
    let active = service.get_user_games("alice").unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].game_id, second.game_id);
    assert_eq!(service.average_wrong_guesses_remaining(), Some(9.0));

    // Cancelled games are gone and never scored
    let err = service.make_move(&first.game_id, "e").unwrap_err();
    assert!(matches!(error_of(&err), HangmanError::GameNotFound { .. }));
    let user = service.get_user("alice").unwrap();
    assert_eq!(user.games_played, 0);
}

#[test]
fn test_duplicate_user_and_missing_user() {
    let (service, _store) = create_test_service();
    service.create_user("alice", None).unwrap();

    let err = service.create_user("alice", None).unwrap_err();
    assert!(matches!(error_of(&err), HangmanError::UserAlreadyExists { .. }));

    let err = service.create_user("   ", None).unwrap_err();
    assert!(matches!(error_of(&err), HangmanError::InvalidUserName { .. }));

    let err = service.get_user_scores("nobody").unwrap_err();
    assert!(matches!(error_of(&err), HangmanError::UserNotFound { .. }));
}

#[test]
fn test_stats_track_games() {
    let (service, _store) = create_test_service();
    play_game(&service, "alice", "elephant", "elphant", None);
    play_game(&service, "bob", "elephant", "e", None);

    let stats = service.stats().unwrap();
    assert_eq!(stats.users, 2);
    assert_eq!(stats.active_games, 1);
    assert_eq!(stats.completed_games, 1);
    assert_eq!(stats.average_wrong_guesses_remaining, Some(10.0));
}
