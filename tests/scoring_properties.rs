//! Property tests for game scoring and user counters

use hangman_ledger::config::{Difficulty, GameConfig, MAX_WRONG_GUESSES};
use hangman_ledger::error::as_hangman_error;
use hangman_ledger::game::Game;
use hangman_ledger::scoring::ScoreCalculator;
use hangman_ledger::types::{GameStatus, User};
use hangman_ledger::utils::generate_game_id;
use hangman_ledger::HangmanError;
use proptest::prelude::*;

/// Play every letter, ignoring repeats, until the game ends
fn play(calculator: &ScoreCalculator, game: &mut Game, letters: &[char]) {
    for letter in letters {
        if game.is_over() {
            break;
        }
        let result = calculator.record_guess(game, &letter.to_string());
        if let Err(e) = result {
            assert!(
                matches!(as_hangman_error(&e), Some(HangmanError::InvalidGuess { .. })),
                "unexpected error: {}",
                e
            );
            assert!(game.has_guessed(*letter));
        }
    }
}

fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z]{8,14}"
}

fn letters_strategy() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::char::range('a', 'z'), 0..40)
}

fn allowance_strategy() -> impl Strategy<Value = u32> {
    1..=MAX_WRONG_GUESSES
}

proptest! {
    #[test]
    fn final_score_is_bounded_by_allowance(
        word in word_strategy(),
        letters in letters_strategy(),
        allowance in allowance_strategy(),
    ) {
        let calculator = ScoreCalculator::new(GameConfig::default());
        let mut game = calculator
            .new_game(
                generate_game_id(),
                "alice".to_string(),
                &word,
                Some(Difficulty::Custom(allowance)),
            )
            .unwrap();
        play(&calculator, &mut game, &letters);

        prop_assert!(game.wrong_guesses_remaining() <= allowance);
        prop_assert_eq!(
            game.wrong_guesses_made() + game.wrong_guesses_remaining(),
            allowance
        );

        match game.status() {
            GameStatus::InProgress => {
                prop_assert!(calculator.finalize_game(&game).is_err());
            }
            GameStatus::Won => {
                let score = calculator.finalize_game(&game).unwrap();
                prop_assert!(score.won);
                prop_assert_eq!(score.final_score, game.wrong_guesses_remaining());
                prop_assert!(score.final_score >= 1);
                prop_assert!(score.final_score <= MAX_WRONG_GUESSES);
            }
            GameStatus::Lost => {
                let score = calculator.finalize_game(&game).unwrap();
                prop_assert!(!score.won);
                prop_assert_eq!(score.final_score, 0);
                prop_assert_eq!(game.wrong_guesses_remaining(), 0);
            }
        }
    }

    #[test]
    fn remaining_guesses_never_increase(
        word in word_strategy(),
        letters in letters_strategy(),
    ) {
        let calculator = ScoreCalculator::default();
        let mut game = calculator
            .new_game(generate_game_id(), "alice".to_string(), &word, None)
            .unwrap();
        play(&calculator, &mut game, &letters);

        let mut previous = game.wrong_guesses_allowed();
        for record in game.guess_history() {
            prop_assert!(record.wrong_guesses_remaining <= previous);
            if record.is_correct() {
                prop_assert_eq!(record.wrong_guesses_remaining, previous);
            } else {
                prop_assert_eq!(record.wrong_guesses_remaining + 1, previous);
            }
            previous = record.wrong_guesses_remaining;
        }
    }

    #[test]
    fn user_counters_stay_consistent(
        games in prop::collection::vec((word_strategy(), letters_strategy()), 1..12),
        replays in 0usize..3,
    ) {
        let calculator = ScoreCalculator::default();
        let mut user = User::new("alice", None);
        let mut finished = 0u64;

        for (word, letters) in &games {
            let mut game = calculator
                .new_game(generate_game_id(), user.name.clone(), word, None)
                .unwrap();
            play(&calculator, &mut game, letters);

            let Ok(score) = calculator.finalize_game(&game) else {
                continue;
            };
            finished += 1;

            prop_assert!(calculator.apply_result(&mut user, &score).unwrap());
            let snapshot = user.clone();
            for _ in 0..replays {
                prop_assert!(!calculator.apply_result(&mut user, &score).unwrap());
            }
            prop_assert_eq!(&user, &snapshot);
        }

        prop_assert_eq!(user.games_played, finished);
        prop_assert!(user.games_played >= user.wins);
        prop_assert!(user.total_score <= user.wins * u64::from(MAX_WRONG_GUESSES));

        let metrics = calculator.ranking_metrics(&user);
        prop_assert!((0.0..=1.0).contains(&metrics.win_percentage));
        prop_assert!((0.0..=f64::from(MAX_WRONG_GUESSES)).contains(&metrics.average_score));
        if user.wins > 0 {
            prop_assert!(metrics.average_score >= 1.0);
        }
    }
}
