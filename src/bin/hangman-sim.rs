//! Hangman Simulator CLI Tool
//!
//! Command-line tool that drives the hangman service in-process: play a game
//! from a sequence of guesses, or run predefined scenarios and check their
//! scores and rankings.
//!
//! Usage:
//!   cargo run --bin hangman-sim -- --help
//!   cargo run --bin hangman-sim play --user alice --word elephant --guesses xyzelphant
//!   cargo run --bin hangman-sim play --user bob --word elephant --guesses bcdfgijkmo \
//!     --difficulty hard
//!   cargo run --bin hangman-sim run-scenario --scenario perfect-win
//!   cargo run --bin hangman-sim run-all-scenarios

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use hangman_ledger::config::{AppConfig, Difficulty};
use hangman_ledger::service::{AppState, HangmanService};
use hangman_ledger::GameStatus;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "hangman-sim")]
#[command(about = "Play and verify hangman games against an in-process hangman-ledger service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Minimum target word length
    #[arg(long, default_value = "8")]
    min_word_length: usize,

    /// Print JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game from a sequence of single-letter guesses
    Play {
        /// User name; created if missing
        #[arg(short, long)]
        user: String,
        /// Target word
        #[arg(short, long)]
        word: String,
        /// Letters to guess, in order
        #[arg(short, long)]
        guesses: String,
        /// Difficulty (easy, medium, hard or a number of wrong guesses)
        #[arg(short, long)]
        difficulty: Option<String>,
    },
    /// Run a predefined scenario
    RunScenario {
        /// Scenario name (perfect-win, late-win, loss, retry, ranking)
        #[arg(short, long)]
        scenario: String,
    },
    /// Run all predefined scenarios
    RunAllScenarios,
}

/// A game to play inside a scenario
struct ScriptedGame {
    user: &'static str,
    word: &'static str,
    guesses: &'static str,
    difficulty: Option<Difficulty>,
}

/// Expected counters for one user after a scenario
struct ExpectedUser {
    user: &'static str,
    wins: u64,
    games_played: u64,
    total_score: u64,
}

struct Scenario {
    name: &'static str,
    games: Vec<ScriptedGame>,
    /// Re-run completion for every finished game this many extra times
    completion_retries: usize,
    expected: Vec<ExpectedUser>,
    /// Expected ranking order by user name
    expected_ranking: Vec<&'static str>,
}

impl Scenario {
    const NAMES: [&'static str; 5] = ["perfect-win", "late-win", "loss", "retry", "ranking"];

    fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "perfect-win" => Some(Self::perfect_win()),
            "late-win" => Some(Self::late_win()),
            "loss" => Some(Self::loss()),
            "retry" => Some(Self::retry()),
            "ranking" => Some(Self::ranking()),
            _ => None,
        }
    }

    fn all() -> Vec<Self> {
        vec![
            Self::perfect_win(),
            Self::late_win(),
            Self::loss(),
            Self::retry(),
            Self::ranking(),
        ]
    }

    fn perfect_win() -> Self {
        Self {
            name: "perfect-win",
            games: vec![ScriptedGame {
                user: "alice",
                word: "elephant",
                guesses: "elphant",
                difficulty: None,
            }],
            completion_retries: 0,
            expected: vec![ExpectedUser {
                user: "alice",
                wins: 1,
                games_played: 1,
                total_score: 10,
            }],
            expected_ranking: vec!["alice"],
        }
    }

    fn late_win() -> Self {
        Self {
            name: "late-win",
            games: vec![ScriptedGame {
                user: "alice",
                word: "elephant",
                guesses: "xyzelphant",
                difficulty: None,
            }],
            completion_retries: 0,
            expected: vec![ExpectedUser {
                user: "alice",
                wins: 1,
                games_played: 1,
                total_score: 7,
            }],
            expected_ranking: vec!["alice"],
        }
    }

    fn loss() -> Self {
        Self {
            name: "loss",
            games: vec![ScriptedGame {
                user: "bob",
                word: "elephant",
                guesses: "bcdfgijkmo",
                difficulty: None,
            }],
            completion_retries: 0,
            expected: vec![ExpectedUser {
                user: "bob",
                wins: 0,
                games_played: 1,
                total_score: 0,
            }],
            expected_ranking: vec!["bob"],
        }
    }

    fn retry() -> Self {
        Self {
            name: "retry",
            games: vec![ScriptedGame {
                user: "alice",
                word: "elephant",
                guesses: "xyzelphant",
                difficulty: None,
            }],
            completion_retries: 3,
            expected: vec![ExpectedUser {
                user: "alice",
                wins: 1,
                games_played: 1,
                total_score: 7,
            }],
            expected_ranking: vec!["alice"],
        }
    }

    fn ranking() -> Self {
        Self {
            name: "ranking",
            games: vec![
                ScriptedGame {
                    user: "alice",
                    word: "elephant",
                    guesses: "elphant",
                    difficulty: None,
                },
                ScriptedGame {
                    user: "alice",
                    word: "mountain",
                    guesses: "qwxzvbjk",
                    difficulty: Some(Difficulty::Hard),
                },
                ScriptedGame {
                    user: "bob",
                    word: "elephant",
                    guesses: "zelphant",
                    difficulty: None,
                },
                ScriptedGame {
                    user: "carol",
                    word: "elephant",
                    guesses: "bcdfgijkmo",
                    difficulty: None,
                },
            ],
            completion_retries: 1,
            expected: vec![
                ExpectedUser {
                    user: "alice",
                    wins: 1,
                    games_played: 2,
                    total_score: 10,
                },
                ExpectedUser {
                    user: "bob",
                    wins: 1,
                    games_played: 1,
                    total_score: 9,
                },
                ExpectedUser {
                    user: "carol",
                    wins: 0,
                    games_played: 1,
                    total_score: 0,
                },
            ],
            expected_ranking: vec!["bob", "alice", "carol"],
        }
    }
}

/// Summary printed after a single game
#[derive(Serialize)]
struct PlaySummary {
    moves: Vec<hangman_ledger::service::MoveResult>,
    rankings: Vec<hangman_ledger::RankingEntry>,
}

fn build_service(min_word_length: usize) -> Result<Arc<HangmanService>> {
    let mut config = AppConfig::default();
    config.game.min_target_word_length = min_word_length;
    let state = AppState::new(config)?;
    Ok(state.hangman())
}

fn ensure_user(service: &HangmanService, user: &str) -> Result<()> {
    if service.get_user(user).is_err() {
        service.create_user(user, None)?;
    }
    Ok(())
}

/// Play a game to the end of the given guesses; stops early when the game ends
fn play_game(
    service: &HangmanService,
    user: &str,
    word: &str,
    guesses: &str,
    difficulty: Option<Difficulty>,
) -> Result<Vec<hangman_ledger::service::MoveResult>> {
    ensure_user(service, user)?;
    let game = service.new_game(user, word, difficulty)?;
    debug!(game_id = %game.game_id, "Playing game");

    let mut moves = Vec::new();
    for letter in guesses.chars() {
        let result = service.make_move(&game.game_id, &letter.to_string())?;
        let over = result.game.game_over;
        moves.push(result);
        if over {
            break;
        }
    }
    Ok(moves)
}

fn run_scenario(service: &HangmanService, scenario: &Scenario) -> Result<()> {
    for scripted in &scenario.games {
        let moves = play_game(
            service,
            scripted.user,
            scripted.word,
            scripted.guesses,
            scripted.difficulty,
        )?;
        let last = moves
            .last()
            .ok_or_else(|| anyhow!("game for '{}' had no moves", scripted.user))?;
        if last.game.status == GameStatus::InProgress {
            return Err(anyhow!(
                "game for '{}' did not finish after '{}'",
                scripted.user,
                scripted.guesses
            ));
        }

        for _ in 0..scenario.completion_retries {
            service.complete_game(&last.game.game_id)?;
        }
    }

    for expected in &scenario.expected {
        let user = service.get_user(expected.user)?;
        if (user.wins, user.games_played, user.total_score)
            != (expected.wins, expected.games_played, expected.total_score)
        {
            return Err(anyhow!(
                "user '{}' has wins={} games_played={} total_score={}, expected {}/{}/{}",
                expected.user,
                user.wins,
                user.games_played,
                user.total_score,
                expected.wins,
                expected.games_played,
                expected.total_score
            ));
        }
    }

    let ranking: Vec<String> = service
        .get_user_rankings()?
        .into_iter()
        .map(|entry| entry.user_id)
        .collect();
    if ranking != scenario.expected_ranking {
        return Err(anyhow!(
            "ranking {:?}, expected {:?}",
            ranking,
            scenario.expected_ranking
        ));
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            user,
            word,
            guesses,
            difficulty,
        } => {
            let difficulty = difficulty
                .map(|raw| raw.parse::<Difficulty>())
                .transpose()?;
            let service = build_service(cli.min_word_length)?;

            let moves = match play_game(&service, &user, &word, &guesses, difficulty) {
                Ok(moves) => moves,
                Err(e) => {
                    eprintln!("❌ Failed to play game: {:#}", e);
                    std::process::exit(1);
                }
            };
            let rankings = service.get_user_rankings()?;

            if cli.json {
                return print_json(&PlaySummary { moves, rankings });
            }

            for result in &moves {
                println!(
                    "  {} -> {:<40} {} ({} wrong guesses left)",
                    result.guess.letter,
                    result.message,
                    result.game.word_progress,
                    result.game.wrong_guesses_remaining
                );
            }
            match moves.last().and_then(|result| result.score.as_ref()) {
                Some(score) => println!(
                    "🏁 {} {} with a score of {}",
                    user,
                    if score.won { "won" } else { "lost" },
                    score.final_score
                ),
                None => println!("⏸  Game still in progress"),
            }

            println!("📊 Rankings:");
            for (position, entry) in rankings.iter().enumerate() {
                println!(
                    "  {}. {} - {:.0}% wins, average score {:.2} over {} games",
                    position + 1,
                    entry.user_id,
                    entry.win_percentage * 100.0,
                    entry.average_score,
                    entry.games_played
                );
            }
        }

        Commands::RunScenario { scenario } => {
            let Some(config) = Scenario::by_name(&scenario) else {
                eprintln!(
                    "❌ Unknown scenario '{}'. Available: {}",
                    scenario,
                    Scenario::NAMES.join(", ")
                );
                std::process::exit(1);
            };

            println!("🧪 Running scenario: {}", config.name);
            let service = build_service(cli.min_word_length)?;
            match run_scenario(&service, &config) {
                Ok(()) => {
                    println!("✅ Scenario completed successfully!");
                    if cli.json {
                        print_json(&service.get_user_rankings()?)?;
                    }
                }
                Err(e) => {
                    eprintln!("❌ Scenario failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::RunAllScenarios => {
            let mut passed = 0;
            let mut failed = 0;

            println!("🧪 Running all test scenarios...\n");

            for scenario in Scenario::all() {
                print!("Running '{}' scenario... ", scenario.name);
                let service = build_service(cli.min_word_length)?;
                match run_scenario(&service, &scenario) {
                    Ok(()) => {
                        println!("✅ PASSED");
                        passed += 1;
                    }
                    Err(e) => {
                        println!("❌ FAILED ({:#})", e);
                        failed += 1;
                    }
                }
            }

            info!(passed, failed, "Scenarios finished");
            println!("\n📊 Results: {} passed, {} failed", passed, failed);
            if failed > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
