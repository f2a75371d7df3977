//! Mini Arcade demo entry point
//!
//! Headless autoplay of all four mini-games against a shared coin ledger,
//! in the spirit of an attract/demo mode. Run with `RUST_LOG=debug` to see
//! per-round transitions; the final ledger is printed as JSON.

use glam::Vec2;

use mini_arcade::consts::TICKS_PER_SECOND;
use mini_arcade::games::{AnswerState, ClickerInput, MemoryInput, QuizInput, RaidInput};
use mini_arcade::{
    ClickerGame, CoinLedger, MemoryGame, MiniGame, Phase, QuizGame, RaidGame, Tuning,
};

const DEMO_SEED: u64 = 0xA2CADE;

fn main() {
    env_logger::init();
    log::info!("mini-arcade demo starting (seed {DEMO_SEED:#x})");

    let tuning = Tuning::default();
    let mut ledger = CoinLedger::new();

    play_clicker(&tuning, &mut ledger);
    play_memory(&tuning, &mut ledger);
    play_quiz(&tuning, &mut ledger);
    play_raid(&tuning, &mut ledger);

    match serde_json::to_string_pretty(&ledger) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("ledger serialization failed: {err}"),
    }
}

/// Mash at ten clicks a second until the clock runs out
fn play_clicker(tuning: &Tuning, ledger: &mut CoinLedger) {
    let mut game = ClickerGame::new(tuning.clicker.clone());
    game.start();

    let press = ClickerInput {
        presses: vec![Vec2::new(24.0, 24.0)],
    };
    let idle = ClickerInput::default();
    let mut tick_no = 0u32;
    while game.phase() == Phase::Active {
        let input = if tick_no % 2 == 0 { &press } else { &idle };
        game.tick(input, ledger);
        tick_no += 1;
    }
    println!(
        "clicker: {} clicks, best streak {}, {} coins",
        game.clicks(),
        game.best_streak(),
        game.coins()
    );
}

/// Perfect-memory bot: reads the board and flips pairs straight off
fn play_memory(tuning: &Tuning, ledger: &mut CoinLedger) {
    let mut game = MemoryGame::new(tuning.memory.clone(), DEMO_SEED);
    game.start();

    let mut pairs = Vec::new();
    let mut used = vec![false; game.cards().len()];
    for i in 0..game.cards().len() {
        if used[i] {
            continue;
        }
        for j in i + 1..game.cards().len() {
            if !used[j] && game.cards()[j].symbol == game.cards()[i].symbol {
                pairs.push((i, j));
                used[i] = true;
                used[j] = true;
                break;
            }
        }
    }

    let mut next = 0;
    while game.phase() == Phase::Active {
        let input = if next < pairs.len() && game.staged().is_empty() {
            let (a, b) = pairs[next];
            next += 1;
            MemoryInput { flips: vec![a, b] }
        } else {
            MemoryInput::default()
        };
        game.tick(&input, ledger);
    }
    println!(
        "memory: {} pairs in {} moves ({}% accuracy), score {}",
        game.matches(),
        game.moves(),
        game.accuracy(),
        game.score()
    );
}

/// Knows every answer, takes a couple of seconds to press it
fn play_quiz(tuning: &Tuning, ledger: &mut CoinLedger) {
    let mut game = QuizGame::new(tuning.quiz.clone(), Vec::new());
    game.start();

    let think_until = tuning.quiz.question_secs.saturating_sub(2);
    while game.phase() == Phase::Active {
        let input = if game.answer_state() == AnswerState::Open
            && game.remaining_secs() <= think_until
        {
            QuizInput {
                answer: Some(game.question().correct),
            }
        } else {
            QuizInput::default()
        };
        game.tick(&input, ledger);
    }
    println!(
        "quiz: {}/{} correct ({}% accuracy), score {}",
        game.correct_count(),
        game.question_count(),
        game.accuracy(),
        game.score()
    );
}

/// Sidestep the nearest descending enemy; survive as long as it lasts
fn play_raid(tuning: &Tuning, ledger: &mut CoinLedger) {
    let mut game = RaidGame::new(tuning.raid.clone(), DEMO_SEED);
    game.start();

    // cap the demo at three minutes in case the bot gets too good
    let mut ticks = 0u32;
    while game.phase() == Phase::Active && ticks < 180 * TICKS_PER_SECOND {
        let ship_x = game.ship().x;
        let threat = game
            .enemies()
            .iter()
            .filter(|e| e.pos.y > 40.0)
            .min_by(|a, b| {
                (a.pos.x - ship_x)
                    .abs()
                    .partial_cmp(&(b.pos.x - ship_x).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        let target = match threat {
            Some(enemy) if (enemy.pos.x - ship_x).abs() < 12.0 => {
                if enemy.pos.x > ship_x {
                    ship_x - 10.0
                } else {
                    ship_x + 10.0
                }
            }
            _ => 50.0,
        };
        game.tick(
            &RaidInput {
                pointer_x: Some(target),
            },
            ledger,
        );
        ticks += 1;
    }
    if game.phase() == Phase::Active {
        log::info!("raid demo cutoff reached, closing without reward");
        game.close();
    }
    println!(
        "raid: level {}, {} lives left, score {}",
        game.level(),
        game.lives(),
        game.score()
    );
}
