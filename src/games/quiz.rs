//! Quick quiz: eight questions, fifteen seconds apiece
//!
//! Exactly one scored action per question. An answer or a timeout locks the
//! question and starts the review pause (clock suspended); the pause then
//! loads the next question with a fresh clock, or settles the round after
//! the last one.

use serde::{Deserialize, Serialize};

use crate::ms_to_ticks;
use crate::questions::{self, Question};
use crate::session::{ClockTick, CountdownClock, DelayTimer, Phase, RewardSink, Round};
use crate::tuning::QuizTuning;

use super::MiniGame;

/// Scored state of the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerState {
    /// Accepting an answer
    Open,
    /// Locked by the player's pick (index into the options)
    Answered(usize),
    /// Locked by the per-question clock
    TimedOut,
}

/// Answer picked since the previous tick
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizInput {
    pub answer: Option<usize>,
}

/// The quiz mini-game
#[derive(Debug, Clone)]
pub struct QuizGame {
    tuning: QuizTuning,
    bank: Vec<Question>,
    round: Round,
    clock: CountdownClock,
    current: usize,
    state: AnswerState,
    advance: DelayTimer,
    score: u64,
    streak: u32,
    correct: u32,
    last_points: u64,
}

/// Points for a correct answer at `remaining` seconds with `streak` prior
/// consecutive hits
fn answer_points(remaining: u32, streak: u32, tuning: &QuizTuning) -> u64 {
    u64::from(tuning.base_points + remaining / tuning.time_bonus_divisor + streak * tuning.streak_bonus)
}

impl QuizGame {
    /// An empty `bank` falls back to the stock question set
    pub fn new(tuning: QuizTuning, bank: Vec<Question>) -> Self {
        let bank = if bank.is_empty() {
            questions::default_bank()
        } else {
            bank
        };
        Self {
            clock: CountdownClock::new(tuning.question_secs),
            tuning,
            bank,
            round: Round::new(),
            current: 0,
            state: AnswerState::Open,
            advance: DelayTimer::default(),
            score: 0,
            streak: 0,
            correct: 0,
            last_points: 0,
        }
    }

    pub fn question(&self) -> &Question {
        &self.bank[self.current]
    }

    pub fn question_index(&self) -> usize {
        self.current
    }

    pub fn question_count(&self) -> usize {
        self.bank.len()
    }

    pub fn answer_state(&self) -> AnswerState {
        self.state
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    /// Points the latest answer scored (display, for the review pause)
    pub fn last_points(&self) -> u64 {
        self.last_points
    }

    pub fn remaining_secs(&self) -> u32 {
        self.clock.remaining_secs()
    }

    /// Display-only percentage of questions answered correctly
    pub fn accuracy(&self) -> u32 {
        let pct = self.correct as f32 / self.bank.len() as f32 * 100.0;
        pct.round() as u32
    }

    /// Lock in an answer. Rejected unless the current question is Open.
    fn lock_answer(&mut self, idx: usize) {
        if self.state != AnswerState::Open || idx >= questions::OPTIONS {
            return;
        }
        self.state = AnswerState::Answered(idx);
        self.clock.pause();
        if idx == self.bank[self.current].correct {
            let points = answer_points(self.clock.remaining_secs(), self.streak, &self.tuning);
            self.score += points;
            self.streak += 1;
            self.correct += 1;
            self.last_points = points;
        } else {
            self.streak = 0;
            self.last_points = 0;
        }
        self.advance.schedule(ms_to_ticks(self.tuning.advance_ms));
    }

    fn time_out(&mut self) {
        self.state = AnswerState::TimedOut;
        self.streak = 0;
        self.last_points = 0;
        self.advance.schedule(ms_to_ticks(self.tuning.advance_ms));
    }

    /// Load the next question, or settle the round after the last one
    fn advance_now(&mut self, rewards: &mut dyn RewardSink) {
        if self.current + 1 < self.bank.len() {
            self.current += 1;
            self.state = AnswerState::Open;
            self.clock.reset(self.tuning.question_secs);
        } else {
            self.clock.stop();
            let score = self.score;
            log::debug!(
                "quiz round over: {}/{} correct, score {score}",
                self.correct,
                self.bank.len()
            );
            self.round.finish((score > 0).then_some(score), rewards);
        }
    }
}

impl MiniGame for QuizGame {
    type Input = QuizInput;

    fn start(&mut self) {
        self.current = 0;
        self.state = AnswerState::Open;
        self.advance.cancel();
        self.score = 0;
        self.streak = 0;
        self.correct = 0;
        self.last_points = 0;
        self.clock = CountdownClock::new(self.tuning.question_secs);
        self.round.begin();
        log::debug!(
            "quiz round started ({} questions, {}s each)",
            self.bank.len(),
            self.tuning.question_secs
        );
    }

    fn tick(&mut self, input: &Self::Input, rewards: &mut dyn RewardSink) {
        if !self.round.is_active() {
            return;
        }
        self.round.note_tick();
        if let Some(idx) = input.answer {
            self.lock_answer(idx);
        }
        if self.advance.tick() {
            self.advance_now(rewards);
            return;
        }
        if self.clock.tick() == ClockTick::Expired {
            self.time_out();
        }
    }

    fn close(&mut self) {
        self.clock.stop();
        self.advance.cancel();
        self.round.abort();
    }

    fn phase(&self) -> Phase {
        self.round.phase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICKS_PER_SECOND;
    use crate::session::CoinLedger;

    fn new_game() -> (QuizGame, CoinLedger) {
        let mut game = QuizGame::new(QuizTuning::default(), Vec::new());
        game.start();
        (game, CoinLedger::new())
    }

    fn idle(game: &mut QuizGame, ledger: &mut CoinLedger, ticks: u32) {
        let none = QuizInput::default();
        for _ in 0..ticks {
            game.tick(&none, ledger);
        }
    }

    fn answer(game: &mut QuizGame, ledger: &mut CoinLedger, idx: usize) {
        game.tick(&QuizInput { answer: Some(idx) }, ledger);
    }

    #[test]
    fn test_answer_points_reference() {
        let tuning = QuizTuning::default();
        assert_eq!(answer_points(15, 0, &tuning), 55);
        assert_eq!(answer_points(9, 0, &tuning), 53);
        assert_eq!(answer_points(15, 3, &tuning), 85);
    }

    #[test]
    fn test_instant_correct_answer_scores_55() {
        let (mut game, mut ledger) = new_game();
        let correct = game.question().correct;
        answer(&mut game, &mut ledger, correct);
        assert_eq!(game.score(), 55);
        assert_eq!(game.streak(), 1);
        assert_eq!(game.correct_count(), 1);
        assert_eq!(game.answer_state(), AnswerState::Answered(correct));
    }

    #[test]
    fn test_wrong_answer_resets_streak() {
        let (mut game, mut ledger) = new_game();
        let correct = game.question().correct;
        answer(&mut game, &mut ledger, correct);
        // wait out the review pause to reach question two
        idle(&mut game, &mut ledger, 2 * TICKS_PER_SECOND);
        assert_eq!(game.question_index(), 1);
        let wrong = (game.question().correct + 1) % questions::OPTIONS;
        answer(&mut game, &mut ledger, wrong);
        assert_eq!(game.streak(), 0);
        assert_eq!(game.score(), 55);
        assert_eq!(game.last_points(), 0);
    }

    #[test]
    fn test_second_answer_is_rejected() {
        let (mut game, mut ledger) = new_game();
        let correct = game.question().correct;
        let wrong = (correct + 1) % questions::OPTIONS;
        answer(&mut game, &mut ledger, wrong);
        answer(&mut game, &mut ledger, correct);
        assert_eq!(game.answer_state(), AnswerState::Answered(wrong));
        assert_eq!(game.score(), 0);
        assert_eq!(game.correct_count(), 0);
    }

    #[test]
    fn test_timeout_locks_and_resets_streak() {
        let (mut game, mut ledger) = new_game();
        let correct = game.question().correct;
        answer(&mut game, &mut ledger, correct);
        idle(&mut game, &mut ledger, 2 * TICKS_PER_SECOND);
        assert_eq!(game.streak(), 1);
        // let question two run out (15s is enough; the review pause that
        // follows the timeout has not elapsed yet)
        idle(&mut game, &mut ledger, 15 * TICKS_PER_SECOND);
        assert_eq!(game.answer_state(), AnswerState::TimedOut);
        assert_eq!(game.streak(), 0);
        assert_eq!(game.score(), 55);
        // the pause still advances to question three with a fresh clock
        idle(&mut game, &mut ledger, TICKS_PER_SECOND);
        assert_eq!(game.question_index(), 2);
        assert_eq!(game.answer_state(), AnswerState::Open);
        assert_eq!(game.remaining_secs(), QuizTuning::default().question_secs);
    }

    #[test]
    fn test_clock_suspended_during_review() {
        let (mut game, mut ledger) = new_game();
        let correct = game.question().correct;
        answer(&mut game, &mut ledger, correct);
        let before = game.remaining_secs();
        idle(&mut game, &mut ledger, TICKS_PER_SECOND / 2);
        assert_eq!(game.remaining_secs(), before);
    }

    #[test]
    fn test_full_round_all_correct() {
        let (mut game, mut ledger) = new_game();
        // instant answers: 50 + 15/3 + streak*10 per question
        let expected: u64 = (0..8).map(|streak| 55 + streak * 10).sum();
        while game.phase() == Phase::Active {
            if game.answer_state() == AnswerState::Open {
                let correct = game.question().correct;
                answer(&mut game, &mut ledger, correct);
            } else {
                idle(&mut game, &mut ledger, 1);
            }
        }
        assert_eq!(game.correct_count(), 8);
        assert_eq!(game.accuracy(), 100);
        assert_eq!(ledger.coins, expected);
        assert_eq!(ledger.grants, 1);
    }

    #[test]
    fn test_all_timeouts_grant_nothing() {
        let (mut game, mut ledger) = new_game();
        // 8 questions x (15s + review) with slack
        idle(&mut game, &mut ledger, 8 * 17 * TICKS_PER_SECOND);
        assert_eq!(game.phase(), Phase::Finished);
        assert_eq!(ledger.grants, 0);
        assert_eq!(game.accuracy(), 0);
    }

    #[test]
    fn test_close_suppresses_reward() {
        let (mut game, mut ledger) = new_game();
        let correct = game.question().correct;
        answer(&mut game, &mut ledger, correct);
        game.close();
        assert_eq!(game.phase(), Phase::Finished);
        idle(&mut game, &mut ledger, 10 * TICKS_PER_SECOND);
        assert_eq!(ledger.grants, 0);
    }
}
