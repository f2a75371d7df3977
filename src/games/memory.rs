//! Memory match: sixteen cards, eight pairs, sixty seconds
//!
//! The face-up buffer holds at most two unmatched cards. A matched pair
//! locks immediately; a mismatch stays up (and blocks further flips) until
//! the flip-back delay fires. Finding every pair ends the round early after
//! a short grace, with the clock frozen at the moment of the win.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{MEMORY_CARDS, MEMORY_PAIRS};
use crate::ms_to_ticks;
use crate::session::{ClockTick, CountdownClock, DelayTimer, Phase, RewardSink, Round};
use crate::tuning::MemoryTuning;

use super::MiniGame;

/// One card on the board
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Card {
    pub symbol: u8,
    pub face_up: bool,
    pub matched: bool,
}

/// Card indices clicked since the previous tick
#[derive(Debug, Clone, Default)]
pub struct MemoryInput {
    pub flips: Vec<usize>,
}

/// The memory mini-game
#[derive(Debug, Clone)]
pub struct MemoryGame {
    tuning: MemoryTuning,
    round: Round,
    clock: CountdownClock,
    rng: Pcg32,
    cards: Vec<Card>,
    /// Face-up-unmatched staging area, at most two entries
    buffer: Vec<usize>,
    flip_back: DelayTimer,
    pending_pair: Option<(usize, usize)>,
    win_grace: DelayTimer,
    moves: u32,
    matches: u32,
    score: u64,
}

/// End-of-round score, clamped at zero:
/// `matches*match_points + remaining*time_points - over_par*move_penalty`
fn settlement_score(matches: u32, remaining_secs: u32, moves: u32, tuning: &MemoryTuning) -> u64 {
    let earned =
        u64::from(matches * tuning.match_points) + u64::from(remaining_secs * tuning.time_points);
    let penalty = u64::from(moves.saturating_sub(tuning.par_moves) * tuning.move_penalty);
    earned.saturating_sub(penalty)
}

impl MemoryGame {
    pub fn new(tuning: MemoryTuning, seed: u64) -> Self {
        Self {
            clock: CountdownClock::new(tuning.round_secs),
            tuning,
            round: Round::new(),
            rng: Pcg32::seed_from_u64(seed),
            cards: Vec::new(),
            buffer: Vec::with_capacity(2),
            flip_back: DelayTimer::default(),
            pending_pair: None,
            win_grace: DelayTimer::default(),
            moves: 0,
            matches: 0,
            score: 0,
        }
    }

    /// The board, in display order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards currently staged in the face-up buffer
    pub fn staged(&self) -> &[usize] {
        &self.buffer
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matches(&self) -> u32 {
        self.matches
    }

    /// Final score once the round is Finished (zero before)
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn remaining_secs(&self) -> u32 {
        self.clock.remaining_secs()
    }

    /// Display-only efficiency percentage, capped at 100
    pub fn accuracy(&self) -> u32 {
        if self.moves == 0 {
            return 0;
        }
        let pct = (self.matches * 2) as f32 / self.moves as f32 * 100.0;
        (pct.round() as u32).min(100)
    }

    /// Fresh shuffled board: each symbol twice
    fn deal(&mut self) {
        self.cards.clear();
        for symbol in 0..MEMORY_PAIRS as u8 {
            for _ in 0..2 {
                self.cards.push(Card {
                    symbol,
                    face_up: false,
                    matched: false,
                });
            }
        }
        self.cards.shuffle(&mut self.rng);
        debug_assert_eq!(self.cards.len(), MEMORY_CARDS);
    }

    /// Flip a card face up. No-op when the buffer is full, the card is
    /// already staged or matched, or the index is off the board.
    fn flip(&mut self, idx: usize) {
        if idx >= self.cards.len() {
            return;
        }
        if self.buffer.len() >= 2 || self.buffer.contains(&idx) || self.cards[idx].matched {
            return;
        }
        self.cards[idx].face_up = true;
        self.buffer.push(idx);
        if self.buffer.len() == 2 {
            self.resolve_pair();
        }
    }

    fn resolve_pair(&mut self) {
        let (a, b) = (self.buffer[0], self.buffer[1]);
        self.moves += 1;
        if self.cards[a].symbol == self.cards[b].symbol {
            self.cards[a].matched = true;
            self.cards[b].matched = true;
            self.buffer.clear();
            self.matches += 1;
            if self.matches == MEMORY_PAIRS {
                // round is won; freeze the clock so the score uses the
                // remaining time at the moment of the win
                self.clock.pause();
                self.win_grace.schedule(ms_to_ticks(self.tuning.win_grace_ms));
            }
        } else {
            // stays staged, blocking further flips, until the delay fires
            self.pending_pair = Some((a, b));
            self.flip_back.schedule(ms_to_ticks(self.tuning.flip_back_ms));
        }
    }

    fn flip_back_now(&mut self) {
        if let Some((a, b)) = self.pending_pair.take() {
            self.cards[a].face_up = false;
            self.cards[b].face_up = false;
        }
        self.buffer.clear();
    }

    fn end_round(&mut self, rewards: &mut dyn RewardSink) {
        self.flip_back.cancel();
        self.win_grace.cancel();
        self.score = settlement_score(
            self.matches,
            self.clock.remaining_secs(),
            self.moves,
            &self.tuning,
        );
        self.clock.stop();
        log::debug!(
            "memory round over: {}/{MEMORY_PAIRS} pairs in {} moves, score {}",
            self.matches,
            self.moves,
            self.score
        );
        self.round
            .finish((self.score > 0).then_some(self.score), rewards);
    }
}

impl MiniGame for MemoryGame {
    type Input = MemoryInput;

    fn start(&mut self) {
        self.deal();
        self.buffer.clear();
        self.pending_pair = None;
        self.flip_back.cancel();
        self.win_grace.cancel();
        self.moves = 0;
        self.matches = 0;
        self.score = 0;
        self.clock = CountdownClock::new(self.tuning.round_secs);
        self.round.begin();
        log::debug!("memory round started ({}s)", self.tuning.round_secs);
    }

    fn tick(&mut self, input: &Self::Input, rewards: &mut dyn RewardSink) {
        if !self.round.is_active() {
            return;
        }
        self.round.note_tick();
        for &idx in &input.flips {
            self.flip(idx);
        }
        if self.flip_back.tick() {
            self.flip_back_now();
        }
        if self.win_grace.tick() {
            self.end_round(rewards);
            return;
        }
        if self.clock.tick() == ClockTick::Expired {
            self.end_round(rewards);
        }
    }

    fn close(&mut self) {
        self.clock.stop();
        self.flip_back.cancel();
        self.win_grace.cancel();
        self.round.abort();
    }

    fn phase(&self) -> Phase {
        self.round.phase()
    }
}
