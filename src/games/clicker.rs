//! Coin clicker: thirty seconds of mashing with a streak multiplier
//!
//! Coins accrue provisionally while the round runs and settle through the
//! reward bridge exactly once, at expiry. The floating "+N" labels are
//! presentation-only state; nothing reads them back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ms_to_ticks;
use crate::session::{ClockTick, CountdownClock, Phase, RewardSink, Round};
use crate::tuning::ClickerTuning;

use super::MiniGame;

/// Streak multiplier step function:
/// [0,10) -> 1, [10,20) -> 2, [20,30) -> 3, 30+ -> 5
pub fn multiplier_for_streak(streak: u32) -> u64 {
    match streak {
        0..10 => 1,
        10..20 => 2,
        20..30 => 3,
        _ => 5,
    }
}

/// Consecutive-click streak. Monotonic within a round.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ComboState {
    pub streak: u32,
}

impl ComboState {
    /// Multiplier currently in effect
    pub fn multiplier(&self) -> u64 {
        multiplier_for_streak(self.streak)
    }
}

/// Cosmetic "+N" label floating off a click, self-expiring after a second
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingLabel {
    pub id: u32,
    /// Overlay-local spawn position
    pub pos: Vec2,
    pub amount: u64,
    ttl_ticks: u32,
}

/// Clicks landed since the previous tick, with overlay-local positions for
/// the label effect
#[derive(Debug, Clone, Default)]
pub struct ClickerInput {
    pub presses: Vec<Vec2>,
}

/// The clicker mini-game
#[derive(Debug, Clone)]
pub struct ClickerGame {
    tuning: ClickerTuning,
    round: Round,
    clock: CountdownClock,
    clicks: u32,
    combo: ComboState,
    best_streak: u32,
    coins: u64,
    labels: Vec<FloatingLabel>,
    next_label_id: u32,
}

impl ClickerGame {
    pub fn new(tuning: ClickerTuning) -> Self {
        Self {
            clock: CountdownClock::new(tuning.round_secs),
            tuning,
            round: Round::new(),
            clicks: 0,
            combo: ComboState::default(),
            best_streak: 0,
            coins: 0,
            labels: Vec::new(),
            next_label_id: 0,
        }
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Coins accrued so far (provisional until settlement)
    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn combo(&self) -> ComboState {
        self.combo
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn remaining_secs(&self) -> u32 {
        self.clock.remaining_secs()
    }

    /// Live labels, for the overlay to render
    pub fn labels(&self) -> &[FloatingLabel] {
        &self.labels
    }

    fn handle_press(&mut self, pos: Vec2) {
        // payout uses the multiplier in effect when the click lands; the
        // recompute from the new streak applies from the next click
        let payout = self.combo.multiplier();
        self.coins += payout;
        self.clicks += 1;
        self.combo.streak += 1;
        self.best_streak = self.best_streak.max(self.combo.streak);

        let id = self.next_label_id;
        self.next_label_id = self.next_label_id.wrapping_add(1);
        self.labels.push(FloatingLabel {
            id,
            pos,
            amount: payout,
            ttl_ticks: ms_to_ticks(self.tuning.label_ttl_ms),
        });
    }

    fn decay_labels(&mut self) {
        for label in &mut self.labels {
            label.ttl_ticks = label.ttl_ticks.saturating_sub(1);
        }
        self.labels.retain(|label| label.ttl_ticks > 0);
    }
}

impl MiniGame for ClickerGame {
    type Input = ClickerInput;

    fn start(&mut self) {
        self.clicks = 0;
        self.coins = 0;
        self.combo = ComboState::default();
        self.best_streak = 0;
        self.labels.clear();
        self.clock = CountdownClock::new(self.tuning.round_secs);
        self.round.begin();
        log::debug!("clicker round started ({}s)", self.tuning.round_secs);
    }

    fn tick(&mut self, input: &Self::Input, rewards: &mut dyn RewardSink) {
        // labels fade on their own schedule, active round or not
        self.decay_labels();
        if !self.round.is_active() {
            return;
        }
        self.round.note_tick();
        for &pos in &input.presses {
            self.handle_press(pos);
        }
        if self.clock.tick() == ClockTick::Expired {
            let coins = self.coins;
            log::debug!("clicker round over: {} clicks, {coins} coins", self.clicks);
            self.round.finish((coins > 0).then_some(coins), rewards);
        }
    }

    fn close(&mut self) {
        self.clock.stop();
        self.labels.clear();
        self.round.abort();
    }

    fn phase(&self) -> Phase {
        self.round.phase()
    }
}
