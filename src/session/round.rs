//! Round lifecycle and reward settlement
//!
//! One `Round` is live per mini-game instance. The settlement guard is the
//! crate's core safety property: the reward sink is invoked at most once per
//! round, never after a host close, and never with a phantom second firing
//! when a win condition and the clock expiry race each other.

use serde::{Deserialize, Serialize};

use super::reward::RewardSink;

/// Lifecycle phase of a mini-game round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    Active,
    Finished,
}

/// One timed play-through of a mini-game
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Round {
    phase: Phase,
    elapsed_ticks: u64,
    settled: bool,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Engine ticks since the round started
    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    /// Idle/Finished -> Active. Starting over rearms the settlement guard.
    pub fn begin(&mut self) {
        self.phase = Phase::Active;
        self.elapsed_ticks = 0;
        self.settled = false;
    }

    /// Count one engine tick while Active
    pub fn note_tick(&mut self) {
        if self.phase == Phase::Active {
            self.elapsed_ticks += 1;
        }
    }

    /// Active -> Finished, settling the reward exactly once.
    ///
    /// `reward` of `None` means the game's rules suppress the bridge call
    /// entirely (zero-currency rounds); `Some(n)` invokes the sink with `n`.
    pub fn finish(&mut self, reward: Option<u64>, sink: &mut dyn RewardSink) {
        if self.phase != Phase::Active || self.settled {
            return;
        }
        self.phase = Phase::Finished;
        self.settled = true;
        if let Some(amount) = reward {
            sink.grant(amount);
        }
    }

    /// Host close signal: drop to Finished with no settlement, ever
    pub fn abort(&mut self) {
        if self.phase == Phase::Active {
            log::debug!("round aborted by host after {} ticks", self.elapsed_ticks);
        }
        self.phase = Phase::Finished;
        self.settled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CoinLedger;

    #[test]
    fn test_finish_settles_once() {
        let mut round = Round::new();
        let mut ledger = CoinLedger::new();
        round.begin();
        round.finish(Some(100), &mut ledger);
        round.finish(Some(100), &mut ledger);
        assert_eq!(ledger.coins, 100);
        assert_eq!(ledger.grants, 1);
        assert_eq!(round.phase(), Phase::Finished);
    }

    #[test]
    fn test_none_reward_skips_the_sink() {
        let mut round = Round::new();
        let mut ledger = CoinLedger::new();
        round.begin();
        round.finish(None, &mut ledger);
        assert_eq!(ledger.grants, 0);
        assert_eq!(round.phase(), Phase::Finished);
    }

    #[test]
    fn test_abort_suppresses_settlement() {
        let mut round = Round::new();
        let mut ledger = CoinLedger::new();
        round.begin();
        round.abort();
        round.finish(Some(100), &mut ledger);
        assert_eq!(ledger.grants, 0);
    }

    #[test]
    fn test_begin_rearms_the_guard() {
        let mut round = Round::new();
        let mut ledger = CoinLedger::new();
        round.begin();
        round.finish(Some(10), &mut ledger);
        round.begin();
        assert!(round.is_active());
        round.finish(Some(20), &mut ledger);
        assert_eq!(ledger.coins, 30);
        assert_eq!(ledger.grants, 2);
    }

    #[test]
    fn test_finish_requires_active() {
        let mut round = Round::new();
        let mut ledger = CoinLedger::new();
        round.finish(Some(100), &mut ledger);
        assert_eq!(ledger.grants, 0);
        assert_eq!(round.phase(), Phase::Idle);
    }
}
