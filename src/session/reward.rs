//! The reward bridge between a finished mini-game and the host dashboard

use serde::{Deserialize, Serialize};

/// Host-side currency callback.
///
/// A mini-game invokes this at most once per round with the earned amount;
/// nothing comes back. Accumulation and any derived progression belong to
/// the host.
pub trait RewardSink {
    fn grant(&mut self, amount: u64);
}

/// Reference host collaborator: accumulates coins and derived experience.
///
/// Used by the demo binary and the test suite; a real dashboard supplies
/// its own sink.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinLedger {
    /// Total currency across rounds
    pub coins: u64,
    /// Experience derived from grants (half a point per coin)
    pub xp: u64,
    /// Number of grants received
    pub grants: u32,
}

impl CoinLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RewardSink for CoinLedger {
    fn grant(&mut self, amount: u64) {
        self.coins += amount;
        self.xp += amount / 2;
        self.grants += 1;
        log::info!("reward granted: {amount} coins (total {})", self.coins);
    }
}
