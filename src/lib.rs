//! Mini Arcade - session engine for a casual mini-game hub
//!
//! Core modules:
//! - `session`: Round lifecycle, countdown clock, timed callbacks, reward bridge
//! - `games`: The four mini-games (clicker, memory, quiz, raid)
//! - `questions`: Quiz question bank
//! - `tuning`: Data-driven game balance
//!
//! The engine is deterministic: every game advances on a fixed timestep,
//! all randomness comes from a seeded RNG, and all deferred behavior is a
//! cancellable tick-counted timer. The host dashboard drives a game by
//! calling `MiniGame::tick` at the fixed rate and receives earned currency
//! through the `RewardSink` bridge, at most once per round.

pub mod games;
pub mod questions;
pub mod session;
pub mod tuning;

pub use games::{ClickerGame, MemoryGame, MiniGame, QuizGame, RaidGame};
pub use session::{CoinLedger, Phase, RewardSink};
pub use tuning::Tuning;

/// Engine timing and playfield constants
pub mod consts {
    /// Fixed engine tick rate (20 Hz - the finest period any game schedules)
    pub const TICK_HZ: u32 = 20;
    /// Milliseconds per engine tick
    pub const TICK_MS: u32 = 1000 / TICK_HZ;
    /// Engine ticks per countdown second
    pub const TICKS_PER_SECOND: u32 = TICK_HZ;

    /// Raid ship vertical position (fixed rail)
    pub const SHIP_Y: f32 = 80.0;
    /// Raid ship horizontal clamp range
    pub const SHIP_MIN_X: f32 = 5.0;
    pub const SHIP_MAX_X: f32 = 95.0;
    /// Collision proximity: vertical band around the ship row
    pub const COLLIDE_BAND_Y: f32 = 5.0;
    /// Collision proximity: horizontal distance threshold
    pub const COLLIDE_DIST_X: f32 = 8.0;
    /// Enemies spawn just above the field
    pub const SPAWN_Y: f32 = -5.0;
    /// Enemy spawn positions are uniform in [0, SPAWN_MAX_X)
    pub const SPAWN_MAX_X: f32 = 90.0;
    /// Enemies past this are off-field and discarded
    pub const DESPAWN_Y: f32 = 100.0;
    /// Number of enemy sprite variants
    pub const ENEMY_SYMBOLS: u8 = 5;

    /// Memory board size (8 pairs)
    pub const MEMORY_CARDS: usize = 16;
    pub const MEMORY_PAIRS: u32 = 8;
}

/// Convert a millisecond duration to engine ticks (at least one)
#[inline]
pub fn ms_to_ticks(ms: u32) -> u32 {
    (ms / consts::TICK_MS).max(1)
}
