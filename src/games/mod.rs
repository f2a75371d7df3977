//! The four mini-games
//!
//! Each game is a self-contained state machine over the shared session
//! primitives: a `Round`, a `CountdownClock` where the round is
//! time-bounded, and cancellable timers for every deferred or periodic
//! behavior. The host drives a game by feeding per-tick input batches at
//! the fixed engine rate; everything else happens inside.

pub mod clicker;
pub mod memory;
pub mod quiz;
pub mod raid;

pub use clicker::{ClickerGame, ClickerInput, ComboState, FloatingLabel, multiplier_for_streak};
pub use memory::{Card, MemoryGame, MemoryInput};
pub use quiz::{AnswerState, QuizGame, QuizInput};
pub use raid::{Enemy, RaidGame, RaidInput, Ship};

use crate::session::{Phase, RewardSink};

/// Common lifecycle every mini-game implements.
///
/// One round is live per instance at a time. `tick` advances one fixed
/// engine timestep and is a no-op outside Active; `close` is the host's
/// overlay-close signal and cancels all scheduled work without settling a
/// reward.
pub trait MiniGame {
    /// Input events gathered since the previous tick
    type Input: Default;

    /// Begin a fresh round, resetting all per-round state
    fn start(&mut self);

    /// Advance one engine tick
    fn tick(&mut self, input: &Self::Input, rewards: &mut dyn RewardSink);

    /// Host close signal: stop everything immediately, settle nothing
    fn close(&mut self);

    fn phase(&self) -> Phase;
}
