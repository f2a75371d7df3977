//! Cancellable timed callbacks
//!
//! Every "concurrent" behavior in the engine - deferred card flips, the
//! answer-review pause, the raid game's three periodic processes - is one
//! of these two shapes, advanced by the owning game's tick and cancelled
//! the moment the round leaves Active. A timer firing after round end is a
//! defect; cancellation makes that impossible.

use serde::{Deserialize, Serialize};

/// One-shot timer. Fires once, then disarms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DelayTimer {
    remaining: Option<u32>,
}

impl DelayTimer {
    /// Arm to fire after `ticks` engine ticks (at least one)
    pub fn schedule(&mut self, ticks: u32) {
        self.remaining = Some(ticks.max(1));
    }

    /// Disarm without firing
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance one tick; true exactly when the delay elapses
    pub fn tick(&mut self) -> bool {
        match self.remaining {
            Some(1) => {
                self.remaining = None;
                true
            }
            Some(n) => {
                self.remaining = Some(n - 1);
                false
            }
            None => false,
        }
    }
}

/// Periodic timer. Fires every `period_ticks`, at most once per engine tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalTimer {
    period_ticks: u32,
    elapsed: u32,
    active: bool,
}

impl IntervalTimer {
    pub fn new(period_ticks: u32) -> Self {
        Self {
            period_ticks: period_ticks.max(1),
            elapsed: 0,
            active: true,
        }
    }

    /// Change the period, keeping accumulated progress. Shortening the
    /// period below the progress already made fires on the next tick.
    pub fn set_period(&mut self, period_ticks: u32) {
        self.period_ticks = period_ticks.max(1);
        self.elapsed = self.elapsed.min(self.period_ticks - 1);
    }

    pub fn period_ticks(&self) -> u32 {
        self.period_ticks
    }

    /// Stop firing for good
    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance one tick; true on period boundaries
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += 1;
        if self.elapsed >= self.period_ticks {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }
}
