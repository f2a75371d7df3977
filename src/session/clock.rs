//! Per-second countdown bounding a round
//!
//! Counts engine ticks, delivers one `Second` event per elapsed second and
//! exactly one `Expired` event when the remaining time hits zero. Ticking
//! suspends while paused (answer-review breaks) and stops for good once the
//! owning round leaves Active.

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_SECOND;

/// Outcome of advancing the clock by one engine tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// No second boundary crossed
    Idle,
    /// A full second elapsed with time still on the clock
    Second { remaining: u32 },
    /// Remaining time reached zero. Delivered exactly once.
    Expired,
}

/// Tick-driven countdown timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownClock {
    remaining_secs: u32,
    carry_ticks: u32,
    running: bool,
    /// Set on expiry or `stop`; no events ever again
    done: bool,
}

impl CountdownClock {
    /// Create a running clock with `duration_secs` on it
    pub fn new(duration_secs: u32) -> Self {
        Self {
            remaining_secs: duration_secs,
            carry_ticks: 0,
            running: true,
            done: false,
        }
    }

    /// Seconds left on the clock
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running && !self.done
    }

    /// Suspend ticking. Partial seconds are kept.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Resume a paused clock. No-op once done.
    pub fn resume(&mut self) {
        if !self.done {
            self.running = true;
        }
    }

    /// Stop for good; no further events
    pub fn stop(&mut self) {
        self.running = false;
        self.done = true;
    }

    /// Rearm with a fresh duration (per-question reuse)
    pub fn reset(&mut self, duration_secs: u32) {
        self.remaining_secs = duration_secs;
        self.carry_ticks = 0;
        self.running = true;
        self.done = false;
    }

    /// Advance one engine tick
    pub fn tick(&mut self) -> ClockTick {
        if !self.running || self.done {
            return ClockTick::Idle;
        }
        if self.remaining_secs == 0 {
            // zero-duration round: expire on the first tick
            self.stop();
            return ClockTick::Expired;
        }
        self.carry_ticks += 1;
        if self.carry_ticks < TICKS_PER_SECOND {
            return ClockTick::Idle;
        }
        self.carry_ticks = 0;
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.stop();
            ClockTick::Expired
        } else {
            ClockTick::Second {
                remaining: self.remaining_secs,
            }
        }
    }
}
