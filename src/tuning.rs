//! Data-driven game balance
//!
//! Every balance number lives here so the host can retune rounds without
//! touching game logic. Defaults match the shipped arcade; a host can
//! override any subset via JSON (missing fields keep their defaults).

use serde::{Deserialize, Serialize};

/// Clicker balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickerTuning {
    /// Round length in seconds
    pub round_secs: u32,
    /// Floating label lifetime in milliseconds (cosmetic)
    pub label_ttl_ms: u32,
}

impl Default for ClickerTuning {
    fn default() -> Self {
        Self {
            round_secs: 30,
            label_ttl_ms: 1000,
        }
    }
}

/// Memory balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryTuning {
    /// Round length in seconds
    pub round_secs: u32,
    /// Delay before a mismatched pair flips back down (ms)
    pub flip_back_ms: u32,
    /// Grace before the early finish once all pairs are found (ms)
    pub win_grace_ms: u32,
    /// Points per matched pair
    pub match_points: u32,
    /// Points per second left on the clock
    pub time_points: u32,
    /// Penalty per move past par
    pub move_penalty: u32,
    /// Moves allowed before the penalty kicks in (two per pair)
    pub par_moves: u32,
}

impl Default for MemoryTuning {
    fn default() -> Self {
        Self {
            round_secs: 60,
            flip_back_ms: 1000,
            win_grace_ms: 500,
            match_points: 100,
            time_points: 10,
            move_penalty: 5,
            par_moves: 16,
        }
    }
}

/// Quiz balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizTuning {
    /// Seconds on the clock per question
    pub question_secs: u32,
    /// Review pause between questions (ms)
    pub advance_ms: u32,
    /// Flat points per correct answer
    pub base_points: u32,
    /// One bonus point per this many seconds left
    pub time_bonus_divisor: u32,
    /// Bonus points per prior consecutive correct answer
    pub streak_bonus: u32,
}

impl Default for QuizTuning {
    fn default() -> Self {
        Self {
            question_secs: 15,
            advance_ms: 1500,
            base_points: 50,
            time_bonus_divisor: 3,
            streak_bonus: 10,
        }
    }
}

/// Raid balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RaidTuning {
    /// Lives per round
    pub lives: u32,
    /// Spawner period at level zero (ms)
    pub spawn_base_ms: u32,
    /// Spawner speed-up per level (ms)
    pub spawn_step_ms: u32,
    /// Spawner period floor (ms)
    pub spawn_floor_ms: u32,
    /// Mover/collision period (ms)
    pub move_period_ms: u32,
    /// Scorer period (ms)
    pub score_period_ms: u32,
    /// Enemy descent at level zero (field units per mover firing)
    pub base_speed: f32,
    /// Descent gained per level
    pub speed_per_level: f32,
    /// Score needed per level
    pub level_step: u64,
    /// Score-to-coin divisor at settlement
    pub reward_divisor: u64,
}

impl Default for RaidTuning {
    fn default() -> Self {
        Self {
            lives: 3,
            spawn_base_ms: 1500,
            spawn_step_ms: 100,
            spawn_floor_ms: 500,
            move_period_ms: 50,
            score_period_ms: 100,
            base_speed: 0.5,
            speed_per_level: 0.2,
            level_step: 500,
            reward_divisor: 10,
        }
    }
}

impl RaidTuning {
    /// Spawner period for a level, floored
    pub fn spawn_period_ms(&self, level: u32) -> u32 {
        self.spawn_base_ms
            .saturating_sub(self.spawn_step_ms.saturating_mul(level))
            .max(self.spawn_floor_ms)
    }

    /// Enemy descent speed for a level
    pub fn enemy_speed(&self, level: u32) -> f32 {
        self.base_speed + self.speed_per_level * level as f32
    }
}

/// Balance for the whole arcade
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub clicker: ClickerTuning,
    pub memory: MemoryTuning,
    pub quiz: QuizTuning,
    pub raid: RaidTuning,
}

impl Tuning {
    /// Parse a host-supplied tuning override. Callers fall back to
    /// `Tuning::default()` on error.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_period_decreases_then_floors() {
        let tuning = RaidTuning::default();
        assert_eq!(tuning.spawn_period_ms(1), 1400);
        assert_eq!(tuning.spawn_period_ms(5), 1000);
        assert_eq!(tuning.spawn_period_ms(10), 500);
        assert_eq!(tuning.spawn_period_ms(50), 500);
    }

    #[test]
    fn test_enemy_speed_scales_with_level() {
        let tuning = RaidTuning::default();
        assert!((tuning.enemy_speed(1) - 0.7).abs() < f32::EPSILON);
        assert!((tuning.enemy_speed(4) - 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{"clicker": {"round_secs": 45}}"#).unwrap();
        assert_eq!(tuning.clicker.round_secs, 45);
        assert_eq!(tuning.clicker.label_ttl_ms, 1000);
        assert_eq!(tuning.memory.round_secs, 60);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json_str("not json").is_err());
    }
}
