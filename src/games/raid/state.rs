//! Raid entities
//!
//! Field coordinates are overlay percentages: x and y in [0, 100], y
//! growing downward. Enemies spawn just above the field and descend; the
//! ship rides a fixed horizontal rail near the bottom.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SHIP_MAX_X, SHIP_MIN_X, SHIP_Y, SPAWN_Y};

/// A descending enemy
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    /// Unique within a round, monotonically allocated
    pub id: u32,
    pub pos: Vec2,
    /// Field units per mover firing
    pub speed: f32,
    /// Which sprite variant to draw (display only)
    pub symbol: u8,
}

impl Enemy {
    /// Spawn at the top of the field
    pub fn spawn(id: u32, x: f32, speed: f32, symbol: u8) -> Self {
        Self {
            id,
            pos: Vec2::new(x, SPAWN_Y),
            speed,
            symbol,
        }
    }
}

/// The player's ship: pointer-steered along a fixed rail
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ship {
    pub x: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self { x: 50.0 }
    }
}

impl Ship {
    /// Follow the pointer, clamped to the rail
    pub fn steer(&mut self, pointer_x: f32) {
        self.x = pointer_x.clamp(SHIP_MIN_X, SHIP_MAX_X);
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, SHIP_Y)
    }
}
