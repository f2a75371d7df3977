//! Enemy/ship proximity test
//!
//! The field is coarse (percent units), so collision is an axis-aligned
//! proximity check rather than real geometry: a vertical band around the
//! ship row plus a horizontal distance threshold.

use glam::Vec2;

use crate::consts::{COLLIDE_BAND_Y, COLLIDE_DIST_X};

/// True when `enemy` is inside the ship's hit window
pub fn hits_ship(enemy: Vec2, ship: Vec2) -> bool {
    enemy.y >= ship.y - COLLIDE_BAND_Y
        && enemy.y <= ship.y + COLLIDE_BAND_Y
        && (enemy.x - ship.x).abs() < COLLIDE_DIST_X
}
