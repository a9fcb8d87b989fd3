//! Collision detection
//!
//! Pure verdicts only; nothing here mutates state. The player is tested with
//! a hitbox inset from the sprite box on all sides - a deliberate forgiveness
//! margin. Callers skip these checks entirely while invincible.

use glam::Vec2;

use super::obstacles::Obstacle;
use super::physics::PlayerBody;
use crate::consts::{GROUND_Y, HITBOX_INSET, PLAYER_SIZE, PLAYER_X, WORLD_TOP};

/// Axis-aligned hitbox in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub min: Vec2,
    pub max: Vec2,
}

/// The player's hitbox: sprite box centered at (PLAYER_X, body.y), inset by
/// the forgiveness margin on all sides.
pub fn player_hitbox(body: &PlayerBody) -> Hitbox {
    let half = PLAYER_SIZE / 2.0 - HITBOX_INSET;
    let center = Vec2::new(PLAYER_X, body.y);
    Hitbox {
        min: center - Vec2::splat(half),
        max: center + Vec2::splat(half),
    }
}

/// Hitbox below the ground line or above the world top
pub fn bounds_collision(hitbox: &Hitbox) -> bool {
    hitbox.max.y > GROUND_Y || hitbox.min.y < WORLD_TOP
}

/// Hitbox against one obstacle: only obstacles overlapping the player's
/// x-span can hit, and then only outside the gap.
pub fn obstacle_collision(hitbox: &Hitbox, obstacle: &Obstacle) -> bool {
    let overlaps_x = hitbox.max.x > obstacle.x && hitbox.min.x < obstacle.trailing_edge();
    if !overlaps_x {
        return false;
    }
    hitbox.min.y < obstacle.top_height || hitbox.max.y > obstacle.gap_bottom()
}

/// Full per-tick verdict: bounds first, then every overlapping obstacle
pub fn check_collision(body: &PlayerBody, obstacles: &[Obstacle]) -> bool {
    let hitbox = player_hitbox(body);
    if bounds_collision(&hitbox) {
        return true;
    }
    obstacles.iter().any(|o| obstacle_collision(&hitbox, o))
}
