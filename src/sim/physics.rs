//! Player vertical physics
//!
//! One-dimensional integration: gravity accumulates each tick, a flap fully
//! overrides residual velocity (flaps never stack). The world scrolls; the
//! player never translates horizontally.

use serde::{Deserialize, Serialize};

use crate::consts::{FLAP_IMPULSE, GRAVITY, PLAYER_START_Y, ROT_MAX, ROT_MIN, ROT_PER_VEL};

/// The player's vertical state, mutated once per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Vertical position of the sprite center (y grows downward)
    pub y: f32,
    /// Vertical velocity, units per tick
    pub vel_y: f32,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerBody {
    /// Body at the spawn height, at rest
    pub fn new() -> Self {
        Self {
            y: PLAYER_START_Y,
            vel_y: 0.0,
        }
    }

    /// Advance one tick. A flap sets velocity to the fixed impulse instead of
    /// accumulating on top of it.
    pub fn integrate(&mut self, flap: bool) {
        if flap {
            self.vel_y = FLAP_IMPULSE;
        } else {
            self.vel_y += GRAVITY;
        }
        self.y += self.vel_y;
    }

    /// Visual rotation in radians, derived from velocity and clamped.
    /// Presentation only; no gameplay effect.
    pub fn rotation(&self) -> f32 {
        (self.vel_y * ROT_PER_VEL).clamp(ROT_MIN, ROT_MAX)
    }
}
