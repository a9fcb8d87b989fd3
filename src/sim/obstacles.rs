//! Obstacle pipeline
//!
//! Owns the ordered obstacle sequence (front-to-back by x), the seeded RNG
//! that draws gap placement, and the exactly-once score events emitted when
//! an obstacle's trailing edge clears the player.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Tier;
use crate::consts::{EDGE_CLEARANCE, GROUND_Y, OBSTACLE_WIDTH, PLAYER_X, WORLD_WIDTH};

/// A paired top/bottom barrier with a vertical gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    /// Bottom of the top barrier
    pub top_height: f32,
    /// Vertical gap below `top_height`
    pub gap: f32,
    /// Flips exactly once when the trailing edge clears the player
    pub scored: bool,
}

impl Obstacle {
    /// Right edge; the obstacle is past the player once this crosses PLAYER_X
    pub fn trailing_edge(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }

    /// Top of the bottom barrier
    pub fn gap_bottom(&self) -> f32 {
        self.top_height + self.gap
    }
}

/// Generates, advances, and retires obstacles
#[derive(Debug, Clone)]
pub struct ObstaclePipeline {
    obstacles: Vec<Obstacle>,
    next_id: u32,
    rng: Pcg32,
}

impl ObstaclePipeline {
    pub fn new(seed: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Obstacles front-to-back by x (read-only snapshot source)
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Clear everything and seed a fresh initial spawn at the given tier.
    /// Entity IDs keep counting up across resets.
    pub fn reset(&mut self, tier: &Tier) {
        self.obstacles.clear();
        self.spawn(WORLD_WIDTH, tier);
    }

    /// Advance one tick at the given tier. Returns the number of score
    /// increments earned this tick (each obstacle contributes exactly one,
    /// guarded by its `scored` flag).
    pub fn advance(&mut self, tier: &Tier) -> u32 {
        for obstacle in &mut self.obstacles {
            obstacle.x -= tier.speed;
        }

        // Retire obstacles fully off-screen left
        self.obstacles.retain(|o| o.trailing_edge() > 0.0);

        // Spawn once the rearmost obstacle has opened up `spacing` to the edge
        let spawn_due = self
            .obstacles
            .last()
            .is_none_or(|o| WORLD_WIDTH - o.x >= tier.spacing);
        if spawn_due {
            self.spawn(WORLD_WIDTH, tier);
        }

        let mut gained = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.scored && obstacle.trailing_edge() < PLAYER_X {
                obstacle.scored = true;
                gained += 1;
            }
        }
        gained
    }

    /// Spawn a new rearmost obstacle at x. The gap position is uniform at
    /// random, with a fixed minimum clearance from world top and the ground
    /// line, so some legal trajectory always exists.
    fn spawn(&mut self, x: f32, tier: &Tier) {
        let max_top = (GROUND_Y - tier.gap - EDGE_CLEARANCE).max(EDGE_CLEARANCE);
        let top_height = self.rng.random_range(EDGE_CLEARANCE..=max_top);

        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            x,
            top_height,
            gap: tier.gap,
            scored: false,
        });
    }
}
