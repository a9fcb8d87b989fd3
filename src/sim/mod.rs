//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Mutation in a fixed per-tick order (physics, pipeline, collision, state)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod obstacles;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{Hitbox, bounds_collision, check_collision, obstacle_collision, player_hitbox};
pub use difficulty::{Tier, tier_for};
pub use obstacles::{Obstacle, ObstaclePipeline};
pub use physics::PlayerBody;
pub use state::{GamePhase, GameSession, Snapshot};
pub use tick::{TickInput, TickOutcome, tick};
