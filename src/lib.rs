//! Skydart - a one-button flappy-style arcade game engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `engine`: Host-facing facade driving the tick loop and session lifecycle
//! - `leaderboard`: Injected store contract and session score reconciliation
//!
//! The engine owns no rendering, audio, or purchase flow. A host drives it
//! with per-frame `tick()` calls plus discrete `flap()`/`grant_life()` inputs,
//! and reads back an immutable `Snapshot` each tick for presentation.

pub mod engine;
pub mod leaderboard;
pub mod sim;

pub use engine::Engine;
pub use leaderboard::{
    Identity, LeaderboardEntry, LeaderboardStore, MemoryStore, PlayerIdentity, RecordId, StoreError,
};
pub use sim::{GamePhase, GameSession, Obstacle, PlayerBody, Snapshot, Tier, tier_for};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_HZ: u32 = 60;

    /// World dimensions (y grows downward, screen-style)
    pub const WORLD_WIDTH: f32 = 288.0;
    pub const WORLD_TOP: f32 = 0.0;
    /// Ground line; the playfield is everything above it
    pub const GROUND_Y: f32 = 448.0;

    /// Player sprite - fixed x, square sprite box
    pub const PLAYER_X: f32 = 70.0;
    pub const PLAYER_SIZE: f32 = 24.0;
    /// Hitbox inset on all sides (forgiveness margin)
    pub const HITBOX_INSET: f32 = 4.0;
    /// Player spawn height (playfield midline)
    pub const PLAYER_START_Y: f32 = 224.0;

    /// Vertical physics, per tick
    pub const GRAVITY: f32 = 0.5;
    /// Flap sets velocity to this; flaps never stack
    pub const FLAP_IMPULSE: f32 = -8.5;

    /// Visual rotation from vertical velocity (radians), clamped
    pub const ROT_PER_VEL: f32 = 0.09;
    pub const ROT_MIN: f32 = -0.6;
    pub const ROT_MAX: f32 = 1.4;

    /// Obstacle geometry at the base difficulty tier
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    pub const BASE_SPEED: f32 = 2.4;
    pub const BASE_GAP: f32 = 140.0;
    pub const BASE_SPACING: f32 = 190.0;
    /// Minimum clearance of a gap edge from world top and ground
    pub const EDGE_CLEARANCE: f32 = 40.0;
    /// Floor for scheduler outputs; gap/spacing never shrink below this
    pub const MIN_GEOMETRY: f32 = 24.0;

    /// Invincibility window granted with an extra life
    pub const INVINCIBILITY_SECS: u32 = 3;
}
