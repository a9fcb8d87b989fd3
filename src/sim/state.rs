//! Game session state and the lives/invincibility state machine
//!
//! The session owns the player body, the obstacle pipeline, score, lives, and
//! the invincibility countdown. All transitions happen either inside `tick`
//! (collision, scoring) or synchronously between ticks (`grant_life`).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::tier_for;
use super::obstacles::{Obstacle, ObstaclePipeline};
use super::physics::PlayerBody;
use crate::consts::{FLAP_IMPULSE, INVINCIBILITY_SECS, PLAYER_X, TICK_HZ};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first flap
    Ready,
    /// Active gameplay
    Playing,
    /// Session ended; a flap starts a new one
    GameOver,
}

/// One continuous play from Ready/GameOver through to the next GameOver,
/// including any mid-session life grants.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub phase: GamePhase,
    /// Monotonic non-decreasing within a session
    pub score: u32,
    /// 0 or 1
    pub lives: u8,
    /// While set, collisions are never evaluated
    pub invincible: bool,
    invincibility_ticks: u32,
    pub body: PlayerBody,
    pub pipeline: ObstaclePipeline,
    /// Ticks elapsed in the current session (diagnostics)
    pub time_ticks: u64,
}

impl GameSession {
    /// New session in Ready, obstacle RNG seeded for reproducibility
    pub fn new(seed: u64) -> Self {
        Self {
            phase: GamePhase::Ready,
            score: 0,
            lives: 1,
            invincible: false,
            invincibility_ticks: 0,
            body: PlayerBody::new(),
            pipeline: ObstaclePipeline::new(seed),
            time_ticks: 0,
        }
    }

    /// Full reset into Playing. The starting flap's impulse is applied so the
    /// player rises instead of free-falling out of the gate.
    pub(crate) fn start(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = 1;
        self.invincible = false;
        self.invincibility_ticks = 0;
        self.time_ticks = 0;
        self.body = PlayerBody::new();
        self.body.vel_y = FLAP_IMPULSE;
        self.pipeline.reset(&tier_for(0));
    }

    /// Apply an external "grant life" signal.
    ///
    /// Revives a dead session (GameOver -> Playing, score preserved) or, if
    /// already playing and invincible, restarts the countdown at 3 seconds -
    /// duplicate grants are idempotent, they never stack. The body and the
    /// pipeline reset to a fresh spawn set at the current score's tier.
    /// Meaningless in Ready. Returns whether the grant was applied.
    ///
    /// Must be called between ticks, never from inside one: a tick must not
    /// observe `lives = 0, invincible = false` transiently.
    pub fn grant_life(&mut self) -> bool {
        match self.phase {
            GamePhase::Ready => false,
            GamePhase::Playing | GamePhase::GameOver => {
                self.phase = GamePhase::Playing;
                self.lives = 1;
                self.invincible = true;
                self.invincibility_ticks = INVINCIBILITY_SECS * TICK_HZ;
                self.body = PlayerBody::new();
                self.pipeline.reset(&tier_for(self.score));
                true
            }
        }
    }

    /// Whole seconds of invincibility remaining (rounded up)
    pub fn invincibility_seconds(&self) -> u32 {
        self.invincibility_ticks.div_ceil(TICK_HZ)
    }

    /// Count the invincibility window down by one tick, clearing the flag at
    /// zero. Runs after the (skipped) collision stage of the tick.
    pub(crate) fn count_down_invincibility(&mut self) {
        if self.invincible {
            self.invincibility_ticks = self.invincibility_ticks.saturating_sub(1);
            if self.invincibility_ticks == 0 {
                self.invincible = false;
            }
        }
    }

    /// Read-only projection of the session for presentation layers
    pub fn snapshot(&self, personal_best: u32) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            invincible: self.invincible,
            invincibility_seconds: self.invincibility_seconds(),
            player_pos: Vec2::new(PLAYER_X, self.body.y),
            player_rotation: self.body.rotation(),
            obstacles: self.pipeline.obstacles().to_vec(),
            personal_best,
        }
    }
}

/// Immutable per-tick state snapshot observed by presentation layers
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    pub invincible: bool,
    pub invincibility_seconds: u32,
    pub player_pos: Vec2,
    pub player_rotation: f32,
    pub obstacles: Vec<Obstacle>,
    pub personal_best: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_resets_everything() {
        let mut session = GameSession::new(7);
        session.score = 42;
        session.lives = 0;
        session.invincible = true;
        session.phase = GamePhase::GameOver;

        session.start();
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 1);
        assert!(!session.invincible);
        assert_eq!(session.body.vel_y, FLAP_IMPULSE);
        assert_eq!(session.pipeline.obstacles().len(), 1);
    }

    #[test]
    fn test_grant_life_preserves_score() {
        let mut session = GameSession::new(7);
        session.start();
        session.score = 12;
        session.phase = GamePhase::GameOver;
        session.lives = 0;

        assert!(session.grant_life());
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.score, 12);
        assert_eq!(session.lives, 1);
        assert!(session.invincible);
        assert_eq!(session.invincibility_seconds(), INVINCIBILITY_SECS);
    }

    #[test]
    fn test_grant_life_idempotent_countdown() {
        let mut session = GameSession::new(7);
        session.start();
        session.grant_life();
        // Burn half a second, then grant again
        for _ in 0..30 {
            session.count_down_invincibility();
        }
        session.grant_life();
        // Countdown restarted at 3, not stacked to 6
        assert_eq!(session.invincibility_seconds(), INVINCIBILITY_SECS);
    }

    #[test]
    fn test_grant_life_noop_in_ready() {
        let mut session = GameSession::new(7);
        assert!(!session.grant_life());
        assert_eq!(session.phase, GamePhase::Ready);
        assert!(!session.invincible);
    }

    #[test]
    fn test_countdown_clears_flag() {
        let mut session = GameSession::new(7);
        session.start();
        session.grant_life();
        for _ in 0..(INVINCIBILITY_SECS * TICK_HZ) {
            assert!(session.invincible);
            session.count_down_invincibility();
        }
        assert!(!session.invincible);
        assert_eq!(session.invincibility_seconds(), 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = GameSession::new(7);
        let snapshot = session.snapshot(0);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"score\":0"));
        assert!(json.contains("\"lives\":1"));
    }
}
