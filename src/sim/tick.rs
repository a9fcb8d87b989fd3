//! Fixed timestep simulation tick
//!
//! One tick mutates the session in a fixed order: physics integrator,
//! obstacle pipeline, collision detector, state machine transition. No other
//! code path mutates gameplay state during play.

use super::collision::check_collision;
use super::difficulty::tier_for;
use super::state::{GamePhase, GameSession};

/// Input latched for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Discrete flap event (starts a session from Ready/GameOver)
    pub flap: bool,
}

/// What a tick did, for the host and the reconciler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to do (Ready/GameOver without a flap)
    Idle,
    /// A flap started a fresh session
    SessionStarted,
    /// Normal playing tick
    Running,
    /// A collision ended the session at this final score
    SessionEnded { score: u32 },
}

/// Advance the session by one tick
pub fn tick(session: &mut GameSession, input: &TickInput) -> TickOutcome {
    match session.phase {
        GamePhase::Ready | GamePhase::GameOver => {
            if input.flap {
                session.start();
                TickOutcome::SessionStarted
            } else {
                TickOutcome::Idle
            }
        }
        GamePhase::Playing => {
            session.time_ticks += 1;

            // The tier is read from the score as it stood entering the tick;
            // increments earned below take effect on the following tick.
            let tier = tier_for(session.score);

            session.body.integrate(input.flap);
            session.score += session.pipeline.advance(&tier);

            let collided = !session.invincible
                && check_collision(&session.body, session.pipeline.obstacles());
            session.count_down_invincibility();

            if collided {
                session.phase = GamePhase::GameOver;
                session.lives = 0;
                TickOutcome::SessionEnded {
                    score: session.score,
                }
            } else {
                TickOutcome::Running
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GROUND_Y, INVINCIBILITY_SECS, TICK_HZ};

    fn started() -> GameSession {
        let mut session = GameSession::new(7);
        tick(&mut session, &TickInput { flap: true });
        session
    }

    #[test]
    fn test_ready_ignores_plain_ticks() {
        let mut session = GameSession::new(7);
        for _ in 0..100 {
            assert_eq!(tick(&mut session, &TickInput::default()), TickOutcome::Idle);
        }
        assert_eq!(session.phase, GamePhase::Ready);
    }

    #[test]
    fn test_flap_starts_session() {
        let mut session = GameSession::new(7);
        let outcome = tick(&mut session, &TickInput { flap: true });
        assert_eq!(outcome, TickOutcome::SessionStarted);
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn test_free_fall_hits_ground() {
        let mut session = started();
        let mut ended = None;
        for _ in 0..2000 {
            if let TickOutcome::SessionEnded { score } =
                tick(&mut session, &TickInput::default())
            {
                ended = Some(score);
                break;
            }
        }
        assert_eq!(ended, Some(0));
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(session.lives, 0);
    }

    #[test]
    fn test_invincibility_suppresses_collision() {
        let mut session = started();
        session.grant_life();
        // Pin the body below the ground line; every tick would collide
        session.body.y = GROUND_Y + 50.0;
        session.body.vel_y = 0.0;

        // The flag clears in the countdown stage, after the (skipped)
        // collision stage, so the full window suppresses every tick.
        for _ in 0..(INVINCIBILITY_SECS * TICK_HZ) {
            session.body.y = GROUND_Y + 50.0;
            let outcome = tick(&mut session, &TickInput::default());
            assert_eq!(outcome, TickOutcome::Running);
        }
        // Countdown exhausted: the next colliding tick ends the session
        session.body.y = GROUND_Y + 50.0;
        let outcome = tick(&mut session, &TickInput::default());
        assert!(matches!(outcome, TickOutcome::SessionEnded { .. }));
    }

    #[test]
    fn test_game_over_restarts_on_flap_only() {
        let mut session = started();
        session.body.y = GROUND_Y + 50.0;
        tick(&mut session, &TickInput::default());
        assert_eq!(session.phase, GamePhase::GameOver);

        assert_eq!(tick(&mut session, &TickInput::default()), TickOutcome::Idle);
        assert_eq!(session.phase, GamePhase::GameOver);

        let outcome = tick(&mut session, &TickInput { flap: true });
        assert_eq!(outcome, TickOutcome::SessionStarted);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_tier_applies_on_following_tick() {
        use crate::consts::BASE_SPEED;

        // At score 19 the world still scrolls at base speed
        let mut session = started();
        session.score = 19;
        let x_before = session.pipeline.obstacles()[0].x;
        tick(&mut session, &TickInput::default());
        let x_after = session.pipeline.obstacles()[0].x;
        assert!((x_before - x_after - BASE_SPEED).abs() < 1e-3);

        // Crossing the band boundary speeds up the very next tick
        session.score = 20;
        let x_before = session.pipeline.obstacles()[0].x;
        tick(&mut session, &TickInput::default());
        let x_after = session.pipeline.obstacles()[0].x;
        assert!((x_before - x_after - BASE_SPEED * 1.2).abs() < 1e-3);
    }

    #[test]
    fn test_score_accumulates_over_play() {
        // Hold the player safely mid-gap by repositioning every tick; the
        // pipeline keeps scrolling, so score increments arrive exactly once
        // per passed obstacle.
        use crate::consts::{HITBOX_INSET, PLAYER_SIZE, PLAYER_X};
        let hitbox_left = PLAYER_X - (PLAYER_SIZE / 2.0 - HITBOX_INSET);

        let mut session = started();
        let mut last_score = 0;
        for _ in 0..5000 {
            // Center in the gap of the front-most obstacle that can still
            // touch the hitbox; everything behind it is already cleared.
            if let Some(o) = session
                .pipeline
                .obstacles()
                .iter()
                .find(|o| o.trailing_edge() > hitbox_left)
            {
                session.body.y = o.top_height + o.gap / 2.0;
                session.body.vel_y = 0.0;
            }
            let outcome = tick(&mut session, &TickInput { flap: true });
            assert_ne!(outcome, TickOutcome::Idle);
            assert!(session.score >= last_score, "score must be monotonic");
            assert!(session.score - last_score <= 1, "at most one increment per tick");
            last_score = session.score;
        }
        assert!(last_score > 0);
    }
}
