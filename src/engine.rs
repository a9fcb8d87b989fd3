//! Host-facing engine facade
//!
//! Wraps the simulation in the surface the host's frame callback drives:
//! latched one-shot inputs, a guarded per-tick step, synchronous life grants
//! between ticks, and session-end hand-off to the score reconciler.

use std::panic::{self, AssertUnwindSafe};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::leaderboard::{Identity, LeaderboardStore, ScoreReconciler};
use crate::sim::{GameSession, Snapshot, TickInput, TickOutcome, tick};

/// The arcade engine: one session at a time, one tick per host frame
pub struct Engine {
    session: GameSession,
    reconciler: ScoreReconciler,
    identity: Box<dyn Identity>,
    personal_best: u32,
    /// One-shot input, latched until the next tick consumes it
    pending_flap: bool,
}

impl Engine {
    /// Engine with a time-derived obstacle seed
    pub fn new<I, S>(identity: I, store: S) -> Self
    where
        I: Identity + 'static,
        S: LeaderboardStore + 'static,
    {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED);
        Self::with_seed(identity, store, seed)
    }

    /// Engine with a fixed seed for reproducible runs
    pub fn with_seed<I, S>(identity: I, store: S, seed: u64) -> Self
    where
        I: Identity + 'static,
        S: LeaderboardStore + 'static,
    {
        Self {
            session: GameSession::new(seed),
            reconciler: ScoreReconciler::new(Box::new(store)),
            identity: Box::new(identity),
            personal_best: 0,
            pending_flap: false,
        }
    }

    /// Discrete flap input; consumed by the next tick
    pub fn flap(&mut self) {
        self.pending_flap = true;
    }

    /// External purchase flow granted a life. Applied synchronously, between
    /// ticks; the next tick already observes the revived state.
    pub fn grant_life(&mut self) {
        if self.session.grant_life() {
            log::info!("life granted at score {}", self.session.score);
        } else {
            log::debug!("grant_life ignored outside a session");
        }
    }

    /// Advance one tick from the host's frame callback.
    ///
    /// A fault inside a tick must not take the host down: the step runs on a
    /// scratch copy of the session and commits only on success, so a panic
    /// degrades to a logged no-op tick.
    pub fn tick(&mut self) -> TickOutcome {
        let input = TickInput {
            flap: std::mem::take(&mut self.pending_flap),
        };

        let mut scratch = self.session.clone();
        match panic::catch_unwind(AssertUnwindSafe(|| tick(&mut scratch, &input))) {
            Ok(outcome) => {
                self.session = scratch;
                self.after_tick(outcome);
                outcome
            }
            Err(_) => {
                log::error!("tick panicked; state unchanged for this frame");
                TickOutcome::Idle
            }
        }
    }

    fn after_tick(&mut self, outcome: TickOutcome) {
        match outcome {
            TickOutcome::SessionStarted => {
                // The prior session's store record is no longer this run's
                self.reconciler.begin_session();
            }
            TickOutcome::SessionEnded { score } => {
                if score > self.personal_best {
                    self.personal_best = score;
                }
                if score > 0 {
                    self.reconciler
                        .submit(self.identity.current_player(), score);
                }
            }
            TickOutcome::Idle | TickOutcome::Running => {}
        }
    }

    /// Read-only projection of the current state, once per tick
    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot(self.personal_best)
    }

    /// Best score seen locally across sessions
    pub fn personal_best(&self) -> u32 {
        self.personal_best
    }

    /// Direct session access for hosts that render richer debug views
    pub fn session(&self) -> &GameSession {
        &self.session
    }
}
