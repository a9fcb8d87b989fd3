//! Leaderboard store contract and session score reconciliation
//!
//! The store is an injected collaborator, assumed shared and eventually
//! consistent. The engine's only invariant - at most one entry per session -
//! is enforced here by in-order delete-then-create sequencing on a single
//! background worker, never by the store itself. Store traffic is
//! fire-and-forget relative to the tick loop: submission never blocks,
//! completion is never awaited by gameplay, and failures are logged, not
//! retried.

use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque store record identifier
pub type RecordId = String;

/// The current player, as the host's auth layer knows them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub owner_id: String,
    pub display_name: String,
}

/// Synchronous identity lookup, injected into the engine
pub trait Identity {
    fn current_player(&self) -> PlayerIdentity;
}

/// A fixed identity is the common case for a single-player host
impl Identity for PlayerIdentity {
    fn current_player(&self) -> PlayerIdentity {
        self.clone()
    }
}

/// One leaderboard record as the external store holds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub owner_id: String,
    pub display_name: String,
    pub score: u32,
    /// Unix millis, stamped by the store
    pub created_at: u64,
}

/// Store failures; surfaced to the log only, never to gameplay
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("no such record: {0}")]
    NotFound(RecordId),
}

/// External leaderboard store contract
///
/// `query_top` is display-only; the engine's invariants never depend on it.
pub trait LeaderboardStore: Send {
    fn create_entry(
        &self,
        owner_id: &str,
        display_name: &str,
        score: u32,
    ) -> Result<RecordId, StoreError>;

    fn delete_entry(&self, id: &RecordId) -> Result<(), StoreError>;

    fn query_top(&self, n: usize) -> Result<Vec<LeaderboardEntry>, StoreError>;
}

/// Tracks the session's single active store record and performs the
/// delete-then-create sequence that keeps it unique.
#[derive(Debug, Default)]
pub struct SessionRecord {
    active: Option<RecordId>,
}

impl SessionRecord {
    /// Forget the prior session's record reference (new session started)
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Persist a session-best score: delete the previous record if one was
    /// created earlier this session, then create the replacement. A zero
    /// score writes nothing. Failures log and leave the id stale; the next
    /// successful reconciliation supersedes it.
    pub fn reconcile(&mut self, store: &dyn LeaderboardStore, player: &PlayerIdentity, score: u32) {
        if score == 0 {
            return;
        }

        if let Some(id) = self.active.take() {
            if let Err(err) = store.delete_entry(&id) {
                log::warn!("failed to delete superseded leaderboard entry {id}: {err}");
            }
        }

        match store.create_entry(&player.owner_id, &player.display_name, score) {
            Ok(id) => {
                log::info!("leaderboard entry {id} recorded at score {score}");
                self.active = Some(id);
            }
            Err(err) => {
                log::warn!("failed to record leaderboard entry at score {score}: {err}");
            }
        }
    }
}

enum Job {
    BeginSession,
    Record { player: PlayerIdentity, score: u32 },
}

/// Session score reconciler
///
/// Owns one worker thread processing jobs in submission order, so the
/// delete-then-create sequencing holds even though gameplay never waits.
/// Dropping the reconciler drains the queue and joins the worker.
pub struct ScoreReconciler {
    tx: Option<mpsc::Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl ScoreReconciler {
    pub fn new(store: Box<dyn LeaderboardStore>) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker = thread::spawn(move || {
            let mut record = SessionRecord::default();
            for job in rx {
                match job {
                    Job::BeginSession => record.reset(),
                    Job::Record { player, score } => record.reconcile(store.as_ref(), &player, score),
                }
            }
        });
        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// A new session started; the prior session's record is no longer ours
    pub fn begin_session(&self) {
        self.send(Job::BeginSession);
    }

    /// Fire-and-forget: persist this session's score, replacing any record
    /// created earlier in the same session
    pub fn submit(&self, player: PlayerIdentity, score: u32) {
        self.send(Job::Record { player, score });
    }

    fn send(&self, job: Job) {
        if let Some(tx) = &self.tx {
            if tx.send(job).is_err() {
                log::warn!("score reconciler worker is gone; dropping job");
            }
        }
    }
}

impl Drop for ScoreReconciler {
    fn drop(&mut self) {
        // Close the channel, then let the worker finish pending writes
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("score reconciler worker panicked");
            }
        }
    }
}

/// In-memory store for tests and offline play. Cloning shares the backing
/// map, so a handle kept by the host observes the worker's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    next_id: u64,
    entries: HashMap<RecordId, LeaderboardEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryInner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))
    }
}

impl LeaderboardStore for MemoryStore {
    fn create_entry(
        &self,
        owner_id: &str,
        display_name: &str,
        score: u32,
    ) -> Result<RecordId, StoreError> {
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let id = format!("rec-{}", inner.next_id);
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        inner.entries.insert(
            id.clone(),
            LeaderboardEntry {
                owner_id: owner_id.to_string(),
                display_name: display_name.to_string(),
                score,
                created_at,
            },
        );
        Ok(id)
    }

    fn delete_entry(&self, id: &RecordId) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner
            .entries
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn query_top(&self, n: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let inner = self.lock()?;
        let mut entries: Vec<_> = inner.entries.values().cloned().collect();
        entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        entries.truncate(n);
        Ok(entries)
    }
}
