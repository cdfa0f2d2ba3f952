use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::{StatusEvent, SubmissionStatus};
use crate::services::acceptance::BookingAcceptance;
use crate::services::intake::{BookingWorkflow, IntakeSettings};

struct Entry {
    workflow: Arc<BookingWorkflow>,
    last_touched: Instant,
}

/// Open booking forms, one workflow per browser session.
///
/// A session is touched whenever it is looked up. Sessions left untouched
/// longer than the idle limit are dropped by [`SessionStore::sweep_idle`],
/// except while a submission is in flight.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Entry>>,
    acceptance: Arc<dyn BookingAcceptance>,
    events: broadcast::Sender<StatusEvent>,
    settings: IntakeSettings,
}

impl SessionStore {
    pub fn new(
        acceptance: Arc<dyn BookingAcceptance>,
        events: broadcast::Sender<StatusEvent>,
        settings: IntakeSettings,
    ) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            acceptance,
            events,
            settings,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Entry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn open(&self) -> Arc<BookingWorkflow> {
        let session_id = Uuid::new_v4();
        let workflow = Arc::new(BookingWorkflow::new(
            session_id,
            Arc::clone(&self.acceptance),
            self.events.clone(),
            self.settings,
        ));
        self.lock().insert(
            session_id,
            Entry {
                workflow: Arc::clone(&workflow),
                last_touched: Instant::now(),
            },
        );
        tracing::debug!(session_id = %session_id, "opened booking session");
        workflow
    }

    pub fn get(&self, session_id: &Uuid) -> Option<Arc<BookingWorkflow>> {
        let mut sessions = self.lock();
        let entry = sessions.get_mut(session_id)?;
        entry.last_touched = Instant::now();
        Some(Arc::clone(&entry.workflow))
    }

    pub fn close(&self, session_id: &Uuid) -> bool {
        self.lock().remove(session_id).is_some()
    }

    /// Drops sessions idle for longer than `max_idle`. Returns how many went.
    pub fn sweep_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| {
            now.duration_since(entry.last_touched) <= max_idle
                || entry.workflow.status() == SubmissionStatus::Submitting
        });
        before - sessions.len()
    }

    /// Sweeps idle sessions every `every` until the store is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, max_idle: Duration, every: Duration) {
        let store = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let Some(store) = store.upgrade() else {
                    break;
                };
                let expired = store.sweep_idle(max_idle);
                if expired > 0 {
                    tracing::info!(expired, remaining = store.len(), "expired idle booking sessions");
                }
            }
        });
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.events.subscribe()
    }
}
