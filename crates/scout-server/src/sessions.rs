//! Per-client analysis sessions, keyed by the `x-scout-session` header.
//!
//! Requests sharing a key share one [`AnalysisSession`], so a newer analysis
//! from the same client supersedes an older one still in flight.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use scout_osm::AnalysisSession;

pub const SESSION_HEADER: &str = "x-scout-session";

type SessionMap = HashMap<String, Arc<AnalysisSession>>;

#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    // Locked only for map edits, never across an await, so `Drop` can use it.
    sessions: Arc<Mutex<SessionMap>>,
}

impl SessionRegistry {
    /// Lease the session for `key`, creating it on first use.
    ///
    /// The entry lives as long as some lease for it does.
    pub fn acquire(&self, key: &str) -> SessionLease {
        let session = Arc::clone(
            self.lock()
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AnalysisSession::new())),
        );
        SessionLease {
            registry: self.clone(),
            key: key.to_string(),
            session,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionMap> {
        // The map stays consistent even if a holder panicked.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.lock().len()
    }
}

/// A request's hold on a shared session. Dropping the last lease for a key,
/// whether the request finished or was cancelled, removes the entry.
#[derive(Debug)]
pub struct SessionLease {
    registry: SessionRegistry,
    key: String,
    session: Arc<AnalysisSession>,
}

impl SessionLease {
    #[must_use]
    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        let mut sessions = self.registry.lock();
        // One reference in the map plus this lease means nobody else holds it.
        let last = sessions.get(&self.key).is_some_and(|current| {
            Arc::ptr_eq(current, &self.session) && Arc::strong_count(&self.session) == 2
        });
        if last {
            sessions.remove(&self.key);
            tracing::debug!(session = %self.key, "analysis session released");
        }
    }
}
