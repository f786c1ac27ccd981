use crate::session::Session;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session";

const SESSION_DURATION: u64 = 24 * 60 * 60; // 24 hours in seconds

struct Entry {
    session: Session,
    expires_at: SystemTime,
}

/// In-memory sessions keyed by the id stored in the browser cookie.
///
/// A session is only touched while the lock is held, so requests for one
/// session are handled one at a time.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Entry>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(SESSION_DURATION))
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        SessionStore {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn insert_new(&self, sessions: &mut HashMap<String, Entry>, now: SystemTime) -> String {
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);
        if sessions.len() < before {
            info!("Purged {} expired sessions", before - sessions.len());
        }

        let session_id = Uuid::new_v4().to_string();
        sessions.insert(
            session_id.clone(),
            Entry {
                session: Session::new(),
                expires_at: now + self.ttl,
            },
        );
        debug!("Created session {}", session_id);
        session_id
    }

    /// Run `f` against the session named by `session_id`, or against a fresh
    /// session when that one is unknown or expired.
    ///
    /// Returns the id actually used, whether it was newly created, and the
    /// result of `f`.
    pub fn with_or_create<R>(
        &self,
        session_id: Option<&str>,
        f: impl FnOnce(&mut Session) -> R,
    ) -> (String, bool, R) {
        let now = SystemTime::now();
        let mut sessions = self.lock();

        let live = session_id.filter(|id| {
            sessions
                .get(*id)
                .is_some_and(|entry| entry.expires_at > now)
        });
        let (session_id, created) = match live {
            Some(id) => (id.to_string(), false),
            None => (self.insert_new(&mut sessions, now), true),
        };

        let ttl = self.ttl;
        let result = match sessions.get_mut(&session_id) {
            Some(entry) => {
                entry.expires_at = now + ttl;
                f(&mut entry.session)
            }
            // Unreachable while the lock is held; run against a throwaway session.
            None => f(&mut Session::new()),
        };

        (session_id, created, result)
    }

    // A panic while holding the lock leaves plain data behind; keep serving.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
