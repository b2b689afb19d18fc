//! Per-session narrative registry.

use crate::NarrativeState;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use taleweaver_error::SessionError;
use tracing::debug;

/// Longest accepted session identifier, in bytes.
pub const MAX_SESSION_KEY_LEN: usize = 128;

/// Default registry capacity.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Identifier of a logical story session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub struct SessionKey(String);

impl SessionKey {
    /// Session used by callers that do not name one.
    pub const DEFAULT: &'static str = "default";

    /// Validates a caller-supplied identifier.
    ///
    /// Accepts 1 to [`MAX_SESSION_KEY_LEN`] bytes of ASCII letters, digits,
    /// `-`, `_` and `.`.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_narrative::SessionKey;
    ///
    /// assert!(SessionKey::parse("reader-42").is_ok());
    /// assert!(SessionKey::parse("").is_err());
    /// assert!(SessionKey::parse("no spaces").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        if raw.is_empty() {
            return Err(SessionError::new("Session id is empty"));
        }
        if raw.len() > MAX_SESSION_KEY_LEN {
            return Err(SessionError::new(format!(
                "Session id exceeds {} bytes",
                MAX_SESSION_KEY_LEN
            )));
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(SessionError::new(format!(
                "Session id contains invalid character {:?}",
                bad
            )));
        }
        Ok(Self(raw.to_string()))
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionKey {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

/// Shared handle to one session's narrative.
pub type SessionHandle = Arc<tokio::sync::Mutex<NarrativeState>>;

/// Bounded map from session key to narrative state.
///
/// Each session has its own async mutex; operations hold it across prompt
/// formatting, the backend call and the state update. When the registry is
/// full the least recently used session is dropped. A request still holding
/// an evicted handle finishes against it normally.
pub struct StoryStore {
    sessions: Mutex<LruCache<SessionKey, SessionHandle>>,
}

impl StoryStore {
    /// Creates a registry holding at most `capacity` sessions.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            sessions: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns the session's handle, creating an empty narrative if needed.
    pub fn session(&self, key: &SessionKey) -> SessionHandle {
        let mut sessions = self.lock();
        if let Some(handle) = sessions.get(key) {
            return Arc::clone(handle);
        }
        let handle = SessionHandle::default();
        if let Some((evicted, _)) = sessions.push(key.clone(), Arc::clone(&handle)) {
            debug!(session = %evicted, "Evicted least recently used session");
        }
        debug!(session = %key, sessions = sessions.len(), "Created session");
        handle
    }

    /// Returns the session's handle without creating one.
    pub fn existing(&self, key: &SessionKey) -> Option<SessionHandle> {
        self.lock().get(key).map(Arc::clone)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no session exists yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Maximum number of sessions retained.
    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<SessionKey, SessionHandle>> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for StoryStore {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_MAX_SESSIONS).unwrap_or(NonZeroUsize::MIN))
    }
}

impl std::fmt::Debug for StoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryStore")
            .field("sessions", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
