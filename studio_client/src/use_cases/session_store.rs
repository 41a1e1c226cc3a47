//! Client-side record of who is logged in.
//!
//! [`SessionStore`] is a cheap-to-clone handle; every clone sees the same
//! state. Logged-in status is derived from the stored
//! [`SessionInformation`], so the flag and the profile can never disagree.
//! Changes are pushed to [`IsLoggedStream`] subscribers, and each new
//! subscriber first receives the value current at subscription time.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};

use crate::domain::SessionInformation;

pub const DEFAULT_STREAM_CAPACITY: usize = 64;

#[derive(Clone, Copy, Debug)]
pub struct StoreSettings {
    // Notifications buffered per subscriber before the oldest are dropped.
    pub stream_capacity: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            stream_capacity: DEFAULT_STREAM_CAPACITY,
        }
    }
}

struct Shared {
    session: RwLock<Option<SessionInformation>>,
    changes: broadcast::Sender<bool>,
}

/// Single source of truth for the authenticated user.
#[derive(Clone)]
pub struct SessionStore {
    shared: Arc<Shared>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(StoreSettings::default())
    }
}

impl SessionStore {
    /// Creates a logged-out store.
    pub fn new(settings: StoreSettings) -> Self {
        let (changes, _) = broadcast::channel(settings.stream_capacity.max(1));
        Self {
            shared: Arc::new(Shared {
                session: RwLock::new(None),
                changes,
            }),
        }
    }

    /// Records a successful login, replacing any previous session, and
    /// pushes `true` to subscribers.
    ///
    /// The value is trusted as-is.
    pub fn log_in(&self, info: SessionInformation) {
        let mut session = self.write();
        tracing::debug!(user_id = info.id, admin = info.admin, "session stored");
        *session = Some(info);
        // Sent under the write lock so subscribers see changes in call order.
        let _ = self.shared.changes.send(true);
    }

    /// Clears the session and pushes `false`, even when already logged out.
    pub fn log_out(&self) {
        let mut session = self.write();
        if let Some(previous) = session.take() {
            tracing::debug!(user_id = previous.id, "session cleared");
        }
        let _ = self.shared.changes.send(false);
    }

    pub fn is_logged(&self) -> bool {
        self.read().is_some()
    }

    pub fn session_information(&self) -> Option<SessionInformation> {
        self.read().clone()
    }

    // Whether admin-only affordances should be shown.
    pub fn is_admin(&self) -> bool {
        self.read().as_ref().is_some_and(|session| session.admin)
    }

    /// Subscribes to logged-in status: the current value first, then one
    /// value per later `log_in`/`log_out`. The stream ends once every store
    /// handle has been dropped.
    pub fn is_logged_stream(&self) -> IsLoggedStream {
        // Snapshot and subscribe under the read lock so no change slips in
        // between the two.
        let session = self.read();
        IsLoggedStream {
            current: Some(session.is_some()),
            changes: self.shared.changes.subscribe(),
        }
    }

    // The state is a plain Option, always consistent, so a poisoned lock
    // is safe to reuse.
    fn read(&self) -> RwLockReadGuard<'_, Option<SessionInformation>> {
        self.shared
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<SessionInformation>> {
        self.shared
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Subscription returned by [`SessionStore::is_logged_stream`].
pub struct IsLoggedStream {
    current: Option<bool>,
    changes: broadcast::Receiver<bool>,
}

impl IsLoggedStream {
    /// Waits for the next value. Returns `None` once the store is gone and
    /// every buffered value has been delivered.
    pub async fn next(&mut self) -> Option<bool> {
        if let Some(current) = self.current.take() {
            return Some(current);
        }

        loop {
            match self.changes.recv().await {
                Ok(is_logged) => return Some(is_logged),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "is_logged subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next value if one is ready, without waiting.
    pub fn try_next(&mut self) -> Option<bool> {
        if let Some(current) = self.current.take() {
            return Some(current);
        }

        loop {
            match self.changes.try_recv() {
                Ok(is_logged) => return Some(is_logged),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "is_logged subscriber lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}
