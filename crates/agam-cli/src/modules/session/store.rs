use std::collections::HashMap;
use std::sync::Mutex;

use agam_core::{parse_user_id, SessionKey};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Durable key/value storage for the persisted session.
///
/// `is_available` reports whether reads can be served right now; `ready`
/// resolves once they can. Stores that are always reachable keep the
/// defaults.
#[async_trait]
pub(crate) trait SessionStore: Send + Sync {
    fn get(&self, key: SessionKey) -> anyhow::Result<Option<String>>;
    fn set(&self, key: SessionKey, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: SessionKey) -> anyhow::Result<()>;

    fn is_available(&self) -> bool {
        true
    }

    async fn ready(&self) {}
}

#[derive(Default)]
pub(crate) struct MemorySessionStore {
    entries: Mutex<HashMap<SessionKey, String>>,
}

impl MemorySessionStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    fn get(&self, key: SessionKey) -> anyhow::Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("failed to lock session store"))?;
        Ok(entries.get(&key).cloned())
    }

    fn set(&self, key: SessionKey, value: &str) -> anyhow::Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("failed to lock session store"))?;
        entries.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: SessionKey) -> anyhow::Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("failed to lock session store"))?;
        entries.remove(&key);
        Ok(())
    }
}

/// Store whose contents cannot be read until [`DeferredSessionStore::make_available`]
/// is called.
#[cfg(test)]
pub(crate) struct DeferredSessionStore {
    inner: MemorySessionStore,
    available: std::sync::atomic::AtomicBool,
    notify: tokio::sync::Notify,
}

#[cfg(test)]
impl DeferredSessionStore {
    pub(crate) fn new(inner: MemorySessionStore) -> Self {
        Self {
            inner,
            available: std::sync::atomic::AtomicBool::new(false),
            notify: tokio::sync::Notify::new(),
        }
    }

    pub(crate) fn make_available(&self) {
        self.available
            .store(true, std::sync::atomic::Ordering::SeqCst);
        self.notify.notify_one();
    }
}

#[cfg(test)]
#[async_trait]
impl SessionStore for DeferredSessionStore {
    fn get(&self, key: SessionKey) -> anyhow::Result<Option<String>> {
        if !self.is_available() {
            return Ok(None);
        }
        self.inner.get(key)
    }

    fn set(&self, key: SessionKey, value: &str) -> anyhow::Result<()> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: SessionKey) -> anyhow::Result<()> {
        self.inner.remove(key)
    }

    fn is_available(&self) -> bool {
        self.available.load(std::sync::atomic::Ordering::SeqCst)
    }

    async fn ready(&self) {
        while !self.is_available() {
            self.notify.notified().await;
        }
    }
}

/// Reads the bearer token. Blank values and read failures count as absent.
pub(crate) fn load_auth_token(store: &dyn SessionStore) -> Option<String> {
    match store.get(SessionKey::AuthToken) {
        Ok(Some(token)) if !token.trim().is_empty() => Some(token),
        Ok(_) => None,
        Err(err) => {
            warn!(event = "session_read_failed", key = %SessionKey::AuthToken, error = %err);
            None
        }
    }
}

/// Reads the user id. Non-numeric values and read failures count as absent.
pub(crate) fn load_user_id(store: &dyn SessionStore) -> Option<i64> {
    match store.get(SessionKey::UserId) {
        Ok(Some(raw)) => parse_user_id(&raw),
        Ok(None) => None,
        Err(err) => {
            warn!(event = "session_read_failed", key = %SessionKey::UserId, error = %err);
            None
        }
    }
}

/// Writes both keys. A failed user id write takes the token back out so the
/// store is never left with half a session.
pub(crate) fn persist_session(
    store: &dyn SessionStore,
    token: &str,
    user_id: i64,
) -> anyhow::Result<()> {
    store.set(SessionKey::AuthToken, token)?;
    if let Err(err) = store.set(SessionKey::UserId, &user_id.to_string()) {
        if let Err(rollback) = store.remove(SessionKey::AuthToken) {
            warn!(event = "session_rollback_failed", error = %rollback);
        }
        return Err(err);
    }
    debug!(user_id, "persisted session");
    Ok(())
}

/// Removes both keys. Every key is attempted; the first failure is returned.
pub(crate) fn clear_session(store: &dyn SessionStore) -> anyhow::Result<()> {
    let mut first_err = None;
    for key in SessionKey::ALL {
        if let Err(err) = store.remove(key) {
            warn!(event = "session_clear_failed", key = %key, error = %err);
            first_err.get_or_insert(err);
        }
    }
    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() -> anyhow::Result<()> {
        let store = MemorySessionStore::new();
        assert_eq!(store.get(SessionKey::AuthToken)?, None);
        store.set(SessionKey::AuthToken, "token")?;
        assert_eq!(store.get(SessionKey::AuthToken)?, Some("token".to_string()));
        store.remove(SessionKey::AuthToken)?;
        assert_eq!(store.get(SessionKey::AuthToken)?, None);
        store.remove(SessionKey::AuthToken)?;
        Ok(())
    }

    #[test]
    fn malformed_user_id_reads_as_absent() -> anyhow::Result<()> {
        let store = MemorySessionStore::new();
        store.set(SessionKey::UserId, "not-a-number")?;
        assert_eq!(load_user_id(&store), None);
        store.set(SessionKey::UserId, "12")?;
        assert_eq!(load_user_id(&store), Some(12));
        Ok(())
    }

    #[test]
    fn blank_token_reads_as_absent() -> anyhow::Result<()> {
        let store = MemorySessionStore::new();
        store.set(SessionKey::AuthToken, "  ")?;
        assert_eq!(load_auth_token(&store), None);
        Ok(())
    }

    #[test]
    fn persist_and_clear_touch_both_keys() -> anyhow::Result<()> {
        let store = MemorySessionStore::new();
        persist_session(&store, "tok", 7)?;
        assert_eq!(store.get(SessionKey::UserId)?, Some("7".to_string()));
        assert_eq!(load_auth_token(&store), Some("tok".to_string()));
        clear_session(&store)?;
        assert_eq!(load_auth_token(&store), None);
        assert_eq!(load_user_id(&store), None);
        clear_session(&store)?;
        Ok(())
    }

    struct RejectUserIdStore {
        inner: MemorySessionStore,
    }

    #[async_trait]
    impl SessionStore for RejectUserIdStore {
        fn get(&self, key: SessionKey) -> anyhow::Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: SessionKey, value: &str) -> anyhow::Result<()> {
            if key == SessionKey::UserId {
                anyhow::bail!("disk full");
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: SessionKey) -> anyhow::Result<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_user_id_write_takes_token_back_out() -> anyhow::Result<()> {
        let store = RejectUserIdStore {
            inner: MemorySessionStore::new(),
        };
        let err = persist_session(&store, "tok", 7).expect_err("user id write fails");
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(store.get(SessionKey::AuthToken)?, None);
        assert_eq!(store.get(SessionKey::UserId)?, None);
        Ok(())
    }

    #[tokio::test]
    async fn deferred_store_hides_values_until_available() -> anyhow::Result<()> {
        let inner = MemorySessionStore::new();
        inner.set(SessionKey::AuthToken, "tok")?;
        let store = DeferredSessionStore::new(inner);
        assert!(!store.is_available());
        assert_eq!(load_auth_token(&store), None);
        store.make_available();
        store.ready().await;
        assert_eq!(load_auth_token(&store), Some("tok".to_string()));
        Ok(())
    }
}
