use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use agam_core::Session;
use tokio::sync::watch;
use tracing::{debug, info};

use super::navigator::{Navigator, Route};
use super::store::{clear_session, load_auth_token, load_user_id, persist_session, SessionStore};

tokio::task_local! {
    static CURRENT_SESSION: Arc<SessionContext>;
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum SessionError {
    #[error("session accessed outside of a session scope")]
    OutsideScope,
}

/// In-memory session state shared by every command of one process.
///
/// Built once at startup. Construction makes a best-effort read of the
/// store; [`SessionContext::bootstrap`] confirms it and marks the session
/// ready. `bootstrapped` never goes back to `false`.
pub(crate) struct SessionContext {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<Session>,
    bootstrap_started: AtomicBool,
}

impl SessionContext {
    pub(crate) fn new(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        let initial = if store.is_available() {
            Session {
                token: load_auth_token(store.as_ref()),
                user_id: load_user_id(store.as_ref()),
                bootstrapped: false,
            }
        } else {
            debug!("session store not yet available; deferring read to bootstrap");
            Session::default()
        };
        let (state, _) = watch::channel(initial);
        Self {
            store,
            navigator,
            state,
            bootstrap_started: AtomicBool::new(false),
        }
    }

    /// Second startup phase. Waits for the store, adopts persisted
    /// credentials when both halves are present and marks the session
    /// bootstrapped. Only the first call does the work; later calls wait for
    /// it to finish.
    pub(crate) async fn bootstrap(&self) {
        if self.bootstrap_started.swap(true, Ordering::SeqCst) {
            self.wait_bootstrapped().await;
            return;
        }
        self.store.ready().await;
        let token = load_auth_token(self.store.as_ref());
        let user_id = load_user_id(self.store.as_ref());
        self.state.send_modify(|session| {
            if let (Some(token), Some(user_id)) = (token, user_id) {
                session.token = Some(token);
                session.user_id = Some(user_id);
            }
            session.bootstrapped = true;
        });
        info!(
            event = "session_bootstrapped",
            authenticated = self.state.borrow().is_authenticated()
        );
    }

    pub(crate) fn login(&self, token: impl Into<String>, user_id: i64) -> anyhow::Result<()> {
        let token = token.into();
        if token.trim().is_empty() {
            anyhow::bail!("token is required");
        }
        persist_session(self.store.as_ref(), &token, user_id)?;
        self.state.send_modify(|session| {
            session.token = Some(token);
            session.user_id = Some(user_id);
            session.bootstrapped = true;
        });
        info!(event = "login", user_id);
        Ok(())
    }

    /// Clears the store and the in-memory state, then navigates to sign-in.
    /// In-memory state is cleared even when the store fails; that failure is
    /// returned afterwards.
    pub(crate) fn logout(&self) -> anyhow::Result<()> {
        let cleared = clear_session(self.store.as_ref());
        self.state.send_modify(|session| {
            session.token = None;
            session.user_id = None;
            session.bootstrapped = true;
        });
        info!(event = "logout");
        self.navigator.navigate(Route::SignIn);
        cleared
    }

    pub(crate) fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub(crate) async fn wait_bootstrapped(&self) -> Session {
        let mut rx = self.state.subscribe();
        let session = match rx.wait_for(|session| session.bootstrapped).await {
            Ok(session) => session.clone(),
            Err(_) => self.snapshot(),
        };
        session
    }

    pub(crate) fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }
}

/// Runs `fut` with `session` reachable through [`use_session`].
pub(crate) async fn provide<F: Future>(session: Arc<SessionContext>, fut: F) -> F::Output {
    CURRENT_SESSION.scope(session, fut).await
}

/// Returns the session of the enclosing [`provide`] scope.
pub(crate) fn use_session() -> Result<Arc<SessionContext>, SessionError> {
    CURRENT_SESSION
        .try_with(Arc::clone)
        .map_err(|_| SessionError::OutsideScope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::session::{
        DeferredSessionStore, MemorySessionStore, RecordingNavigator,
    };

    fn context_with(
        store: Arc<dyn SessionStore>,
    ) -> (Arc<SessionContext>, Arc<RecordingNavigator>) {
        let navigator = Arc::new(RecordingNavigator::default());
        let context = Arc::new(SessionContext::new(store, navigator.clone()));
        (context, navigator)
    }

    fn signed_out() -> Session {
        Session {
            token: None,
            user_id: None,
            bootstrapped: true,
        }
    }

    #[tokio::test]
    async fn login_then_logout_clears_everything() -> anyhow::Result<()> {
        let store = Arc::new(MemorySessionStore::new());
        let (context, navigator) = context_with(store.clone());
        context.bootstrap().await;

        context.login("tok", 7)?;
        let session = context.snapshot();
        assert!(session.is_authenticated());
        assert_eq!(load_auth_token(store.as_ref()), Some("tok".to_string()));
        assert_eq!(load_user_id(store.as_ref()), Some(7));

        context.logout()?;
        assert_eq!(context.snapshot(), signed_out());
        assert_eq!(load_auth_token(store.as_ref()), None);
        assert_eq!(load_user_id(store.as_ref()), None);
        assert_eq!(navigator.routes(), vec![Route::SignIn]);
        Ok(())
    }

    #[tokio::test]
    async fn logout_twice_matches_logout_once() -> anyhow::Result<()> {
        let store = Arc::new(MemorySessionStore::new());
        let (context, _) = context_with(store.clone());
        context.login("tok", 7)?;
        context.logout()?;
        let once = context.snapshot();
        context.logout()?;
        assert_eq!(context.snapshot(), once);
        assert_eq!(once, signed_out());
        Ok(())
    }

    #[test]
    fn login_marks_bootstrapped_and_rejects_blank_token() -> anyhow::Result<()> {
        let (context, _) = context_with(Arc::new(MemorySessionStore::new()));
        assert!(context.login("  ", 1).is_err());
        assert!(!context.snapshot().bootstrapped);
        context.login("tok", 1)?;
        assert!(context.snapshot().bootstrapped);
        Ok(())
    }

    #[tokio::test]
    async fn eager_read_sees_available_store() -> anyhow::Result<()> {
        let store = Arc::new(MemorySessionStore::new());
        persist_session(store.as_ref(), "tok", 3)?;
        let (context, _) = context_with(store);

        let before = context.snapshot();
        assert!(before.is_authenticated());
        assert!(!before.bootstrapped);

        context.bootstrap().await;
        let after = context.snapshot();
        assert!(after.is_authenticated());
        assert!(after.bootstrapped);
        assert_eq!(after.user_id, Some(3));
        Ok(())
    }

    #[tokio::test]
    async fn bootstrap_reconciles_late_store() -> anyhow::Result<()> {
        let inner = MemorySessionStore::new();
        persist_session(&inner, "tok", 5)?;
        let store = Arc::new(DeferredSessionStore::new(inner));
        let (context, _) = context_with(store.clone());

        assert!(!context.snapshot().is_authenticated());

        let bootstrap = {
            let context = context.clone();
            tokio::spawn(async move { context.bootstrap().await })
        };
        tokio::task::yield_now().await;
        assert!(!context.snapshot().bootstrapped);

        store.make_available();
        bootstrap.await?;
        let session = context.snapshot();
        assert!(session.bootstrapped);
        assert_eq!(session.token.as_deref(), Some("tok"));
        assert_eq!(session.user_id, Some(5));
        Ok(())
    }

    #[tokio::test]
    async fn bootstrap_with_half_session_stays_signed_out() -> anyhow::Result<()> {
        let store = Arc::new(MemorySessionStore::new());
        store.set(agam_core::SessionKey::AuthToken, "tok")?;
        store.set(agam_core::SessionKey::UserId, "seven")?;
        let (context, _) = context_with(store);
        context.bootstrap().await;
        let session = context.snapshot();
        assert!(session.bootstrapped);
        assert!(!session.is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn bootstrap_runs_once() -> anyhow::Result<()> {
        let store = Arc::new(MemorySessionStore::new());
        let (context, _) = context_with(store.clone());
        context.bootstrap().await;

        persist_session(store.as_ref(), "later", 9)?;
        context.bootstrap().await;
        assert!(!context.snapshot().is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn bootstrap_after_logout_keeps_signed_out() -> anyhow::Result<()> {
        let store = Arc::new(MemorySessionStore::new());
        persist_session(store.as_ref(), "tok", 1)?;
        let (context, _) = context_with(store);
        context.logout()?;
        context.bootstrap().await;
        assert_eq!(context.snapshot(), signed_out());
        Ok(())
    }

    #[tokio::test]
    async fn wait_bootstrapped_resolves_once_bootstrap_finishes() -> anyhow::Result<()> {
        let store = Arc::new(MemorySessionStore::new());
        persist_session(store.as_ref(), "tok", 3)?;
        let (context, _) = context_with(store);
        let waiter = tokio::spawn({
            let context = context.clone();
            async move { context.wait_bootstrapped().await }
        });
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        context.bootstrap().await;
        let session = waiter.await?;
        assert!(session.bootstrapped);
        assert_eq!(session.user_id, Some(3));
        assert_eq!(context.wait_bootstrapped().await, session);
        Ok(())
    }

    #[tokio::test]
    async fn use_session_requires_scope() {
        assert!(matches!(use_session(), Err(SessionError::OutsideScope)));

        let (context, _) = context_with(Arc::new(MemorySessionStore::new()));
        let seen = provide(context.clone(), async {
            use_session().map(|session| Arc::ptr_eq(&session, &context))
        })
        .await;
        assert!(matches!(seen, Ok(true)));
        assert!(use_session().is_err());
    }
}
