use std::future::Future;

use agam_core::Session;

use super::context::{use_session, SessionContext};
use super::navigator::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GuardDecision {
    /// Bootstrap has not finished; show nothing yet.
    Pending,
    Redirect(Route),
    Render,
}

/// A redirect is only ever issued once the session is bootstrapped.
pub(crate) fn decide(session: &Session) -> GuardDecision {
    if !session.bootstrapped {
        GuardDecision::Pending
    } else if !session.is_authenticated() {
        GuardDecision::Redirect(Route::SignIn)
    } else {
        GuardDecision::Render
    }
}

#[derive(Debug)]
pub(crate) enum Guarded<T> {
    Rendered(T),
    Redirected(Route),
}

/// Waits out bootstrap, then either navigates away or runs `content` with the
/// authenticated snapshot.
pub(crate) async fn protect<F, Fut, T>(
    session: &SessionContext,
    content: F,
) -> anyhow::Result<Guarded<T>>
where
    F: FnOnce(Session) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let mut rx = session.subscribe();
    loop {
        let snapshot = rx.borrow_and_update().clone();
        match decide(&snapshot) {
            GuardDecision::Pending => {
                if rx.changed().await.is_err() {
                    anyhow::bail!("session closed before bootstrap finished");
                }
            }
            GuardDecision::Redirect(route) => {
                session.navigator().navigate(route.clone());
                return Ok(Guarded::Redirected(route));
            }
            GuardDecision::Render => return Ok(Guarded::Rendered(content(snapshot).await?)),
        }
    }
}

/// [`protect`] against the scoped session, handing `content` the signed-in
/// user id. A redirect surfaces as an error so the command exits non-zero.
pub(crate) async fn render_protected<F, Fut, T>(content: F) -> anyhow::Result<T>
where
    F: FnOnce(i64) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let session = use_session()?;
    let guarded = protect(&session, |snapshot| async move {
        let user_id = snapshot
            .user_id
            .ok_or_else(|| anyhow::anyhow!("user id missing from session"))?;
        content(user_id).await
    })
    .await?;
    match guarded {
        Guarded::Rendered(value) => Ok(value),
        Guarded::Redirected(_) => anyhow::bail!("not signed in"),
    }
}
