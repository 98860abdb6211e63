mod context;
mod file_store;
mod guard;
mod keyring_store;
mod navigator;
mod store;

pub(crate) use context::{provide, use_session, SessionContext};
pub(crate) use file_store::FileSessionStore;
pub(crate) use guard::render_protected;
pub(crate) use keyring_store::KeyringSessionStore;
pub(crate) use navigator::{Route, TerminalNavigator};
pub(crate) use store::{
    load_auth_token, load_user_id, persist_session, MemorySessionStore,
    SessionStore,
};
#[cfg(test)]
pub(crate) use navigator::RecordingNavigator;
#[cfg(test)]
pub(crate) use store::DeferredSessionStore;
