use agam_core::SessionKey;
use async_trait::async_trait;

use super::store::SessionStore;

pub(crate) const KEYRING_SERVICE: &str = "agam-cli";

/// Session entries kept in the platform keychain, one entry per key.
pub(crate) struct KeyringSessionStore {
    service: String,
}

impl KeyringSessionStore {
    pub(crate) fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: SessionKey) -> anyhow::Result<keyring::Entry> {
        keyring::Entry::new(&self.service, key.as_str())
            .map_err(|err| anyhow::anyhow!("failed to access keyring: {err}"))
    }
}

impl Default for KeyringSessionStore {
    fn default() -> Self {
        Self::new(KEYRING_SERVICE)
    }
}

#[async_trait]
impl SessionStore for KeyringSessionStore {
    fn get(&self, key: SessionKey) -> anyhow::Result<Option<String>> {
        let entry = self.entry(key)?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(anyhow::anyhow!(
                "failed to load {key} from keychain: {err}"
            )),
        }
    }

    fn set(&self, key: SessionKey, value: &str) -> anyhow::Result<()> {
        let entry = self.entry(key)?;
        entry
            .set_password(value)
            .map_err(|err| anyhow::anyhow!("failed to store {key}: {err}"))
    }

    fn remove(&self, key: SessionKey) -> anyhow::Result<()> {
        let entry = self.entry(key)?;
        match entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(anyhow::anyhow!("failed to delete {key}: {err}")),
        }
    }
}
