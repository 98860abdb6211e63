use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use agam_core::SessionKey;
use async_trait::async_trait;
use tracing::warn;

use super::store::SessionStore;

/// Session entries kept as a JSON object in a single file.
///
/// Every call goes back to disk, so a value written by one process is seen by
/// the next read of another.
pub(crate) struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> anyhow::Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let entries = serde_json::from_str(&contents).map_err(|err| {
            anyhow::anyhow!(
                "session file is malformed ({}): {err}",
                self.path.display()
            )
        })?;
        Ok(entries)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, contents)?;
        restrict_permissions(&self.path)?;
        Ok(())
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> anyhow::Result<()> {
        let mut entries = self.read_entries().unwrap_or_else(|err| {
            warn!(event = "session_file_reset", error = %err);
            BTreeMap::new()
        });
        apply(&mut entries);
        self.write_entries(&entries)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> anyhow::Result<()> {
    Ok(())
}

#[async_trait]
impl SessionStore for FileSessionStore {
    fn get(&self, key: SessionKey) -> anyhow::Result<Option<String>> {
        Ok(self.read_entries()?.remove(key.as_str()))
    }

    fn set(&self, key: SessionKey, value: &str) -> anyhow::Result<()> {
        self.update(|entries| {
            entries.insert(key.as_str().to_string(), value.to_string());
        })
    }

    fn remove(&self, key: SessionKey) -> anyhow::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key.as_str());
        })
    }
}
