use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use agam_core::DEFAULT_API_URL;
use tracing::debug;

use super::types::{ClientConfig, SessionBackend};
use crate::cli_args::{ConfigArgs, ConfigCommand};
use crate::modules::session::{
    FileSessionStore, KeyringSessionStore, MemorySessionStore, SessionStore,
};

pub(crate) fn handle_config_command(
    args: ConfigArgs,
    config: &mut ClientConfig,
) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        ConfigCommand::Set(args) => {
            if args.api_url.is_none() && args.session_store.is_none() {
                anyhow::bail!("nothing to set (use --api-url or --session-store)");
            }
            if let Some(api_url) = args.api_url {
                config.api_url = Some(normalize_api_url(&api_url)?);
            }
            if let Some(backend) = args.session_store {
                config.session_store = Some(backend);
            }
        }
        ConfigCommand::Unset(args) => {
            if args.api_url {
                config.api_url = None;
            }
            if args.session_store {
                config.session_store = None;
            }
        }
    }
    Ok(())
}

fn normalize_api_url(value: &str) -> anyhow::Result<String> {
    let value = value.trim().trim_end_matches('/');
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        anyhow::bail!("api url must start with http:// or https://: {value}");
    }
    Ok(value.to_string())
}

fn agam_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("HOME is not set"))?;
    Ok(Path::new(&home).join(".agam"))
}

fn config_path() -> anyhow::Result<PathBuf> {
    Ok(agam_dir()?.join("config.json"))
}

pub(crate) fn session_path() -> anyhow::Result<PathBuf> {
    Ok(agam_dir()?.join("session.json"))
}

pub(crate) fn load_config() -> anyhow::Result<ClientConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(ClientConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents)?;
    Ok(config)
}

pub(crate) fn save_config(config: &ClientConfig) -> anyhow::Result<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Flag or `AGAM_API_URL` first, then the config file, then the local
/// development default.
pub(crate) fn resolve_api_url(arg: Option<String>, config: &ClientConfig) -> anyhow::Result<String> {
    match arg.or_else(|| config.api_url.clone()) {
        Some(value) => normalize_api_url(&value),
        None => Ok(DEFAULT_API_URL.to_string()),
    }
}

pub(crate) fn resolve_session_backend(
    arg: Option<SessionBackend>,
    config: &ClientConfig,
) -> SessionBackend {
    arg.or(config.session_store).unwrap_or_default()
}

pub(crate) fn build_session_store(backend: SessionBackend) -> anyhow::Result<Arc<dyn SessionStore>> {
    debug!(backend = ?backend, "session store");
    let store: Arc<dyn SessionStore> = match backend {
        SessionBackend::File => Arc::new(FileSessionStore::new(session_path()?)),
        SessionBackend::Keyring => Arc::new(KeyringSessionStore::default()),
        SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
    };
    Ok(store)
}
