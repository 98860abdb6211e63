pub(crate) mod args;
pub(crate) mod config;
pub(crate) mod types;

pub(crate) use config::{
    build_session_store, handle_config_command, load_config, resolve_api_url,
    resolve_session_backend, save_config,
};
pub(crate) use types::CommandContext;
