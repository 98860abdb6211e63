use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::modules::gateway::ApiClient;

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_store: Option<SessionBackend>,
}

/// Where the persisted session lives.
#[derive(Serialize, Deserialize, ValueEnum, Default, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    #[default]
    File,
    Keyring,
    /// Nothing outlives the process.
    Memory,
}

pub(crate) struct CommandContext<'a> {
    pub(crate) api: &'a ApiClient,
}
