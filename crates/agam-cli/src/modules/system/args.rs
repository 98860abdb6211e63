use clap::{Args, Subcommand};

use super::types::SessionBackend;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    Show,
    Set(ConfigSetArgs),
    Unset(ConfigUnsetArgs),
}

#[derive(Args)]
pub struct ConfigSetArgs {
    #[arg(long)]
    pub api_url: Option<String>,
    #[arg(long, value_enum)]
    pub session_store: Option<SessionBackend>,
}

#[derive(Args)]
pub struct ConfigUnsetArgs {
    #[arg(long)]
    pub api_url: bool,
    #[arg(long)]
    pub session_store: bool,
}
