use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod cli_command;
mod modules;

use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::gateway::{ApiClient, ApiError};
use crate::modules::session::{provide, SessionContext, TerminalNavigator};
use crate::modules::system::{
    build_session_store, handle_config_command, load_config, resolve_api_url,
    resolve_session_backend, save_config, CommandContext,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let mut config = load_config()?;

    let command = match cli.command {
        Command::Config(args) => {
            handle_config_command(args, &mut config)?;
            save_config(&config)?;
            return Ok(());
        }
        command => command,
    };

    let api_url = resolve_api_url(cli.api_url, &config)?;
    let backend = resolve_session_backend(cli.session_store, &config);
    let store = build_session_store(backend)?;
    let client = reqwest::Client::builder().build()?;
    let api = ApiClient::new(client, &api_url, store.clone());
    let session = Arc::new(SessionContext::new(store, Arc::new(TerminalNavigator)));

    let bootstrap = tokio::spawn({
        let session = session.clone();
        async move { session.bootstrap().await }
    });

    let ctx = CommandContext { api: &api };
    let result = provide(session, handle_command(command, &ctx)).await;
    bootstrap.await?;
    if let Err(err) = &result {
        if err
            .downcast_ref::<ApiError>()
            .is_some_and(ApiError::is_unauthorized)
        {
            eprintln!("The server rejected the stored session; sign in again with `agam login`.");
        }
    }
    result
}

fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

pub(crate) fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    let mut input = String::new();
    eprint!("{prompt}");
    io::stderr().flush()?;
    io::stdin().read_line(&mut input)?;
    let input = input.trim().to_string();
    if input.is_empty() {
        anyhow::bail!("{} is required", prompt.trim_end_matches([':', ' ']));
    }
    Ok(input)
}

pub(crate) fn prompt_password(prompt: &str) -> anyhow::Result<String> {
    eprint!("{prompt}");
    io::stderr().flush()?;
    let password = rpassword::read_password()?;
    if password.trim().is_empty() {
        anyhow::bail!("password is required");
    }
    Ok(password)
}
