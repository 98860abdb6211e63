use agam_core::{Vault, VaultInput, VaultListing};

use super::http::{create_vault, delete_vault, fetch_thumbnails, list_vaults};
use super::render::{print_listing, print_vault_table};
use crate::cli_args::*;
use crate::modules::gateway::{ApiClient, ApiError};
use crate::modules::session::render_protected;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_vault(args: VaultArgs, ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let api = ctx.api;
    render_protected(|user_id| async move {
        match args.command {
            VaultCommand::List(args) => {
                let vaults = list_vaults(api, user_id).await?;
                print_vaults(&vaults, args.json)?;
            }
            VaultCommand::Create(args) => {
                let input = VaultInput {
                    name: args.name,
                    kind: args.kind,
                };
                let (vault, vaults) = create_and_refresh(api, input, user_id).await?;
                eprintln!("Created vault {} ({})", vault.name, vault.id);
                print_vaults(&vaults, args.json)?;
            }
            VaultCommand::Delete(args) => {
                let vaults = delete_and_refresh(api, &args.vault_id, user_id).await?;
                eprintln!("Vault deleted");
                print_vaults(&vaults, args.json)?;
            }
            VaultCommand::Files(args) => {
                let listing = fetch_thumbnails(api, &args.vault_id).await?;
                print_files(&listing, args.flat, args.json)?;
            }
        }
        Ok(())
    })
    .await
}

/// Creates the vault, then refetches the whole list. The create finishes
/// before the refetch starts.
pub(crate) async fn create_and_refresh(
    api: &ApiClient,
    input: VaultInput,
    user_id: i64,
) -> Result<(Vault, Vec<Vault>), ApiError> {
    let vault = create_vault(api, input, user_id).await?;
    let vaults = list_vaults(api, user_id).await?;
    Ok((vault, vaults))
}

pub(crate) async fn delete_and_refresh(
    api: &ApiClient,
    vault_id: &str,
    user_id: i64,
) -> Result<Vec<Vault>, ApiError> {
    delete_vault(api, vault_id, user_id).await?;
    list_vaults(api, user_id).await
}

fn print_vaults(vaults: &[Vault], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(vaults)?);
    } else {
        print_vault_table(vaults);
    }
    Ok(())
}

pub(crate) fn print_files(listing: &VaultListing, flat: bool, json: bool) -> anyhow::Result<()> {
    match (json, flat) {
        (true, true) => println!("{}", serde_json::to_string_pretty(&listing.flatten())?),
        (true, false) => println!("{}", serde_json::to_string_pretty(listing)?),
        (false, _) => print_listing(listing, flat),
    }
    Ok(())
}
