use std::path::Path;

use agam_core::{File, UploadFile, VaultListing};

use super::format::format_file_size;
use super::http::{delete_file, upload_file};
use crate::cli_args::*;
use crate::modules::gateway::{ApiClient, ApiError};
use crate::modules::session::render_protected;
use crate::modules::system::CommandContext;
use crate::modules::vaults::http::fetch_thumbnails;
use crate::modules::vaults::print_files;

pub(crate) async fn handle_file(args: FileArgs, ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let api = ctx.api;
    render_protected(|_user_id| async move {
        match args.command {
            FileCommand::Upload(args) => {
                let mut file = read_upload(&args.path).await?;
                if let Some(mime) = args.mime {
                    file = file.with_mime(mime);
                }
                let (uploaded, listing) = upload_and_refresh(api, file, &args.vault).await?;
                eprintln!(
                    "Uploaded {} ({})",
                    uploaded.name,
                    format_file_size(uploaded.size)
                );
                print_files(&listing, false, args.json)?;
            }
            FileCommand::Delete(args) => {
                let listing = delete_file_and_refresh(api, &args.file_id, &args.vault).await?;
                eprintln!("File deleted");
                print_files(&listing, false, args.json)?;
            }
        }
        Ok(())
    })
    .await
}

async fn read_upload(path: &Path) -> anyhow::Result<UploadFile> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow::anyhow!("not a file path: {}", path.display()))?
        .to_string();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| anyhow::anyhow!("failed to read {}: {err}", path.display()))?;
    Ok(UploadFile::new(name, bytes))
}

/// Uploads, then refetches the vault listing once the upload has finished.
pub(crate) async fn upload_and_refresh(
    api: &ApiClient,
    file: UploadFile,
    vault_id: &str,
) -> Result<(File, VaultListing), ApiError> {
    let uploaded = upload_file(api, file, vault_id).await?;
    let listing = fetch_thumbnails(api, vault_id).await?;
    Ok((uploaded, listing))
}

pub(crate) async fn delete_file_and_refresh(
    api: &ApiClient,
    file_id: &str,
    vault_id: &str,
) -> Result<VaultListing, ApiError> {
    delete_file(api, file_id, vault_id).await?;
    fetch_thumbnails(api, vault_id).await
}
