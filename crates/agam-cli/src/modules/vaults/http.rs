use agam_core::endpoints;
use agam_core::{CreateVaultRequest, Vault, VaultInput, VaultListing};

use crate::modules::gateway::http::build_params;
use crate::modules::gateway::{append_params, ApiClient, ApiError, RequestOptions};

/// Vaults owned by `user_id`, in server order.
pub(crate) async fn list_vaults(client: &ApiClient, user_id: i64) -> Result<Vec<Vault>, ApiError> {
    let mut endpoint = endpoints::VAULTS.to_string();
    append_params(&mut endpoint, build_params([Some(("user_id", user_id.to_string()))]));
    // A user without vaults may come back as `null`.
    let vaults: Option<Option<Vec<Vault>>> =
        client.request(&endpoint, RequestOptions::get()).await?;
    Ok(vaults.flatten().unwrap_or_default())
}

pub(crate) async fn create_vault(
    client: &ApiClient,
    input: VaultInput,
    user_id: i64,
) -> Result<Vault, ApiError> {
    let payload = CreateVaultRequest::new(input, user_id);
    client
        .request(endpoints::VAULTS_CREATE, RequestOptions::post(&payload)?)
        .await?
        .ok_or_else(|| ApiError::new("vault create returned no vault"))
}

/// Files inside the vault are removed by the server along with it.
pub(crate) async fn delete_vault(
    client: &ApiClient,
    vault_id: &str,
    user_id: i64,
) -> Result<(), ApiError> {
    let mut endpoint = endpoints::VAULTS_DELETE.to_string();
    append_params(
        &mut endpoint,
        build_params([
            Some(("vault_id", vault_id.to_string())),
            Some(("user_id", user_id.to_string())),
        ]),
    );
    client
        .request::<serde_json::Value>(&endpoint, RequestOptions::delete())
        .await?;
    Ok(())
}

/// Date-grouped listing of a vault's files.
pub(crate) async fn fetch_thumbnails(
    client: &ApiClient,
    vault_id: &str,
) -> Result<VaultListing, ApiError> {
    let mut endpoint = endpoints::THUMBNAIL.to_string();
    append_params(
        &mut endpoint,
        build_params([Some(("vault_id", vault_id.to_string()))]),
    );
    let listing = client.request(&endpoint, RequestOptions::get()).await?;
    Ok(listing.unwrap_or_default())
}
