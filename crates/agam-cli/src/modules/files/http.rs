use agam_core::endpoints;
use agam_core::{File, UploadFile, UPLOAD_FILE_FIELD, UPLOAD_VAULT_FIELD};
use reqwest::multipart::{Form, Part};

use crate::modules::gateway::http::build_params;
use crate::modules::gateway::{append_params, ApiClient, ApiError, RequestOptions};

fn upload_form(file: UploadFile, vault_id: &str) -> Result<Form, ApiError> {
    let mut part = Part::bytes(file.bytes).file_name(file.name);
    if let Some(mime) = file.mime.as_deref() {
        part = part
            .mime_str(mime)
            .map_err(|err| ApiError::new(format!("invalid mime type {mime}: {err}")))?;
    }
    Ok(Form::new()
        .part(UPLOAD_FILE_FIELD, part)
        .text(UPLOAD_VAULT_FIELD, vault_id.to_string()))
}

/// Uploads one file into `vault_id` and returns the stored metadata.
pub(crate) async fn upload_file(
    client: &ApiClient,
    file: UploadFile,
    vault_id: &str,
) -> Result<File, ApiError> {
    let form = upload_form(file, vault_id)?;
    client.upload(endpoints::FILES_UPLOAD, form).await
}

pub(crate) async fn delete_file(
    client: &ApiClient,
    file_id: &str,
    vault_id: &str,
) -> Result<(), ApiError> {
    let mut endpoint = endpoints::FILES_DELETE.to_string();
    append_params(
        &mut endpoint,
        build_params([
            Some(("file_id", file_id.to_string())),
            Some(("vault_id", vault_id.to_string())),
        ]),
    );
    client
        .request::<serde_json::Value>(&endpoint, RequestOptions::delete())
        .await?;
    Ok(())
}
