/// Multipart field carrying the file bytes.
pub const UPLOAD_FILE_FIELD: &str = "file";

/// Multipart field carrying the target vault id.
pub const UPLOAD_VAULT_FIELD: &str = "vault_id";

/// Bytes selected for upload. Exactly one file per upload call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: None,
            bytes,
        }
    }

    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}
