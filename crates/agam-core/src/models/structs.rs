use serde::{Deserialize, Deserializer, Serialize};

use super::enums::VaultType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub id: String,
    pub name: String,
    /// Raw type as sent by the server; types this client does not know are
    /// kept as-is.
    #[serde(rename = "type", default)]
    pub kind: String,
    pub user_id: i64,
    #[serde(default)]
    pub created_timestamp: String,
}

impl Vault {
    #[must_use]
    pub fn vault_type(&self) -> Option<VaultType> {
        self.kind.parse().ok()
    }

    /// Dashboard label, falling back to the raw type.
    #[must_use]
    pub fn type_label(&self) -> &str {
        match self.vault_type() {
            Some(kind) => kind.label(),
            None => &self.kind,
        }
    }
}

/// Full file metadata as returned by an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub id: String,
    pub vault_id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub size: i64,
    #[serde(rename = "minio_key", alias = "storage_key", default)]
    pub storage_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

/// One entry of the thumbnail listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    #[serde(alias = "id")]
    pub file_id: String,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub size: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(
        alias = "thumbnail",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail_url: Option<String>,
}

/// Files sharing one date key, in server order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateGroup {
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub objects: Vec<FileSummary>,
}

/// Grouped listing of a vault. Group order and file order are kept as sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultListing {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub thumbnails: Vec<DateGroup>,
}

impl VaultListing {
    /// All files across groups, date grouping dropped.
    pub fn files(&self) -> impl Iterator<Item = &FileSummary> {
        self.thumbnails.iter().flat_map(|group| group.objects.iter())
    }

    #[must_use]
    pub fn flatten(&self) -> Vec<FileSummary> {
        self.files().cloned().collect()
    }

    #[must_use]
    pub fn find(&self, file_id: &str) -> Option<&FileSummary> {
        self.files().find(|file| file.file_id == file_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files().next().is_none()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files().count()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
