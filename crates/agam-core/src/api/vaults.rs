use serde::{Deserialize, Serialize};

use crate::VaultType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VaultType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVaultRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VaultType,
    pub user_id: i64,
}

impl CreateVaultRequest {
    #[must_use]
    pub fn new(input: VaultInput, user_id: i64) -> Self {
        Self {
            name: input.name,
            kind: input.kind,
            user_id,
        }
    }
}
