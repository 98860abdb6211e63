use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaultType {
    Images,
    Texts,
    Audios,
    Documents,
    Personal,
    Work,
    Shared,
}

#[derive(Debug)]
pub struct EnumParseError {
    enum_name: &'static str,
    value: String,
}

impl EnumParseError {
    fn new(enum_name: &'static str, value: impl Into<String>) -> Self {
        Self {
            enum_name,
            value: value.into(),
        }
    }
}

impl std::fmt::Display for EnumParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {} value: {}", self.enum_name, self.value)
    }
}

impl std::error::Error for EnumParseError {}

impl VaultType {
    pub const ALL: [VaultType; 7] = [
        VaultType::Images,
        VaultType::Texts,
        VaultType::Audios,
        VaultType::Documents,
        VaultType::Personal,
        VaultType::Work,
        VaultType::Shared,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Texts => "texts",
            Self::Audios => "audios",
            Self::Documents => "documents",
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Shared => "shared",
        }
    }

    /// Display label used by the dashboard.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Images => "Images",
            Self::Texts => "Texts",
            Self::Audios => "Audios",
            Self::Documents => "Documents",
            Self::Personal => "Personal",
            Self::Work => "Work",
            Self::Shared => "Shared",
        }
    }
}

impl std::fmt::Display for VaultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VaultType {
    type Err = EnumParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "images" => Ok(Self::Images),
            "texts" => Ok(Self::Texts),
            "audios" => Ok(Self::Audios),
            "documents" => Ok(Self::Documents),
            "personal" => Ok(Self::Personal),
            "work" => Ok(Self::Work),
            "shared" => Ok(Self::Shared),
            _ => Err(EnumParseError::new("vault_type", value)),
        }
    }
}
