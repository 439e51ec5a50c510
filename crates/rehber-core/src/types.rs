use serde::{Deserialize, Serialize};

use crate::constants::VCARD_SOURCE;
use crate::error::{CoreError, CoreResult};

/// Opaque reference to the account that owns imported contacts.
///
/// The import pipeline never interprets it; it only takes part in external
/// id hashing and in the store's uniqueness key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerRef(String);

impl OwnerRef {
    /// ## Summary
    /// Creates an owner reference from a non-blank string.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` if the value is empty after trimming.
    pub fn new(value: impl Into<String>) -> CoreResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidInput("owner reference is empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a stored contact came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportSource {
    #[default]
    Vcard,
}

impl ImportSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vcard => VCARD_SOURCE,
        }
    }
}

impl std::fmt::Display for ImportSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
