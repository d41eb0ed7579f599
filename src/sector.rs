//! Sector records exchanged with the entity sync store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sector created while the user was signed out, waiting to be uploaded
/// to the account on the next login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSector {
    pub id: Uuid,
    pub name: String,
    /// Opaque sector body as produced by the editor.
    pub data: serde_json::Value,
}

impl SavedSector {
    #[must_use]
    pub fn new(name: impl Into<String>, data: serde_json::Value) -> Self {
        Self { id: Uuid::new_v4(), name: name.into(), data }
    }
}

/// A sector stored remotely under the signed-in account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncedSector {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
