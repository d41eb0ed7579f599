//! StateMessage: the only thing the orchestrator hands to the store.
//!
//! DESIGN
//! ======
//! Messages are plain data tagged as `{kind, payload}`. Synchronous UI
//! toggles are built by the free functions at the bottom of this module;
//! asynchronous intents in `actions` emit exactly one terminal message each.

use serde::{Deserialize, Serialize};

use crate::profile::{ProfilePatch, User};
use crate::sector::SyncedSector;

// =============================================================================
// TYPES
// =============================================================================

/// Overlays whose visibility lives in the user slice of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modal {
    Login,
    EditProfile,
    UserDropdown,
}

/// Editable fields of the account form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Email,
    Password,
    Confirm,
    DisplayName,
    Locale,
}

/// A state transition for the user slice of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload")]
pub enum StateMessage {
    LoggedIn {
        user: User,
        #[serde(rename = "syncedSectors")]
        synced_sectors: Vec<SyncedSector>,
        #[serde(rename = "didSyncLocal")]
        did_sync_local: bool,
    },
    LoggedOut,
    /// `error` is `None` when the failure is reported generically.
    AuthFailure {
        error: Option<String>,
    },
    UserUpdated {
        patch: ProfilePatch,
    },
    FormUpdated {
        field: FormField,
        value: String,
    },
    ModalOpened(Modal),
    ModalClosed(Modal),
    /// A session restored at startup.
    SetAuthUser(User),
    /// The startup session check finished without a user.
    UserFetchComplete,
}

impl StateMessage {
    /// Terminal messages settle an asynchronous intent.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::LoggedIn { .. } | Self::LoggedOut | Self::AuthFailure { .. } | Self::UserUpdated { .. }
        )
    }

    /// Stable name of the message kind, used in log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LoggedIn { .. } => "LoggedIn",
            Self::LoggedOut => "LoggedOut",
            Self::AuthFailure { .. } => "AuthFailure",
            Self::UserUpdated { .. } => "UserUpdated",
            Self::FormUpdated { .. } => "FormUpdated",
            Self::ModalOpened(_) => "ModalOpened",
            Self::ModalClosed(_) => "ModalClosed",
            Self::SetAuthUser(_) => "SetAuthUser",
            Self::UserFetchComplete => "UserFetchComplete",
        }
    }
}

// =============================================================================
// ACTION CREATORS
// =============================================================================

#[must_use]
pub fn open_modal(modal: Modal) -> StateMessage {
    StateMessage::ModalOpened(modal)
}

#[must_use]
pub fn close_modal(modal: Modal) -> StateMessage {
    StateMessage::ModalClosed(modal)
}

#[must_use]
pub fn open_login_modal() -> StateMessage {
    open_modal(Modal::Login)
}

#[must_use]
pub fn close_login_modal() -> StateMessage {
    close_modal(Modal::Login)
}

#[must_use]
pub fn open_edit_modal() -> StateMessage {
    open_modal(Modal::EditProfile)
}

#[must_use]
pub fn close_edit_modal() -> StateMessage {
    close_modal(Modal::EditProfile)
}

#[must_use]
pub fn open_user_dropdown() -> StateMessage {
    open_modal(Modal::UserDropdown)
}

#[must_use]
pub fn close_user_dropdown() -> StateMessage {
    close_modal(Modal::UserDropdown)
}

/// Record a single field edit.
#[must_use]
pub fn update_form(field: FormField, value: impl Into<String>) -> StateMessage {
    StateMessage::FormUpdated { field, value: value.into() }
}

#[must_use]
pub fn set_auth_user(user: User) -> StateMessage {
    StateMessage::SetAuthUser(user)
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
