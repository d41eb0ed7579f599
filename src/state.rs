//! User slice of the client store and its reducer.
//!
//! SYSTEM CONTEXT
//! ==============
//! `actions` reads a `UserState` snapshot taken once when an intent starts and
//! never mutates it. All mutation happens here, in [`UserState::apply`], as the
//! store consumes dispatched `StateMessage`s.

use std::collections::HashSet;

use crate::message::{FormField, Modal, StateMessage};
use crate::profile::User;
use crate::sector::{SavedSector, SyncedSector};

// =============================================================================
// FORM
// =============================================================================

/// Fields the user is editing in the login, signup, or profile form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm: Option<String>,
    pub display_name: Option<String>,
    pub locale: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

impl FormState {
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        non_empty(self.email.as_ref()).map(str::trim).filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn password(&self) -> Option<&str> {
        non_empty(self.password.as_ref())
    }

    #[must_use]
    pub fn confirm(&self) -> Option<&str> {
        non_empty(self.confirm.as_ref())
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        non_empty(self.display_name.as_ref())
    }

    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        non_empty(self.locale.as_ref())
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
            FormField::Confirm => &mut self.confirm,
            FormField::DisplayName => &mut self.display_name,
            FormField::Locale => &mut self.locale,
        };
        *slot = Some(value);
    }
}

// =============================================================================
// USER STATE
// =============================================================================

/// Authentication, form, and sector state for the current browser user.
#[derive(Clone, Debug, PartialEq)]
pub struct UserState {
    pub user: Option<User>,
    /// True until the startup session check settles.
    pub loading: bool,
    pub form: FormState,
    pub error: Option<String>,
    /// Locale the UI's localized resources were initialized with.
    pub locale: String,
    pub open_modals: HashSet<Modal>,
    pub saved_sectors: Vec<SavedSector>,
    pub synced_sectors: Vec<SyncedSector>,
    pub did_sync_local: bool,
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            form: FormState::default(),
            error: None,
            locale: crate::config::DEFAULT_FALLBACK_LOCALE.to_owned(),
            open_modals: HashSet::new(),
            saved_sectors: Vec::new(),
            synced_sectors: Vec::new(),
            did_sync_local: false,
        }
    }
}

impl UserState {
    #[must_use]
    pub fn is_open(&self, modal: Modal) -> bool {
        self.open_modals.contains(&modal)
    }

    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.uid.as_str())
    }

    /// Fold one message into the state.
    pub fn apply(&mut self, message: &StateMessage) {
        match message {
            StateMessage::LoggedIn { user, synced_sectors, did_sync_local } => {
                self.user = Some(user.clone());
                self.loading = false;
                self.form = FormState::default();
                self.error = None;
                self.synced_sectors.clone_from(synced_sectors);
                self.did_sync_local = *did_sync_local;
                if *did_sync_local {
                    self.saved_sectors.clear();
                }
                self.open_modals.remove(&Modal::Login);
            }
            StateMessage::LoggedOut => {
                self.user = None;
                self.form = FormState::default();
                self.error = None;
                self.synced_sectors.clear();
                self.did_sync_local = false;
                self.open_modals.clear();
            }
            StateMessage::AuthFailure { error } => {
                self.error.clone_from(error);
            }
            StateMessage::UserUpdated { patch } => {
                if let Some(user) = self.user.as_mut() {
                    user.profile.apply_patch(patch);
                }
                self.open_modals.remove(&Modal::EditProfile);
            }
            StateMessage::FormUpdated { field, value } => {
                self.form.set(*field, value.clone());
            }
            StateMessage::ModalOpened(modal) => {
                self.open_modals.insert(*modal);
            }
            StateMessage::ModalClosed(modal) => {
                self.open_modals.remove(modal);
                if *modal == Modal::Login {
                    self.error = None;
                }
            }
            StateMessage::SetAuthUser(user) => {
                self.user = Some(user.clone());
                self.loading = false;
            }
            StateMessage::UserFetchComplete => {
                self.loading = false;
            }
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::profile::Profile;

    /// Install a test subscriber so `tracing` output shows up with `--nocapture`.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    #[must_use]
    pub fn dummy_user(uid: &str) -> User {
        User {
            uid: uid.to_owned(),
            profile: Profile {
                display_name: Some("Ann".into()),
                email: Some("ann@example.com".into()),
                locale: Some("en".into()),
                ..Profile::default()
            },
        }
    }

    /// A signed-out state with a filled-in login form.
    #[must_use]
    pub fn login_state(email: &str, password: &str) -> UserState {
        UserState {
            loading: false,
            form: FormState {
                email: Some(email.to_owned()),
                password: Some(password.to_owned()),
                ..FormState::default()
            },
            ..UserState::default()
        }
    }

    /// A signed-in state, as seen by the profile editor.
    #[must_use]
    pub fn signed_in_state(uid: &str) -> UserState {
        UserState { user: Some(dummy_user(uid)), loading: false, ..UserState::default() }
    }

    #[must_use]
    pub fn saved_sectors(count: usize) -> Vec<SavedSector> {
        (0..count)
            .map(|i| SavedSector::new(format!("sector-{i}"), serde_json::json!({ "stars": i })))
            .collect()
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
