//! User profile records, the editable patch, and locale resolution.
//!
//! DESIGN
//! ======
//! A signed-in user's profile comes from two places: the identity provider's
//! snapshot and the profile store. They are combined by [`Profile::overlay`],
//! a per-field merge where the profile store wins, so field precedence can be
//! read off the code instead of depending on map spread order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::state::FormState;

// =============================================================================
// PROFILE
// =============================================================================

/// Profile fields known to the application plus any extra keys the
/// provider or store attached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    /// Unrecognized keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Merge `remote` over `self`. Every field present in `remote` replaces
    /// the one in `self`; absent fields keep the provider value.
    #[must_use]
    pub fn overlay(self, remote: Profile) -> Profile {
        let mut extra = self.extra;
        for (key, value) in remote.extra {
            extra.insert(key, value);
        }
        Profile {
            display_name: remote.display_name.or(self.display_name),
            email: remote.email.or(self.email),
            photo_url: remote.photo_url.or(self.photo_url),
            locale: remote.locale.or(self.locale),
            email_verified: remote.email_verified.or(self.email_verified),
            extra,
        }
    }

    /// Apply an accepted profile edit.
    pub fn apply_patch(&mut self, patch: &ProfilePatch) {
        if let Some(name) = &patch.display_name {
            self.display_name = Some(name.clone());
        }
        self.locale = Some(patch.locale.clone());
    }
}

/// A signed-in user: stable identifier plus merged profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    #[serde(flatten)]
    pub profile: Profile,
}

// =============================================================================
// PATCH
// =============================================================================

/// The subset of profile fields a user may edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub locale: String,
}

impl ProfilePatch {
    /// Keep only `display_name` and `locale` from the form. The locale falls
    /// back to `fallback` when absent or not in `supported`.
    #[must_use]
    pub fn from_form(form: &FormState, supported: &[String], fallback: &str) -> Self {
        Self {
            display_name: form.display_name().map(str::to_owned),
            locale: resolve_locale(form.locale(), supported, fallback),
        }
    }
}

// =============================================================================
// LOCALE
// =============================================================================

/// Map a requested locale code onto a supported one, case-insensitively.
#[must_use]
pub fn resolve_locale(requested: Option<&str>, supported: &[String], fallback: &str) -> String {
    requested
        .map(str::trim)
        .and_then(|code| supported.iter().find(|s| s.eq_ignore_ascii_case(code)))
        .map_or_else(|| fallback.to_owned(), Clone::clone)
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
