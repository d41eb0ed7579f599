//! In-flight guard for asynchronous intents.
//!
//! DESIGN
//! ======
//! Each intent kind claims a slot, and at most one intent per slot runs at a
//! time. A second submit while the slot is taken is refused at the door
//! instead of racing it to the provider. The four sign-in kinds share one
//! slot because they all end in the same post-auth merge, which must upload
//! guest sectors at most once. Other kinds never block each other.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Asynchronous intents tracked by [`InFlightGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    Login,
    Signup,
    FacebookLogin,
    GoogleLogin,
    UpdateUser,
    PasswordReset,
    Logout,
    FetchUser,
}

impl IntentKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::FacebookLogin => "facebook_login",
            Self::GoogleLogin => "google_login",
            Self::UpdateUser => "update_user",
            Self::PasswordReset => "password_reset",
            Self::Logout => "logout",
            Self::FetchUser => "fetch_user",
        }
    }

    /// True for intents that finish in the post-auth merge.
    #[must_use]
    pub fn is_sign_in(self) -> bool {
        matches!(self, Self::Login | Self::Signup | Self::FacebookLogin | Self::GoogleLogin)
    }

    fn slot(self) -> Slot {
        if self.is_sign_in() { Slot::SignIn } else { Slot::Single(self) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Slot {
    SignIn,
    Single(IntentKind),
}

#[derive(Clone, Default)]
pub struct InFlightGuard {
    pending: Arc<Mutex<HashSet<Slot>>>,
}

impl InFlightGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot of `kind`. Returns `None` if an intent holding that
    /// slot is already pending; otherwise the claim lasts until the returned
    /// permit drops.
    #[must_use]
    pub fn try_begin(&self, kind: IntentKind) -> Option<IntentPermit> {
        let slot = kind.slot();
        let mut pending = self.lock();
        if !pending.insert(slot) {
            return None;
        }
        Some(IntentPermit { pending: Arc::clone(&self.pending), slot })
    }

    /// True while `kind`, or another kind sharing its slot, is running.
    #[must_use]
    pub fn is_pending(&self, kind: IntentKind) -> bool {
        self.lock().contains(&kind.slot())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<Slot>> {
        self.pending.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Releases its slot on drop.
pub struct IntentPermit {
    pending: Arc<Mutex<HashSet<Slot>>>,
    slot: Slot,
}

impl Drop for IntentPermit {
    fn drop(&mut self) {
        let mut pending = self.pending.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        pending.remove(&self.slot);
    }
}
