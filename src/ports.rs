//! Collaborator contracts consumed by the orchestrator.
//!
//! ARCHITECTURE
//! ============
//! Each external system is an async trait object so the host can plug in
//! real SDK bindings while tests use in-memory mocks. Every rejection is a
//! [`ProviderError`]; the orchestrator never sees transport details.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::profile::{Profile, ProfilePatch, User};
use crate::sector::{SavedSector, SyncedSector};

/// Success payload of a sign-in or sign-up call.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthResult {
    pub uid: String,
    /// Profile fields as the identity provider knows them.
    pub profile: Profile,
}

impl AuthResult {
    /// Combine with the profile store's record, store fields winning.
    #[must_use]
    pub fn into_user(self, stored: Profile) -> User {
        User { uid: self.uid, profile: self.profile.overlay(stored) }
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResult, ProviderError>;

    async fn signup(&self, email: &str, password: &str) -> Result<AuthResult, ProviderError>;

    async fn login_with_facebook(&self) -> Result<AuthResult, ProviderError>;

    async fn login_with_google(&self) -> Result<AuthResult, ProviderError>;

    async fn request_password_reset(&self, email: &str) -> Result<(), ProviderError>;

    async fn logout(&self) -> Result<(), ProviderError>;

    /// Ask the provider to mail a verification link to a new account.
    async fn send_verification_email(&self, uid: &str) -> Result<(), ProviderError>;

    /// The session restored by the provider at startup, if any.
    async fn current_user(&self) -> Result<Option<AuthResult>, ProviderError>;
}

// =============================================================================
// STORES
// =============================================================================

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_user_data(&self, uid: &str) -> Result<Profile, ProviderError>;

    async fn update_user(&self, uid: &str, patch: &ProfilePatch) -> Result<(), ProviderError>;
}

#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Sectors owned by `uid`, in server order.
    async fn get_synced_sectors(&self, uid: &str) -> Result<Vec<SyncedSector>, ProviderError>;

    async fn upload_entities(&self, uid: &str, sectors: &[SavedSector]) -> Result<(), ProviderError>;
}

// =============================================================================
// UI SIDE EFFECTS
// =============================================================================

/// Toast presentation layer.
pub trait Notifier: Send + Sync {
    fn show_success(&self, title: &str, message: &str);

    fn show_error(&self, title: &str, message: &str);
}

/// Client-side router.
pub trait Router: Send + Sync {
    fn navigate_to(&self, path: &str);
}
