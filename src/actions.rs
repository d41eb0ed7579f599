//! User actions: intents from the account UI mapped onto collaborator calls.
//!
//! DESIGN
//! ======
//! Each intent reads a `UserState` snapshot captured by the caller, validates
//! the form locally, calls the identity provider and stores, then hands
//! exactly one terminal `StateMessage` to the store. Failures never reach the
//! caller: they are logged with an error code and surfaced as `AuthFailure`
//! or as an error toast.
//!
//! POST-AUTH MERGE
//! ===============
//! Every successful sign-in path funnels into [`UserActions::on_authenticated`]:
//! guest sectors are uploaded first (if any), then synced sectors and the
//! stored profile are read concurrently. A rejection anywhere in that chain
//! yields a generic `AuthFailure` and no `LoggedIn`.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::AccountConfig;
use crate::dispatch::Dispatch;
use crate::error::{ActionError, ErrorCode, ProviderError};
use crate::guard::{InFlightGuard, IntentKind, IntentPermit};
use crate::i18n::{self, MessageFormatter};
use crate::message::{StateMessage, close_login_modal};
use crate::ports::{AuthResult, EntityStore, IdentityProvider, Notifier, ProfileStore, Router};
use crate::profile::{Profile, ProfilePatch, User};
use crate::sector::SyncedSector;
use crate::state::{FormState, UserState};

// =============================================================================
// TYPES
// =============================================================================

/// Everything the orchestrator talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub identity: Arc<dyn IdentityProvider>,
    pub profiles: Arc<dyn ProfileStore>,
    pub entities: Arc<dyn EntityStore>,
    pub notifier: Arc<dyn Notifier>,
    pub router: Arc<dyn Router>,
    pub formatter: Arc<dyn MessageFormatter>,
    pub store: Arc<dyn Dispatch>,
}

/// How an intent settled, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    /// The intent ran; its result, if any, was dispatched.
    Completed,
    /// The profile was saved under a new locale. The host must reinitialize
    /// its localized resources (e.g. reload the page); nothing was dispatched.
    ReloadRequired,
    /// An intent holding the same guard slot was already in flight. Nothing ran.
    Ignored,
}

/// Which form rules [`UserActions::validate_credentials`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialMode {
    Login,
    Signup,
}

/// Validated email and password borrowed from the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

pub struct UserActions {
    deps: Collaborators,
    config: AccountConfig,
    guard: InFlightGuard,
}

// =============================================================================
// ORCHESTRATOR
// =============================================================================

impl UserActions {
    #[must_use]
    pub fn new(deps: Collaborators, config: AccountConfig) -> Self {
        Self { deps, config, guard: InFlightGuard::new() }
    }

    #[must_use]
    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    /// True while `kind`, or another intent sharing its guard slot, is running.
    #[must_use]
    pub fn is_pending(&self, kind: IntentKind) -> bool {
        self.guard.is_pending(kind)
    }

    /// Check the login or signup form before any network call.
    ///
    /// # Errors
    ///
    /// Returns the `AuthFailure` message to dispatch when a field is missing
    /// or the confirmation does not match.
    pub fn validate_credentials<'a>(
        &self,
        form: &'a FormState,
        mode: CredentialMode,
    ) -> Result<Credentials<'a>, StateMessage> {
        let (Some(email), Some(password)) = (form.email(), form.password()) else {
            return Err(self.validation_failure(i18n::CREDENTIALS_REQUIRED));
        };
        if mode == CredentialMode::Signup {
            let Some(confirm) = form.confirm() else {
                return Err(self.validation_failure(i18n::CREDENTIALS_REQUIRED));
            };
            if confirm != password {
                return Err(self.validation_failure(i18n::PASSWORD_MISMATCH));
            }
        }
        Ok(Credentials { email, password })
    }

    /// Sign in with email and password.
    pub async fn login(&self, state: &UserState) -> IntentOutcome {
        let Some(_permit) = self.begin(IntentKind::Login) else {
            return IntentOutcome::Ignored;
        };
        let creds = match self.validate_credentials(&state.form, CredentialMode::Login) {
            Ok(creds) => creds,
            Err(failure) => {
                self.deps.store.dispatch(failure);
                return IntentOutcome::Completed;
            }
        };
        match self.deps.identity.login(creds.email, creds.password).await {
            Ok(auth) => self.on_authenticated(auth, state).await,
            Err(e) => self.auth_failure(IntentKind::Login, e),
        }
        IntentOutcome::Completed
    }

    /// Create an account, send the verification mail, and sign in.
    pub async fn signup(&self, state: &UserState) -> IntentOutcome {
        let Some(_permit) = self.begin(IntentKind::Signup) else {
            return IntentOutcome::Ignored;
        };
        let creds = match self.validate_credentials(&state.form, CredentialMode::Signup) {
            Ok(creds) => creds,
            Err(failure) => {
                self.deps.store.dispatch(failure);
                return IntentOutcome::Completed;
            }
        };
        match self.deps.identity.signup(creds.email, creds.password).await {
            Ok(auth) => {
                self.send_verification_email(&auth.uid).await;
                self.on_authenticated(auth, state).await;
            }
            Err(e) => self.auth_failure(IntentKind::Signup, e),
        }
        IntentOutcome::Completed
    }

    pub async fn facebook_login(&self, state: &UserState) -> IntentOutcome {
        let Some(_permit) = self.begin(IntentKind::FacebookLogin) else {
            return IntentOutcome::Ignored;
        };
        match self.deps.identity.login_with_facebook().await {
            Ok(auth) => self.on_authenticated(auth, state).await,
            Err(e) => self.auth_failure(IntentKind::FacebookLogin, e),
        }
        IntentOutcome::Completed
    }

    pub async fn google_login(&self, state: &UserState) -> IntentOutcome {
        let Some(_permit) = self.begin(IntentKind::GoogleLogin) else {
            return IntentOutcome::Ignored;
        };
        match self.deps.identity.login_with_google().await {
            Ok(auth) => self.on_authenticated(auth, state).await,
            Err(e) => self.auth_failure(IntentKind::GoogleLogin, e),
        }
        IntentOutcome::Completed
    }

    /// Merge guest data into the freshly authenticated account and emit
    /// `LoggedIn`, or a generic `AuthFailure` if any remote step fails.
    pub async fn on_authenticated(&self, auth: AuthResult, snapshot: &UserState) {
        let did_sync_local = !snapshot.saved_sectors.is_empty();
        match self.sync_account(&auth.uid, snapshot, did_sync_local).await {
            Ok((synced_sectors, stored)) => {
                let user = auth.into_user(stored);
                info!(uid = %user.uid, did_sync_local, sectors = synced_sectors.len(), "logged in");
                self.deps.router.navigate_to(&self.config.home_path);
                self.deps.store.dispatch(StateMessage::LoggedIn { user, synced_sectors, did_sync_local });
            }
            Err(e) => {
                let e = ActionError::Merge(e);
                warn!(uid = %auth.uid, code = e.error_code(), error = %e, "post-auth merge failed");
                self.deps.store.dispatch(StateMessage::AuthFailure { error: None });
            }
        }
    }

    /// Save the edited display name and locale.
    ///
    /// Returns [`IntentOutcome::ReloadRequired`] instead of dispatching
    /// `UserUpdated` when the saved locale differs from the active one.
    pub async fn update_user(&self, state: &UserState) -> IntentOutcome {
        let Some(_permit) = self.begin(IntentKind::UpdateUser) else {
            return IntentOutcome::Ignored;
        };
        let patch = ProfilePatch::from_form(&state.form, &self.config.supported_locales, &self.config.fallback_locale);
        let Some(uid) = state.uid() else {
            self.generic_error(IntentKind::UpdateUser, &ActionError::NotSignedIn);
            return IntentOutcome::Completed;
        };
        match self.deps.profiles.update_user(uid, &patch).await {
            Ok(()) if !patch.locale.eq_ignore_ascii_case(&state.locale) => {
                info!(%uid, from = %state.locale, to = %patch.locale, "locale changed; reload required");
                IntentOutcome::ReloadRequired
            }
            Ok(()) => {
                self.deps.store.dispatch(StateMessage::UserUpdated { patch });
                IntentOutcome::Completed
            }
            Err(e) => {
                self.generic_error(IntentKind::UpdateUser, &ActionError::from(e));
                IntentOutcome::Completed
            }
        }
    }

    /// Request a password-reset mail for the form's email.
    pub async fn password_reset(&self, state: &UserState) -> IntentOutcome {
        let Some(_permit) = self.begin(IntentKind::PasswordReset) else {
            return IntentOutcome::Ignored;
        };
        let Some(email) = state.form.email() else {
            self.deps.store.dispatch(self.validation_failure(i18n::EMAIL_REQUIRED));
            return IntentOutcome::Completed;
        };
        match self.deps.identity.request_password_reset(email).await {
            Ok(()) => {
                self.deps.store.dispatch(close_login_modal());
                self.deps.notifier.show_success(
                    &self.deps.formatter.format(i18n::RESET_SENT_TITLE),
                    &self.deps.formatter.format(i18n::RESET_SENT_MESSAGE),
                );
            }
            Err(e) => self.auth_failure(IntentKind::PasswordReset, e),
        }
        IntentOutcome::Completed
    }

    pub async fn logout(&self) -> IntentOutcome {
        let Some(_permit) = self.begin(IntentKind::Logout) else {
            return IntentOutcome::Ignored;
        };
        match self.deps.identity.logout().await {
            Ok(()) => {
                info!("logged out");
                self.deps.router.navigate_to(&self.config.home_path);
                self.deps.store.dispatch(StateMessage::LoggedOut);
            }
            Err(e) => self.generic_error(IntentKind::Logout, &ActionError::from(e)),
        }
        IntentOutcome::Completed
    }

    /// Startup session check: restore the provider's signed-in user, if any.
    pub async fn fetch_user(&self) -> IntentOutcome {
        let Some(_permit) = self.begin(IntentKind::FetchUser) else {
            return IntentOutcome::Ignored;
        };
        match self.deps.identity.current_user().await {
            Ok(Some(auth)) => {
                debug!(uid = %auth.uid, "restored session");
                let user = User { uid: auth.uid, profile: auth.profile };
                self.deps.store.dispatch(StateMessage::SetAuthUser(user));
            }
            Ok(None) => self.deps.store.dispatch(StateMessage::UserFetchComplete),
            Err(e) => {
                warn!(code = e.error_code(), error = %e, "session check failed");
                self.deps.store.dispatch(StateMessage::UserFetchComplete);
            }
        }
        IntentOutcome::Completed
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn begin(&self, kind: IntentKind) -> Option<IntentPermit> {
        let permit = self.guard.try_begin(kind);
        if permit.is_none() {
            debug!(intent = kind.as_str(), "intent already in flight; ignoring");
        }
        permit
    }

    /// Upload guest sectors, then read synced sectors and the stored profile.
    async fn sync_account(
        &self,
        uid: &str,
        snapshot: &UserState,
        upload: bool,
    ) -> Result<(Vec<SyncedSector>, Profile), ProviderError> {
        if upload {
            debug!(%uid, count = snapshot.saved_sectors.len(), "uploading guest sectors");
            self.deps
                .entities
                .upload_entities(uid, &snapshot.saved_sectors)
                .await?;
        }
        tokio::try_join!(self.deps.entities.get_synced_sectors(uid), self.deps.profiles.get_user_data(uid))
    }

    /// Runs on the current tokio runtime when there is one; the result is
    /// only logged.
    async fn send_verification_email(&self, uid: &str) {
        let identity = Arc::clone(&self.deps.identity);
        let uid = uid.to_owned();
        let task = async move {
            if let Err(e) = identity.send_verification_email(&uid).await {
                warn!(%uid, code = e.error_code(), error = %e, "verification email failed");
            }
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(task);
            }
            Err(_) => task.await,
        }
    }

    fn validation_failure(&self, message_id: &str) -> StateMessage {
        let e = ActionError::Validation(self.deps.formatter.format(message_id));
        debug!(code = e.error_code(), error = %e, "form rejected before network call");
        StateMessage::AuthFailure { error: e.user_message() }
    }

    fn auth_failure(&self, kind: IntentKind, e: ProviderError) {
        let e = ActionError::from(e);
        warn!(intent = kind.as_str(), code = e.error_code(), error = %e, "auth call rejected");
        self.deps.store.dispatch(StateMessage::AuthFailure { error: e.user_message() });
    }

    fn generic_error(&self, kind: IntentKind, e: &ActionError) {
        warn!(intent = kind.as_str(), code = e.error_code(), error = %e, "intent failed");
        self.deps.notifier.show_error(
            &self.deps.formatter.format(i18n::GENERIC_ERROR_TITLE),
            &self.deps.formatter.format(i18n::GENERIC_ERROR_MESSAGE),
        );
    }
}

#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;
