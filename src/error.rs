//! Error types shared by the orchestrator and its collaborators.
//!
//! DESIGN
//! ======
//! Errors never escape an intent. They are classified here, logged with a
//! grepable code, and then collapsed into a `StateMessage` or a notification
//! by `actions`.

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code and retryable flag for structured log fields.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// PROVIDER ERROR
// =============================================================================

/// A rejected call to an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The collaborator refused the call, optionally with a human-readable reason.
    #[error("rejected: {}", message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    /// A remote store returned a non-success HTTP status.
    #[error("remote responded with status {status}")]
    Http { status: u16, body: String },

    /// The HTTP request itself failed (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Request(String),

    /// The response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),
}

impl ProviderError {
    /// Shorthand for a rejection carrying a message.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected { message: Some(message.into()) }
    }

    /// The message shown to the user in an `AuthFailure`, when the provider gave one.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Rejected { message } => message.clone().filter(|m| !m.is_empty()),
            Self::Http { .. } | Self::Request(_) | Self::Parse(_) => None,
        }
    }
}

impl ErrorCode for ProviderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => "E_PROVIDER_REJECTED",
            Self::Http { .. } => "E_REMOTE_STATUS",
            Self::Request(_) => "E_REMOTE_REQUEST",
            Self::Parse(_) => "E_REMOTE_PARSE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Http { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// ACTION ERROR
// =============================================================================

/// Classification of an intent failure before it is mapped to a message.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// Missing or mismatched form fields; carries the localized reason.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identity, profile, or reset call was rejected.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Sector upload or the synced-data join failed after authentication.
    #[error("post-auth merge failed: {0}")]
    Merge(ProviderError),

    /// A profile update was requested with no signed-in user.
    #[error("no signed-in user")]
    NotSignedIn,
}

impl ActionError {
    /// The reason shown in an `AuthFailure`, if this failure has one to show.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Validation(reason) => Some(reason.clone()),
            Self::Provider(e) => e.user_message(),
            Self::Merge(_) | Self::NotSignedIn => None,
        }
    }
}

impl ErrorCode for ActionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::Provider(e) => e.error_code(),
            Self::Merge(_) => "E_MERGE",
            Self::NotSignedIn => "E_NOT_SIGNED_IN",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Provider(e) | Self::Merge(e) => e.retryable(),
            Self::Validation(_) | Self::NotSignedIn => false,
        }
    }
}

// =============================================================================
// CONFIG ERROR
// =============================================================================

/// Errors produced while reading [`crate::config::AccountConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing env var {var}")]
    Missing { var: String },

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(String),
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
