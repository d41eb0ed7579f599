//! Message ids for user-facing text and the built-in English catalog.

use std::collections::HashMap;

pub const CREDENTIALS_REQUIRED: &str = "auth.credentials_required";
pub const PASSWORD_MISMATCH: &str = "auth.password_mismatch";
pub const EMAIL_REQUIRED: &str = "auth.email_required";
pub const RESET_SENT_TITLE: &str = "reset.sent.title";
pub const RESET_SENT_MESSAGE: &str = "reset.sent.message";
pub const GENERIC_ERROR_TITLE: &str = "error.generic.title";
pub const GENERIC_ERROR_MESSAGE: &str = "error.generic.message";

/// Resolves a message id to localized text.
pub trait MessageFormatter: Send + Sync {
    fn format(&self, id: &str) -> String;
}

/// English strings for every id above. Unknown ids format as themselves.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    messages: HashMap<&'static str, String>,
}

impl MessageCatalog {
    #[must_use]
    pub fn english() -> Self {
        let messages = [
            (CREDENTIALS_REQUIRED, "Email and password are required."),
            (PASSWORD_MISMATCH, "Passwords do not match."),
            (EMAIL_REQUIRED, "Email is required."),
            (RESET_SENT_TITLE, "Password Reset Sent"),
            (RESET_SENT_MESSAGE, "You should be receiving an email soon."),
            (GENERIC_ERROR_TITLE, "Something went wrong"),
            (GENERIC_ERROR_MESSAGE, "Please try again in a moment."),
        ]
        .into_iter()
        .map(|(id, text)| (id, text.to_owned()))
        .collect();
        Self { messages }
    }

    /// Replace one entry, e.g. with a translation loaded by the host.
    #[must_use]
    pub fn with(mut self, id: &'static str, text: impl Into<String>) -> Self {
        self.messages.insert(id, text.into());
        self
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}

impl MessageFormatter for MessageCatalog {
    fn format(&self, id: &str) -> String {
        self.messages.get(id).cloned().unwrap_or_else(|| id.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_catalog_covers_auth_messages() {
        let catalog = MessageCatalog::english();
        assert_eq!(catalog.format(CREDENTIALS_REQUIRED), "Email and password are required.");
        assert_eq!(catalog.format(PASSWORD_MISMATCH), "Passwords do not match.");
        assert_eq!(catalog.format(RESET_SENT_TITLE), "Password Reset Sent");
    }

    #[test]
    fn unknown_id_formats_as_itself() {
        assert_eq!(MessageCatalog::default().format("nope.missing"), "nope.missing");
    }

    #[test]
    fn with_overrides_entry() {
        let catalog = MessageCatalog::english().with(PASSWORD_MISMATCH, "Les mots de passe ne correspondent pas.");
        assert_eq!(catalog.format(PASSWORD_MISMATCH), "Les mots de passe ne correspondent pas.");
    }
}
