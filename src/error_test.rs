use super::*;

// =============================================================================
// ProviderError
// =============================================================================

#[test]
fn user_message_passes_through_rejection_text() {
    let err = ProviderError::rejected("Wrong password.");
    assert_eq!(err.user_message().as_deref(), Some("Wrong password."));
}

#[test]
fn user_message_none_for_empty_or_transport_errors() {
    assert!(ProviderError::rejected("").user_message().is_none());
    assert!(ProviderError::Rejected { message: None }.user_message().is_none());
    assert!(ProviderError::Request("timeout".into()).user_message().is_none());
    assert!(ProviderError::Http { status: 500, body: "boom".into() }.user_message().is_none());
}

#[test]
fn provider_retryable_for_transport_and_5xx() {
    assert!(ProviderError::Request("reset".into()).retryable());
    assert!(ProviderError::Http { status: 503, body: String::new() }.retryable());
    assert!(ProviderError::Http { status: 429, body: String::new() }.retryable());
    assert!(!ProviderError::Http { status: 404, body: String::new() }.retryable());
    assert!(!ProviderError::rejected("no").retryable());
}

#[test]
fn rejected_display_falls_back_without_message() {
    let err = ProviderError::Rejected { message: None };
    assert_eq!(err.to_string(), "rejected: no message");
}

// =============================================================================
// ActionError
// =============================================================================

#[test]
fn action_error_codes() {
    assert_eq!(ActionError::Validation("x".into()).error_code(), "E_VALIDATION");
    assert_eq!(ActionError::NotSignedIn.error_code(), "E_NOT_SIGNED_IN");
    assert_eq!(ActionError::Merge(ProviderError::Parse("bad".into())).error_code(), "E_MERGE");
    assert_eq!(ActionError::from(ProviderError::rejected("no")).error_code(), "E_PROVIDER_REJECTED");
}

#[test]
fn action_error_retryable_delegates_to_provider() {
    let err = ActionError::Merge(ProviderError::Request("down".into()));
    assert!(err.retryable());
    assert!(!ActionError::Validation("x".into()).retryable());
}

#[test]
fn action_error_user_message_only_for_shown_reasons() {
    assert_eq!(ActionError::Validation("Passwords do not match.".into()).user_message().as_deref(), Some("Passwords do not match."));
    assert_eq!(ActionError::from(ProviderError::rejected("Wrong password.")).user_message().as_deref(), Some("Wrong password."));
    assert!(ActionError::from(ProviderError::Request("down".into())).user_message().is_none());
    assert!(ActionError::Merge(ProviderError::rejected("x")).user_message().is_none());
    assert!(ActionError::NotSignedIn.user_message().is_none());
}
