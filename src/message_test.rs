use super::*;
use crate::profile::Profile;
use serde_json::json;

// =============================================================================
// Wire shape
// =============================================================================

#[test]
fn logged_out_serializes_kind_only() {
    let value = serde_json::to_value(StateMessage::LoggedOut).unwrap();
    assert_eq!(value, json!({ "kind": "LoggedOut" }));
}

#[test]
fn auth_failure_serializes_kind_and_payload() {
    let msg = StateMessage::AuthFailure { error: Some("Passwords do not match.".into()) };
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value, json!({ "kind": "AuthFailure", "payload": { "error": "Passwords do not match." } }));
}

#[test]
fn logged_in_payload_uses_camel_case_keys() {
    let msg = StateMessage::LoggedIn {
        user: User { uid: "u1".into(), profile: Profile::default() },
        synced_sectors: Vec::new(),
        did_sync_local: true,
    };
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value["kind"], "LoggedIn");
    assert_eq!(value["payload"]["didSyncLocal"], true);
    assert_eq!(value["payload"]["syncedSectors"], json!([]));
    assert_eq!(value["payload"]["user"]["uid"], "u1");
}

#[test]
fn form_updated_deserializes_from_store_json() {
    let msg: StateMessage = serde_json::from_value(json!({
        "kind": "FormUpdated",
        "payload": { "field": "displayName", "value": "Ann" }
    }))
    .unwrap();
    assert_eq!(msg, update_form(FormField::DisplayName, "Ann"));
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn terminal_kinds() {
    assert!(StateMessage::LoggedOut.is_terminal());
    assert!(StateMessage::AuthFailure { error: None }.is_terminal());
    assert!(!open_login_modal().is_terminal());
    assert!(!update_form(FormField::Email, "a@b.c").is_terminal());
    assert!(!StateMessage::UserFetchComplete.is_terminal());
}

#[test]
fn kind_names_match_tags() {
    for msg in [StateMessage::LoggedOut, StateMessage::UserFetchComplete, close_edit_modal()] {
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["kind"], msg.kind());
    }
}

// =============================================================================
// Action creators
// =============================================================================

#[test]
fn modal_creators_target_their_modal() {
    assert_eq!(open_login_modal(), StateMessage::ModalOpened(Modal::Login));
    assert_eq!(close_login_modal(), StateMessage::ModalClosed(Modal::Login));
    assert_eq!(open_edit_modal(), StateMessage::ModalOpened(Modal::EditProfile));
    assert_eq!(close_edit_modal(), StateMessage::ModalClosed(Modal::EditProfile));
    assert_eq!(open_user_dropdown(), StateMessage::ModalOpened(Modal::UserDropdown));
    assert_eq!(close_user_dropdown(), StateMessage::ModalClosed(Modal::UserDropdown));
}

#[test]
fn set_auth_user_wraps_user() {
    let user = User { uid: "u2".into(), profile: Profile::default() };
    assert_eq!(set_auth_user(user.clone()), StateMessage::SetAuthUser(user));
}
