use super::*;

fn client() -> RestClient {
    RestClient::new("https://api.example.test/v1/", RemoteTimeouts::default()).unwrap()
}

// =============================================================================
// URLs
// =============================================================================

#[test]
fn urls_strip_trailing_slash_from_base() {
    let client = client();
    assert_eq!(client.user_url("u1"), "https://api.example.test/v1/users/u1");
    assert_eq!(client.sectors_url("u1"), "https://api.example.test/v1/users/u1/sectors");
}

#[test]
fn from_config_requires_base_url() {
    let err = RestClient::from_config(&AccountConfig::default()).err().unwrap();
    assert!(err.to_string().contains("ACCOUNT_API_BASE_URL"));

    let cfg = AccountConfig { api_base_url: Some("http://localhost:9000".into()), ..AccountConfig::default() };
    let client = RestClient::from_config(&cfg).unwrap();
    assert_eq!(client.user_url("x"), "http://localhost:9000/users/x");
}

// =============================================================================
// check_status
// =============================================================================

#[test]
fn check_status_passes_2xx_body() {
    assert_eq!(check_status(204, String::new()).unwrap(), "");
    assert_eq!(check_status(200, "{}".into()).unwrap(), "{}");
}

#[test]
fn check_status_maps_failures_to_http_error() {
    let err = check_status(503, "maintenance".into()).unwrap_err();
    assert_eq!(err, ProviderError::Http { status: 503, body: "maintenance".into() });
}

// =============================================================================
// parse_profile
// =============================================================================

#[test]
fn parse_profile_reads_known_and_extra_fields() {
    let profile = parse_profile(r#"{"displayName":"Ann","locale":"de","favoriteSector":"sol"}"#).unwrap();
    assert_eq!(profile.display_name.as_deref(), Some("Ann"));
    assert_eq!(profile.locale.as_deref(), Some("de"));
    assert_eq!(profile.extra.get("favoriteSector").and_then(|v| v.as_str()), Some("sol"));
}

#[test]
fn parse_profile_missing_record_is_empty() {
    assert_eq!(parse_profile("null").unwrap(), Profile::default());
    assert_eq!(parse_profile("  ").unwrap(), Profile::default());
}

#[test]
fn parse_profile_rejects_garbage() {
    assert!(matches!(parse_profile("<html>"), Err(ProviderError::Parse(_))));
}

// =============================================================================
// parse_sectors
// =============================================================================

#[test]
fn parse_sectors_accepts_bare_array_in_order() {
    let body = r#"[
        {"id":"00000000-0000-0000-0000-000000000001","name":"a","data":{"x":1}},
        {"id":"00000000-0000-0000-0000-000000000002","name":"b","updatedAt":"2024-01-01T00:00:00Z"}
    ]"#;
    let sectors = parse_sectors(body).unwrap();
    assert_eq!(sectors.len(), 2);
    assert_eq!(sectors[0].name, "a");
    assert_eq!(sectors[1].updated_at.as_deref(), Some("2024-01-01T00:00:00Z"));
    assert!(sectors[1].data.is_null());
}

#[test]
fn parse_sectors_accepts_wrapped_list() {
    let body = r#"{"sectors":[{"id":"00000000-0000-0000-0000-000000000003","name":"c"}]}"#;
    let sectors = parse_sectors(body).unwrap();
    assert_eq!(sectors.len(), 1);
    assert_eq!(sectors[0].name, "c");
}

#[test]
fn parse_sectors_rejects_bad_ids() {
    let body = r#"[{"id":"not-a-uuid","name":"a"}]"#;
    assert!(matches!(parse_sectors(body), Err(ProviderError::Parse(_))));
}
