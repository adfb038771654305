use std::sync::Arc;

use serde_json::json;
use session::MemoryStorage;
use session::storage::ACCESS_TOKEN_KEY;

use super::*;
use crate::state::flow::FlowEvent;
use crate::test_helpers::{FakeSdk, FakeTransport, user};

#[test]
fn configured_liff_id_ignores_blank_values() {
    assert_eq!(configured_liff_id(Some(" 165-abc ")), Some("165-abc"));
    assert_eq!(configured_liff_id(Some("  ")), None);
    assert_eq!(configured_liff_id(None), None);
}

#[tokio::test]
async fn linking_calls_use_line_token_and_store_keeps_internal_tokens() {
    let transport = FakeTransport::new();
    transport.push_json(
        200,
        json!({ "linked": true, "user": user("u1"), "accessToken": "A1", "refreshToken": "R1" }),
    );
    transport.push_json(200, json!(user("u1")));
    let storage = Arc::new(MemoryStorage::new());
    let driver = build_driver(
        ApiConfig::default(),
        Arc::new(FakeSdk::logged_in("liff-T")),
        transport.clone(),
        storage.clone(),
    );

    let event = driver.authenticate().await;
    assert!(matches!(event, FlowEvent::AuthResolved(_)));
    assert_eq!(transport.last_request().header("Authorization"), Some("Bearer liff-T"));
    assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("A1"));

    assert!(driver.store().check_auth().await);
    let me = transport.last_request();
    assert_eq!(me.url, "/api/auth/me");
    assert_eq!(me.header("Authorization"), Some("Bearer A1"));
}
