use std::sync::Arc;
use std::sync::atomic::Ordering;

use serde_json::json;
use session::MemoryStorage;

use super::*;
use crate::sdk::SdkError;
use crate::state::flow::LinkFlow;
use crate::test_helpers::{FakeSdk, FakeTransport, client, offline_store, profile, user};

fn driver_with(sdk: FakeSdk, transport: &Arc<FakeTransport>) -> (LinkDriver, Arc<FakeSdk>) {
    let sdk = Arc::new(sdk);
    let driver = LinkDriver::new(
        sdk.clone(),
        LinkingService::new(client(transport.clone())),
        offline_store(Arc::new(MemoryStorage::new())),
    );
    (driver, sdk)
}

#[tokio::test]
async fn initialize_without_app_id_fails_before_touching_sdk() {
    let (driver, _) = driver_with(FakeSdk::logged_in("T"), &FakeTransport::new());
    assert_eq!(driver.initialize(None).await, FlowEvent::InitFailed(NOT_CONFIGURED.to_owned()));
}

#[tokio::test]
async fn initialize_reports_line_login_state() {
    let transport = FakeTransport::new();
    let (driver, _) = driver_with(FakeSdk::logged_out(), &transport);
    assert_eq!(driver.initialize(Some("165-x")).await, FlowEvent::SdkReady { logged_in: false });

    let (driver, _) = driver_with(FakeSdk::logged_in("T"), &transport);
    assert_eq!(driver.initialize(Some("165-x")).await, FlowEvent::SdkReady { logged_in: true });
}

#[tokio::test]
async fn initialize_surfaces_sdk_error() {
    let sdk = FakeSdk { init_result: Err(SdkError::Unavailable), ..FakeSdk::logged_in("T") };
    let (driver, _) = driver_with(sdk, &FakeTransport::new());
    assert_eq!(
        driver.initialize(Some("165-x")).await,
        FlowEvent::InitFailed(SdkError::Unavailable.to_string())
    );
}

#[tokio::test]
async fn unlinked_auth_falls_back_to_sdk_profile_and_keeps_store_empty() {
    let transport = FakeTransport::new();
    transport.push_json(200, json!({ "linked": false }));
    let (driver, _) = driver_with(FakeSdk::logged_in("T"), &transport);

    let event = driver.authenticate().await;

    assert_eq!(
        event,
        FlowEvent::AuthResolved(LineAuthOutcome::Unlinked { line_profile: Some(profile("U1", "Dee")) })
    );
    assert!(!driver.store().snapshot().is_authenticated);
}

#[tokio::test]
async fn linked_auth_establishes_session() {
    let transport = FakeTransport::new();
    transport.push_json(200, json!({ "linked": true, "user": user("u3"), "accessToken": "A", "refreshToken": "R" }));
    let (driver, _) = driver_with(FakeSdk::logged_in("T"), &transport);

    let flow = LinkFlow::Authenticating.next(driver.authenticate().await);

    assert_eq!(flow, LinkFlow::Linked { user: user("u3") });
    let session = driver.store().snapshot();
    assert!(session.is_authenticated);
    assert_eq!(session.access_token.as_deref(), Some("A"));
}

#[tokio::test]
async fn auth_without_line_token_fails_without_request() {
    let transport = FakeTransport::new();
    let (driver, _) = driver_with(FakeSdk::logged_out(), &transport);
    assert_eq!(driver.authenticate().await, FlowEvent::AuthFailed(LINE_SESSION_EXPIRED.to_owned()));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn successful_link_establishes_session_and_confirms_in_chat() {
    let transport = FakeTransport::new();
    transport.push_json(200, json!({ "success": true, "user": user("u5"), "accessToken": "A", "refreshToken": "R" }));
    let (driver, sdk) = driver_with(FakeSdk::logged_in("T"), &transport);

    let event = driver.link(&LinkMethod::Token("INV".to_owned())).await;

    assert!(matches!(event, FlowEvent::LinkResolved(LinkOutcome::Linked(_))));
    assert!(driver.store().snapshot().is_authenticated);
    assert_eq!(sdk.sent(), vec![linked_message(&user("u5"))]);
}

#[tokio::test]
async fn link_outside_line_client_sends_no_message() {
    let transport = FakeTransport::new();
    transport.push_json(200, json!({ "success": true, "user": user("u5"), "accessToken": "A", "refreshToken": "R" }));
    let (driver, sdk) = driver_with(FakeSdk { in_client: false, ..FakeSdk::logged_in("T") }, &transport);

    driver.link(&LinkMethod::Token("INV".to_owned())).await;
    assert!(sdk.sent().is_empty());
}

#[tokio::test]
async fn rejected_link_leaves_store_untouched() {
    let transport = FakeTransport::new();
    transport.push_json(404, json!({ "success": false, "message": "Phone number not found" }));
    let (driver, sdk) = driver_with(FakeSdk::logged_in("T"), &transport);

    let event = driver.link(&LinkMethod::Phone("0812345678".to_owned())).await;

    assert_eq!(
        event,
        FlowEvent::LinkResolved(LinkOutcome::Rejected { status: 404, message: "Phone number not found".to_owned() })
    );
    assert!(!driver.store().snapshot().is_authenticated);
    assert!(sdk.sent().is_empty());
}

#[tokio::test]
async fn expired_line_token_on_link_asks_for_reopen() {
    let transport = FakeTransport::new();
    transport.push_json(401, json!({ "message": "Invalid LIFF token" }));
    let (driver, _) = driver_with(FakeSdk::logged_in("stale"), &transport);

    let event = driver.link(&LinkMethod::Token("INV".to_owned())).await;

    assert_eq!(event, FlowEvent::LinkFailed(LINE_SESSION_EXPIRED.to_owned()));
    assert!(!driver.store().snapshot().is_authenticated);
}

#[tokio::test]
async fn bad_phone_reports_validation_message() {
    let (driver, _) = driver_with(FakeSdk::logged_in("T"), &FakeTransport::new());
    let FlowEvent::LinkFailed(message) = driver.link(&LinkMethod::Phone("12ab".to_owned())).await else {
        panic!("expected failure");
    };
    assert!(message.contains("invalid characters"));
}

#[test]
fn login_and_close_delegate_to_sdk() {
    let (driver, sdk) = driver_with(FakeSdk::logged_out(), &FakeTransport::new());
    driver.login();
    driver.close();
    assert_eq!(sdk.logins.load(Ordering::SeqCst), 1);
    assert!(sdk.closed.load(Ordering::SeqCst));
}
