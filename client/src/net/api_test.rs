use super::*;
use wire::ErrorBody;

fn status(status: u16, message: Option<&str>) -> ApiError {
    ApiError::Status { status, body: ErrorBody { message: message.map(str::to_owned), ..ErrorBody::default() } }
}

#[test]
fn bad_credentials_get_generic_text() {
    assert_eq!(login_error_message(&status(401, Some("user not found"))), "Invalid email or password.");
    assert_eq!(login_error_message(&status(400, None)), "Invalid email or password.");
}

#[test]
fn other_client_errors_surface_backend_message() {
    assert_eq!(login_error_message(&status(403, Some("Account disabled"))), "Account disabled");
    assert_eq!(login_error_message(&status(403, None)), "Sign-in failed.");
}

#[test]
fn server_and_network_errors_have_distinct_text() {
    assert_eq!(login_error_message(&status(503, None)), "The server is having trouble. Try again later.");
    assert_eq!(
        login_error_message(&ApiError::Transport("offline".to_owned())),
        "Cannot reach the server. Check your connection."
    );
    assert_eq!(login_error_message(&status(429, None)), "Too many attempts. Try again in a minute.");
}

#[tokio::test]
async fn native_store_is_offline_and_fails_closed() {
    let store = build_session_store(ApiConfig::default());
    assert!(!store.check_auth().await);
    let err = store.login("a@b.com", "pw").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(!store.snapshot().is_authenticated);
}
