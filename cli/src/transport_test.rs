use super::*;

#[test]
fn methods_map_one_to_one() {
    assert_eq!(reqwest_method(Method::Get), reqwest::Method::GET);
    assert_eq!(reqwest_method(Method::Post), reqwest::Method::POST);
    assert_eq!(reqwest_method(Method::Put), reqwest::Method::PUT);
    assert_eq!(reqwest_method(Method::Patch), reqwest::Method::PATCH);
    assert_eq!(reqwest_method(Method::Delete), reqwest::Method::DELETE);
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let transport = ReqwestTransport::default();
    let err = transport
        .send(ApiRequest::new(Method::Get, "http://127.0.0.1:9/api/auth/me"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
