//! LINE adapters driven against an in-process fake of the LINE APIs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use billsplit_core::bill::ChatType;
use billsplit_core::message::Message;
use billsplit_line::{
    ChatGateway, IdentityVerifier, LineClient, LineError, LiffVerifier, MessagingClient,
};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct FakeLine {
    pushed: Arc<Mutex<Vec<Value>>>,
}

async fn verify(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    match params.get("access_token").map(String::as_str) {
        Some("good") => (
            StatusCode::OK,
            Json(json!({ "client_id": "liff-1", "sub": "Usub", "expires_in": 100 })),
        )
            .into_response(),
        Some("no-sub" | "no-user") => (
            StatusCode::OK,
            Json(json!({ "client_id": "liff-1", "expires_in": 100 })),
        )
            .into_response(),
        Some("other-channel") => (
            StatusCode::OK,
            Json(json!({ "client_id": "liff-2", "sub": "Usub" })),
        )
            .into_response(),
        _ => (StatusCode::BAD_REQUEST, "invalid_request").into_response(),
    }
}

async fn profile(headers: HeaderMap) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    match auth {
        "Bearer good" => Json(json!({ "userId": "Usub", "displayName": "Nok" })).into_response(),
        "Bearer no-sub" => {
            Json(json!({ "userId": "Uprofile", "displayName": "Ann" })).into_response()
        }
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn member_ids(
    Path((_kind, chat_id)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let start = params.get("start").map(String::as_str);
    match (chat_id.as_str(), start) {
        ("C1", None) => Json(json!({ "memberIds": ["U1", "U2"], "next": "page2" })).into_response(),
        ("C1", Some("page2")) => Json(json!({ "memberIds": ["U2", "U3"] })).into_response(),
        ("C2", None) => Json(json!({ "memberIds": ["U9"], "next": "broken" })).into_response(),
        _ => StatusCode::FORBIDDEN.into_response(),
    }
}

async fn member_profile(Path((_kind, _chat, user_id)): Path<(String, String, String)>) -> impl IntoResponse {
    if user_id == "U1" {
        Json(json!({ "userId": "U1", "displayName": "One" })).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn push(State(state): State<FakeLine>, Json(body): Json<Value>) -> impl IntoResponse {
    if body["to"] == "Cfail" {
        return (StatusCode::BAD_REQUEST, "bad to").into_response();
    }
    state.pushed.lock().unwrap().push(body);
    Json(json!({})).into_response()
}

async fn spawn_fake() -> (String, FakeLine) {
    let state = FakeLine::default();
    let app = Router::new()
        .route("/oauth2/v2.1/verify", get(verify))
        .route("/v2/profile", get(profile))
        .route("/v2/bot/{kind}/{chat_id}/members/ids", get(member_ids))
        .route("/v2/bot/{kind}/{chat_id}/member/{user_id}", get(member_profile))
        .route("/v2/bot/message/push", post(push))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), state)
}

fn client(base_url: &str) -> LineClient {
    LineClient::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_verify_uses_sub_and_profile_name() {
    let (base, _) = spawn_fake().await;
    let verifier = LiffVerifier::new(client(&base), Some("liff-1".into()));

    let user = verifier.verify("good").await.unwrap();
    assert_eq!(user.user_id, "Usub");
    assert_eq!(user.display_name.as_deref(), Some("Nok"));
    assert_eq!(user.token, "good");
}

#[tokio::test]
async fn test_verify_falls_back_to_profile_user_id() {
    let (base, _) = spawn_fake().await;
    let verifier = LiffVerifier::new(client(&base), Some("liff-1".into()));

    let user = verifier.verify("no-sub").await.unwrap();
    assert_eq!(user.user_id, "Uprofile");
    assert_eq!(user.display_name.as_deref(), Some("Ann"));
}

#[tokio::test]
async fn test_verify_without_any_user_id_fails() {
    let (base, _) = spawn_fake().await;
    let verifier = LiffVerifier::new(client(&base), Some("liff-1".into()));

    let err = verifier.verify("no-user").await.unwrap_err();
    assert!(matches!(err, LineError::UnresolvedUser));
}

#[tokio::test]
async fn test_verify_rejects_other_channel_and_missing_config() {
    let (base, _) = spawn_fake().await;

    let verifier = LiffVerifier::new(client(&base), Some("liff-1".into()));
    let err = verifier.verify("other-channel").await.unwrap_err();
    assert!(matches!(err, LineError::ClientIdMismatch));

    let unconfigured = LiffVerifier::new(client(&base), None);
    let err = unconfigured.verify("good").await.unwrap_err();
    assert!(matches!(err, LineError::ClientIdMismatch));
}

#[tokio::test]
async fn test_verify_rejected_token_reports_status_and_body() {
    let (base, _) = spawn_fake().await;
    let verifier = LiffVerifier::new(client(&base), Some("liff-1".into()));

    let err = verifier.verify("expired").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid token (400) invalid_request");
}

#[tokio::test]
async fn test_verify_transport_failure() {
    // Nothing listens on port 9 of localhost.
    let verifier = LiffVerifier::new(client("http://127.0.0.1:9"), Some("liff-1".into()));
    let err = verifier.verify("good").await.unwrap_err();
    assert!(matches!(err, LineError::Transport(_)));
}

#[tokio::test]
async fn test_member_ids_follow_pagination_and_dedupe() {
    let (base, _) = spawn_fake().await;
    let messaging = MessagingClient::new(client(&base), "token".into());

    let ids = messaging.list_member_ids(ChatType::Group, "C1").await;
    assert_eq!(ids, vec!["U1", "U2", "U3"]);
}

#[tokio::test]
async fn test_member_ids_keep_pages_before_a_failure() {
    let (base, _) = spawn_fake().await;
    let messaging = MessagingClient::new(client(&base), "token".into());

    assert_eq!(messaging.list_member_ids(ChatType::Group, "C2").await, vec!["U9"]);
    assert!(messaging.list_member_ids(ChatType::Room, "R404").await.is_empty());
}

#[tokio::test]
async fn test_member_profile_failures_are_none() {
    let (base, _) = spawn_fake().await;
    let messaging = MessagingClient::new(client(&base), "token".into());

    let profile = messaging
        .member_profile(ChatType::Group, "C1", "U1")
        .await
        .unwrap();
    assert_eq!(profile.display_name.as_deref(), Some("One"));
    assert!(
        messaging
            .member_profile(ChatType::Group, "C1", "U2")
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_ids_with_path_characters_never_reach_line() {
    let (base, _) = spawn_fake().await;
    let messaging = MessagingClient::new(client(&base), "token".into());

    assert!(
        messaging
            .list_member_ids(ChatType::Group, "C1/members/ids?start=page2#")
            .await
            .is_empty()
    );
    assert!(
        messaging
            .member_profile(ChatType::Group, "C1", "../../C1/member/U1")
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_push_message_success_and_api_error() {
    let (base, state) = spawn_fake().await;
    let messaging = MessagingClient::new(client(&base), "token".into());

    messaging
        .push_message("C1", &[Message::text("hello")])
        .await
        .unwrap();
    let pushed = state.pushed.lock().unwrap().clone();
    assert_eq!(
        pushed,
        vec![json!({ "to": "C1", "messages": [{ "type": "text", "text": "hello" }] })]
    );

    let err = messaging
        .push_message("Cfail", &[Message::text("hello")])
        .await
        .unwrap_err();
    assert!(matches!(err, LineError::Api { status: 400, .. }));
}
