//! Integration tests for the DevFlow API client against a mock backend

use std::sync::{Arc, Mutex};

use devflow::domain::{PromptType, Role, Session, StoryStatus};
use devflow_client::auth::LoginRequest;
use devflow_client::user_stories::StoryListQuery;
use devflow_client::{AnonymousDid, ApiError, DevFlowClient, DidStore, StaticDid, DID_HEADER};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> DevFlowClient {
    DevFlowClient::new(&server.uri(), Arc::new(StaticDid::new("did-123")))
        .expect("client construction")
}

fn template_body(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "default-optimization",
        "type": "REQUIREMENT_OPTIMIZATION",
        "level": "SYSTEM",
        "content": "Rewrite the requirement as a user story.",
        "enabled": true,
        "isDefault": true,
        "createdAt": "2024-01-15T10:30:00"
    })
}

#[tokio::test]
async fn effective_template_sends_type_and_project_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/prompt-templates/effective"))
        .and(query_param("type", "REQUIREMENT_OPTIMIZATION"))
        .and(query_param("projectId", "proj-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(template_body("t-1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let template = client
        .effective_template(PromptType::RequirementOptimization, Some("proj-1"))
        .await
        .expect("effective template");

    assert_eq!(template.id, "t-1");
    assert_eq!(template.template_type, PromptType::RequirementOptimization);
    assert!(template.enabled);
}

#[tokio::test]
async fn unauthorized_login_surfaces_bad_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Invalid username or password",
            "user": null
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = LoginRequest {
        username: "alice".to_string(),
        password: "wrong".to_string(),
        remember_me: false,
    };

    let error = client.login(&request).await.expect_err("login must fail");
    assert!(matches!(error, ApiError::BadCredentials));
}

#[tokio::test]
async fn unauthorized_elsewhere_surfaces_session_expired() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user-stories"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client
        .list_user_stories(&StoryListQuery::default())
        .await
        .expect_err("list must fail");

    assert!(matches!(error, ApiError::SessionExpired));
}

#[tokio::test]
async fn did_header_is_attached_from_the_store() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header(DID_HEADER, "did-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u-1",
            "username": "alice",
            "email": "alice@example.com",
            "role": "OPERATOR",
            "projectIds": ["p-1"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user = client.me().await.expect("me");

    assert_eq!(user.username, "alice");
    assert_eq!(user.role, Role::Operator);
}

#[tokio::test]
async fn did_header_is_omitted_without_identity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u-1",
            "username": "alice",
            "role": "USER"
        })))
        .mount(&server)
        .await;

    let client =
        DevFlowClient::new(&server.uri(), Arc::new(AnonymousDid)).expect("client construction");
    client.me().await.expect("me");

    let requests = server.received_requests().await.expect("recorded requests");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get(DID_HEADER).is_none());
}

/// Identity store whose value can change between calls
struct SwappableDid(Mutex<Option<String>>);

impl DidStore for SwappableDid {
    fn current_did(&self) -> Option<String> {
        self.0.lock().unwrap().clone()
    }
}

#[tokio::test]
async fn did_header_tracks_the_store_between_calls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u-1",
            "username": "alice",
            "role": "USER"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(SwappableDid(Mutex::new(None)));
    let client =
        DevFlowClient::new(&server.uri(), store.clone()).expect("client construction");

    client.me().await.expect("me without identity");
    *store.0.lock().unwrap() = Some("did-456".to_string());
    client.me().await.expect("me with identity");

    let requests = server.received_requests().await.expect("recorded requests");
    assert_eq!(requests.len(), 2);
    assert!(requests[0].headers.get(DID_HEADER).is_none());
    assert_eq!(
        requests[1]
            .headers
            .get(DID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some("did-456")
    );
}

#[tokio::test]
async fn login_session_populates_and_logout_clears() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "ok",
            "user": {
                "id": "u-1",
                "username": "alice",
                "email": "alice@example.com",
                "role": "ADMIN",
                "projectIds": ["p-1", "p-2"]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut session = Session::new();

    let request = LoginRequest {
        username: "alice".to_string(),
        password: "secret".to_string(),
        remember_me: true,
    };
    client
        .login_session(&request, &mut session)
        .await
        .expect("login");

    assert!(session.is_authenticated());
    assert_eq!(session.id.as_deref(), Some("u-1"));
    assert_eq!(session.email.as_deref(), Some("alice@example.com"));
    assert_eq!(session.role, Some(Role::Admin));
    assert_eq!(session.project_ids, vec!["p-1", "p-2"]);

    client
        .logout_session(&mut session)
        .await
        .expect("logout");
    assert!(!session.is_authenticated());
    assert_eq!(session, Session::default());
}

#[tokio::test]
async fn failed_logout_leaves_the_session_intact() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_string("logout failed"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut session = Session::new();
    session.login("u-1", "alice", "a@b.c", Role::User, vec![]);

    let error = client
        .logout_session(&mut session)
        .await
        .expect_err("logout must fail");

    assert!(matches!(error, ApiError::Api { .. }));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn list_user_stories_unwraps_the_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user-stories"))
        .and(query_param("projectId", "p-1"))
        .and(query_param("status", "IN_PROGRESS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{
                "id": "s-1",
                "title": "Checkout flow",
                "projectId": "p-1",
                "originalRequirement": "Users should be able to pay",
                "status": "IN_PROGRESS",
                "priority": "HIGH",
                "ownerId": "u-1",
                "createdAt": "2024-02-01T09:00:00"
            }],
            "total": 1
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = StoryListQuery {
        project_id: Some("p-1".to_string()),
        status: Some(StoryStatus::InProgress),
        ..StoryListQuery::default()
    };
    let page = client.list_user_stories(&query).await.expect("list");

    assert_eq!(page.total, 1);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].status, StoryStatus::InProgress);
    assert!(page.data[0].created_at.is_some());
}

#[tokio::test]
async fn status_patch_sends_only_the_status() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/user-stories/s-1/status"))
        .and(body_json(json!({ "status": "DONE" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": "s-1",
                "title": "Checkout flow",
                "originalRequirement": "Users should be able to pay",
                "status": "DONE",
                "ownerId": "u-1"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let story = client
        .update_user_story_status("s-1", StoryStatus::Done)
        .await
        .expect("status patch");

    assert_eq!(story.status, StoryStatus::Done);
}

#[tokio::test]
async fn import_template_downloads_raw_bytes() {
    let server = MockServer::start().await;

    let blob = vec![0x50, 0x4b, 0x03, 0x04];
    Mock::given(method("GET"))
        .and(path("/user-stories/batch-import/template"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(blob.clone()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let bytes = client.download_import_template().await.expect("download");

    assert_eq!(bytes, blob);
}

#[tokio::test]
async fn server_error_message_is_propagated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "project name already exists"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = devflow_client::projects::CreateProjectRequest {
        name: "dup".to_string(),
        ..Default::default()
    };

    let error = client.create_project(&request).await.expect_err("create must fail");
    match error {
        ApiError::Api { status, message } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message, "project name already exists");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn delete_template_accepts_an_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/prompt-templates/t-9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.delete_template("t-9").await.expect("delete");
}
