//! HTTP-level tests for the REST backend, against a local mock server.

#![allow(clippy::unwrap_used)]

use gatherly_platform::{
    Accounts, AdminConfig, Collections, FileBuckets, Permission, PlatformConfig, PlatformError,
    RestBackend, Role,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(endpoint: String) -> PlatformConfig {
    PlatformConfig::new(endpoint, "proj-test".to_string())
        .with_database_id("db-test".to_string())
        .with_events_collection_id("events".to_string())
        .with_banner_bucket_id("banners".to_string())
        .with_app_url("https://app.example.com".to_string())
}

#[tokio::test]
async fn email_session_posts_credentials_with_project_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/account/sessions/email"))
        .and(header("X-Gatherly-Project", "proj-test"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "password": "hunter2!",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "$id": "sess-1",
            "userId": "user-1",
            "provider": "email",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RestBackend::new(test_config(server.uri()));
    let session = backend
        .create_email_session("ada@example.com", "hunter2!")
        .await
        .unwrap();

    assert_eq!(session.id, "sess-1");
    assert_eq!(session.user_id, "user-1");
    assert_eq!(session.provider, "email");
}

#[tokio::test]
async fn get_account_maps_401_to_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "User (role: guests) missing scope (account)",
        })))
        .mount(&server)
        .await;

    let backend = RestBackend::new(test_config(server.uri()));
    let result = backend.get_account().await;

    assert!(matches!(result, Err(PlatformError::Unauthorized)));
}

#[tokio::test]
async fn create_collection_sends_wire_permission_tokens_and_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/databases/db-test/collections"))
        .and(header("X-Gatherly-Key", "server-key"))
        .and(body_json(json!({
            "collectionId": "reg_evt1",
            "name": "RustConf",
            "permissions": [
                "read(\"any\")",
                "update(\"user:owner-1\")",
            ],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "$id": "reg_evt1",
            "name": "RustConf",
            "$permissions": ["read(\"any\")", "update(\"user:owner-1\")"],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RestBackend::with_key(AdminConfig::new(
        test_config(server.uri()),
        "server-key".to_string(),
    ));
    let collection = backend
        .create_collection(
            "reg_evt1",
            "RustConf",
            &[
                Permission::read(Role::any()),
                Permission::update(Role::user("owner-1")),
            ],
        )
        .await
        .unwrap();

    assert_eq!(collection.id, "reg_evt1");
    assert_eq!(collection.permissions.len(), 2);
}

#[tokio::test]
async fn create_collection_maps_409_to_conflict() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/databases/db-test/collections"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "message": "collection already exists" })),
        )
        .mount(&server)
        .await;

    let backend = RestBackend::with_key(AdminConfig::new(
        test_config(server.uri()),
        "server-key".to_string(),
    ));
    let result = backend.create_collection("reg_evt1", "RustConf", &[]).await;

    assert!(matches!(result, Err(PlatformError::Conflict { .. })));
}

#[tokio::test]
async fn create_document_wraps_payload_in_data_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/databases/db-test/collections/events/documents"))
        .and(body_json(json!({
            "documentId": "doc-1",
            "data": { "eventname": "RustConf", "attendees": 300 },
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "$id": "doc-1",
            "$collectionId": "events",
            "eventname": "RustConf",
            "attendees": 300,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RestBackend::new(test_config(server.uri()));
    let document = backend
        .create_document(
            "events",
            "doc-1",
            json!({ "eventname": "RustConf", "attendees": 300 }),
        )
        .await
        .unwrap();

    assert_eq!(document.id, "doc-1");
    assert_eq!(document.data["eventname"], "RustConf");
}

#[tokio::test]
async fn file_upload_round_trips_stored_file_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/buckets/banners/files"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "$id": "file-1",
            "bucketId": "banners",
            "name": "banner.png",
            "sizeOriginal": 4,
            "mimeType": "image/png",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RestBackend::new(test_config(server.uri()));
    let stored = backend
        .create_file("banners", "file-1", "banner.png", vec![1, 2, 3, 4])
        .await
        .unwrap();

    assert_eq!(stored.id, "file-1");
    assert_eq!(stored.size, 4);
    assert_eq!(stored.mime_type, "image/png");
}

#[tokio::test]
async fn delete_session_accepts_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/account/sessions/sess-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RestBackend::new(test_config(server.uri()));
    assert!(backend.delete_session("sess-1").await.is_ok());
}

#[tokio::test]
async fn rate_limit_is_surfaced_as_retryable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/account/tokens/magic-url"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "message": "rate limit exceeded",
        })))
        .mount(&server)
        .await;

    let backend = RestBackend::new(test_config(server.uri()));
    let result = backend
        .create_magic_url_token("user-1", "ada@example.com", "https://app.example.com/login/success")
        .await;

    match result {
        Err(err) => assert!(err.is_retryable()),
        Ok(_) => unreachable!("expected a rate-limit error"),
    }
}
