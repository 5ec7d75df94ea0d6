//! Integration tests for HttpNoteStore using wiremock.
//!
//! These tests verify the REST client behavior against a mock backend.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use textsnap_auth::OwnerId;
use textsnap_notes::{
    HttpNoteStore, NoteCreateRequest, NoteId, NoteStore, NoteUpdateRequest, StoreError,
};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to build a stored note row as the backend would return it
fn note_row(id: &str, title: &str, content: &str, owner: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "content": content,
        "slug": format!("{}-ab12cd34", title.to_lowercase()),
        "user": owner,
        "created_at": "2026-08-20T12:00:00Z",
        "updated_at": "2026-08-20T12:00:00Z"
    })
}

fn create_request(title: &str, content: &str, owner: &str) -> NoteCreateRequest {
    NoteCreateRequest {
        title: title.to_string(),
        content: content.to_string(),
        slug: format!("{}-ab12cd34", title.to_lowercase()),
        owner: OwnerId::from(owner),
    }
}

#[tokio::test]
async fn select_is_scoped_to_the_owner() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/notes"))
        .and(query_param("user", "eq.u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            note_row("1", "First", "a", "u1"),
            note_row("2", "Second", "b", "u1"),
        ])))
        .mount(&mock_server)
        .await;

    let store = HttpNoteStore::new(&mock_server.uri(), None).unwrap();
    let notes = store.select(&OwnerId::from("u1")).await.unwrap();

    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, NoteId::from("1"));
    assert_eq!(notes[0].title, "First");
    assert_eq!(notes[1].owner, OwnerId::from("u1"));
}

#[tokio::test]
async fn select_empty_owner_set() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let store = HttpNoteStore::new(&mock_server.uri(), None).unwrap();
    let notes = store.select(&OwnerId::from("u1")).await.unwrap();

    assert!(notes.is_empty());
}

#[tokio::test]
async fn insert_returns_the_stored_row_with_assigned_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/notes"))
        .and(header("Prefer", "return=representation"))
        .and(body_partial_json(serde_json::json!([{
            "title": "Groceries",
            "content": "milk, eggs",
            "user": "u1"
        }])))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!([note_row("17", "Groceries", "milk, eggs", "u1")])),
        )
        .mount(&mock_server)
        .await;

    let store = HttpNoteStore::new(&mock_server.uri(), None).unwrap();
    let stored = store
        .insert(&create_request("Groceries", "milk, eggs", "u1"))
        .await
        .unwrap();

    assert_eq!(stored.id, NoteId::from("17"));
    assert_eq!(stored.title, "Groceries");
}

#[tokio::test]
async fn insert_with_empty_representation_is_invalid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/notes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let store = HttpNoteStore::new(&mock_server.uri(), None).unwrap();
    let result = store.insert(&create_request("T", "c", "u1")).await;

    assert!(matches!(result, Err(StoreError::InvalidResponse(_))));
}

#[tokio::test]
async fn update_filters_by_id_and_owner() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/notes"))
        .and(query_param("id", "eq.42"))
        .and(query_param("user", "eq.u1"))
        .and(body_partial_json(serde_json::json!({
            "title": "New",
            "content": "y"
        })))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let store = HttpNoteStore::new(&mock_server.uri(), None).unwrap();
    let fields = NoteUpdateRequest {
        title: Some("New".to_string()),
        content: Some("y".to_string()),
        slug: Some("new-ab12cd34".to_string()),
    };
    let result = store
        .update(&OwnerId::from("u1"), &NoteId::from("42"), &fields)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn delete_filters_by_id_and_owner() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/notes"))
        .and(query_param("id", "eq.7"))
        .and(query_param("user", "eq.u1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let store = HttpNoteStore::new(&mock_server.uri(), None).unwrap();
    let result = store.delete(&OwnerId::from("u1"), &NoteId::from("7")).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn backend_errors_map_to_api_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/notes"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "No API key found in request"
        })))
        .mount(&mock_server)
        .await;

    let store = HttpNoteStore::new(&mock_server.uri(), None).unwrap();
    let result = store.select(&OwnerId::from("u1")).await;

    match result {
        Err(StoreError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert!(message.contains("API key"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn requests_carry_api_key_and_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/notes"))
        .and(header("apikey", "anon-key"))
        .and(header("Authorization", "Bearer user-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let store = HttpNoteStore::new(&mock_server.uri(), Some("anon-key".to_string()))
        .unwrap()
        .with_access_token("user-jwt");
    let result = store.select(&OwnerId::from("u1")).await;

    // If either header were missing, the mock wouldn't match and we'd get an error
    assert!(result.is_ok());
}

#[tokio::test]
async fn no_retry_on_server_error() {
    let mock_server = MockServer::start().await;

    // A failed call surfaces once; the store never retries on its own
    Mock::given(method("GET"))
        .and(path("/rest/v1/notes"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = HttpNoteStore::new(&mock_server.uri(), None).unwrap();
    let result = store.select(&OwnerId::from("u1")).await;

    assert!(matches!(result, Err(StoreError::Api { status: 500, .. })));
}
