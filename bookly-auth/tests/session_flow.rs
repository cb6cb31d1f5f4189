//! End-to-end session flow against a stubbed API and file-backed storage
//!
//! Exercises the full lifecycle: sign in over HTTP, restart (a fresh manager
//! over the same storage directory), hydrate, and sign out.

use bookly_auth::{ApiClientConfig, FileKeyValueStore, HttpAuthClient, SessionManager};
use bookly_core::Credentials;
use std::sync::Arc;

const SESSION_BODY: &str =
    r#"{"token":"tok123","user":{"id":"1","name":"Ana","email":"a@b.com","avatar_url":null}}"#;

fn manager_for(server_url: &str, data_dir: &std::path::Path) -> SessionManager {
    let api = HttpAuthClient::new(ApiClientConfig::new(server_url)).unwrap();
    let store = FileKeyValueStore::new(data_dir).unwrap();

    SessionManager::new(Arc::new(api), Arc::new(store), "@Bookly")
}

#[tokio::test]
async fn test_sign_in_survives_restart_and_sign_out() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/sessions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SESSION_BODY)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();

    // First process lifetime: hydrate into nothing, then sign in
    {
        let manager = manager_for(&server.url(), dir.path());
        manager.hydrate().await.unwrap();
        assert_eq!(manager.current_user().await, None);

        manager
            .sign_in(&Credentials::new("a@b.com", "secret"))
            .await
            .unwrap();
        assert_eq!(manager.current_user().await.unwrap().name, "Ana");
    }

    // Second process lifetime: the session is restored from disk
    let manager = manager_for(&server.url(), dir.path());
    assert!(manager.is_loading().await);

    manager.hydrate().await.unwrap();
    assert!(!manager.is_loading().await);

    let session = manager.current_session().await.unwrap();
    assert_eq!(session.token, "tok123");
    assert_eq!(session.user.email, "a@b.com");

    // Sign out removes the persisted keys for good
    manager.sign_out().await.unwrap();
    assert_eq!(manager.current_user().await, None);

    let manager = manager_for(&server.url(), dir.path());
    manager.hydrate().await.unwrap();
    assert_eq!(manager.current_user().await, None);
}

#[tokio::test]
async fn test_rejected_sign_in_persists_nothing() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/sessions")
        .with_status(401)
        .with_body(r#"{"error":"invalid credentials"}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let manager = manager_for(&server.url(), dir.path());
    manager.hydrate().await.unwrap();

    let result = manager.sign_in(&Credentials::new("a@b.com", "wrong")).await;
    assert!(result.is_err());
    assert_eq!(manager.current_user().await, None);

    // A fresh manager over the same directory finds nothing to restore
    let manager = manager_for(&server.url(), dir.path());
    manager.hydrate().await.unwrap();
    assert_eq!(manager.current_user().await, None);
}
