use std::sync::Arc;

use actix_web::{http::StatusCode, ResponseError};

use crate::api::error::{Error, SystemError};
use crate::modules::user::model::SignUpModel;
use crate::modules::user::repository::UserRepository;
use crate::modules::user::service::UserService;
use crate::test::memory::UserRepositoryMem;

fn setup() -> (UserRepositoryMem, UserService) {
    let repo = UserRepositoryMem::default();
    let service = UserService::with_dependencies(Arc::new(repo.clone()));
    (repo, service)
}

fn sign_up(username: &str, email: &str) -> SignUpModel {
    SignUpModel {
        username: username.to_string(),
        email: email.to_string(),
        password: "correct horse".to_string(),
    }
}

#[tokio::test]
async fn register_stores_argon2_hash() {
    let (repo, service) = setup();

    let user = service.register(sign_up("alice", "alice@example.com")).await.unwrap();

    assert_eq!(user.username, "alice");
    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.password_hash.starts_with("$argon2"));
    assert_ne!(stored.password_hash, "correct horse");
}

#[tokio::test]
async fn register_rejects_taken_username_and_email() {
    let (_repo, service) = setup();
    service.register(sign_up("alice", "alice@example.com")).await.unwrap();

    let username = service.register(sign_up("Alice", "other@example.com")).await.unwrap_err();
    let email = service.register(sign_up("alicia", "ALICE@example.com")).await.unwrap_err();

    assert!(username.is_conflict());
    let response = Error::from(username);
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(response.to_string(), "Conflict: Username already exists");
    assert_eq!(Error::from(email).to_string(), "Conflict: Email already exists");
}

#[tokio::test]
async fn lookups_ignore_case() {
    let (_repo, service) = setup();
    let alice = service.register(sign_up("alice", "alice@example.com")).await.unwrap();

    let by_name = service.find_by_username("ALICE").await.unwrap();
    let by_email = service.find_by_email("Alice@Example.com").await.unwrap();

    assert_eq!(by_name, Some(alice.clone()));
    assert_eq!(by_email, Some(alice));
    assert!(service.find_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn get_and_delete_report_missing_users() {
    let (_repo, service) = setup();
    let alice = service.register(sign_up("alice", "alice@example.com")).await.unwrap();
    let bob = service.register(sign_up("bob", "bob@example.com")).await.unwrap();

    let listed: Vec<i64> = service.list().await.unwrap().into_iter().map(|u| u.id).collect();
    assert_eq!(listed, vec![alice.id, bob.id]);

    service.delete(alice.id).await.unwrap();

    assert!(matches!(
        service.get_by_id(alice.id).await,
        Err(SystemError::NotFound { entity: "user", .. })
    ));
    assert!(matches!(service.delete(alice.id).await, Err(SystemError::NotFound { .. })));
    assert_eq!(service.get_by_id(bob.id).await.unwrap(), bob);
}
