use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use shortlink::domain::entities::{NewAccount, NewSession};
use shortlink::domain::repositories::{AccountRepository, SessionRepository};
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::{PgAccountRepository, PgSessionRepository};

fn account(username: &str) -> NewAccount {
    NewAccount {
        name: "Alice".to_string(),
        username: username.to_string(),
        password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".to_string(),
    }
}

fn session(token_hash: &str) -> NewSession {
    NewSession {
        token_hash: token_hash.to_string(),
        expires_at: Utc::now() + Duration::days(7),
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_with_session(pool: PgPool) {
    let pool = Arc::new(pool);
    let accounts = PgAccountRepository::new(pool.clone());
    let sessions = PgSessionRepository::new(pool);

    let created = accounts
        .create_with_session(account("alice"), session("digest-1"))
        .await
        .unwrap();

    assert_eq!(created.username, "alice");

    let stored = sessions
        .find_active("digest-1", Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.user_id, created.id);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_username_leaves_no_session(pool: PgPool) {
    let pool = Arc::new(pool);
    let accounts = PgAccountRepository::new(pool.clone());
    let sessions = PgSessionRepository::new(pool);

    accounts
        .create_with_session(account("alice"), session("digest-1"))
        .await
        .unwrap();

    let result = accounts
        .create_with_session(account("alice"), session("digest-2"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
    assert!(
        sessions
            .find_active("digest-2", Utc::now())
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_registration_single_winner(pool: PgPool) {
    let accounts = PgAccountRepository::new(Arc::new(pool));

    let (a, b) = tokio::join!(
        accounts.create_with_session(account("bob"), session("digest-a")),
        accounts.create_with_session(account("bob"), session("digest-b")),
    );

    let winners = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(winners, 1);
    assert_eq!(accounts.list().await.unwrap().len(), 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_username_ignores_case(pool: PgPool) {
    let accounts = PgAccountRepository::new(Arc::new(pool));
    accounts
        .create_with_session(account("alice"), session("digest-1"))
        .await
        .unwrap();

    let found = accounts.find_by_username("ALICE").await.unwrap();

    assert_eq!(found.unwrap().username, "alice");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_password_hash(pool: PgPool) {
    let accounts = PgAccountRepository::new(Arc::new(pool));
    let created = accounts
        .create_with_session(account("alice"), session("digest-1"))
        .await
        .unwrap();

    accounts
        .update_password_hash(created.id, "$argon2id$new")
        .await
        .unwrap();

    let reloaded = accounts.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(reloaded.password_hash, "$argon2id$new");

    let missing = accounts.update_password_hash(created.id + 100, "x").await;
    assert!(matches!(missing, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_check_connection(pool: PgPool) {
    let accounts = PgAccountRepository::new(Arc::new(pool));

    assert!(accounts.check_connection().await.is_ok());
}
