use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use shortlink::domain::entities::NewLink;
use shortlink::domain::repositories::LinkRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::PgLinkRepository;

fn new_link(code: &str) -> NewLink {
    NewLink {
        code: code.to_string(),
        long_url: "https://example.com".to_string(),
        user_id: None,
        expires_at: None,
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo.create(new_link("aB3dE9z")).await.unwrap();

    assert_eq!(link.code, "aB3dE9z");
    assert_eq!(link.long_url, "https://example.com");
    assert!(link.user_id.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_code_is_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("dup0001")).await.unwrap();
    let result = repo.create(new_link("dup0001")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_active_by_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("abc1234")).await.unwrap();

    let found = repo.find_active_by_code("abc1234", Utc::now()).await.unwrap();
    let missing = repo.find_active_by_code("zzz9999", Utc::now()).await.unwrap();

    assert_eq!(found.unwrap().long_url, "https://example.com");
    assert!(missing.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_expired_link_is_hidden(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let now = Utc::now();

    let mut link = new_link("expires");
    link.expires_at = Some(now + Duration::hours(1));
    repo.create(link).await.unwrap();

    assert!(repo.find_active_by_code("expires", now).await.unwrap().is_some());
    assert!(
        repo.find_active_by_code("expires", now + Duration::hours(2))
            .await
            .unwrap()
            .is_none()
    );
}
