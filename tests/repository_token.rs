mod common;

use sqlx::PgPool;
use std::sync::Arc;

use linkly::domain::repositories::TokenRepository;
use linkly::infrastructure::persistence::PgTokenRepository;

#[sqlx::test]
async fn test_create_and_resolve(pool: PgPool) {
    let account = common::create_test_account(&pool, "shop@example.com", "free").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token(account, "Production API", "hash-abc")
        .await
        .unwrap();

    assert_eq!(token.account_id, account);
    assert_eq!(token.name, "Production API");
    assert!(token.revoked_at.is_none());

    let resolved = repo.resolve_account("hash-abc").await.unwrap();
    assert_eq!(resolved, Some(account));
}

#[sqlx::test]
async fn test_resolve_unknown_hash(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let resolved = repo.resolve_account("no-such-hash").await.unwrap();

    assert_eq!(resolved, None);
}

#[sqlx::test]
async fn test_revoked_token_does_not_resolve(pool: PgPool) {
    let account = common::create_test_account(&pool, "shop@example.com", "free").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token(account, "Old token", "hash-old")
        .await
        .unwrap();

    let revoked = repo.revoke_token("Old token").await.unwrap();
    assert_eq!(revoked, 1);

    let resolved = repo.resolve_account("hash-old").await.unwrap();
    assert_eq!(resolved, None);

    // Revoking again is a no-op.
    assert_eq!(repo.revoke_token("Old token").await.unwrap(), 0);
}

#[sqlx::test]
async fn test_update_last_used(pool: PgPool) {
    let account = common::create_test_account(&pool, "shop@example.com", "free").await;
    let repo = PgTokenRepository::new(Arc::new(pool.clone()));

    repo.create_token(account, "API", "hash-xyz").await.unwrap();
    repo.update_last_used("hash-xyz").await.unwrap();

    let last_used: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT last_used_at FROM api_tokens WHERE token_hash = $1")
            .bind("hash-xyz")
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(last_used.is_some());
}

#[sqlx::test]
async fn test_list_tokens(pool: PgPool) {
    let account = common::create_test_account(&pool, "shop@example.com", "free").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token(account, "First", "hash-1").await.unwrap();
    repo.create_token(account, "Second", "hash-2").await.unwrap();

    let tokens = repo.list_tokens().await.unwrap();

    assert_eq!(tokens.len(), 2);
}
