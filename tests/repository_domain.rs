mod common;

use sqlx::PgPool;
use std::sync::Arc;

use linkly::domain::entities::{CnameRecord, NewDomain};
use linkly::domain::repositories::DomainRepository;
use linkly::error::AppError;
use linkly::infrastructure::persistence::PgDomainRepository;

use common::CNAME_TARGET;

fn new_domain(owner_id: i64, hostname: &str) -> NewDomain {
    NewDomain {
        hostname: hostname.to_string(),
        owner_id,
        cname: CnameRecord::for_hostname(hostname, CNAME_TARGET),
    }
}

#[sqlx::test]
async fn test_create_and_find(pool: PgPool) {
    let owner = common::create_test_account(&pool, "shop@example.com", "free").await;
    let repo = PgDomainRepository::new(Arc::new(pool));

    let created = repo
        .create(new_domain(owner, "shop.example.com"))
        .await
        .unwrap();

    assert_eq!(created.hostname, "shop.example.com");
    assert_eq!(created.owner_id, owner);
    assert_eq!(created.cname.name, "shop");
    assert_eq!(created.cname.value, CNAME_TARGET);
    assert!(!created.is_verified);

    let found = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.hostname, created.hostname);
    assert_eq!(found.cname, created.cname);

    let by_hostname = repo
        .find_by_hostname(owner, "shop.example.com")
        .await
        .unwrap();
    assert!(by_hostname.is_some());

    let missing = repo
        .find_by_hostname(owner, "other.example.com")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
async fn test_duplicate_hostname_same_owner_rejected(pool: PgPool) {
    let owner = common::create_test_account(&pool, "shop@example.com", "paid").await;
    let repo = PgDomainRepository::new(Arc::new(pool));

    repo.create(new_domain(owner, "shop.example.com"))
        .await
        .unwrap();

    let result = repo.create(new_domain(owner, "shop.example.com")).await;

    assert!(matches!(
        result.unwrap_err(),
        AppError::DuplicateDomain { .. }
    ));
}

#[sqlx::test]
async fn test_same_hostname_different_owners_allowed(pool: PgPool) {
    let first = common::create_test_account(&pool, "first@example.com", "free").await;
    let second = common::create_test_account(&pool, "second@example.com", "free").await;
    let repo = PgDomainRepository::new(Arc::new(pool));

    repo.create(new_domain(first, "shop.example.com"))
        .await
        .unwrap();
    let result = repo.create(new_domain(second, "shop.example.com")).await;

    assert!(result.is_ok());
}

#[sqlx::test]
async fn test_count_by_owner(pool: PgPool) {
    let owner = common::create_test_account(&pool, "shop@example.com", "paid").await;
    let other = common::create_test_account(&pool, "other@example.com", "free").await;
    let repo = PgDomainRepository::new(Arc::new(pool));

    assert_eq!(repo.count_by_owner(owner).await.unwrap(), 0);

    repo.create(new_domain(owner, "a.example.com")).await.unwrap();
    repo.create(new_domain(owner, "b.example.com")).await.unwrap();
    repo.create(new_domain(other, "c.example.com")).await.unwrap();

    assert_eq!(repo.count_by_owner(owner).await.unwrap(), 2);
    assert_eq!(repo.count_by_owner(other).await.unwrap(), 1);
}

#[sqlx::test]
async fn test_mark_verified_is_monotonic(pool: PgPool) {
    let owner = common::create_test_account(&pool, "shop@example.com", "free").await;
    let repo = PgDomainRepository::new(Arc::new(pool));

    let created = repo
        .create(new_domain(owner, "shop.example.com"))
        .await
        .unwrap();
    assert!(!created.is_verified);

    let verified = repo.mark_verified(created.id).await.unwrap();
    assert!(verified.is_verified);

    // Re-marking keeps the flag set.
    let again = repo.mark_verified(created.id).await.unwrap();
    assert!(again.is_verified);

    let found = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert!(found.is_verified);
}

#[sqlx::test]
async fn test_mark_verified_missing_domain(pool: PgPool) {
    let repo = PgDomainRepository::new(Arc::new(pool));

    let result = repo.mark_verified(9999).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
}

#[sqlx::test]
async fn test_list_by_owner_and_verified_filter(pool: PgPool) {
    let owner = common::create_test_account(&pool, "shop@example.com", "paid").await;
    let repo = PgDomainRepository::new(Arc::new(pool));

    let first = repo
        .create(new_domain(owner, "a.example.com"))
        .await
        .unwrap();
    repo.create(new_domain(owner, "b.example.com")).await.unwrap();
    repo.mark_verified(first.id).await.unwrap();

    let all = repo.list_by_owner(owner).await.unwrap();
    assert_eq!(all.len(), 2);

    let verified = repo.list_verified_by_owner(owner).await.unwrap();
    assert_eq!(verified.len(), 1);
    assert_eq!(verified[0].hostname, "a.example.com");
    assert!(verified[0].is_verified);
}
