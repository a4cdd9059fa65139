//! Integration tests for the Redis-backed key-value store
//!
//! These tests need a Redis server at `REDIS_URL` (default
//! `redis://localhost:6379`) and are ignored by default.

use common::{
    KeyValueStore, RedisConfig, RedisStore,
    storage::{AUTH_TOKEN_KEY, LAST_SYNC_KEY},
};

fn test_store() -> RedisStore {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    RedisStore::new(&RedisConfig {
        url,
        namespace: format!("medtrack-test-{}", uuid::Uuid::new_v4()),
    })
    .expect("valid redis url")
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_store_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let store = test_store();

    assert!(store.health_check().await?, "Redis health check failed");

    store.set(AUTH_TOKEN_KEY, "t1").await?;
    assert_eq!(store.get(AUTH_TOKEN_KEY).await?, Some("t1".to_string()));

    store.delete(AUTH_TOKEN_KEY).await?;
    assert_eq!(store.get(AUTH_TOKEN_KEY).await?, None);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_store_namespaces_are_isolated() -> Result<(), Box<dyn std::error::Error>> {
    let first = test_store();
    let second = test_store();

    first.set(LAST_SYNC_KEY, "100").await?;
    assert_eq!(second.get(LAST_SYNC_KEY).await?, None);

    first.delete(LAST_SYNC_KEY).await?;
    Ok(())
}
