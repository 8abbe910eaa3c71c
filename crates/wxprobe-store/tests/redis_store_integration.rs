use jiff::{SignedDuration, Timestamp};
use wxprobe_core::{Credential, CredentialStore};
use wxprobe_store::RedisCredentialStore;
use wxprobe_test_infra::redis::RedisServer;

/// Test fixture that keeps the Redis container alive for the test's duration.
struct RedisFixture {
    #[allow(dead_code)]
    server: RedisServer,
    url: String,
}

impl RedisFixture {
    async fn start() -> Self {
        let server = RedisServer::start()
            .await
            .expect("Failed to start Redis container");
        let url = server.url().await.expect("Failed to get Redis url");
        Self { server, url }
    }

    async fn store(&self) -> RedisCredentialStore {
        RedisCredentialStore::connect(&self.url)
            .await
            .expect("Failed to connect to Redis")
    }
}

fn credential(token: &str) -> Credential {
    Credential::issue(token, Timestamp::now(), SignedDuration::from_secs(7200))
}

#[tokio::test]
async fn test_redis_store_get_missing() {
    let fixture = RedisFixture::start().await;
    let store = fixture.store().await;

    let result = store.get("access_token").await.unwrap();
    assert!(result.is_none(), "Store should be empty initially");
}

#[tokio::test]
async fn test_redis_store_put_then_get() {
    let fixture = RedisFixture::start().await;
    let store = fixture.store().await;
    let cred = credential("tok-1");

    store.put("access_token", &cred).await.unwrap();

    let stored = store.get("access_token").await.unwrap().unwrap();
    assert_eq!(stored.access_token, "tok-1");
    assert_eq!(
        stored.expires_at.as_millisecond(),
        cred.expires_at.as_millisecond()
    );
}

#[tokio::test]
async fn test_redis_store_overwrite() {
    let fixture = RedisFixture::start().await;
    let store = fixture.store().await;

    store.put("access_token", &credential("old")).await.unwrap();
    store.put("access_token", &credential("new")).await.unwrap();

    let stored = store.get("access_token").await.unwrap().unwrap();
    assert_eq!(stored.access_token, "new");
}

#[tokio::test]
async fn test_redis_store_shared_between_connections() {
    let fixture = RedisFixture::start().await;
    let writer = fixture.store().await;
    let reader = fixture.store().await;

    writer.put("access_token", &credential("shared")).await.unwrap();

    let stored = reader.get("access_token").await.unwrap().unwrap();
    assert_eq!(stored.access_token, "shared");
}

#[tokio::test]
async fn test_redis_store_prefix_isolation() {
    let fixture = RedisFixture::start().await;
    let client = redis::Client::open(fixture.url.as_str()).unwrap();
    let conn_a = client.get_multiplexed_async_connection().await.unwrap();
    let conn_b = client.get_multiplexed_async_connection().await.unwrap();
    let store_a = RedisCredentialStore::with_prefix(conn_a, "app-a:");
    let store_b = RedisCredentialStore::with_prefix(conn_b, "app-b:");

    store_a.put("access_token", &credential("a")).await.unwrap();

    assert!(store_b.get("access_token").await.unwrap().is_none());
    assert_eq!(
        store_a.get("access_token").await.unwrap().unwrap().access_token,
        "a"
    );
}
