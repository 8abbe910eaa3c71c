use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, trace, warn};
use wxprobe_core::{Credential, CredentialStore, Result, StoreError};

/// Default prefix prepended to every storage key.
pub const DEFAULT_KEY_PREFIX: &str = "wxprobe:credential:";

/// A Redis-based implementation of [`CredentialStore`].
///
/// Credentials are stored as JSON strings, so several checker processes can
/// share one token instead of each fetching their own.
#[derive(Clone)]
pub struct RedisCredentialStore {
    conn: redis::aio::MultiplexedConnection,
    key_prefix: String,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StoreError {
    let message = format!("{operation}: {err}");
    if message.to_ascii_lowercase().contains("timed out") {
        StoreError::Timeout(message)
    } else {
        StoreError::Operation(message)
    }
}

impl RedisCredentialStore {
    /// Creates a new Redis credential store.
    ///
    /// # Arguments
    ///
    /// * `conn` - A multiplexed Redis connection
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self::with_prefix(conn, DEFAULT_KEY_PREFIX)
    }

    /// Creates a new Redis credential store with a custom key prefix.
    ///
    /// # Arguments
    ///
    /// * `conn` - A multiplexed Redis connection
    /// * `key_prefix` - Custom prefix for store keys (e.g., "myapp:token:")
    pub fn with_prefix(
        conn: redis::aio::MultiplexedConnection,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Opens a connection to `url` and wraps it in a store.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| StoreError::Unavailable(format!("invalid redis url: {e}")))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to connect to Redis: {e}")))?;
        Ok(Self::new(conn))
    }

    fn store_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

impl std::fmt::Debug for RedisCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCredentialStore")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CredentialStore for RedisCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<Credential>> {
        let store_key = self.store_key(key);
        trace!(key = %store_key, "reading credential from Redis");

        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(&store_key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Credential>(&raw) {
                Ok(credential) => {
                    debug!(key = %store_key, "credential found in Redis");
                    Ok(Some(credential))
                }
                Err(e) => {
                    warn!(key = %store_key, error = %e, "failed to deserialize stored credential");
                    Err(StoreError::InvalidData(format!(
                        "invalid stored credential for key '{store_key}': {e}"
                    )))
                }
            },
            Ok(None) => {
                trace!(key = %store_key, "no credential in Redis");
                Ok(None)
            }
            Err(e) => {
                warn!(key = %store_key, error = %e, "Redis error on get");
                Err(map_redis_error("failed to fetch credential from Redis", e))
            }
        }
    }

    async fn put(&self, key: &str, credential: &Credential) -> Result<()> {
        let store_key = self.store_key(key);
        trace!(key = %store_key, "writing credential to Redis");

        let json = serde_json::to_string(credential).map_err(|e| {
            StoreError::Serialization(format!("failed to serialize credential: {e}"))
        })?;

        let mut conn = self.conn.clone();
        match conn.set::<_, _, ()>(&store_key, json).await {
            Ok(()) => {
                debug!(key = %store_key, "stored credential in Redis");
                Ok(())
            }
            Err(e) => {
                warn!(key = %store_key, error = %e, "failed to store credential in Redis");
                Err(map_redis_error("failed to write credential to Redis", e))
            }
        }
    }
}
