use crate::credential::Credential;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A durable store for the cached [`Credential`].
///
/// Only a single key is used in practice, but the key is passed explicitly so
/// that several checkers (e.g. for different apps) can share one backend.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Get the credential stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet.
    async fn get(&self, key: &str) -> Result<Option<Credential>>;

    /// Store `credential` under `key`, replacing any previous value.
    async fn put(&self, key: &str, credential: &Credential) -> Result<()>;
}

#[async_trait]
impl<S> CredentialStore for Arc<S>
where
    S: CredentialStore + ?Sized,
{
    async fn get(&self, key: &str) -> Result<Option<Credential>> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, credential: &Credential) -> Result<()> {
        (**self).put(key, credential).await
    }
}
