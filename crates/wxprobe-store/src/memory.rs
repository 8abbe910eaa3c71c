use async_trait::async_trait;
use dashmap::DashMap;
use tracing::trace;
use wxprobe_core::{Credential, CredentialStore, Result};

/// In-memory implementation of [`CredentialStore`] using DashMap.
///
/// Nothing survives the process, so every new process starts cold and
/// fetches a fresh credential on its first check.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    storage: DashMap<String, Credential>,
}

impl InMemoryCredentialStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Number of stored credentials.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<Credential>> {
        trace!(key, "reading credential from memory");
        Ok(self.storage.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, credential: &Credential) -> Result<()> {
        trace!(key, "writing credential to memory");
        self.storage.insert(key.to_owned(), credential.clone());
        Ok(())
    }
}
