//! [`CredentialStore`] backends.
//!
//! - [`InMemoryCredentialStore`]: process-local, for tests and one-shot runs.
//! - [`FileCredentialStore`]: a JSON document on disk, survives restarts.
//! - [`RedisCredentialStore`]: shared between processes and hosts.

pub mod file;
pub mod memory;
pub mod redis;

pub use file::FileCredentialStore;
pub use memory::InMemoryCredentialStore;
pub use redis::RedisCredentialStore;
pub use wxprobe_core::{CredentialStore, Result, StoreError};
