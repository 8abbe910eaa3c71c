use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};
use wxprobe_core::{Credential, CredentialStore, Result, StoreError};

/// Default location of the credential document.
pub const DEFAULT_STORE_PATH: &str = "store/access_token";

/// A [`CredentialStore`] backed by a single JSON document on disk.
///
/// The document is an object mapping storage keys to credentials:
///
/// ```json
/// { "access_token": { "access_token": "...", "expires": 1700007200000 } }
/// ```
///
/// Writes go to a uniquely named temporary file in the same directory which
/// is then renamed over the document, so readers never see a half-written
/// file and concurrent writers never share a scratch file.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Creates a store for the document at `path`.
    ///
    /// The file and its parent directories are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Map<String, Value>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(path = %self.path.display(), "credential document does not exist yet");
                return Ok(Map::new());
            }
            Err(e) => return Err(map_io_error("failed to read credential document", e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::InvalidData(format!(
                "credential document '{}' is not a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(StoreError::InvalidData(format!(
                "credential document '{}' is not valid JSON: {e}",
                self.path.display()
            ))),
        }
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|e| map_io_error("failed to create temporary credential file", e))?;
    temp.write_all(bytes)
        .map_err(|e| map_io_error("failed to write credential document", e))?;
    temp.persist(path)
        .map_err(|e| map_io_error("failed to replace credential document", e.error))?;
    Ok(())
}

fn map_io_error(operation: &str, err: std::io::Error) -> StoreError {
    let message = format!("{operation}: {err}");
    match err.kind() {
        ErrorKind::PermissionDenied => StoreError::Unavailable(message),
        ErrorKind::TimedOut => StoreError::Timeout(message),
        _ => StoreError::Io(message),
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<Credential>> {
        trace!(key, path = %self.path.display(), "reading credential from file");

        let mut document = self.load().await?;
        let Some(value) = document.remove(key) else {
            return Ok(None);
        };

        match serde_json::from_value::<Credential>(value) {
            Ok(credential) => Ok(Some(credential)),
            Err(e) => {
                warn!(key, error = %e, "failed to deserialize stored credential");
                Err(StoreError::InvalidData(format!(
                    "invalid stored credential for key '{key}': {e}"
                )))
            }
        }
    }

    async fn put(&self, key: &str, credential: &Credential) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        trace!(key, path = %self.path.display(), "writing credential to file");

        // an unreadable document is replaced rather than blocking refreshes forever
        let mut document = match self.load().await {
            Ok(document) => document,
            Err(StoreError::InvalidData(reason)) => {
                warn!(reason = %reason, "discarding unreadable credential document");
                Map::new()
            }
            Err(e) => return Err(e),
        };

        let value = serde_json::to_value(credential)
            .map_err(|e| StoreError::Serialization(format!("failed to serialize credential: {e}")))?;
        document.insert(key.to_owned(), value);

        let bytes = serde_json::to_vec_pretty(&document)
            .map_err(|e| StoreError::Serialization(format!("failed to serialize document: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io_error("failed to create store directory", e))?;
        }

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &bytes))
            .await
            .map_err(|e| StoreError::Io(format!("credential writer task failed: {e}")))??;

        debug!(key, path = %self.path.display(), "stored credential");
        Ok(())
    }
}
