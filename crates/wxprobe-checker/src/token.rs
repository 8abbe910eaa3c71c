use crate::config::CheckerConfig;
use crate::error::CredentialError;
use crate::wire::{self, ApiError};
use jiff::SignedDuration;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, trace, warn};
use wxprobe_core::{Clock, Credential, CredentialStore, SystemClock};

/// Owns the access credential lifecycle.
///
/// Every call to [`ensure_token`](Self::ensure_token) reads the store; a cached
/// credential is reused while strictly more than the safety padding remains,
/// otherwise a new one is fetched from the authorization endpoint and written
/// back. Refreshes are single-flight per manager: callers that find the token
/// stale while another refresh is in progress wait for it and reuse its result.
pub struct TokenManager<S, C = SystemClock> {
    client: reqwest::Client,
    store: S,
    clock: C,
    token_url: String,
    app_id: String,
    app_secret: String,
    storage_key: String,
    default_lifetime: SignedDuration,
    safety_padding: SignedDuration,
    refresh_lock: Mutex<()>,
}

impl<S: CredentialStore> TokenManager<S, SystemClock> {
    pub fn new(config: &CheckerConfig, client: reqwest::Client, store: S) -> Self {
        Self::with_clock(config, client, store, SystemClock)
    }
}

impl<S: CredentialStore, C: Clock> TokenManager<S, C> {
    /// Creates a manager that reads the time from `clock`.
    pub fn with_clock(config: &CheckerConfig, client: reqwest::Client, store: S, clock: C) -> Self {
        Self {
            client,
            store,
            clock,
            token_url: config.endpoint(wire::TOKEN_PATH),
            app_id: config.app_id.clone(),
            app_secret: config.app_secret.clone(),
            storage_key: config.storage_key.clone(),
            default_lifetime: config.default_lifetime,
            safety_padding: config.safety_padding,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Returns a reference to the credential store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a usable credential, refreshing it if needed.
    ///
    /// Fails only when no fresh credential is cached and the refresh fails.
    pub async fn ensure_token(&self) -> Result<Credential, CredentialError> {
        if let Some(credential) = self.cached_fresh().await {
            return Ok(credential);
        }

        let _guard = self.refresh_lock.lock().await;
        // whoever held the lock may have refreshed already
        if let Some(credential) = self.cached_fresh().await {
            trace!("reusing credential refreshed by a concurrent caller");
            return Ok(credential);
        }

        self.refresh().await
    }

    /// Fetches a new credential and persists it, regardless of the cache.
    pub async fn refresh(&self) -> Result<Credential, CredentialError> {
        info!(app_id = %self.app_id, "requesting new access token");

        let response = self
            .client
            .get(&self.token_url)
            .query(&[
                ("appid", self.app_id.as_str()),
                ("secret", self.app_secret.as_str()),
                ("grant_type", wire::GRANT_TYPE),
            ])
            .send()
            .await?;
        let bytes = response.bytes().await?;
        let body: Value =
            serde_json::from_slice(&bytes).map_err(|e| CredentialError::Parse(e.to_string()))?;

        if let Some(ApiError { errcode, errmsg }) = ApiError::from_body(&body) {
            warn!(errcode, errmsg = %errmsg, "authorization rejected by platform");
            return Err(CredentialError::Upstream { errcode, errmsg });
        }

        let access_token = wire::str_field(&body, "access_token")
            .ok_or(CredentialError::MissingToken)?;
        let lifetime = body
            .get("expires_in")
            .and_then(Value::as_i64)
            .filter(|secs| *secs > 0)
            .map(SignedDuration::from_secs)
            .unwrap_or(self.default_lifetime);

        let credential = Credential::issue(access_token, self.clock.now(), lifetime);

        if let Err(e) = self.store.put(&self.storage_key, &credential).await {
            // the token is still good for this process
            warn!(key = %self.storage_key, error = %e, "failed to persist refreshed credential");
        }

        info!(expires_at = %credential.expires_at, "access token refreshed");
        Ok(credential)
    }

    async fn cached_fresh(&self) -> Option<Credential> {
        let cached = match self.store.get(&self.storage_key).await {
            Ok(cached) => cached,
            Err(e) => {
                warn!(key = %self.storage_key, error = %e, "failed to read cached credential");
                return None;
            }
        };

        let Some(credential) = cached else {
            debug!(key = %self.storage_key, "no cached credential");
            return None;
        };

        let now = self.clock.now();
        if credential.is_fresh(now, self.safety_padding) {
            trace!(remaining = %credential.remaining(now), "cached credential is fresh");
            Some(credential)
        } else {
            debug!(remaining = %credential.remaining(now), "cached credential is stale");
            None
        }
    }
}

impl<S, C> std::fmt::Debug for TokenManager<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("token_url", &self.token_url)
            .field("app_id", &self.app_id)
            .field("storage_key", &self.storage_key)
            .field("safety_padding", &self.safety_padding)
            .finish_non_exhaustive()
    }
}
