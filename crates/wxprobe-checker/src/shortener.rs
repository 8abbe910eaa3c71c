use crate::config::CheckerConfig;
use crate::error::ShortenError;
use crate::wire::{self, ApiError, ShortUrlRequest};
use serde_json::Value;
use tracing::{debug, trace};

/// Client for the platform's long-to-short URL API.
#[derive(Debug, Clone)]
pub struct UrlShortener {
    client: reqwest::Client,
    shorten_url: String,
}

impl UrlShortener {
    pub fn new(config: &CheckerConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            shorten_url: config.endpoint(wire::SHORTEN_PATH),
        }
    }

    /// Asks the platform for a short URL redirecting to `long_url`.
    ///
    /// Returns `Ok(None)` when the platform answers without a `short_url`
    /// (invalid token, quota exceeded, rejected URL). Only transport failures
    /// and non-JSON bodies are errors.
    pub async fn shorten(
        &self,
        long_url: &str,
        access_token: &str,
    ) -> Result<Option<String>, ShortenError> {
        trace!(long_url, "requesting short url");

        let request = ShortUrlRequest {
            access_token,
            action: wire::LONG_TO_SHORT,
            long_url,
        };
        let response = self
            .client
            .post(&self.shorten_url)
            .query(&[("access_token", access_token)])
            .json(&request)
            .send()
            .await?;
        let bytes = response.bytes().await?;
        let body: Value =
            serde_json::from_slice(&bytes).map_err(|e| ShortenError::Parse(e.to_string()))?;

        match wire::str_field(&body, "short_url") {
            Some(short_url) => {
                debug!(long_url, short_url, "platform issued short url");
                Ok(Some(short_url.to_string()))
            }
            None => {
                match ApiError::from_body(&body) {
                    Some(ApiError { errcode, errmsg }) => {
                        debug!(long_url, errcode, errmsg = %errmsg, "platform refused to shorten url")
                    }
                    None => debug!(long_url, "shorten response has no short_url"),
                }
                Ok(None)
            }
        }
    }
}
