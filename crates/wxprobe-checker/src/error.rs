use thiserror::Error;

/// Errors obtaining an access credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("authorization request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("authorization response is not valid JSON: {0}")]
    Parse(String),
    #[error("authorization rejected by platform: errcode={errcode}, errmsg={errmsg}")]
    Upstream { errcode: i64, errmsg: String },
    #[error("authorization response has no access_token")]
    MissingToken,
}

/// Hard failures of the shortening call.
///
/// A well-formed response without a short URL is not an error; see
/// [`UrlShortener::shorten`](crate::UrlShortener::shorten).
#[derive(Debug, Error)]
pub enum ShortenError {
    #[error("shorten request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("shorten response is not valid JSON: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("failed to follow short url: {0}")]
    Network(#[source] reqwest::Error),
}

// Request URLs carry the app secret or the access token in their query, so
// they are stripped before a transport error can reach a log line.
impl From<reqwest::Error> for CredentialError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.without_url())
    }
}

impl From<reqwest::Error> for ShortenError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.without_url())
    }
}

impl From<reqwest::Error> for ResolutionError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.without_url())
    }
}

/// Why a check could not produce a verdict.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error(transparent)]
    Shorten(#[from] ShortenError),
    #[error("platform returned no short url")]
    NoShortUrl,
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}
