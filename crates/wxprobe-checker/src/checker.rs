use crate::ban_checker::BanChecker;
use crate::config::CheckerConfig;
use crate::error::CheckError;
use crate::shortener::UrlShortener;
use crate::token::TokenManager;
use tracing::{debug, info};
use wxprobe_core::{CheckResponse, Clock, CredentialStore, SystemClock, Verdict};

/// Outcome of a single check, including why it failed.
#[derive(Debug)]
pub enum VerificationResult {
    /// The link ends on the platform's block page.
    Banned,
    /// The link ends anywhere else.
    Ok,
    /// No verdict could be produced.
    Indeterminate(CheckError),
}

impl VerificationResult {
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Self::Banned => Some(Verdict::Banned),
            Self::Ok => Some(Verdict::Ok),
            Self::Indeterminate(_) => None,
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Indeterminate(_))
    }

    /// The failure behind an indeterminate result.
    pub fn cause(&self) -> Option<&CheckError> {
        match self {
            Self::Indeterminate(cause) => Some(cause),
            _ => None,
        }
    }

    /// Drops the failure detail, leaving only a definitive answer.
    pub fn into_response(self) -> Option<CheckResponse> {
        self.verdict().map(CheckResponse::from)
    }
}

impl From<Verdict> for VerificationResult {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Banned => Self::Banned,
            Verdict::Ok => Self::Ok,
        }
    }
}

impl From<CheckError> for VerificationResult {
    fn from(cause: CheckError) -> Self {
        Self::Indeterminate(cause)
    }
}

/// Checks URLs against the platform's block list.
///
/// Each check makes up to three sequential requests: a token refresh when the
/// cached credential is stale, the shorten call, and the redirect walk. No
/// request is retried.
#[derive(Debug)]
pub struct Checker<S, C = SystemClock> {
    tokens: TokenManager<S, C>,
    shortener: UrlShortener,
    ban_checker: BanChecker,
}

impl<S: CredentialStore> Checker<S, SystemClock> {
    /// Creates a checker persisting its credential in `store`.
    pub fn new(config: CheckerConfig, store: S) -> Result<Self, reqwest::Error> {
        Self::with_clock(config, store, SystemClock)
    }
}

impl<S: CredentialStore, C: Clock> Checker<S, C> {
    /// Creates a checker that reads the time from `clock`.
    pub fn with_clock(config: CheckerConfig, store: S, clock: C) -> Result<Self, reqwest::Error> {
        let client = config.http_client()?;
        Ok(Self::from_parts(
            TokenManager::with_clock(&config, client.clone(), store, clock),
            UrlShortener::new(&config, client.clone()),
            BanChecker::new(&config, client),
        ))
    }

    /// Assembles a checker from separately configured components.
    pub fn from_parts(
        tokens: TokenManager<S, C>,
        shortener: UrlShortener,
        ban_checker: BanChecker,
    ) -> Self {
        Self {
            tokens,
            shortener,
            ban_checker,
        }
    }

    pub fn token_manager(&self) -> &TokenManager<S, C> {
        &self.tokens
    }

    /// Checks `url` and returns a definitive answer, if one could be had.
    ///
    /// Never fails: any error along the way yields `None`, which means "could
    /// not determine", not "not banned". Use
    /// [`check_detailed`](Self::check_detailed) to see what went wrong.
    pub async fn check(&self, url: &str) -> Option<CheckResponse> {
        self.check_detailed(url).await.into_response()
    }

    /// Checks `url`, keeping the failure cause of an indeterminate result.
    pub async fn check_detailed(&self, url: &str) -> VerificationResult {
        match self.run(url).await {
            Ok(verdict) => {
                info!(url, verdict = %verdict, "check completed");
                verdict.into()
            }
            Err(cause) => {
                debug!(url, error = %cause, "check was indeterminate");
                cause.into()
            }
        }
    }

    async fn run(&self, url: &str) -> Result<Verdict, CheckError> {
        let credential = self.tokens.ensure_token().await?;
        let short_url = self
            .shortener
            .shorten(url, &credential.access_token)
            .await?
            .ok_or(CheckError::NoShortUrl)?;
        let verdict = self.ban_checker.resolve(&short_url).await?;
        Ok(verdict)
    }
}
