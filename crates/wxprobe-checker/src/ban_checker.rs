use crate::config::CheckerConfig;
use crate::error::ResolutionError;
use tracing::{debug, trace};
use wxprobe_core::Verdict;

/// Follows a short URL and classifies where it lands.
#[derive(Debug, Clone)]
pub struct BanChecker {
    client: reqwest::Client,
    block_page_host: String,
}

impl BanChecker {
    /// `client` must follow redirects; see [`CheckerConfig::http_client`].
    pub fn new(config: &CheckerConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            block_page_host: config.block_page_host.clone(),
        }
    }

    /// Fetches `short_url`, following redirects, and compares the final host
    /// with the block-page host. The response body is never read.
    pub async fn resolve(&self, short_url: &str) -> Result<Verdict, ResolutionError> {
        trace!(short_url, "following short url");

        let response = self.client.get(short_url).send().await?;
        let final_url = response.url();
        let verdict = Verdict::from_host(final_url.host_str(), &self.block_page_host);

        debug!(
            short_url,
            final_url = %final_url,
            status = %response.status(),
            verdict = %verdict,
            "short url resolved"
        );
        Ok(verdict)
    }
}
