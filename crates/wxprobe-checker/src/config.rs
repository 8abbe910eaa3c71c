use jiff::SignedDuration;
use std::time::Duration;
use typed_builder::TypedBuilder;

pub const DEFAULT_API_BASE_URL: &str = "https://api.weixin.qq.com";
pub const DEFAULT_BLOCK_PAGE_HOST: &str = "weixin110.qq.com";
pub const DEFAULT_STORAGE_KEY: &str = "access_token";
pub const DEFAULT_LIFETIME: SignedDuration = SignedDuration::from_secs(7200);
pub const DEFAULT_SAFETY_PADDING: SignedDuration = SignedDuration::from_secs(600);
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Configures a [`Checker`](crate::Checker) and its components.
///
/// # Example
///
/// ```rust
/// use wxprobe_checker::CheckerConfig;
///
/// let config = CheckerConfig::builder()
///     .app_id("wx0123456789")
///     .app_secret("secret")
///     .build();
/// assert_eq!(config.block_page_host, "weixin110.qq.com");
/// ```
#[derive(Clone, TypedBuilder)]
pub struct CheckerConfig {
    /// Application id issued by the platform.
    #[builder(setter(into))]
    pub app_id: String,
    /// Application secret paired with `app_id`.
    #[builder(setter(into))]
    pub app_secret: String,
    /// Scheme and host of the platform API, without a trailing path.
    #[builder(default = DEFAULT_API_BASE_URL.to_string(), setter(into))]
    pub api_base_url: String,
    /// Host the platform redirects blocked links to.
    #[builder(default = DEFAULT_BLOCK_PAGE_HOST.to_string(), setter(into))]
    pub block_page_host: String,
    /// Key the credential is stored under.
    #[builder(default = DEFAULT_STORAGE_KEY.to_string(), setter(into))]
    pub storage_key: String,
    /// Lifetime assumed when the platform omits `expires_in`.
    #[builder(default = DEFAULT_LIFETIME)]
    pub default_lifetime: SignedDuration,
    /// A cached credential with this much time left or less is refreshed.
    #[builder(default = DEFAULT_SAFETY_PADDING)]
    pub safety_padding: SignedDuration,
    /// Total per-request timeout. `None` leaves it to the HTTP client.
    #[builder(default, setter(strip_option))]
    pub request_timeout: Option<Duration>,
    /// Redirects followed before resolution gives up.
    #[builder(default = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,
}

impl CheckerConfig {
    /// Builds the HTTP client shared by every component.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(self.max_redirects));
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url.trim_end_matches('/'), path)
    }
}

impl std::fmt::Debug for CheckerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckerConfig")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("block_page_host", &self.block_page_host)
            .field("storage_key", &self.storage_key)
            .field("default_lifetime", &self.default_lifetime)
            .field("safety_padding", &self.safety_padding)
            .field("request_timeout", &self.request_timeout)
            .field("max_redirects", &self.max_redirects)
            .finish()
    }
}
