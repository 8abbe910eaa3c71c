//! Checks whether WeChat blocks a URL.
//!
//! A check asks the platform to shorten the URL, follows the short link and
//! looks at where the redirect chain ends. Links the platform has blocked end
//! on its interstitial block page.
//!
//! ```rust,no_run
//! use wxprobe_checker::{Checker, CheckerConfig};
//! use wxprobe_store::FileCredentialStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CheckerConfig::builder()
//!     .app_id("wx0123456789")
//!     .app_secret("secret")
//!     .build();
//! let checker = Checker::new(config, FileCredentialStore::new("store/access_token"))?;
//!
//! match checker.check("https://example.com").await {
//!     Some(response) => println!("{} {}", response.code, response.msg),
//!     None => println!("could not determine"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod ban_checker;
pub mod checker;
pub mod config;
pub mod error;
pub mod shortener;
pub mod token;
mod wire;

#[cfg(test)]
pub(crate) mod testing;

pub use ban_checker::BanChecker;
pub use checker::{Checker, VerificationResult};
pub use config::CheckerConfig;
pub use error::{CheckError, CredentialError, ResolutionError, ShortenError};
pub use shortener::UrlShortener;
pub use token::TokenManager;
pub use wxprobe_core::{CheckResponse, Credential, CredentialStore, Verdict};
