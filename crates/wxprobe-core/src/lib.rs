//! Core types and traits for wxprobe.
//!
//! This crate holds the pieces shared by the credential store backends and
//! the checker: the cached [`Credential`], the [`CredentialStore`] seam, the
//! [`Clock`] used for expiry decisions and the [`Verdict`] a check produces.

pub mod clock;
pub mod credential;
pub mod error;
pub mod store;
pub mod verdict;

pub use clock::{Clock, SystemClock};
pub use credential::Credential;
pub use error::{Result, StoreError};
pub use store::CredentialStore;
pub use verdict::{CheckResponse, Verdict};
