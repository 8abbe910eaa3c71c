use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// An access token issued by the platform's authorization endpoint.
///
/// The persisted form is `{"access_token": "...", "expires": <epoch millis>}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// The opaque token passed to authenticated API calls.
    pub access_token: String,
    /// When the platform stops accepting the token.
    #[serde(
        rename = "expires",
        with = "jiff::fmt::serde::timestamp::millisecond::required"
    )]
    pub expires_at: Timestamp,
}

impl Credential {
    /// Creates a credential issued at `issued_at` that lives for `lifetime`.
    ///
    /// Callers are expected to pass a positive lifetime so that the
    /// credential is never already expired when it is created.
    pub fn issue(
        access_token: impl Into<String>,
        issued_at: Timestamp,
        lifetime: SignedDuration,
    ) -> Self {
        let expires_at = issued_at.checked_add(lifetime).unwrap_or(Timestamp::MAX);
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    /// Returns `true` when strictly more than `padding` remains before expiry.
    ///
    /// A credential that is within the padding window is treated as stale so
    /// that it cannot expire while a request using it is in flight.
    pub fn is_fresh(&self, now: Timestamp, padding: SignedDuration) -> bool {
        match now.checked_add(padding) {
            Ok(threshold) => threshold < self.expires_at,
            Err(_) => false,
        }
    }

    /// Time left until the credential expires, negative once it has.
    pub fn remaining(&self, now: Timestamp) -> SignedDuration {
        self.expires_at.duration_since(now)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // the token is a bearer secret
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PADDING: SignedDuration = SignedDuration::from_secs(600);

    fn at(second: i64) -> Timestamp {
        Timestamp::from_second(second).unwrap()
    }

    #[test]
    fn issue_adds_lifetime_to_issue_time() {
        let cred = Credential::issue("tok", at(1_000), SignedDuration::from_secs(7200));
        assert_eq!(cred.expires_at, at(8_200));
        assert_eq!(cred.access_token, "tok");
    }

    #[test]
    fn fresh_when_more_than_padding_remains() {
        let cred = Credential::issue("tok", at(0), SignedDuration::from_secs(5000));
        assert!(cred.is_fresh(at(0), PADDING));
        assert!(cred.is_fresh(at(4_399), PADDING));
    }

    #[test]
    fn stale_at_exact_padding_boundary() {
        let cred = Credential::issue("tok", at(0), SignedDuration::from_secs(5000));
        // exactly 600s remain
        assert!(!cred.is_fresh(at(4_400), PADDING));
        assert!(!cred.is_fresh(at(4_999), PADDING));
        assert!(!cred.is_fresh(at(6_000), PADDING));
    }

    #[test]
    fn stale_one_millisecond_inside_window() {
        let cred = Credential::issue("tok", at(0), SignedDuration::from_secs(5000));
        let now = at(4_400) - SignedDuration::from_millis(1);
        assert!(cred.is_fresh(now, PADDING));
        let now = at(4_400) + SignedDuration::from_millis(1);
        assert!(!cred.is_fresh(now, PADDING));
    }

    #[test]
    fn remaining_goes_negative_after_expiry() {
        let cred = Credential::issue("tok", at(0), SignedDuration::from_secs(100));
        assert_eq!(cred.remaining(at(40)), SignedDuration::from_secs(60));
        assert_eq!(cred.remaining(at(160)), SignedDuration::from_secs(-60));
    }

    #[test]
    fn serializes_expiry_as_epoch_millis() {
        let cred = Credential::issue("tok", at(1_700_000_000), SignedDuration::from_secs(7200));
        let json = serde_json::to_value(&cred).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "access_token": "tok", "expires": 1_700_007_200_000_i64 })
        );
    }

    #[test]
    fn deserializes_persisted_shape() {
        let cred: Credential =
            serde_json::from_str(r#"{"access_token":"abc","expires":1700007200000}"#).unwrap();
        assert_eq!(cred.access_token, "abc");
        assert_eq!(cred.expires_at, at(1_700_007_200));
    }

    #[test]
    fn debug_does_not_leak_token() {
        let cred = Credential::issue("secret-token", at(0), SignedDuration::from_secs(1));
        assert!(!format!("{cred:?}").contains("secret-token"));
    }
}
