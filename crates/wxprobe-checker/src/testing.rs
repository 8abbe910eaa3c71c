use crate::config::CheckerConfig;
use jiff::{SignedDuration, Timestamp};
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wxprobe_core::Clock;

pub(crate) const APP_ID: &str = "wx-test-app";
pub(crate) const APP_SECRET: &str = "wx-test-secret";

#[derive(Clone)]
pub(crate) struct TestClock {
    inner: Arc<Mutex<Timestamp>>,
}

impl TestClock {
    pub(crate) fn new(now: Timestamp) -> Self {
        Self {
            inner: Arc::new(Mutex::new(now)),
        }
    }

    pub(crate) fn advance(&self, by: SignedDuration) {
        let mut now = self
            .inner
            .lock()
            .expect("test clock lock should not be poisoned");
        *now = *now + by;
    }
}

impl Clock for TestClock {
    fn now(&self) -> Timestamp {
        *self
            .inner
            .lock()
            .expect("test clock lock should not be poisoned")
    }
}

pub(crate) fn epoch() -> Timestamp {
    Timestamp::from_second(1_700_000_000).unwrap()
}

/// Config pointing every endpoint at `server`.
pub(crate) fn config_for(server: &MockServer) -> CheckerConfig {
    CheckerConfig::builder()
        .app_id(APP_ID)
        .app_secret(APP_SECRET)
        .api_base_url(server.uri())
        .build()
}

/// A base URL nothing listens on.
pub(crate) fn unreachable_base() -> String {
    "http://127.0.0.1:1".to_string()
}

/// Same server as `server.uri()`, addressed by a different host name.
pub(crate) fn localhost_uri(server: &MockServer) -> String {
    format!("http://localhost:{}", server.address().port())
}

pub(crate) fn token_mock(access_token: &str, expires_in: i64) -> Mock {
    Mock::given(method("GET"))
        .and(path("/cgi-bin/token"))
        .and(query_param("appid", APP_ID))
        .and(query_param("secret", APP_SECRET))
        .and(query_param("grant_type", "client_credential"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": access_token,
            "expires_in": expires_in,
        })))
}

pub(crate) fn redirect(location: &str) -> ResponseTemplate {
    ResponseTemplate::new(302).insert_header("Location", location)
}
