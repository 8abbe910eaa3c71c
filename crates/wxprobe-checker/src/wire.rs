//! Request and response shapes of the platform API.

use serde::Serialize;
use serde_json::Value;

pub(crate) const TOKEN_PATH: &str = "cgi-bin/token";
pub(crate) const SHORTEN_PATH: &str = "cgi-bin/shorturl";
pub(crate) const GRANT_TYPE: &str = "client_credential";
pub(crate) const LONG_TO_SHORT: &str = "long2short";

#[derive(Debug, Serialize)]
pub(crate) struct ShortUrlRequest<'a> {
    pub access_token: &'a str,
    pub action: &'a str,
    pub long_url: &'a str,
}

/// The `{errcode, errmsg}` envelope the platform uses for failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiError {
    pub errcode: i64,
    pub errmsg: String,
}

impl ApiError {
    /// Extracts a non-zero `errcode` from a response body.
    pub(crate) fn from_body(body: &Value) -> Option<Self> {
        let errcode = body.get("errcode").and_then(Value::as_i64)?;
        if errcode == 0 {
            return None;
        }
        let errmsg = body
            .get("errmsg")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Some(Self { errcode, errmsg })
    }
}

/// Returns the string field `name`, treating empty strings as absent.
pub(crate) fn str_field<'a>(body: &'a Value, name: &str) -> Option<&'a str> {
    body.get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_shape() {
        let body = ShortUrlRequest {
            access_token: "tok",
            action: LONG_TO_SHORT,
            long_url: "https://example.com",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "access_token": "tok",
                "action": "long2short",
                "long_url": "https://example.com"
            })
        );
    }

    #[test]
    fn api_error_requires_nonzero_code() {
        assert_eq!(ApiError::from_body(&json!({ "errcode": 0, "errmsg": "ok" })), None);
        assert_eq!(ApiError::from_body(&json!({ "short_url": "x" })), None);
        assert_eq!(
            ApiError::from_body(&json!({ "errcode": 40001, "errmsg": "invalid credential" })),
            Some(ApiError {
                errcode: 40001,
                errmsg: "invalid credential".to_string()
            })
        );
    }

    #[test]
    fn str_field_skips_empty_and_non_strings() {
        let body = json!({ "a": "x", "b": "", "c": 1 });
        assert_eq!(str_field(&body, "a"), Some("x"));
        assert_eq!(str_field(&body, "b"), None);
        assert_eq!(str_field(&body, "c"), None);
        assert_eq!(str_field(&json!([1, 2]), "a"), None);
    }
}
