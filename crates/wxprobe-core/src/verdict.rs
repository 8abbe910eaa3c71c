use serde::{Deserialize, Serialize};

/// Classification of a resolved short URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The platform redirected to its block page.
    Banned,
    /// The redirect ended anywhere else.
    Ok,
}

impl Verdict {
    /// Classifies the final host of a redirect chain.
    ///
    /// Hostnames are compared ASCII case-insensitively.
    pub fn from_host(host: Option<&str>, block_page_host: &str) -> Self {
        match host {
            Some(host) if host.eq_ignore_ascii_case(block_page_host) => Self::Banned,
            _ => Self::Ok,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Banned => -1,
            Self::Ok => 0,
        }
    }

    pub fn msg(self) -> &'static str {
        match self {
            Self::Banned => "banned",
            Self::Ok => "ok",
        }
    }

    pub fn is_banned(self) -> bool {
        matches!(self, Self::Banned)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.msg())
    }
}

/// Wire shape of a definitive answer: `{"code": -1, "msg": "banned"}` or
/// `{"code": 0, "msg": "ok"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub code: i32,
    pub msg: String,
}

impl From<Verdict> for CheckResponse {
    fn from(verdict: Verdict) -> Self {
        Self {
            code: verdict.code(),
            msg: verdict.msg().to_string(),
        }
    }
}
