//! Horizon error types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of the submission/account facade.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HorizonError {
    /// The request never produced an HTTP response (DNS, TLS, timeout...).
    #[error("connection failed: {0}")]
    Connection(String),

    /// 404
    #[error("not found: {0}")]
    NotFound(Problem),

    /// Any other 4xx, including failed transactions (`tx_failed`).
    #[error("bad request: {0}")]
    BadRequest(Problem),

    /// 5xx
    #[error("bad response: {0}")]
    BadResponse(Problem),

    /// A status outside 2xx, 4xx and 5xx.
    #[error("unexpected status {status}: {problem}")]
    Unknown { status: u16, problem: Problem },

    /// SEP-29: a destination asked for a memo and the transaction has none.
    #[error("destination {account_id} (operation {operation_index}) requires a memo")]
    AccountRequiresMemo {
        account_id: String,
        operation_index: usize,
    },

    /// A 2xx body that did not have the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl HorizonError {
    pub fn problem(&self) -> Option<&Problem> {
        match self {
            HorizonError::NotFound(problem)
            | HorizonError::BadRequest(problem)
            | HorizonError::BadResponse(problem)
            | HorizonError::Unknown { problem, .. } => Some(problem),
            _ => None,
        }
    }

    /// Maps a non-2xx status and its body onto the error taxonomy.
    pub fn from_status(status: u16, body: &str) -> Self {
        let problem = Problem::from_body(status, body);
        match status {
            404 => HorizonError::NotFound(problem),
            400..=499 => HorizonError::BadRequest(problem),
            500..=599 => HorizonError::BadResponse(problem),
            _ => HorizonError::Unknown { status, problem },
        }
    }
}

impl From<serde_json::Error> for HorizonError {
    fn from(err: serde_json::Error) -> Self {
        HorizonError::Decode(err.to_string())
    }
}

/// Horizon's RFC 7807 problem document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub detail: Option<String>,
    /// Result codes and the envelope/result XDR on failed submissions.
    #[serde(default)]
    pub extras: Option<serde_json::Value>,
}

impl Problem {
    /// Parses `body`; a body that is not a problem document becomes the
    /// `detail` so nothing the server said is lost.
    pub fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<Problem>(body) {
            Ok(problem) => problem,
            Err(_) => Problem {
                status: Some(status),
                detail: (!body.is_empty()).then(|| body.to_string()),
                ..Default::default()
            },
        }
    }

    /// `extras.result_codes` of a failed submission, if present.
    pub fn result_codes(&self) -> Option<&serde_json::Value> {
        self.extras.as_ref()?.get("result_codes")
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.title.as_deref().unwrap_or("unknown error");
        match &self.detail {
            Some(detail) => write!(f, "{title} ({detail})")?,
            None => f.write_str(title)?,
        }
        if let Some(codes) = self.result_codes() {
            write!(f, " {codes}")?;
        }
        Ok(())
    }
}
