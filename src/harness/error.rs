use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{operation}: expected status {expected}, got {actual} (body: {body})")]
    UnexpectedStatus {
        operation: &'static str,
        expected: String,
        actual: StatusCode,
        body: String,
    },

    #[error("{operation}: response has no `{field}`")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },

    #[error("{operation}: `{field}` mismatch, expected {expected}, got {actual}")]
    Mismatch {
        operation: &'static str,
        field: &'static str,
        expected: String,
        actual: String,
    },

    #[error("{record}.{field}: {problem}")]
    Structure {
        record: &'static str,
        field: &'static str,
        problem: String,
    },

    #[error("No session cookie found in Set-Cookie header")]
    MissingSessionCookie,

    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, HarnessError>;
