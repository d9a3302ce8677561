use serde::Deserialize;
use thiserror::Error;

/// Substituted whenever the server's error payload cannot be parsed.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong!";

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Failure modes of the persistence endpoints. `Display` is the
/// user-facing message shown in the notification banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Server refused the operation; carries the server's message or
    /// the generic fallback.
    #[error("{0}")]
    Rejected(String),

    /// Requested key does not exist (or the server errored on a load).
    #[error("Document not found")]
    NotFound,

    /// Could not reach the server at all.
    #[error("Failed to reach the server: {0}")]
    Network(String),
}

/// Persistence backend behind the save/load protocol. Implemented over
/// HTTP for real use and mocked in tests.
pub trait DocumentStore {
    /// Persist raw text; returns the server-issued key.
    fn save(&self, text: &str) -> Result<String, StoreError>;

    /// Fetch the stored text for a key.
    fn load(&self, key: &str) -> Result<String, StoreError>;
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    key: String,
}

#[derive(Debug, Deserialize)]
struct LoadResponse {
    data: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

fn is_success(status: i32) -> bool {
    (200..400).contains(&status)
}

/// Interpret a save response. Error payloads are parsed defensively:
/// malformed JSON substitutes the generic message instead of surfacing
/// a parse error.
fn parse_save_response(status: i32, body: &str) -> Result<String, StoreError> {
    if is_success(status) {
        match serde_json::from_str::<SaveResponse>(body) {
            Ok(res) => Ok(res.key),
            Err(_) => Err(StoreError::Rejected(GENERIC_ERROR_MESSAGE.to_string())),
        }
    } else {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.message)
            .unwrap_or_else(|_| GENERIC_ERROR_MESSAGE.to_string());
        Err(StoreError::Rejected(message))
    }
}

/// Interpret a load response. On a miss the body is ignored beyond the
/// status; a success body that doesn't match the schema is also a miss.
fn parse_load_response(status: i32, body: &str) -> Result<String, StoreError> {
    if is_success(status) {
        serde_json::from_str::<LoadResponse>(body)
            .map(|res| res.data)
            .map_err(|_| StoreError::NotFound)
    } else {
        Err(StoreError::NotFound)
    }
}

/// HTTP-backed store for a haste-compatible server.
pub struct HttpStore {
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl DocumentStore for HttpStore {
    fn save(&self, text: &str) -> Result<String, StoreError> {
        let response = minreq::post(format!("{}/documents", self.base_url))
            .with_header("Content-Type", "application/json; charset=utf-8")
            .with_timeout(REQUEST_TIMEOUT_SECS)
            .with_body(text)
            .send()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let body = response
            .as_str()
            .map_err(|e| StoreError::Network(e.to_string()))?;
        parse_save_response(response.status_code, body)
    }

    fn load(&self, key: &str) -> Result<String, StoreError> {
        let response = minreq::get(format!("{}/documents/{}", self.base_url, key))
            .with_timeout(REQUEST_TIMEOUT_SECS)
            .send()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let body = response
            .as_str()
            .map_err(|e| StoreError::Network(e.to_string()))?;
        parse_load_response(response.status_code, body)
    }
}
