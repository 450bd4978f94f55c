use thiserror::Error;

/// Top-level error type for the `umistat-api` crate.
///
/// Covers every failure mode of the two-step share fetch: transport,
/// non-success HTTP statuses, incomplete credentials, and malformed
/// response bodies. Callers treat all of these identically -- log and
/// fall back to placeholders -- so the variants exist for diagnostics,
/// not for recovery.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Share API ───────────────────────────────────────────────────
    /// Non-success HTTP status from either share endpoint.
    #[error("Share API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The share response carried an empty or unusable credential field.
    #[error("share credential field '{field}' is missing or invalid")]
    MissingCredential { field: &'static str },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Extract the HTTP status, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
