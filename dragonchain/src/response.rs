use serde_json::Value;

/// Normalized result of one API call.
///
/// Non-2xx statuses are returned here with `ok` set to false rather than
/// raised as errors; only transport failures surface as [`crate::Error`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code of the response.
    pub status: u16,
    /// Whether the status was in the 2xx range.
    pub ok: bool,
    /// Parsed response body. JSON by default; plain-text expectations wrap
    /// the body in a JSON string.
    pub response: Value,
}

/// How the dispatcher should interpret the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Parse the body as JSON.
    Json,
    /// Return the body as plain text.
    Text,
}
