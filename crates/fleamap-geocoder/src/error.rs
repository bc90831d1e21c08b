use thiserror::Error;

/// Errors returned by the Kakao Local API client.
///
/// The resolver never surfaces these per call; they are logged and treated
/// as "no candidate". Only client construction hands them to callers.
#[derive(Debug, Error)]
pub enum GeocoderError {
    /// The REST API key was empty at construction time.
    #[error("Kakao REST API key is not configured")]
    MissingApiKey,

    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Network, TLS, timeout, or non-2xx failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Kakao answered with an error envelope (`errorType` / `message`).
    #[error("Kakao API error ({error_type}): {message}")]
    Api { error_type: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
