use thiserror::Error;

/// Errors returned by an image classifier.
#[derive(Debug, Error)]
pub enum VisionError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The classifier answered with a non-2xx HTTP status.
    #[error("classifier returned HTTP {status}")]
    UnexpectedStatus { status: u16 },

    /// Clarifai reported a non-success status code in the response envelope.
    #[error("Clarifai API error {code}: {description}")]
    Api { code: u32, description: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed but lacks the prediction data.
    #[error("malformed classifier response: {0}")]
    MalformedResponse(String),

    #[error("invalid classifier configuration: {0}")]
    InvalidConfig(String),
}
