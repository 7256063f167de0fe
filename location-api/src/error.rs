use thiserror::Error;

/// A failure reported by the external location provider.
///
/// The bridge never interprets these: the provider's own code and message
/// are carried through to the originating caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ProviderError {
    /// Provider-defined error code.
    pub code: String,
    /// Human-readable detail supplied by the provider.
    pub message: String,
}

impl ProviderError {
    /// Create a new provider error from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Errors produced while decoding a wire-level method call.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The operation name is not part of the supported set.
    #[error("Method not implemented: {0}")]
    NotImplemented(String),

    /// The operation name is known but its arguments do not decode.
    #[error("Malformed arguments for {method}: {source}")]
    BadArguments {
        /// The operation whose arguments failed to decode.
        method: String,
        #[source]
        source: serde_json::Error,
    },
}
