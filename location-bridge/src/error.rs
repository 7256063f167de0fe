//! Error types for the location bridge.

use location_api::{DecodeError, ProviderError, RequestId};

/// Errors surfaced to callers of the bridge.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A cancellation referenced an id with no live subscription.
    #[error("No live update request with id {0}")]
    UnknownRequestId(RequestId),

    /// The out-of-band settings flow did not confirm the requested settings.
    #[error("Location settings are not available")]
    SettingsUnavailable,

    /// A failure reported by the external provider, passed through verbatim.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The operation name is not part of the supported set.
    #[error("Method not implemented: {0}")]
    NotImplemented(String),

    /// The operation's wire arguments did not decode.
    #[error("Malformed arguments for {method}: {source}")]
    BadArguments {
        /// The operation whose arguments failed to decode.
        method: String,
        #[source]
        source: serde_json::Error,
    },

    /// A reply payload failed to serialize.
    #[error("Failed to encode reply payload for {method}: {source}")]
    Encode {
        /// The operation whose reply failed to encode.
        method: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BridgeError {
    /// Stable error code reported alongside the message.
    ///
    /// Provider errors keep the provider's own code; everything else maps
    /// to a bridge-defined identifier.
    pub fn code(&self) -> &str {
        match self {
            Self::UnknownRequestId(_) => "NON_EXISTING_REQUEST_ID",
            Self::SettingsUnavailable => "LOCATION_SETTINGS_NOT_AVAILABLE",
            Self::Provider(e) => &e.code,
            Self::NotImplemented(_) => "NOT_IMPLEMENTED",
            Self::BadArguments { .. } => "BAD_ARGUMENTS",
            Self::Encode { .. } => "ENCODE_FAILED",
        }
    }
}

impl From<DecodeError> for BridgeError {
    fn from(error: DecodeError) -> Self {
        match error {
            DecodeError::NotImplemented(method) => Self::NotImplemented(method),
            DecodeError::BadArguments { method, source } => Self::BadArguments { method, source },
        }
    }
}

/// Convenience type alias for Results using BridgeError.
pub type Result<T> = std::result::Result<T, BridgeError>;
