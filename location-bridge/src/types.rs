//! Core types for the location bridge.

/// How updates for a subscription reach the caller.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum DeliveryMode {
    /// Updates arrive via a system-level broadcast token that survives the
    /// requesting process being backgrounded.
    Background,
    /// Updates arrive via an in-process callback handle.
    Callback,
}

impl std::fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Background => write!(f, "background"),
            Self::Callback => write!(f, "callback"),
        }
    }
}

/// Which provider entry point a callback subscription registers through.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum UpdateKind {
    /// Standard continuous updates.
    Standard,
    /// Extended registration with high-precision fixes where supported.
    HighPrecision,
}

/// Configuration for the bridge.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Correlation code expected on out-of-band settings-resolution results.
    ///
    /// The external UI flow reports its outcome through a single result
    /// channel keyed by this fixed code; results carrying any other code
    /// are ignored.
    pub resolution_request_code: i32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            resolution_request_code: 0,
        }
    }
}
