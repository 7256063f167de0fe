//! # fused-location-bridge
//!
//! Request/response bridge between callers speaking uniquely-named
//! asynchronous method invocations and an external, event-driven location
//! provider.
//!
//! ## Overview
//!
//! Callers hand [`LocationBridge::handle`] a wire-level method call and get
//! back a one-shot receiver for that call's single terminal outcome.
//! One-shot operations (settings check, last-location lookup, availability,
//! mock injection, navigation state) resolve through that receiver alone.
//! Subscription operations additionally allocate a [`RequestId`], register a
//! delivery handle in the [`UpdateRegistry`], and stream ongoing location
//! events through the bridge's unbounded update channel until cancelled.
//!
//! ## Architecture
//!
//! ```text
//!   caller ──▶ LocationBridge (decode + dispatch)
//!                │
//!                ├─▶ SubscriptionManager ──▶ UpdateRegistry (id → handle)
//!                │        │
//!                │        └─▶ LocationProvider (external capability)
//!                │                 │
//!                │                 ├─▶ PendingCall (one-shot outcome)
//!                │                 └─▶ update stream (ongoing events)
//!                │
//!                └─▶ SettingsCorrelator (single-slot out-of-band check)
//! ```
//!
//! Settings checks may finish out-of-band: the provider can defer to an
//! external UI flow whose outcome re-enters the bridge through
//! [`LocationBridge::resolution_result`], correlated by a fixed code. The
//! correlator holds at most one pending check because that channel cannot
//! disambiguate more.

pub mod dispatch;
pub mod error;
pub mod events;
pub mod manager;
pub mod pending;
pub mod provider;
pub mod registry;
pub mod settings;
pub mod subscription;
pub mod types;

// Re-export main types for convenience
pub use dispatch::LocationBridge;
pub use error::{BridgeError, Result};
pub use events::{UpdateBody, UpdateEvent};
pub use manager::SubscriptionManager;
pub use pending::{CallReply, PendingCall};
pub use provider::{LocationProvider, SettingsCheckOutcome};
pub use registry::UpdateRegistry;
pub use settings::SettingsCorrelator;
pub use subscription::{CallbackHandle, DeliveryToken, SubscriptionHandle};
pub use types::{BridgeConfig, DeliveryMode, UpdateKind};

// Re-export commonly used types from the operation model
pub use location_api::{MethodCall, ProviderError, Request, RequestId};

/// Prelude module for convenient imports
///
/// Use this to import the most commonly used types and traits:
///
/// ```rust
/// use location_bridge::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BridgeConfig, BridgeError, CallReply, DeliveryMode, LocationBridge, LocationProvider,
        MethodCall, RequestId, SettingsCheckOutcome, UpdateBody, UpdateEvent, UpdateKind,
    };
}
