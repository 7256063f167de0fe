//! Typed operation model for the fused location bridge.
//!
//! This crate is the data-mapping boundary of the bridge: the wire-level
//! [`MethodCall`] representation, its decode into the closed [`Request`]
//! set, the descriptor types those requests carry, and the opaque
//! [`ProviderError`] passed through from the external provider. It contains
//! no runtime state; subscription lifecycle management lives in the
//! `fused-location-bridge` crate.

pub mod error;
pub mod model;
pub mod request;

pub use error::{DecodeError, ProviderError, ProviderResult};
pub use model::{
    Location, LocationAvailability, LocationRequest, LocationSettingsRequest,
    LocationSettingsStates, LocationWithAddress, NavigationRequest, NavigationState, RequestId,
};
pub use request::{MethodCall, Request};
