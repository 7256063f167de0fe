//! The external location provider, as the bridge sees it.
//!
//! Positioning, settings resolution, and mock support all live behind this
//! trait; the bridge only orchestrates lifecycle and result routing around
//! it. Implementations wrap whatever platform service actually produces
//! fixes.

use async_trait::async_trait;

use location_api::{
    Location, LocationAvailability, LocationRequest, LocationSettingsRequest,
    LocationSettingsStates, LocationWithAddress, NavigationRequest, NavigationState,
    ProviderResult,
};

use crate::subscription::{CallbackHandle, DeliveryToken};
use crate::types::UpdateKind;

/// Outcome of asking the provider to verify location settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsCheckOutcome {
    /// Settings already satisfy the request; the snapshot is final.
    Satisfied(LocationSettingsStates),
    /// The provider has started an external resolution flow; the outcome
    /// will arrive out-of-band.
    ResolutionRequired,
}

/// Capability trait for the external, event-driven location provider.
///
/// Every method is initiated asynchronously and resolves with either its
/// typed payload or an opaque provider error that the bridge passes through
/// to the caller verbatim.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the bridge invokes them from
/// spawned tasks.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Verify that device settings satisfy the given request.
    async fn check_settings(
        &self,
        request: &LocationSettingsRequest,
    ) -> ProviderResult<SettingsCheckOutcome>;

    /// The last known position fix.
    async fn last_location(&self) -> ProviderResult<Location>;

    /// The last known fix, reverse-geocoded per the request's address options.
    async fn last_location_with_address(
        &self,
        request: &LocationRequest,
    ) -> ProviderResult<LocationWithAddress>;

    /// Whether the provider can currently produce fixes.
    async fn location_availability(&self) -> ProviderResult<LocationAvailability>;

    /// Enable or disable mock-location mode.
    async fn set_mock_mode(&self, enabled: bool) -> ProviderResult<()>;

    /// Inject a mock position fix.
    async fn set_mock_location(&self, location: &Location) -> ProviderResult<()>;

    /// Start continuous updates delivered through a background token.
    async fn request_updates(
        &self,
        request: &LocationRequest,
        delivery: &DeliveryToken,
    ) -> ProviderResult<()>;

    /// Start continuous updates delivered through an in-process callback.
    ///
    /// The provider keeps the handle and invokes it for each batch of fixes
    /// or availability change until the matching removal call.
    async fn request_updates_with_callback(
        &self,
        kind: UpdateKind,
        request: &LocationRequest,
        callback: CallbackHandle,
    ) -> ProviderResult<()>;

    /// Stop updates registered under a background token.
    async fn remove_updates(&self, delivery: &DeliveryToken) -> ProviderResult<()>;

    /// Stop updates registered under a callback handle.
    async fn remove_updates_with_callback(&self, callback: &CallbackHandle) -> ProviderResult<()>;

    /// Query navigation-context state.
    async fn navigation_state(
        &self,
        request: &NavigationRequest,
    ) -> ProviderResult<NavigationState>;
}
