//! Caller-facing front end of the bridge.
//!
//! [`LocationBridge::handle`] accepts a wire-level method call, decodes it
//! once into a typed request, and hands back the receiver its terminal
//! outcome will arrive on. All provider work runs in spawned tasks; the
//! caller's thread never blocks on a provider response.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use location_api::{LocationSettingsRequest, LocationSettingsStates, MethodCall, Request};

use crate::events::UpdateEvent;
use crate::manager::SubscriptionManager;
use crate::pending::{complete, CallReply, PendingCall};
use crate::provider::{LocationProvider, SettingsCheckOutcome};
use crate::settings::SettingsCorrelator;
use crate::types::{BridgeConfig, DeliveryMode, UpdateKind};

/// The bridge between named method invocations and the location provider.
///
/// One instance serves all callers of a host connection. Subscription
/// lifecycle is delegated to the [`SubscriptionManager`], pending settings
/// checks to the [`SettingsCorrelator`]; this type routes.
pub struct LocationBridge {
    provider: Arc<dyn LocationProvider>,
    manager: Arc<SubscriptionManager>,
    settings: Arc<SettingsCorrelator>,
    config: BridgeConfig,
    /// Receiver for the update stream (taken by update_stream())
    updates: Option<mpsc::UnboundedReceiver<UpdateEvent>>,
}

impl LocationBridge {
    /// Create a bridge with the default configuration.
    pub fn new(provider: Arc<dyn LocationProvider>) -> Self {
        Self::with_config(provider, BridgeConfig::default())
    }

    /// Create a bridge with a custom configuration.
    pub fn with_config(provider: Arc<dyn LocationProvider>, config: BridgeConfig) -> Self {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let manager = Arc::new(SubscriptionManager::new(Arc::clone(&provider), update_tx));

        Self {
            provider,
            manager,
            settings: Arc::new(SettingsCorrelator::new()),
            config,
            updates: Some(update_rx),
        }
    }

    /// Take the ongoing update stream.
    ///
    /// Events from every live callback subscription arrive here, tagged
    /// with the owning request id.
    ///
    /// # Panics
    ///
    /// Panics if called more than once.
    pub fn update_stream(&mut self) -> mpsc::UnboundedReceiver<UpdateEvent> {
        self.updates
            .take()
            .expect("update_stream() can only be called once")
    }

    /// Dispatch one method call.
    ///
    /// Returns immediately with the receiver the call's single terminal
    /// outcome is delivered on. Unrecognized method names and undecodable
    /// arguments fail the call without reaching the provider.
    pub fn handle(&self, call: MethodCall) -> oneshot::Receiver<CallReply> {
        let (pending, receiver) = PendingCall::new(&call.method);

        let request = match Request::decode(&call) {
            Ok(request) => request,
            Err(error) => {
                tracing::debug!(method = %call.method, %error, "Rejecting undecodable call");
                pending.fail(error.into());
                return receiver;
            }
        };

        tracing::debug!(method = request.method(), "Dispatching method call");

        match request {
            Request::CheckLocationSettings(request) => self.check_settings(request, pending),
            Request::GetLastLocation => {
                let provider = Arc::clone(&self.provider);
                tokio::spawn(async move { complete(pending, provider.last_location().await) });
            }
            Request::GetLastLocationWithAddress(request) => {
                let provider = Arc::clone(&self.provider);
                tokio::spawn(async move {
                    complete(pending, provider.last_location_with_address(&request).await);
                });
            }
            Request::GetLocationAvailability => {
                let provider = Arc::clone(&self.provider);
                tokio::spawn(
                    async move { complete(pending, provider.location_availability().await) },
                );
            }
            Request::SetMockMode(enabled) => {
                let provider = Arc::clone(&self.provider);
                tokio::spawn(async move { complete(pending, provider.set_mock_mode(enabled).await) });
            }
            Request::SetMockLocation(location) => {
                let provider = Arc::clone(&self.provider);
                tokio::spawn(async move {
                    complete(pending, provider.set_mock_location(&location).await);
                });
            }
            Request::RequestLocationUpdates(request) => {
                let manager = Arc::clone(&self.manager);
                tokio::spawn(async move {
                    match manager.subscribe_background(&request).await {
                        Ok(id) => pending.succeed(&id),
                        Err(error) => pending.fail(error),
                    }
                });
            }
            Request::RequestLocationUpdatesCb(request) => {
                self.subscribe_callback(UpdateKind::Standard, request, pending);
            }
            Request::RequestLocationUpdatesExCb(request) => {
                self.subscribe_callback(UpdateKind::HighPrecision, request, pending);
            }
            Request::RemoveLocationUpdates(id) => {
                self.unsubscribe(DeliveryMode::Background, id, pending);
            }
            Request::RemoveLocationUpdatesCb(id) => {
                self.unsubscribe(DeliveryMode::Callback, id, pending);
            }
            Request::GetNavigationContextState(request) => {
                let provider = Arc::clone(&self.provider);
                tokio::spawn(async move {
                    complete(pending, provider.navigation_state(&request).await);
                });
            }
        }

        receiver
    }

    /// Feed an out-of-band settings-resolution result into the bridge.
    ///
    /// The external UI flow reports back with a correlation code;
    /// only results carrying the configured code belong to this bridge.
    /// `states` carries the confirmed settings snapshot, or `None` when the
    /// flow was cancelled. With no pending check this is a no-op.
    pub fn resolution_result(&self, request_code: i32, states: Option<LocationSettingsStates>) {
        if request_code != self.config.resolution_request_code {
            tracing::debug!(request_code, "Ignoring resolution result with foreign request code");
            return;
        }

        self.settings.resolve(states);
    }

    /// Whether a settings check is currently awaiting its outcome.
    pub fn settings_check_pending(&self) -> bool {
        self.settings.is_pending()
    }

    /// Tear down every live subscription, best-effort.
    ///
    /// Host-teardown hook for when the owning execution context goes away.
    pub async fn shutdown(&self) {
        self.manager.shutdown().await;
    }

    fn check_settings(&self, request: LocationSettingsRequest, pending: PendingCall) {
        // A displaced predecessor is dropped here; its caller observes
        // closure, never a reply.
        drop(self.settings.park(pending));

        let provider = Arc::clone(&self.provider);
        let settings = Arc::clone(&self.settings);
        tokio::spawn(async move {
            match provider.check_settings(&request).await {
                Ok(SettingsCheckOutcome::Satisfied(states)) => settings.resolve(Some(states)),
                Ok(SettingsCheckOutcome::ResolutionRequired) => {
                    tracing::debug!("Settings check deferred to out-of-band resolution");
                }
                Err(error) => {
                    if let Some(call) = settings.take() {
                        call.fail(error.into());
                    }
                }
            }
        });
    }

    fn subscribe_callback(
        &self,
        kind: UpdateKind,
        request: location_api::LocationRequest,
        pending: PendingCall,
    ) {
        let manager = Arc::clone(&self.manager);
        let method = pending.method().to_string();
        tokio::spawn(async move {
            match manager.subscribe_callback(kind, &method, &request).await {
                Ok(id) => pending.succeed(&id),
                Err(error) => pending.fail(error),
            }
        });
    }

    fn unsubscribe(&self, mode: DeliveryMode, id: location_api::RequestId, pending: PendingCall) {
        let manager = Arc::clone(&self.manager);
        tokio::spawn(async move {
            match manager.unsubscribe(mode, id).await {
                Ok(id) => pending.succeed(&id),
                Err(error) => pending.fail(error),
            }
        });
    }
}
