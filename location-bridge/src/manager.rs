//! Subscription lifecycle orchestration.
//!
//! The manager owns the registry and coordinates every transition a
//! subscription goes through: id allocation, handle construction, the
//! provider call that makes it live, and teardown on cancellation or host
//! shutdown. Registry writes happen here and nowhere else.

use std::sync::Arc;
use tokio::sync::mpsc;

use location_api::{LocationRequest, RequestId};

use crate::error::{BridgeError, Result};
use crate::events::UpdateEvent;
use crate::provider::LocationProvider;
use crate::registry::UpdateRegistry;
use crate::subscription::{CallbackHandle, DeliveryToken, SubscriptionHandle};
use crate::types::{DeliveryMode, UpdateKind};

/// Manager for update-subscription lifecycle operations.
pub struct SubscriptionManager {
    provider: Arc<dyn LocationProvider>,
    registry: UpdateRegistry,
    updates: mpsc::UnboundedSender<UpdateEvent>,
}

impl SubscriptionManager {
    /// Create a manager around a provider and the update-event sender.
    pub fn new(
        provider: Arc<dyn LocationProvider>,
        updates: mpsc::UnboundedSender<UpdateEvent>,
    ) -> Self {
        Self {
            provider,
            registry: UpdateRegistry::new(),
            updates,
        }
    }

    /// The registry of live subscriptions.
    pub fn registry(&self) -> &UpdateRegistry {
        &self.registry
    }

    /// Start a background-delivery subscription.
    ///
    /// The id is allocated and registered before the provider call, so a
    /// racing cancellation of the not-yet-acknowledged id is well-defined.
    /// If the provider rejects the request the partial entry is removed and
    /// the provider's error is returned.
    pub async fn subscribe_background(&self, request: &LocationRequest) -> Result<RequestId> {
        let id = self.registry.allocate();
        let token = DeliveryToken::new(id);
        self.registry
            .register(id, SubscriptionHandle::Background(token.clone()))
            .await;

        match self.provider.request_updates(request, &token).await {
            Ok(()) => {
                tracing::debug!(%id, "Background update subscription active");
                Ok(id)
            }
            Err(error) => {
                self.registry.remove(id).await;
                tracing::warn!(%id, %error, "Provider rejected background update subscription");
                Err(error.into())
            }
        }
    }

    /// Start a direct-callback subscription.
    ///
    /// `method` is the operation name the subscription was created with;
    /// events on the update stream carry it alongside the assigned id.
    pub async fn subscribe_callback(
        &self,
        kind: UpdateKind,
        method: &str,
        request: &LocationRequest,
    ) -> Result<RequestId> {
        let id = self.registry.allocate();
        let callback = CallbackHandle::new(id, method, self.updates.clone());
        self.registry
            .register(id, SubscriptionHandle::Callback(callback.clone()))
            .await;

        match self
            .provider
            .request_updates_with_callback(kind, request, callback)
            .await
        {
            Ok(()) => {
                tracing::debug!(%id, method, "Callback update subscription active");
                Ok(id)
            }
            Err(error) => {
                self.registry.remove(id).await;
                tracing::warn!(%id, %error, "Provider rejected callback update subscription");
                Err(error.into())
            }
        }
    }

    /// Cancel a subscription.
    ///
    /// Ids that were never issued, already removed, or registered under the
    /// other delivery mode yield [`BridgeError::UnknownRequestId`] without
    /// a provider round-trip. The winning caller claims the entry before
    /// the provider teardown is issued; the entry stays removed even when
    /// teardown fails, because the caller no longer references the id — in
    /// that case the provider may still consider the subscription live,
    /// and its error is returned.
    pub async fn unsubscribe(&self, mode: DeliveryMode, id: RequestId) -> Result<RequestId> {
        match self.registry.lookup(id).await {
            Some(handle) if handle.mode() == mode => {}
            _ => return Err(BridgeError::UnknownRequestId(id)),
        }

        let Some(handle) = self.registry.remove(id).await else {
            // Lost a cancellation race; the other caller owns the teardown.
            return Err(BridgeError::UnknownRequestId(id));
        };

        match self.teardown(&handle).await {
            Ok(()) => {
                tracing::debug!(%id, %mode, "Update subscription removed");
                Ok(id)
            }
            Err(error) => {
                tracing::warn!(%id, %error, "Provider teardown failed; entry removed anyway");
                Err(error.into())
            }
        }
    }

    /// Tear down every live subscription, best-effort.
    ///
    /// Host-teardown hook: provider failures are logged, not propagated.
    pub async fn shutdown(&self) {
        let entries = self.registry.drain().await;
        if entries.is_empty() {
            return;
        }

        tracing::info!(count = entries.len(), "Tearing down live update subscriptions");
        for (id, handle) in entries {
            if let Err(error) = self.teardown(&handle).await {
                tracing::warn!(%id, %error, "Failed to tear down subscription during shutdown");
            }
        }
    }

    async fn teardown(&self, handle: &SubscriptionHandle) -> location_api::ProviderResult<()> {
        match handle {
            SubscriptionHandle::Background(token) => self.provider.remove_updates(token).await,
            SubscriptionHandle::Callback(callback) => {
                self.provider.remove_updates_with_callback(callback).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use location_api::{
        Location, LocationAvailability, LocationSettingsRequest, LocationSettingsStates,
        LocationWithAddress, NavigationRequest, NavigationState, ProviderError, ProviderResult,
    };

    use crate::provider::SettingsCheckOutcome;

    /// Mock provider with switchable failures and call counters.
    #[derive(Default)]
    struct MockProvider {
        fail_subscribe: AtomicBool,
        fail_remove: AtomicBool,
        remove_calls: AtomicUsize,
    }

    impl MockProvider {
        fn rejecting_subscribes() -> Self {
            let provider = Self::default();
            provider.fail_subscribe.store(true, Ordering::SeqCst);
            provider
        }

        fn rejecting_removals() -> Self {
            let provider = Self::default();
            provider.fail_remove.store(true, Ordering::SeqCst);
            provider
        }

        fn remove_calls(&self) -> usize {
            self.remove_calls.load(Ordering::SeqCst)
        }

        fn subscribe_outcome(&self) -> ProviderResult<()> {
            if self.fail_subscribe.load(Ordering::SeqCst) {
                Err(ProviderError::new("10101", "update request rejected"))
            } else {
                Ok(())
            }
        }

        fn remove_outcome(&self) -> ProviderResult<()> {
            self.remove_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_remove.load(Ordering::SeqCst) {
                Err(ProviderError::new("10102", "removal rejected"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl LocationProvider for MockProvider {
        async fn check_settings(
            &self,
            _request: &LocationSettingsRequest,
        ) -> ProviderResult<SettingsCheckOutcome> {
            Ok(SettingsCheckOutcome::Satisfied(
                LocationSettingsStates::default(),
            ))
        }

        async fn last_location(&self) -> ProviderResult<Location> {
            Ok(Location::default())
        }

        async fn last_location_with_address(
            &self,
            _request: &LocationRequest,
        ) -> ProviderResult<LocationWithAddress> {
            Ok(LocationWithAddress::default())
        }

        async fn location_availability(&self) -> ProviderResult<LocationAvailability> {
            Ok(LocationAvailability { available: true })
        }

        async fn set_mock_mode(&self, _enabled: bool) -> ProviderResult<()> {
            Ok(())
        }

        async fn set_mock_location(&self, _location: &Location) -> ProviderResult<()> {
            Ok(())
        }

        async fn request_updates(
            &self,
            _request: &LocationRequest,
            _delivery: &DeliveryToken,
        ) -> ProviderResult<()> {
            self.subscribe_outcome()
        }

        async fn request_updates_with_callback(
            &self,
            _kind: UpdateKind,
            _request: &LocationRequest,
            _callback: CallbackHandle,
        ) -> ProviderResult<()> {
            self.subscribe_outcome()
        }

        async fn remove_updates(&self, _delivery: &DeliveryToken) -> ProviderResult<()> {
            self.remove_outcome()
        }

        async fn remove_updates_with_callback(
            &self,
            _callback: &CallbackHandle,
        ) -> ProviderResult<()> {
            self.remove_outcome()
        }

        async fn navigation_state(
            &self,
            _request: &NavigationRequest,
        ) -> ProviderResult<NavigationState> {
            Ok(NavigationState::default())
        }
    }

    fn manager_with(provider: Arc<MockProvider>) -> SubscriptionManager {
        let (updates, _rx) = mpsc::unbounded_channel();
        SubscriptionManager::new(provider, updates)
    }

    #[tokio::test]
    async fn test_subscribe_registers_matching_variant() {
        let manager = manager_with(Arc::new(MockProvider::default()));

        let background = manager
            .subscribe_background(&LocationRequest::default())
            .await
            .unwrap();
        let callback = manager
            .subscribe_callback(
                UpdateKind::Standard,
                "requestLocationUpdatesCb",
                &LocationRequest::default(),
            )
            .await
            .unwrap();

        assert_ne!(background, callback);
        assert_eq!(
            manager.registry().lookup(background).await.unwrap().mode(),
            DeliveryMode::Background
        );
        assert_eq!(
            manager.registry().lookup(callback).await.unwrap().mode(),
            DeliveryMode::Callback
        );
    }

    #[tokio::test]
    async fn test_rejected_subscribe_rolls_back_entry() {
        let manager = manager_with(Arc::new(MockProvider::rejecting_subscribes()));

        let error = manager
            .subscribe_background(&LocationRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(error, BridgeError::Provider(e) if e.code == "10101"));
        assert_eq!(manager.registry().count().await, 0);
    }

    #[tokio::test]
    async fn test_unsubscribe_removes_only_its_subscription() {
        let manager = manager_with(Arc::new(MockProvider::default()));

        let first = manager
            .subscribe_background(&LocationRequest::default())
            .await
            .unwrap();
        let second = manager
            .subscribe_callback(
                UpdateKind::Standard,
                "requestLocationUpdatesCb",
                &LocationRequest::default(),
            )
            .await
            .unwrap();

        let ack = manager
            .unsubscribe(DeliveryMode::Background, first)
            .await
            .unwrap();
        assert_eq!(ack, first);
        assert!(manager.registry().lookup(first).await.is_none());
        assert_eq!(
            manager.registry().lookup(second).await.unwrap().mode(),
            DeliveryMode::Callback
        );
    }

    #[tokio::test]
    async fn test_unsubscribe_unknown_id_skips_provider() {
        let provider = Arc::new(MockProvider::default());
        let manager = manager_with(Arc::clone(&provider));

        let error = manager
            .unsubscribe(DeliveryMode::Background, RequestId::new(42))
            .await
            .unwrap_err();

        assert!(matches!(error, BridgeError::UnknownRequestId(id) if id == RequestId::new(42)));
        assert_eq!(provider.remove_calls(), 0);
    }

    #[tokio::test]
    async fn test_unsubscribe_wrong_mode_leaves_subscription_intact() {
        let provider = Arc::new(MockProvider::default());
        let manager = manager_with(Arc::clone(&provider));

        let id = manager
            .subscribe_callback(
                UpdateKind::Standard,
                "requestLocationUpdatesCb",
                &LocationRequest::default(),
            )
            .await
            .unwrap();

        let error = manager
            .unsubscribe(DeliveryMode::Background, id)
            .await
            .unwrap_err();

        assert!(matches!(error, BridgeError::UnknownRequestId(got) if got == id));
        assert!(manager.registry().lookup(id).await.is_some());
        assert_eq!(provider.remove_calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_teardown_still_removes_entry() {
        let manager = manager_with(Arc::new(MockProvider::rejecting_removals()));

        let id = manager
            .subscribe_background(&LocationRequest::default())
            .await
            .unwrap();

        let error = manager
            .unsubscribe(DeliveryMode::Background, id)
            .await
            .unwrap_err();

        assert!(matches!(error, BridgeError::Provider(e) if e.code == "10102"));
        assert!(manager.registry().lookup(id).await.is_none());

        // A repeat cancel now reports the id as unknown.
        let error = manager
            .unsubscribe(DeliveryMode::Background, id)
            .await
            .unwrap_err();
        assert!(matches!(error, BridgeError::UnknownRequestId(_)));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_removal() {
        let manager = manager_with(Arc::new(MockProvider::default()));

        let first = manager
            .subscribe_background(&LocationRequest::default())
            .await
            .unwrap();
        manager
            .unsubscribe(DeliveryMode::Background, first)
            .await
            .unwrap();

        let second = manager
            .subscribe_background(&LocationRequest::default())
            .await
            .unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_shutdown_drains_all_subscriptions() {
        let provider = Arc::new(MockProvider::default());
        let manager = manager_with(Arc::clone(&provider));

        manager
            .subscribe_background(&LocationRequest::default())
            .await
            .unwrap();
        manager
            .subscribe_callback(
                UpdateKind::HighPrecision,
                "requestLocationUpdatesExCb",
                &LocationRequest::default(),
            )
            .await
            .unwrap();

        manager.shutdown().await;

        assert_eq!(manager.registry().count().await, 0);
        assert_eq!(provider.remove_calls(), 2);
    }
}
