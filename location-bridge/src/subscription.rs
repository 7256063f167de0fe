//! Delivery handles for live subscriptions.
//!
//! A subscription is registered with the provider through exactly one of
//! two handle shapes: an opaque background-delivery token, or an in-process
//! callback handle that forwards provider events onto the bridge's update
//! stream. The registry stores whichever shape the subscription was created
//! with; cancellation hands the same handle back to the provider.

use tokio::sync::mpsc;

use location_api::{Location, LocationAvailability, RequestId};

use crate::events::{UpdateBody, UpdateEvent};
use crate::types::DeliveryMode;

/// Broadcast action updates for background subscriptions are delivered under.
pub const PROCESS_LOCATION_ACTION: &str = "fused_location.action.PROCESS_LOCATION";

/// Opaque token identifying a background-delivery registration.
///
/// The token is what the provider needs to route updates to the caller's
/// process even when it is backgrounded, and what teardown presents to stop
/// them. The bridge never inspects it beyond the request code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryToken {
    request_code: RequestId,
    action: String,
}

impl DeliveryToken {
    /// Build the delivery token for an allocated request id.
    pub fn new(request_code: RequestId) -> Self {
        Self {
            request_code,
            action: PROCESS_LOCATION_ACTION.to_string(),
        }
    }

    /// The request code this token was built for.
    pub fn request_code(&self) -> RequestId {
        self.request_code
    }

    /// The broadcast action updates are delivered under.
    pub fn action(&self) -> &str {
        &self.action
    }
}

/// In-process callback handle for direct-delivery subscriptions.
///
/// The provider invokes the handle for each batch of fixes or availability
/// change; the handle forwards them onto the bridge's unbounded update
/// stream, tagged with the owning request id and originating operation.
#[derive(Debug, Clone)]
pub struct CallbackHandle {
    request_code: RequestId,
    method: String,
    events: mpsc::UnboundedSender<UpdateEvent>,
}

impl CallbackHandle {
    /// Build a callback handle bound to the bridge's update stream.
    pub fn new(
        request_code: RequestId,
        method: impl Into<String>,
        events: mpsc::UnboundedSender<UpdateEvent>,
    ) -> Self {
        Self {
            request_code,
            method: method.into(),
            events,
        }
    }

    /// The request code this handle was built for.
    pub fn request_code(&self) -> RequestId {
        self.request_code
    }

    /// The operation name the subscription was created with.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Forward a batch of position fixes to the update stream.
    pub fn deliver_locations(&self, locations: Vec<Location>) {
        self.forward(UpdateBody::LocationResult { locations });
    }

    /// Forward an availability change to the update stream.
    pub fn deliver_availability(&self, availability: LocationAvailability) {
        self.forward(UpdateBody::Availability { availability });
    }

    fn forward(&self, body: UpdateBody) {
        let event = UpdateEvent {
            request_code: self.request_code,
            method: self.method.clone(),
            body,
        };

        if self.events.send(event).is_err() {
            tracing::debug!(
                request_code = %self.request_code,
                "Update stream receiver dropped; discarding event"
            );
        }
    }
}

/// The handle a live subscription is registered under.
#[derive(Debug, Clone)]
pub enum SubscriptionHandle {
    /// Updates delivered through a system-level broadcast token.
    Background(DeliveryToken),
    /// Updates delivered through an in-process callback.
    Callback(CallbackHandle),
}

impl SubscriptionHandle {
    /// The delivery mode this handle implements.
    pub fn mode(&self) -> DeliveryMode {
        match self {
            Self::Background(_) => DeliveryMode::Background,
            Self::Callback(_) => DeliveryMode::Callback,
        }
    }
}
