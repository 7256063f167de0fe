//! Ongoing update events delivered to subscription holders.

use serde::Serialize;

use location_api::{Location, LocationAvailability, RequestId};

/// One event on the ongoing update stream.
///
/// Events are tagged with the id of the subscription that produced them and
/// the operation name the subscription was created with, so a caller
/// multiplexing several subscriptions can route each event to its consumer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    /// Id of the subscription this event belongs to.
    pub request_code: RequestId,
    /// Operation name the subscription was created with.
    pub method: String,
    /// The event payload.
    pub body: UpdateBody,
}

/// Payload variants carried by update events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum UpdateBody {
    /// A batch of position fixes.
    LocationResult { locations: Vec<Location> },
    /// A change in provider availability.
    Availability { availability: LocationAvailability },
}
