//! Typed descriptors exchanged between callers and the location provider.
//!
//! Wire-level argument maps use camelCase keys and frequently omit fields,
//! so every descriptor deserializes with per-field defaults.

use serde::{Deserialize, Serialize};

/// Unique identifier for a caller-visible update request.
///
/// Allocated by the bridge when a subscription-style operation is accepted
/// and handed back to the caller, who uses it to cancel the subscription
/// later. Ids are process-lifetime unique and never reused while the
/// subscription is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    /// Create a new RequestId with the given value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Priority constants understood by the provider.
pub mod priority {
    /// Highest accuracy, GNSS preferred.
    pub const HIGH_ACCURACY: i32 = 100;
    /// Balance between accuracy and power usage.
    pub const BALANCED_POWER_ACCURACY: i32 = 102;
    /// Coarse, low-power positioning.
    pub const LOW_POWER: i32 = 104;
    /// Passive only, piggyback on other clients' fixes.
    pub const NO_POWER: i32 = 105;
}

/// Parameters for a continuous or address-resolving location request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationRequest {
    /// Requested positioning priority, see [`priority`].
    pub priority: i32,
    /// Desired update interval in milliseconds.
    pub interval: u64,
    /// Fastest interval the caller can consume, in milliseconds.
    pub fastest_interval: Option<u64>,
    /// Minimum displacement in meters between updates.
    pub smallest_displacement: f64,
    /// Maximum time updates may be batched, in milliseconds.
    pub max_wait_time: Option<u64>,
    /// Number of updates after which the provider stops on its own.
    pub num_updates: Option<i32>,
    /// Whether reverse-geocoded address data is requested.
    pub need_address: bool,
    /// Language for address data, e.g. `"en"`.
    pub language: Option<String>,
    /// Country code for address data, e.g. `"US"`.
    pub country_code: Option<String>,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            priority: priority::HIGH_ACCURACY,
            interval: 10_000,
            fastest_interval: None,
            smallest_displacement: 0.0,
            max_wait_time: None,
            num_updates: None,
            need_address: false,
            language: None,
            country_code: None,
        }
    }
}

/// A single position fix.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    /// Ground speed in meters per second.
    pub speed: Option<f64>,
    /// Heading in degrees clockwise from north.
    pub bearing: Option<f64>,
    /// Horizontal accuracy radius in meters.
    pub accuracy: Option<f64>,
    /// Vertical accuracy in meters.
    pub vertical_accuracy: Option<f64>,
    /// Fix timestamp, milliseconds since the epoch.
    pub time: Option<i64>,
    /// Name of the positioning source that produced the fix.
    pub provider: Option<String>,
}

/// A position fix enriched with reverse-geocoded address data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationWithAddress {
    #[serde(flatten)]
    pub location: Location,
    pub country_name: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
}

/// Whether the provider can currently produce fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationAvailability {
    pub available: bool,
}

/// Request descriptor for a location-settings check.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationSettingsRequest {
    /// The update requests whose settings requirements should be verified.
    pub requests: Vec<LocationRequest>,
    /// Always present the settings dialog, even when already satisfied.
    pub always_show: bool,
    /// Whether BLE scanning availability must be included in the check.
    pub need_ble: bool,
}

/// Snapshot of device location settings reported by the settings check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationSettingsStates {
    pub gnss_present: bool,
    pub gnss_usable: bool,
    pub network_location_present: bool,
    pub network_location_usable: bool,
    pub ble_present: bool,
    pub ble_usable: bool,
    pub location_present: bool,
    pub location_usable: bool,
}

/// Navigation-context request types understood by the provider.
pub mod navigation {
    /// Query whether the device is on an overpass.
    pub const OVERPASS: i32 = 1;
    /// Query whether extended navigation support is available.
    pub const IS_SUPPORT_EX: i32 = 2;
}

/// Request descriptor for a navigation-context state query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationRequest {
    /// Query type, see [`navigation`].
    pub request_type: i32,
}

impl Default for NavigationRequest {
    fn default() -> Self {
        Self {
            request_type: navigation::IS_SUPPORT_EX,
        }
    }
}

/// Result of a navigation-context state query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationState {
    pub state: i32,
    pub possibility: i32,
}
