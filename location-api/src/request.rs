//! Wire-level method calls and their decode into typed requests.
//!
//! Callers address the bridge with a method name plus an untyped argument
//! value. Decoding happens exactly once, here, into the closed [`Request`]
//! set; everything past this boundary works with typed data.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DecodeError;
use crate::model::{
    Location, LocationRequest, LocationSettingsRequest, NavigationRequest, RequestId,
};

/// A named operation invocation as received from the caller.
#[derive(Debug, Clone)]
pub struct MethodCall {
    /// The operation name.
    pub method: String,
    /// Untyped wire arguments; `Value::Null` when the operation takes none.
    pub arguments: Value,
}

impl MethodCall {
    /// Create a new method call.
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// The closed set of operations the bridge understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    CheckLocationSettings(LocationSettingsRequest),
    GetLastLocation,
    GetLastLocationWithAddress(LocationRequest),
    GetLocationAvailability,
    SetMockMode(bool),
    SetMockLocation(Location),
    RequestLocationUpdates(LocationRequest),
    RequestLocationUpdatesCb(LocationRequest),
    RequestLocationUpdatesExCb(LocationRequest),
    RemoveLocationUpdates(RequestId),
    RemoveLocationUpdatesCb(RequestId),
    GetNavigationContextState(NavigationRequest),
}

impl Request {
    /// Decode a wire-level call into its typed request.
    ///
    /// Unrecognized operation names yield [`DecodeError::NotImplemented`];
    /// recognized names with undecodable arguments yield
    /// [`DecodeError::BadArguments`].
    pub fn decode(call: &MethodCall) -> Result<Self, DecodeError> {
        match call.method.as_str() {
            "checkLocationSettings" => Ok(Self::CheckLocationSettings(arguments(call)?)),
            "getLastLocation" => Ok(Self::GetLastLocation),
            "getLastLocationWithAddress" => Ok(Self::GetLastLocationWithAddress(arguments(call)?)),
            "getLocationAvailability" => Ok(Self::GetLocationAvailability),
            "setMockMode" => Ok(Self::SetMockMode(arguments(call)?)),
            "setMockLocation" => Ok(Self::SetMockLocation(arguments(call)?)),
            "requestLocationUpdates" => Ok(Self::RequestLocationUpdates(arguments(call)?)),
            "requestLocationUpdatesCb" => Ok(Self::RequestLocationUpdatesCb(arguments(call)?)),
            "requestLocationUpdatesExCb" => Ok(Self::RequestLocationUpdatesExCb(arguments(call)?)),
            "removeLocationUpdates" => Ok(Self::RemoveLocationUpdates(arguments(call)?)),
            "removeLocationUpdatesCb" => Ok(Self::RemoveLocationUpdatesCb(arguments(call)?)),
            "getNavigationContextState" => Ok(Self::GetNavigationContextState(arguments(call)?)),
            other => Err(DecodeError::NotImplemented(other.to_string())),
        }
    }

    /// The wire name of the operation this request was decoded from.
    pub fn method(&self) -> &'static str {
        match self {
            Self::CheckLocationSettings(_) => "checkLocationSettings",
            Self::GetLastLocation => "getLastLocation",
            Self::GetLastLocationWithAddress(_) => "getLastLocationWithAddress",
            Self::GetLocationAvailability => "getLocationAvailability",
            Self::SetMockMode(_) => "setMockMode",
            Self::SetMockLocation(_) => "setMockLocation",
            Self::RequestLocationUpdates(_) => "requestLocationUpdates",
            Self::RequestLocationUpdatesCb(_) => "requestLocationUpdatesCb",
            Self::RequestLocationUpdatesExCb(_) => "requestLocationUpdatesExCb",
            Self::RemoveLocationUpdates(_) => "removeLocationUpdates",
            Self::RemoveLocationUpdatesCb(_) => "removeLocationUpdatesCb",
            Self::GetNavigationContextState(_) => "getNavigationContextState",
        }
    }
}

fn arguments<T: DeserializeOwned>(call: &MethodCall) -> Result<T, DecodeError> {
    serde_json::from_value(call.arguments.clone()).map_err(|source| DecodeError::BadArguments {
        method: call.method.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("getLastLocation", Value::Null)]
    #[case("getLocationAvailability", Value::Null)]
    #[case("setMockMode", json!(true))]
    #[case("setMockLocation", json!({"latitude": 1.0, "longitude": 2.0}))]
    #[case("checkLocationSettings", json!({"requests": [], "alwaysShow": false}))]
    #[case("getLastLocationWithAddress", json!({"needAddress": true}))]
    #[case("requestLocationUpdates", json!({"priority": 100}))]
    #[case("requestLocationUpdatesCb", json!({"priority": 102}))]
    #[case("requestLocationUpdatesExCb", json!({"priority": 104}))]
    #[case("removeLocationUpdates", json!(1))]
    #[case("removeLocationUpdatesCb", json!(2))]
    #[case("getNavigationContextState", json!({"requestType": 2}))]
    fn test_recognized_methods_decode(#[case] method: &str, #[case] arguments: Value) {
        let call = MethodCall::new(method, arguments);
        let request = Request::decode(&call).unwrap();
        assert_eq!(request.method(), method);
    }

    #[test]
    fn test_unknown_method_is_not_implemented() {
        let call = MethodCall::new("enableBackgroundLocation", Value::Null);
        let error = Request::decode(&call).unwrap_err();
        assert!(matches!(error, DecodeError::NotImplemented(m) if m == "enableBackgroundLocation"));
    }

    #[test]
    fn test_malformed_arguments_fail_decode() {
        let call = MethodCall::new("setMockMode", json!("definitely"));
        let error = Request::decode(&call).unwrap_err();
        assert!(matches!(error, DecodeError::BadArguments { method, .. } if method == "setMockMode"));
    }

    #[test]
    fn test_remove_decodes_request_id() {
        let call = MethodCall::new("removeLocationUpdates", json!(42));
        let request = Request::decode(&call).unwrap();
        assert_eq!(request, Request::RemoveLocationUpdates(RequestId::new(42)));
    }

    #[test]
    fn test_update_request_arguments_are_typed() {
        let call = MethodCall::new(
            "requestLocationUpdatesCb",
            json!({"priority": 102, "interval": 2500}),
        );

        match Request::decode(&call).unwrap() {
            Request::RequestLocationUpdatesCb(request) => {
                assert_eq!(request.priority, 102);
                assert_eq!(request.interval, 2500);
            }
            other => panic!("Expected RequestLocationUpdatesCb, got {other:?}"),
        }
    }
}
