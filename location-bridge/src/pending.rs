//! One-shot result delivery for in-flight caller operations.
//!
//! Every method invocation gets a [`PendingCall`]: the operation name plus
//! a single-use sink the terminal outcome is delivered through. Completion
//! consumes the call by value, so a second delivery attempt is impossible
//! by construction rather than checked at runtime.

use serde::Serialize;
use tokio::sync::oneshot;

use location_api::ProviderResult;

use crate::error::BridgeError;

/// Terminal outcome of one method invocation.
pub type CallReply = std::result::Result<serde_json::Value, BridgeError>;

/// The caller-side placeholder awaiting exactly one terminal outcome.
#[derive(Debug)]
pub struct PendingCall {
    method: String,
    sink: oneshot::Sender<CallReply>,
}

impl PendingCall {
    /// Create a pending call and the receiver its outcome arrives on.
    pub fn new(method: impl Into<String>) -> (Self, oneshot::Receiver<CallReply>) {
        let (sink, receiver) = oneshot::channel();
        (
            Self {
                method: method.into(),
                sink,
            },
            receiver,
        )
    }

    /// The operation this call was made for.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Complete the call with a success payload.
    pub fn succeed<T: Serialize>(self, payload: &T) {
        match serde_json::to_value(payload) {
            Ok(value) => self.send(Ok(value)),
            Err(source) => {
                let method = self.method.clone();
                self.send(Err(BridgeError::Encode { method, source }));
            }
        }
    }

    /// Complete the call with a failure.
    pub fn fail(self, error: BridgeError) {
        self.send(Err(error));
    }

    fn send(self, reply: CallReply) {
        let method = self.method;
        if self.sink.send(reply).is_err() {
            tracing::debug!(%method, "Caller dropped its receiver; discarding reply");
        }
    }
}

/// Route a provider outcome into exactly one delivery on the call's sink.
pub fn complete<T: Serialize>(call: PendingCall, outcome: ProviderResult<T>) {
    match outcome {
        Ok(payload) => call.succeed(&payload),
        Err(error) => call.fail(error.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use location_api::{Location, ProviderError};

    #[tokio::test]
    async fn test_succeed_delivers_payload() {
        let (call, receiver) = PendingCall::new("getLastLocation");
        call.succeed(&Location {
            latitude: 1.5,
            ..Location::default()
        });

        let reply = receiver.await.unwrap().unwrap();
        assert_eq!(reply["latitude"], 1.5);
    }

    #[tokio::test]
    async fn test_fail_delivers_error() {
        let (call, receiver) = PendingCall::new("getLastLocation");
        call.fail(BridgeError::SettingsUnavailable);

        let reply = receiver.await.unwrap();
        assert!(matches!(reply, Err(BridgeError::SettingsUnavailable)));
    }

    #[tokio::test]
    async fn test_complete_routes_provider_outcomes() {
        let (call, receiver) = PendingCall::new("setMockMode");
        complete(call, Ok(()));
        assert_eq!(receiver.await.unwrap().unwrap(), serde_json::Value::Null);

        let (call, receiver) = PendingCall::new("setMockMode");
        complete::<()>(call, Err(ProviderError::new("907", "mock mode rejected")));
        let reply = receiver.await.unwrap();
        assert!(matches!(reply, Err(BridgeError::Provider(e)) if e.code == "907"));
    }

    #[test]
    fn test_completion_with_dropped_receiver_is_quiet() {
        let (call, receiver) = PendingCall::new("getLastLocation");
        drop(receiver);
        // Must not panic; the reply is discarded.
        call.succeed(&serde_json::json!({"ok": true}));
    }
}
