//! Single-slot correlation for pending settings checks.
//!
//! The confirmation for a settings check arrives out-of-band, through an
//! external UI flow that reports back on a single result channel keyed by a
//! fixed code. That channel cannot disambiguate concurrent checks, so the
//! correlator is deliberately a one-slot register rather than a map: the
//! limitation stays visible instead of being papered over.

use std::sync::{Mutex, MutexGuard, PoisonError};

use location_api::LocationSettingsStates;

use crate::error::BridgeError;
use crate::pending::PendingCall;

/// Holds at most one pending settings check awaiting its outcome.
pub struct SettingsCorrelator {
    slot: Mutex<Option<PendingCall>>,
}

impl SettingsCorrelator {
    /// Create an empty correlator.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Park a pending check in the slot, returning any displaced call.
    ///
    /// A displaced call was never finalized; the previous caller will not
    /// receive a response. This is the single-slot constraint of the
    /// out-of-band channel, not something the correlator can repair.
    pub fn park(&self, call: PendingCall) -> Option<PendingCall> {
        let displaced = self.lock().replace(call);
        if displaced.is_some() {
            tracing::warn!("Parking a settings check over an unresolved one; the earlier caller is orphaned");
        }
        displaced
    }

    /// Take the parked check out of the slot, if any.
    pub fn take(&self) -> Option<PendingCall> {
        self.lock().take()
    }

    /// Whether a check is currently awaiting its outcome.
    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }

    /// Finalize the parked check with the out-of-band outcome.
    ///
    /// `Some(states)` completes the caller with the confirmed settings
    /// snapshot; `None` reports that settings are unavailable. With nothing
    /// parked this is a no-op: a spurious completion signal has no caller
    /// to notify.
    pub fn resolve(&self, states: Option<LocationSettingsStates>) {
        let Some(call) = self.take() else {
            tracing::debug!("Settings resolution with no pending check; ignoring");
            return;
        };

        match states {
            Some(states) => call.succeed(&states),
            None => call.fail(BridgeError::SettingsUnavailable),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<PendingCall>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SettingsCorrelator {
    fn default() -> Self {
        Self::new()
    }
}
