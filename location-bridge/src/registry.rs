//! Live update-request bookkeeping.
//!
//! This module provides thread-safe tracking of the subscriptions a caller
//! currently holds, keyed by the id the bridge allocated when the
//! subscription was accepted. The registry is the single source of truth
//! for which ids are live and which delivery handle each id owns.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use location_api::RequestId;

use crate::subscription::SubscriptionHandle;

/// Thread-safe registry of live update requests.
///
/// The registry maintains a single mapping from allocated [`RequestId`] to
/// the [`SubscriptionHandle`] that delivery for that request runs through.
/// All map operations take a whole-map lock, so no caller ever observes a
/// torn intermediate state, and `remove` is an atomic take: when two
/// cancellations race on the same id, at most one of them observes the
/// handle.
pub struct UpdateRegistry {
    /// Mapping from request id to the handle delivery runs through
    entries: Arc<RwLock<HashMap<RequestId, SubscriptionHandle>>>,

    /// Atomic counter for generating unique request ids
    next_id: Arc<AtomicU64>,
}

impl UpdateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Allocate a fresh request id.
    ///
    /// Ids are produced by a single atomic increment, so concurrent
    /// allocations never share an id and ids are never reused for the
    /// lifetime of the process.
    pub fn allocate(&self) -> RequestId {
        RequestId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Store the handle for an allocated id.
    ///
    /// Registering an id twice indicates a caller bug; the previous handle
    /// is replaced and a warning is logged.
    pub async fn register(&self, id: RequestId, handle: SubscriptionHandle) {
        let mut entries = self.entries.write().await;
        if entries.insert(id, handle).is_some() {
            tracing::warn!(%id, "Replacing an existing registry entry; duplicate registration");
        }
    }

    /// Look up the handle for an id, if it is live.
    pub async fn lookup(&self, id: RequestId) -> Option<SubscriptionHandle> {
        let entries = self.entries.read().await;
        entries.get(&id).cloned()
    }

    /// Atomically remove and return the handle for an id.
    ///
    /// Returns `None` when the id is not live, which is also what the
    /// loser of a concurrent remove on the same id observes.
    pub async fn remove(&self, id: RequestId) -> Option<SubscriptionHandle> {
        let mut entries = self.entries.write().await;
        entries.remove(&id)
    }

    /// Number of live update requests.
    pub async fn count(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }

    /// Remove and return every live entry.
    ///
    /// Used by host-teardown cleanup to sweep all subscriptions at once.
    pub async fn drain(&self) -> Vec<(RequestId, SubscriptionHandle)> {
        let mut entries = self.entries.write().await;
        entries.drain().collect()
    }
}

impl Default for UpdateRegistry {
    fn default() -> Self {
        Self::new()
    }
}
