// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-gesture subscriber lists with stable handles.
//!
//! ## Handles
//!
//! [`EventRegistry::subscribe`] returns a [`SubscriptionId`] drawn from a single
//! monotonic counter. Handles never shift when other subscriptions are removed,
//! and a handle for one gesture kind never matches a subscription of another.
//! Removing a handle that is no longer present is a no-op.
//!
//! ## Delivery order
//!
//! [`EventRegistry::snapshot`] returns the handlers of one kind with the most
//! recently subscribed first. Callers deliver from the snapshot, so a handler
//! that subscribes or unsubscribes while being delivered only affects later
//! deliveries.
//!
//! ## Minimal example
//!
//! ```
//! use understory_pointer::registry::EventRegistry;
//! use understory_pointer::types::GestureKind;
//!
//! let mut registry = EventRegistry::new();
//! let first = registry.subscribe(GestureKind::Click, |_, _| {});
//! let second = registry.subscribe(GestureKind::Click, |_, _| {});
//!
//! // Removing the first handle leaves the second one valid.
//! assert!(registry.unsubscribe(GestureKind::Click, first));
//! assert!(registry.unsubscribe(GestureKind::Click, second));
//! assert!(registry.is_empty(GestureKind::Click));
//!
//! // Stale handles are ignored.
//! assert!(!registry.unsubscribe(GestureKind::Click, second));
//! ```

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use core::fmt;

use smallvec::SmallVec;

use crate::error::PointerError;
use crate::types::{GestureEvent, GestureKind};

/// A gesture handler. The second argument is the force flag.
pub type Handler = Rc<dyn Fn(&GestureEvent, bool)>;

/// Handlers captured for one delivery.
pub type HandlerSnapshot = SmallVec<[Handler; 4]>;

/// Stable handle to a subscription.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Ordered handler lists keyed by gesture kind.
#[derive(Default)]
pub struct EventRegistry {
    buckets: [BTreeMap<SubscriptionId, Handler>; GestureKind::COUNT],
    next_id: u64,
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in GestureKind::ALL {
            map.entry(&kind.name(), &self.len(kind));
        }
        map.finish()
    }
}

impl EventRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler for `kind` and return its handle.
    pub fn subscribe(
        &mut self,
        kind: GestureKind,
        handler: impl Fn(&GestureEvent, bool) + 'static,
    ) -> SubscriptionId {
        self.subscribe_rc(kind, Rc::new(handler))
    }

    /// Append an already shared handler for `kind`.
    pub fn subscribe_rc(&mut self, kind: GestureKind, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.buckets[kind.index()].insert(id, handler);
        tracing::debug!(gesture = %kind, ?id, "subscribed");
        id
    }

    /// Remove the subscription `id` from `kind`.
    ///
    /// Returns `true` if a handler was removed. Unknown or already removed
    /// handles are ignored.
    pub fn unsubscribe(&mut self, kind: GestureKind, id: SubscriptionId) -> bool {
        let removed = self.buckets[kind.index()].remove(&id).is_some();
        if removed {
            tracing::debug!(gesture = %kind, ?id, "unsubscribed");
        }
        removed
    }

    /// Subscribe by gesture name, failing on names the engine does not service.
    pub fn subscribe_named(
        &mut self,
        name: &str,
        handler: impl Fn(&GestureEvent, bool) + 'static,
    ) -> Result<SubscriptionId, PointerError> {
        let kind = parse_kind(name)?;
        Ok(self.subscribe(kind, handler))
    }

    /// Unsubscribe by gesture name, failing on names the engine does not service.
    pub fn unsubscribe_named(
        &mut self,
        name: &str,
        id: SubscriptionId,
    ) -> Result<bool, PointerError> {
        let kind = parse_kind(name)?;
        Ok(self.unsubscribe(kind, id))
    }

    /// Number of handlers subscribed to `kind`.
    pub fn len(&self, kind: GestureKind) -> usize {
        self.buckets[kind.index()].len()
    }

    /// Returns `true` if nothing is subscribed to `kind`.
    pub fn is_empty(&self, kind: GestureKind) -> bool {
        self.buckets[kind.index()].is_empty()
    }

    /// Capture the handlers of `kind`, most recently subscribed first.
    pub fn snapshot(&self, kind: GestureKind) -> HandlerSnapshot {
        self.buckets[kind.index()]
            .values()
            .rev()
            .cloned()
            .collect()
    }
}

pub(crate) fn parse_kind(name: &str) -> Result<GestureKind, PointerError> {
    name.parse().inspect_err(|_| {
        tracing::warn!(name, "rejected unknown gesture type");
    })
}
