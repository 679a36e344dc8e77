// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use crate::StoreSnapshot;

/// Subscriber function. It is run synchronously, while the store is locked, so that
/// every subscriber sees the snapshots in exactly the order they were published. It
/// must return quickly and must not call back into the store (that would deadlock).
/// Forward the snapshot to a channel with `try_send` if there is real work to do.
pub type SubscriberFn = dyn Fn(&StoreSnapshot) + Send + Sync + 'static;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

#[derive(Clone)]
pub struct SubscriberFnWrapper {
    pub id: SubscriptionId,
    fn_ref: Arc<SubscriberFn>,
}

impl Debug for SubscriberFnWrapper {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberFnWrapper")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl SubscriberFnWrapper {
    pub fn invoke(&self, snapshot: &StoreSnapshot) { (self.fn_ref)(snapshot); }
}

/// Ordered list of subscribers. They are notified in the order they subscribed.
#[derive(Debug, Default)]
pub struct SubscriberList {
    subscribers: Vec<SubscriberFnWrapper>,
    next_id: u64,
}

impl SubscriberList {
    pub fn push(
        &mut self,
        fn_ref: impl Fn(&StoreSnapshot) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(SubscriberFnWrapper {
            id,
            fn_ref: Arc::new(fn_ref),
        });
        id
    }

    /// Returns `true` if a subscriber with this id was found and removed.
    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.subscribers.len();
        self.subscribers.retain(|it| it.id != id);
        self.subscribers.len() != len_before
    }

    pub fn clear(&mut self) { self.subscribers.clear(); }

    #[must_use]
    pub fn len(&self) -> usize { self.subscribers.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.subscribers.is_empty() }

    pub fn publish(&self, snapshot: &StoreSnapshot) {
        for subscriber in &self.subscribers {
            subscriber.invoke(snapshot);
        }
    }
}
