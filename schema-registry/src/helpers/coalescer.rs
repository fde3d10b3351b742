// Copyright (C) 2019-2026 Schema Registry Maintainers
// This file is part of the schema-registry library.

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at:
// http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The `GetLatest` request coalescer (§4.5, §5).
//!
//! Generalizes the in-flight request map pattern used throughout
//! `snarkos_node_bft::helpers::Pending` — there, peers deduplicate against a
//! pending item with a callback queue; here, callers deduplicate against a
//! single in-flight [`Shared`] future per `SchemaId`, so N concurrent
//! `GetLatest(schemaId)` calls collapse into exactly one backend round-trip.
//!
//! The map is mutated with [`DashMap::entry`] (an atomic get-or-insert) and
//! cleared with [`DashMap::remove_if`] keyed on an epoch token, so a caller
//! that joined an older in-flight future can never evict a newer one that
//! replaced it in the meantime.

use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::{
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
};

type Entry<V> = (u64, Shared<BoxFuture<'static, V>>);

/// A process-wide deduplicator for a single kind of request, keyed by `K`.
#[derive(Debug)]
pub struct Coalescer<K, V> {
    inflight: DashMap<K, Entry<V>>,
    next_epoch: AtomicU64,
}

impl<K, V> Default for Coalescer<K, V>
where
    K: std::hash::Hash + Eq,
{
    fn default() -> Self {
        Self { inflight: DashMap::new(), next_epoch: AtomicU64::new(0) }
    }
}

impl<K, V> Coalescer<K, V>
where
    K: std::hash::Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of keys with an in-flight request right now.
    pub fn inflight_count(&self) -> usize {
        self.inflight.len()
    }

    /// Runs `make` for `key`, or piggy-backs on an already-in-flight call for
    /// the same key if one exists. Every caller — whether it created the
    /// entry or joined it — observes the same terminal outcome, and attempts
    /// to remove the entry once it resolves; the removal only takes effect
    /// for whichever caller's epoch still matches what is in the map, so a
    /// fresher in-flight call started after this one completed is never
    /// disturbed.
    pub async fn get_or_insert_with<F, Fut>(&self, key: K, make: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V> + Send + 'static,
    {
        let (epoch, shared) = {
            let entry = self.inflight.entry(key.clone()).or_insert_with(move || {
                let epoch = self.next_epoch.fetch_add(1, Ordering::SeqCst);
                let future: BoxFuture<'static, V> = make().boxed();
                (epoch, future.shared())
            });
            entry.value().clone()
        };

        let result = shared.await;

        // Conditional remove-if-equal: only evict the entry if it still points
        // to the future we just awaited (§5's "atomic compare-insert-or-get and
        // a conditional remove-if-equal").
        self.inflight.remove_if(&key, |_, (stored_epoch, _)| *stored_epoch == epoch);

        result
    }
}
