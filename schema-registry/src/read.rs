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

//! The read path (C5): `GetLatest`, `GetByVersion`, `GetAll`.
//!
//! `GetLatest` is coalesced (§6): concurrent callers for the same
//! `schema_id` share one locator read and one ledger read rather than each
//! issuing their own round-trip to the backends. `GetByVersion` and
//! `GetAll` are not coalesced — they are keyed by `(schema_id, version)` and
//! by the full history respectively, and are expected to be called far less
//! often than `GetLatest` in a real broker's hot path.

use crate::model::{IndexEntry, SchemaEntry};
use crate::position::Position;
use crate::version::VersionSelector;
use crate::{validate_schema_id, Result, SchemaRegistry, StoredSchema, Version};
use futures::future::{BoxFuture, FutureExt};

impl SchemaRegistry {
    /// The engine's single logical read entry point (§6's `Get(schemaId,
    /// version)`): dispatches to [`SchemaRegistry::get_latest`] or
    /// [`SchemaRegistry::get_by_version`] depending on `selector`. Exposed
    /// mainly for callers holding a `VersionSelector` already in hand (e.g.
    /// deserialized off an RPC wire); most in-process callers reach for the
    /// two specific methods directly.
    pub async fn get(&self, schema_id: &str, selector: impl Into<VersionSelector>) -> Result<Option<StoredSchema>> {
        match selector.into() {
            VersionSelector::Latest => self.get_latest(schema_id).await,
            VersionSelector::Specific(version) => self.get_by_version(schema_id, version).await,
        }
    }

    /// Returns the most recent version of `schema_id`, or `None` if it has
    /// never been written. Concurrent calls for the same `schema_id` share
    /// one in-flight backend round-trip (§6).
    pub async fn get_latest(&self, schema_id: &str) -> Result<Option<StoredSchema>> {
        validate_schema_id(schema_id)?;
        let registry = self.clone();
        let schema_id = schema_id.to_string();
        self.get_latest_coalescer
            .get_or_insert_with(schema_id.clone(), move || async move { registry.get_latest_uncoalesced(&schema_id).await })
            .await
    }

    async fn get_latest_uncoalesced(&self, schema_id: &str) -> Result<Option<StoredSchema>> {
        let path = self.config.locator_path(schema_id);
        match self.locator_store.read(&path).await? {
            None => Ok(None),
            Some(node) => {
                let locator = crate::codec::decode_schema_locator(&node.bytes)?;
                let stored = self.read_position(&locator.info.position, locator.info.version).await?;
                Ok(Some(stored))
            }
        }
    }

    /// Returns `schema_id` as it existed at exactly `version`, or `None` if
    /// that version was never written (including when `version` is past the
    /// current latest, or `schema_id` itself was never written).
    pub async fn get_by_version(&self, schema_id: &str, version: Version) -> Result<Option<StoredSchema>> {
        validate_schema_id(schema_id)?;
        let path = self.config.locator_path(schema_id);
        let node = match self.locator_store.read(&path).await? {
            None => return Ok(None),
            Some(node) => node,
        };
        let locator = crate::codec::decode_schema_locator(&node.bytes)?;
        if version > locator.info.version {
            return Ok(None);
        }

        match self.resolve_index_entry(&locator.index, version).await? {
            None => Ok(None),
            Some(entry) => Ok(Some(self.read_position(&entry.position, version).await?)),
        }
    }

    /// Returns one future per stored version of `schema_id`, oldest first,
    /// each independently resolving to that version's data (§4.5). Returns
    /// an empty vector immediately if `schema_id` was never written — there
    /// is no history to chase further (open question resolved in
    /// `DESIGN.md`).
    pub async fn get_all(&self, schema_id: &str) -> Result<Vec<BoxFuture<'static, Result<StoredSchema>>>> {
        validate_schema_id(schema_id)?;
        let path = self.config.locator_path(schema_id);
        let node = match self.locator_store.read(&path).await? {
            None => return Ok(Vec::new()),
            Some(node) => node,
        };
        let locator = crate::codec::decode_schema_locator(&node.bytes)?;
        let registry = self.clone();

        Ok(locator
            .index
            .into_iter()
            .map(|entry| {
                let registry = registry.clone();
                async move { registry.read_position(&entry.position, entry.version).await }.boxed()
            })
            .collect())
    }

    /// Walks the index chain (§4.3) looking for the entry with the given
    /// `version`. Each `SchemaEntry`'s `index` only carries the chain tail
    /// as of when it was written, so an older version may require following
    /// one more hop back through an earlier `SchemaEntry`'s own index before
    /// the target version appears as a direct entry.
    async fn resolve_index_entry(&self, index: &[IndexEntry], version: Version) -> Result<Option<IndexEntry>> {
        let mut index = index.to_vec();
        loop {
            if let Some(oldest) = index.first() {
                if oldest.version > version {
                    let schema_entry = self.read_schema_entry_at(&oldest.position).await?;
                    index = schema_entry.index;
                    continue;
                }
            }

            for entry in &index {
                if entry.version == version {
                    return Ok(Some(entry.clone()));
                }
                if entry.version > version {
                    return Ok(None);
                }
            }
            return Ok(None);
        }
    }

    async fn read_position(&self, position: &Position, version: Version) -> Result<StoredSchema> {
        let schema_entry = self.read_schema_entry_at(position).await?;
        Ok(StoredSchema { data: schema_entry.schema_data, version })
    }

    async fn read_schema_entry_at(&self, position: &Position) -> Result<SchemaEntry> {
        let handle = self.ledger_client.open_ledger(position.ledger_id).await?;
        let result = self.ledger_client.read_single_entry(handle, position.entry_id).await;
        if let Err(err) = self.ledger_client.close(handle).await {
            tracing::warn!(ledger_id = position.ledger_id, %err, "failed to close ledger after read");
        }
        crate::codec::decode_schema_entry(&result?)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::memory_registry;
    use futures::future::join_all;

    #[tokio::test]
    async fn get_latest_on_an_unwritten_key_is_none() {
        let (registry, _ledger, _locator) = memory_registry();
        assert!(registry.get_latest("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_latest_returns_the_most_recent_write() {
        let (registry, _ledger, _locator) = memory_registry();
        registry.put("t", vec![1], vec![0xAA]).await.unwrap();
        registry.put("t", vec![2], vec![0xBB]).await.unwrap();

        let latest = registry.get_latest("t").await.unwrap().unwrap();
        assert_eq!(latest.data, vec![2]);
        assert_eq!(latest.version, 1);
    }

    #[tokio::test]
    async fn get_by_version_fetches_historical_versions() {
        let (registry, _ledger, _locator) = memory_registry();
        for i in 0..5u8 {
            registry.put("t", vec![i], vec![i, 0xFF]).await.unwrap();
        }

        for version in 0..5u64 {
            let stored = registry.get_by_version("t", version).await.unwrap().unwrap();
            assert_eq!(stored.data, vec![version as u8]);
            assert_eq!(stored.version, version);
        }
    }

    #[tokio::test]
    async fn get_by_version_past_latest_is_none() {
        let (registry, _ledger, _locator) = memory_registry();
        registry.put("t", vec![1], vec![0xAA]).await.unwrap();
        assert!(registry.get_by_version("t", 5).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_by_version_on_unwritten_key_is_none() {
        let (registry, _ledger, _locator) = memory_registry();
        assert!(registry.get_by_version("missing", 0).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_dispatches_on_the_version_selector() {
        use crate::version::VersionSelector;

        let (registry, _ledger, _locator) = memory_registry();
        registry.put("t", vec![1], vec![0xAA]).await.unwrap();
        registry.put("t", vec![2], vec![0xBB]).await.unwrap();

        let latest = registry.get("t", VersionSelector::Latest).await.unwrap().unwrap();
        assert_eq!(latest.version, 1);

        let historical = registry.get("t", 0u64).await.unwrap().unwrap();
        assert_eq!(historical.data, vec![1]);
    }

    #[tokio::test]
    async fn get_all_on_unwritten_key_is_empty() {
        let (registry, _ledger, _locator) = memory_registry();
        assert!(registry.get_all("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_all_returns_every_version_oldest_first() {
        let (registry, _ledger, _locator) = memory_registry();
        for i in 0..4u8 {
            registry.put("t", vec![i], vec![i, 0xFF]).await.unwrap();
        }

        let futures = registry.get_all("t").await.unwrap();
        assert_eq!(futures.len(), 4);
        let resolved: Vec<_> = join_all(futures).await.into_iter().map(Result::unwrap).collect();
        for (version, stored) in resolved.iter().enumerate() {
            assert_eq!(stored.version, version as u64);
            assert_eq!(stored.data, vec![version as u8]);
        }
    }

    /// Simulates a legacy locator whose inline index was truncated to only
    /// the most recent versions (§4.3, §4.5): version 0's index entry is
    /// missing from the locator's own `index`, so resolving it requires one
    /// hop back through an older `SchemaEntry`'s embedded index.
    #[tokio::test]
    async fn get_by_version_falls_back_through_a_truncated_inline_index() {
        use crate::model::{IndexEntry, SchemaLocator};
        use crate::position::Position;
        use crate::SchemaEntry;
        use schema_registry_ledger_service::LedgerClient;
        use schema_registry_locator_service::LocatorStore;

        let (registry, _ledger, _locator) = memory_registry();

        // Build the history the long way, one version at a time, writing a
        // full chain into each ledger entry exactly as the real write path
        // does, so the embedded `SchemaEntry.index` chains are realistic.
        let mut chain = Vec::new();
        for version in 0u64..3 {
            let hash = vec![version as u8];
            let entry = IndexEntry { version, hash: hash.clone(), position: Position::default() };
            let schema_entry = SchemaEntry { schema_data: vec![0x10 + version as u8], index: chain.clone() };
            let handle = registry.ledger_client.create_ledger("t", registry.config.ledger_ensemble).await.unwrap();
            let entry_id = registry
                .ledger_client
                .append(handle, &crate::codec::encode_schema_entry(&schema_entry))
                .await
                .unwrap();
            registry.ledger_client.close(handle).await.unwrap();
            let position = Position { ledger_id: handle.ledger_id, entry_id };
            let entry = IndexEntry { position, ..entry };
            chain.push(entry);
        }

        // Now install a locator whose inline index was truncated down to just
        // the newest entry (version 2), dropping versions 0 and 1 — the
        // legacy on-disk shape this fallback exists for.
        let truncated = SchemaLocator { info: chain[2].clone(), index: vec![chain[2].clone()] };
        let path = registry.config.locator_path("t");
        registry.locator_store.create(&path, &crate::codec::encode_schema_locator(&truncated)).await.unwrap();

        let v0 = registry.get_by_version("t", 0).await.unwrap().unwrap();
        assert_eq!(v0.data, vec![0x10]);
        assert_eq!(v0.version, 0);

        let v1 = registry.get_by_version("t", 1).await.unwrap().unwrap();
        assert_eq!(v1.data, vec![0x11]);

        let v2 = registry.get_by_version("t", 2).await.unwrap().unwrap();
        assert_eq!(v2.data, vec![0x12]);
    }

    #[tokio::test]
    async fn concurrent_get_latest_calls_share_one_backend_round_trip() {
        use std::sync::Arc;

        let (registry, ledger, _locator) = memory_registry();
        registry.put("t", vec![7], vec![0xAA]).await.unwrap();
        let reads_before = ledger.read_count();

        let registry = Arc::new(registry);
        let mut handles = Vec::new();
        for _ in 0..16 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move { registry.get_latest("t").await.unwrap().unwrap() }));
        }

        for handle in handles {
            let stored = handle.await.unwrap();
            assert_eq!(stored.data, vec![7]);
        }

        assert_eq!(ledger.read_count(), reads_before + 1, "all concurrent readers should share one backend read");
    }
}
