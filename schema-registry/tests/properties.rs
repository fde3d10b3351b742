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

//! The remaining invariants of the engine's testable-properties contract
//! that don't fit naturally beside a single module: out-of-range version
//! lookups against a dense gap-free history, and no-phantom-versions under
//! concurrency.

use schema_registry::ledger_service::mock::MockLedgerClient;
use schema_registry::locator_service::memory::MemoryLocatorStore;
use schema_registry::{EngineConfig, SchemaRegistry};
use std::collections::BTreeSet;
use std::sync::Arc;

fn new_registry() -> SchemaRegistry {
    let ledger_client = Arc::new(MockLedgerClient::new());
    let locator_store = Arc::new(MemoryLocatorStore::new());
    SchemaRegistry::new(EngineConfig::default(), ledger_client, locator_store)
}

#[tokio::test]
async fn out_of_range_version_lookup_is_none_at_and_below_latest_is_some() {
    let registry = new_registry();
    for i in 0..6u8 {
        registry.put("t", vec![i], vec![i, 0xAB]).await.unwrap();
    }

    // Every version up to and including the latest is retrievable.
    for version in 0..=5u64 {
        let stored = registry.get_by_version("t", version).await.unwrap();
        assert!(stored.is_some(), "version {version} should be retrievable");
    }

    // Anything past the latest is not found.
    for version in 6..10u64 {
        assert!(registry.get_by_version("t", version).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn no_phantom_versions_under_concurrent_puts() {
    let registry = Arc::new(new_registry());
    let start_version = registry.put("t", vec![0], vec![0]).await.unwrap();
    assert_eq!(start_version, 0);

    const K: u8 = 12;
    let mut handles = Vec::new();
    for i in 0..K {
        let registry = registry.clone();
        handles.push(tokio::spawn(async move { registry.put("t", vec![i], vec![0x40 + i]).await.unwrap() }));
    }

    let mut versions = BTreeSet::new();
    for handle in handles {
        versions.insert(handle.await.unwrap());
    }

    let expected: BTreeSet<u64> = (1..=K as u64).collect();
    assert_eq!(versions, expected, "K concurrent puts must yield K distinct, dense versions");

    for version in expected {
        assert!(
            registry.get_by_version("t", version).await.unwrap().is_some(),
            "version {version} returned by a concurrent put must be retrievable"
        );
    }
}

#[tokio::test]
async fn version_history_is_a_dense_permutation_of_0_to_n_minus_1() {
    use futures::future::join_all;

    let registry = new_registry();
    const N: u8 = 7;
    for i in 0..N {
        registry.put("t", vec![i, i], vec![i]).await.unwrap();
    }

    let futures = registry.get_all("t").await.unwrap();
    assert_eq!(futures.len(), N as usize);

    let resolved: Vec<_> = join_all(futures).await.into_iter().map(Result::unwrap).collect();
    let versions: BTreeSet<u64> = resolved.iter().map(|s| s.version).collect();
    assert_eq!(versions, (0..N as u64).collect::<BTreeSet<_>>());

    for stored in &resolved {
        assert_eq!(stored.data, vec![stored.version as u8, stored.version as u8]);
    }
}
