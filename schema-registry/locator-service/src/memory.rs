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

//! An in-memory locator store, for tests and for embedding this crate
//! without a real versioned metadata store backing it.

use crate::{Error, LocatorNode, LocatorStore, NodeVersion, Result};

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct MemoryLocatorStore {
    nodes: RwLock<IndexMap<String, (Vec<u8>, NodeVersion)>>,
    reads: AtomicUsize,
}

impl MemoryLocatorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocatorStore for MemoryLocatorStore {
    async fn read(&self, path: &str) -> Result<Option<LocatorNode>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let nodes = self.nodes.read();
        Ok(nodes.get(path).map(|(bytes, node_version)| LocatorNode { bytes: bytes.clone(), node_version: *node_version }))
    }

    async fn create(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let mut nodes = self.nodes.write();
        if nodes.contains_key(path) {
            tracing::trace!(path, "locator create lost the race");
            return Err(Error::AlreadyExists);
        }
        nodes.insert(path.to_string(), (bytes.to_vec(), 0));
        Ok(())
    }

    async fn update(&self, path: &str, bytes: &[u8], expected_node_version: NodeVersion) -> Result<()> {
        let mut nodes = self.nodes.write();
        let entry = match nodes.get_mut(path) {
            Some(entry) => entry,
            None => return Err(Error::VersionMismatch),
        };
        if entry.1 != expected_node_version {
            tracing::trace!(path, expected_node_version, actual_node_version = entry.1, "locator update lost the race");
            return Err(Error::VersionMismatch);
        }
        entry.0 = bytes.to_vec();
        entry.1 += 1;
        Ok(())
    }

    async fn ensure_root(&self, root: &str) -> Result<()> {
        // A plain in-memory map has no notion of intermediate path nodes; creating
        // the root is a no-op unless it's also used as a real key, which it never is.
        let _ = root;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_read_round_trips() {
        let store = MemoryLocatorStore::new();
        store.create("/schemas/t", b"v0").await.unwrap();
        let node = store.read("/schemas/t").await.unwrap().unwrap();
        assert_eq!(node.bytes, b"v0");
        assert_eq!(node.node_version, 0);
    }

    #[tokio::test]
    async fn second_create_is_already_exists() {
        let store = MemoryLocatorStore::new();
        store.create("/schemas/t", b"v0").await.unwrap();
        let err = store.create("/schemas/t", b"v1").await.unwrap_err();
        assert!(matches!(err, Error::AlreadyExists));
    }

    #[tokio::test]
    async fn update_with_stale_token_is_version_mismatch() {
        let store = MemoryLocatorStore::new();
        store.create("/schemas/t", b"v0").await.unwrap();
        store.update("/schemas/t", b"v1", 0).await.unwrap();
        let err = store.update("/schemas/t", b"v2", 0).await.unwrap_err();
        assert!(matches!(err, Error::VersionMismatch));
    }

    #[tokio::test]
    async fn update_missing_node_is_version_mismatch() {
        let store = MemoryLocatorStore::new();
        let err = store.update("/schemas/missing", b"v1", 0).await.unwrap_err();
        assert!(matches!(err, Error::VersionMismatch));
    }
}
