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

//! The locator store adapter (C2 in the storage engine design).
//!
//! One node per `SchemaId`, at path `<root>/<schemaId>`, holding the
//! binary-encoded `SchemaLocator` (the engine owns the encoding — this crate
//! only moves bytes and a compare-and-swap token). The adapter does not need
//! list or delete operations for the engine's correctness (§4.2).

mod error;
pub use error::{Error, Result};

#[cfg(any(feature = "mock", test))]
pub mod memory;

use async_trait::async_trait;
use std::fmt::Debug;

/// The CAS token returned alongside a locator read, and required by `update`.
pub type NodeVersion = i64;

/// A locator node as read from the store: its bytes and the CAS token to use
/// if the caller writes back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocatorNode {
    pub bytes: Vec<u8>,
    pub node_version: NodeVersion,
}

/// The versioned, keyed binary node store behind a schema registry's
/// metadata layer.
///
/// A read must never return bytes and a node version that did not arrive
/// together from the store — the cache in a real implementation (e.g. a
/// ZooKeeper-style client with a watch-driven cache) has to preserve that
/// pairing exactly, since the engine's linearizability guarantee (§5) rests
/// on it.
#[async_trait]
pub trait LocatorStore: Debug + Send + Sync {
    /// Reads the node at `path`, or `Ok(None)` if it does not exist.
    async fn read(&self, path: &str) -> Result<Option<LocatorNode>>;

    /// Creates a brand-new node at `path`. Fails with [`Error::AlreadyExists`]
    /// if another creator won the race.
    async fn create(&self, path: &str, bytes: &[u8]) -> Result<()>;

    /// Compare-and-swaps the node at `path`: succeeds only if its current node
    /// version equals `expected_node_version`, else fails with
    /// [`Error::VersionMismatch`].
    async fn update(&self, path: &str, bytes: &[u8], expected_node_version: NodeVersion) -> Result<()>;

    /// Ensures the well-known root path exists. Tolerates concurrent creation
    /// by another process/instance.
    async fn ensure_root(&self, root: &str) -> Result<()>;
}
