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

//! A versioned, append-only schema registry storage engine.
//!
//! Composes two independent durable stores — an append-only entry store (the
//! "ledger store", [`ledger_service`]) and a versioned, CAS-protected keyed
//! binary metadata store (the "locator store", [`locator_service`]) — into a
//! single engine that guarantees: atomic version advancement under
//! concurrent writers, idempotent re-registration of an already-stored
//! schema by hash, and read coalescing on `GetLatest`.
//!
//! The wire format, retry semantics, and concurrency contract are described
//! in full in this workspace's `SPEC_FULL.md`.

#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
mod error;
mod helpers;
mod lifecycle;
pub mod model;
pub mod position;
mod read;
pub mod version;
mod write;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use model::{IndexEntry, SchemaEntry, SchemaLocator, StoredSchema};
pub use position::Position;
pub use version::{Version, VersionSelector};

pub use schema_registry_ledger_service as ledger_service;
pub use schema_registry_locator_service as locator_service;

use helpers::Coalescer;
use schema_registry_ledger_service::LedgerClient;
use schema_registry_locator_service::LocatorStore;
use std::sync::Arc;

/// The schema registry storage engine.
///
/// Cheaply clonable: internally an `Arc`, mirroring
/// `snarkos_node_bft::helpers::storage::Storage<N>`'s `Arc<StorageInner<N>>`
/// newtype so a clone can be moved into a spawned or boxed continuation
/// without borrowing the caller's registry.
#[derive(Clone, Debug)]
pub struct SchemaRegistry(Arc<Inner>);

impl std::ops::Deref for SchemaRegistry {
    type Target = Inner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug)]
pub struct Inner {
    config: EngineConfig,
    ledger_client: Arc<dyn LedgerClient>,
    locator_store: Arc<dyn LocatorStore>,
    get_latest_coalescer: Coalescer<String, Result<Option<StoredSchema>>>,
}

impl SchemaRegistry {
    /// Constructs the engine over the given backends.
    ///
    /// Unlike a store that opens its own connections internally, this crate
    /// takes its backend clients by dependency injection — the composition
    /// root (an embedding binary, or a test) owns their construction and
    /// teardown. [`SchemaRegistry::start`] and [`SchemaRegistry::close`]
    /// remain the engine's own lifecycle hooks (C6) but do not themselves
    /// own the backend clients' connections.
    pub fn new(
        config: EngineConfig,
        ledger_client: Arc<dyn LedgerClient>,
        locator_store: Arc<dyn LocatorStore>,
    ) -> Self {
        Self(Arc::new(Inner {
            config,
            ledger_client,
            locator_store,
            get_latest_coalescer: Coalescer::new(),
        }))
    }
}

pub(crate) fn validate_schema_id(schema_id: &str) -> Result<()> {
    if schema_id.is_empty() {
        return Err(Error::InvalidSchemaId);
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use schema_registry_ledger_service::mock::MockLedgerClient;
    use schema_registry_locator_service::memory::MemoryLocatorStore;

    pub fn memory_registry() -> (SchemaRegistry, Arc<MockLedgerClient>, Arc<MemoryLocatorStore>) {
        let ledger_client = Arc::new(MockLedgerClient::new());
        let locator_store = Arc::new(MemoryLocatorStore::new());
        let registry = SchemaRegistry::new(EngineConfig::default(), ledger_client.clone(), locator_store.clone());
        (registry, ledger_client, locator_store)
    }
}
