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

//! The ledger client adapter (C1 in the storage engine design).
//!
//! A ledger is an append-only log assigned a `ledger_id` by the backing
//! store; the engine writes exactly one entry to each ledger it creates, then
//! closes it. Reads re-open the ledger by ID, read the single entry, and
//! close again. No batching, streaming, or mutation is needed — see the
//! design's rationale for why a ledger's lifespan is always
//! `create -> append -> close` or `open -> read -> close`.

mod error;
pub use error::{Error, Result};

#[cfg(any(feature = "mock", test))]
pub mod mock;

use async_trait::async_trait;
use std::fmt::Debug;

/// A handle to an open ledger, returned by [`LedgerClient::create_ledger`] and
/// [`LedgerClient::open_ledger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerHandle {
    pub ledger_id: i64,
}

/// The digest scheme used to protect entries written to a ledger.
///
/// Mirrors the knob a real append-only log store (e.g. a BookKeeper-style
/// ledger service) exposes; the engine passes this straight through to
/// `create_ledger` and never inspects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DigestType {
    #[default]
    Crc32C,
    Mac,
    Dummy,
}

/// The ensemble parameters for a newly created ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerEnsemble {
    pub ensemble_size: u32,
    pub write_quorum: u32,
    pub ack_quorum: u32,
    pub digest_type: DigestType,
}

impl Default for LedgerEnsemble {
    fn default() -> Self {
        Self { ensemble_size: 1, write_quorum: 1, ack_quorum: 1, digest_type: DigestType::default() }
    }
}

/// The ledger client adapter.
///
/// Implementations adapt the engine to a concrete append-only log store.
/// Every method is a suspension point (§5): none of them may block the
/// calling task.
#[async_trait]
pub trait LedgerClient: Debug + Send + Sync {
    /// Creates a new ledger tagged with `schema_id` for offline diagnostics,
    /// using the given ensemble parameters and an empty password.
    async fn create_ledger(&self, schema_id: &str, ensemble: LedgerEnsemble) -> Result<LedgerHandle>;

    /// Appends a single entry to an open (just-created) ledger, returning the
    /// assigned entry ID. Durable across the ack quorum before completion.
    async fn append(&self, handle: LedgerHandle, data: &[u8]) -> Result<i64>;

    /// Opens an existing ledger for reading.
    async fn open_ledger(&self, ledger_id: i64) -> Result<LedgerHandle>;

    /// Reads exactly one entry at `entry_id` from an open ledger.
    async fn read_single_entry(&self, handle: LedgerHandle, entry_id: i64) -> Result<Vec<u8>>;

    /// Idempotently closes a ledger handle. A failed close must never mask a
    /// prior successful append or read — callers log and move on.
    async fn close(&self, handle: LedgerHandle) -> Result<()>;
}
