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

//! An in-memory ledger client, for tests and for embedding this crate without
//! a real append-only log store backing it.

use crate::{Error, LedgerClient, LedgerEnsemble, LedgerHandle, Result};

use async_trait::async_trait;
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicI64, AtomicUsize, Ordering},
};

#[derive(Debug, Default)]
struct Ledger {
    tag: String,
    entry: Option<Vec<u8>>,
    open: bool,
}

/// A mock [`LedgerClient`] backed by an in-process map of ledger ID to its
/// single entry.
///
/// Exposes call counters so tests can assert on read/write amplification
/// (e.g. the coalescing property in §8.7) without racing on timing.
#[derive(Debug, Default)]
pub struct MockLedgerClient {
    ledgers: Mutex<HashMap<i64, Ledger>>,
    next_ledger_id: AtomicI64,
    creates: AtomicUsize,
    opens: AtomicUsize,
    reads: AtomicUsize,
    closes: AtomicUsize,
}

impl MockLedgerClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Returns the number of ledgers currently tracked, including any
    /// orphaned by a lost CAS race (the engine never deletes them — §4.4).
    pub fn ledger_count(&self) -> usize {
        self.ledgers.lock().len()
    }
}

#[async_trait]
impl LedgerClient for MockLedgerClient {
    async fn create_ledger(&self, schema_id: &str, _ensemble: LedgerEnsemble) -> Result<LedgerHandle> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let ledger_id = self.next_ledger_id.fetch_add(1, Ordering::SeqCst);
        self.ledgers.lock().insert(ledger_id, Ledger { tag: schema_id.to_string(), entry: None, open: true });
        tracing::trace!(%schema_id, ledger_id, "created ledger");
        Ok(LedgerHandle { ledger_id })
    }

    async fn append(&self, handle: LedgerHandle, data: &[u8]) -> Result<i64> {
        let mut ledgers = self.ledgers.lock();
        let ledger = ledgers
            .get_mut(&handle.ledger_id)
            .ok_or(Error::LedgerNotFound(handle.ledger_id))?;
        if ledger.entry.is_some() {
            // The engine never appends twice to the same ledger; treat it as an I/O error
            // rather than silently overwriting.
            return Err(Error::LedgerIoError(format!("ledger {} already has an entry", handle.ledger_id)));
        }
        ledger.entry = Some(data.to_vec());
        Ok(0)
    }

    async fn open_ledger(&self, ledger_id: i64) -> Result<LedgerHandle> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let mut ledgers = self.ledgers.lock();
        let ledger = ledgers.get_mut(&ledger_id).ok_or(Error::LedgerNotFound(ledger_id))?;
        ledger.open = true;
        Ok(LedgerHandle { ledger_id })
    }

    async fn read_single_entry(&self, handle: LedgerHandle, entry_id: i64) -> Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        tracing::trace!(ledger_id = handle.ledger_id, entry_id, "reading ledger entry");
        let ledgers = self.ledgers.lock();
        let ledger = ledgers.get(&handle.ledger_id).ok_or(Error::LedgerNotFound(handle.ledger_id))?;
        if entry_id != 0 {
            return Err(Error::EntryNotFound { ledger_id: handle.ledger_id, entry_id });
        }
        ledger.entry.clone().ok_or(Error::EntryNotFound { ledger_id: handle.ledger_id, entry_id })
    }

    async fn close(&self, handle: LedgerHandle) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        let mut ledgers = self.ledgers.lock();
        if let Some(ledger) = ledgers.get_mut(&handle.ledger_id) {
            ledger.open = false;
        }
        Ok(())
    }
}
