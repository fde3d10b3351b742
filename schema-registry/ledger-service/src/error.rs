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

use thiserror::Error;

/// Failure modes surfaced by a [`crate::LedgerClient`] implementation.
///
/// These map directly onto §4.1 / §7 of the storage engine design: every
/// variant here is a *surfaced* error — there is nothing in the ledger client
/// adapter's contract that the engine retries on its own (unlike the locator
/// store's `AlreadyExists` / `VersionMismatch`, which are handled locally).
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// The underlying log store could not satisfy a create/append/open/read/close,
    /// for any reason other than the two specific cases below.
    #[error("ledger I/O error: {0}")]
    LedgerIoError(String),

    /// `OpenLedger` was called for a ledger ID the store has no record of.
    #[error("ledger not found: {0}")]
    LedgerNotFound(i64),

    /// `ReadSingleEntry` was called for an entry ID that does not exist within
    /// an otherwise-valid, open ledger.
    #[error("entry not found: ledger {ledger_id}, entry {entry_id}")]
    EntryNotFound { ledger_id: i64, entry_id: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
