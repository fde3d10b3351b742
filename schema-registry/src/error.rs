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

/// The schema registry storage engine's public error type.
///
/// `AlreadyExists` and `VersionMismatch` from the locator store, and retries
/// on them, never reach here — they are handled entirely inside the write
/// path (§4.4, §7). Everything that does reach a caller is unrecoverable at
/// the engine level; the caller decides whether to retry.
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("schema id must be non-empty")]
    InvalidSchemaId,

    #[error(transparent)]
    LedgerIoError(#[from] schema_registry_ledger_service::Error),

    #[error("locator store I/O error: {0}")]
    LocatorIoError(String),

    #[error("failed to decode stored record: {0}")]
    DecodeError(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<schema_registry_locator_service::Error> for Error {
    /// `AlreadyExists` / `VersionMismatch` must never be converted through
    /// this path — the write path consumes them directly and retries. If one
    /// reaches here, the store's own retry policy has already been exhausted
    /// by the caller of this conversion, so it is folded into `LocatorIoError`.
    fn from(err: schema_registry_locator_service::Error) -> Self {
        Error::LocatorIoError(err.to_string())
    }
}
