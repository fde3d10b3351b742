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

/// Failure modes surfaced by a [`crate::LocatorStore`] implementation.
///
/// `AlreadyExists` and `VersionMismatch` are races, not failures: the write
/// path (C4) handles both locally by restarting the whole operation from its
/// first locator read (§4.4, §7). They are still modeled as `Error` variants
/// here because the store adapter itself has no opinion on retries — that
/// policy belongs to the engine, one layer up.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// `Create` lost a race: another writer's node already exists at this path.
    #[error("locator already exists")]
    AlreadyExists,

    /// `Update`'s compare-and-swap observed a node version other than the one
    /// the caller expected.
    #[error("locator version mismatch")]
    VersionMismatch,

    /// The store itself failed (after exhausting its own retry policy, if any).
    #[error("locator store I/O error: {0}")]
    LocatorIoError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
