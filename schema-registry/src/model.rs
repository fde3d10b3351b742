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

//! The data model of §3: the records that travel between the codec (C3), the
//! ledger store (C1), and the locator store (C2).

use crate::position::Position;
use crate::version::Version;

/// One entry in a locator's index: a version, the content hash registered at
/// that version, and the position of the `SchemaEntry` that backs it.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct IndexEntry {
    pub version: Version,
    pub hash: Vec<u8>,
    pub position: Position,
}

/// The payload stored in a single ledger entry. `index` is the chain of
/// index entries known at the moment this entry was written — used as a
/// one-hop fallback for historical lookups against legacy, truncated
/// locators (§4.5).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SchemaEntry {
    pub schema_data: Vec<u8>,
    pub index: Vec<IndexEntry>,
}

/// The metadata record stored at `<root>/<schemaId>` in the locator store.
///
/// Invariant (§3.2-3.3): `info` always equals `index.last()`; `info.version
/// == index.len() - 1`; `index` is sorted strictly ascending by version with
/// no gaps.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SchemaLocator {
    pub info: IndexEntry,
    pub index: Vec<IndexEntry>,
}

impl SchemaLocator {
    /// A fresh, single-version locator, as built by the write path's Branch A
    /// (§4.4, step 2c).
    pub fn singleton(entry: IndexEntry) -> Self {
        Self { info: entry.clone(), index: vec![entry] }
    }

    /// Appends `entry` as the new latest version, as built by Branch B
    /// (§4.4, step 3c).
    pub fn with_appended(&self, entry: IndexEntry) -> Self {
        let mut index = self.index.clone();
        index.push(entry.clone());
        Self { info: entry, index }
    }
}

/// What a successful read operation hands back to the caller (§3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredSchema {
    pub data: Vec<u8>,
    pub version: Version,
}
