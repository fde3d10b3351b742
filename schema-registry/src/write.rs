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

//! The write path (C4): `Put` and `Delete`.
//!
//! Both branches of `Put` follow the one correct ordering from §4.4: read
//! the locator, build the new ledger entry, then CAS the locator. A lost
//! race (`AlreadyExists` on create, `VersionMismatch` on update) is handled
//! entirely inside this loop by restarting from the first locator read — it
//! is never surfaced to the caller (§7). The ledger written during a lost
//! race is intentionally left orphaned (§4.4, §9): rolling it back could
//! race a concurrent reader that is still in the middle of opening it.

use crate::model::{IndexEntry, SchemaEntry};
use crate::position::Position;
use crate::{validate_schema_id, Error, Result, SchemaRegistry, Version};
use schema_registry_locator_service::Error as LocatorError;

impl SchemaRegistry {
    /// Registers `data` under `schema_id` with content hash `hash`, returning
    /// the assigned version. If a schema with the same hash is already the
    /// latest version, returns that version without writing anything (§4.4,
    /// step 3a).
    pub async fn put(&self, schema_id: &str, data: Vec<u8>, hash: Vec<u8>) -> Result<Version> {
        validate_schema_id(schema_id)?;
        let path = self.config.locator_path(schema_id);

        loop {
            let existing = self.locator_store.read(&path).await?;
            match existing {
                None => match self.put_create(schema_id, &path, &data, &hash).await? {
                    Some(version) => return Ok(version),
                    None => continue, // AlreadyExists: another writer won, retry from the top.
                },
                Some(node) => {
                    let locator = crate::codec::decode_schema_locator(&node.bytes)?;

                    if !locator.info.hash.is_empty() && locator.info.hash == hash {
                        return Ok(locator.info.version);
                    }

                    match self.put_update(schema_id, &path, &data, &hash, &locator, node.node_version).await? {
                        Some(version) => return Ok(version),
                        None => continue, // VersionMismatch: retry from the top.
                    }
                }
            }
        }
    }

    /// Branch A of §4.4: builds a brand-new single-version history and
    /// CAS-creates the locator. Returns `Ok(None)` on a lost creation race.
    async fn put_create(&self, schema_id: &str, path: &str, data: &[u8], hash: &[u8]) -> Result<Option<Version>> {
        let placeholder = IndexEntry { version: 0, hash: hash.to_vec(), position: Position::SENTINEL };
        let schema_entry = SchemaEntry { schema_data: data.to_vec(), index: vec![placeholder] };
        let position = self.write_ledger_entry(schema_id, &schema_entry).await?;

        let final_entry = IndexEntry { version: 0, hash: hash.to_vec(), position };
        let locator = crate::model::SchemaLocator::singleton(final_entry);
        let bytes = crate::codec::encode_schema_locator(&locator);

        match self.locator_store.create(path, &bytes).await {
            Ok(()) => Ok(Some(0)),
            Err(LocatorError::AlreadyExists) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Branch B of §4.4: appends a new version onto an existing locator and
    /// CAS-updates it. Returns `Ok(None)` on a lost CAS race.
    async fn put_update(
        &self,
        schema_id: &str,
        path: &str,
        data: &[u8],
        hash: &[u8],
        locator: &crate::model::SchemaLocator,
        expected_node_version: schema_registry_locator_service::NodeVersion,
    ) -> Result<Option<Version>> {
        let next_version = locator.info.version + 1;
        let schema_entry = SchemaEntry { schema_data: data.to_vec(), index: locator.index.clone() };
        let position = self.write_ledger_entry(schema_id, &schema_entry).await?;

        let new_entry = IndexEntry { version: next_version, hash: hash.to_vec(), position };
        let new_locator = locator.with_appended(new_entry);
        let bytes = crate::codec::encode_schema_locator(&new_locator);

        match self.locator_store.update(path, &bytes, expected_node_version).await {
            Ok(()) => Ok(Some(next_version)),
            Err(LocatorError::VersionMismatch) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Creates a new ledger, appends the encoded `schema_entry` to it, and
    /// closes it, returning the position the entry was written at. A failed
    /// close is logged but does not fail an otherwise-successful append
    /// (§5): the ledger is left orphaned only when the subsequent locator
    /// CAS loses its race, never because of a close failure here.
    async fn write_ledger_entry(&self, schema_id: &str, schema_entry: &SchemaEntry) -> Result<Position> {
        let handle = self.ledger_client.create_ledger(schema_id, self.config.ledger_ensemble).await?;
        let append_result = self.ledger_client.append(handle, &crate::codec::encode_schema_entry(schema_entry)).await;
        if let Err(err) = self.ledger_client.close(handle).await {
            tracing::warn!(ledger_id = handle.ledger_id, %err, "failed to close ledger after append");
        }
        let entry_id = append_result.map_err(Error::from)?;
        Ok(Position { ledger_id: handle.ledger_id, entry_id })
    }

    /// Logically deletes `schema_id`: a normal `Put` with empty data and
    /// empty hash, advancing the version like any other write (§3.7, §4.4).
    /// Returns `None` if the key has never been written ("no such key" maps
    /// to a no-op, per §4.4's `Delete`).
    pub async fn delete(&self, schema_id: &str) -> Result<Option<Version>> {
        validate_schema_id(schema_id)?;
        if self.get_latest(schema_id).await?.is_none() {
            return Ok(None);
        }
        let version = self.put(schema_id, Vec::new(), Vec::new()).await?;
        Ok(Some(version))
    }
}
