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

//! Lifecycle (C6): root-node bootstrap, engine start/close.

use crate::{Result, SchemaRegistry};
use schema_registry_locator_service::Error as LocatorError;

impl SchemaRegistry {
    /// Idempotently ensures the locator root exists. Tolerates a concurrent
    /// creator having already won the race (§4.6).
    pub async fn init(&self) -> Result<()> {
        match self.locator_store.ensure_root(&self.config.locator_root).await {
            Ok(()) => Ok(()),
            Err(LocatorError::AlreadyExists) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Marks the engine as ready to serve requests. The backend clients
    /// themselves are already open by the time they are passed to
    /// [`SchemaRegistry::new`] — see that constructor's docs for why.
    pub async fn start(&self) -> Result<()> {
        tracing::info!(root = %self.config.locator_root, "schema registry storage engine started");
        Ok(())
    }

    /// Releases the engine. Safe to call even if [`SchemaRegistry::start`]
    /// was never called.
    pub async fn close(&self) -> Result<()> {
        tracing::info!("schema registry storage engine closed");
        Ok(())
    }
}
