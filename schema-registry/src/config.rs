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

use schema_registry_ledger_service::LedgerEnsemble;

/// Configuration accepted by [`crate::SchemaRegistry::start`] (C7). Parsing
/// this from a file or environment is an external collaborator's concern
/// (§1) — this crate only defines the typed shape the engine consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// The locator store root path under which every `<schemaId>` node is
    /// created. Defaults to `"/schemas"` (§6).
    pub locator_root: String,
    pub ledger_ensemble: LedgerEnsemble,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { locator_root: "/schemas".to_string(), ledger_ensemble: LedgerEnsemble::default() }
    }
}

impl EngineConfig {
    pub fn locator_path(&self, schema_id: &str) -> String {
        format!("{}/{}", self.locator_root.trim_end_matches('/'), schema_id)
    }
}

pub use schema_registry_ledger_service::DigestType as LedgerDigestType;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_root_matches_spec() {
        assert_eq!(EngineConfig::default().locator_root, "/schemas");
    }

    #[test]
    fn locator_path_joins_root_and_schema_id() {
        let config = EngineConfig::default();
        assert_eq!(config.locator_path("orders.created"), "/schemas/orders.created");
    }

    #[test]
    fn locator_path_tolerates_trailing_slash_in_root() {
        let config = EngineConfig { locator_root: "/schemas/".to_string(), ..EngineConfig::default() };
        assert_eq!(config.locator_path("t"), "/schemas/t");
    }
}
