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

/// The `(ledgerId, entryId)` pair identifying a single entry in the ledger
/// store (§3). The sentinel `(-1, -1)` denotes "no backing entry" and is used
/// only inside the placeholder index entry of a freshly created history
/// (§4.4, step 2a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Position {
    pub ledger_id: i64,
    pub entry_id: i64,
}

impl Position {
    pub const SENTINEL: Position = Position { ledger_id: -1, entry_id: -1 };

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}
