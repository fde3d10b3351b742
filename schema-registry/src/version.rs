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

/// A dense, 64-bit monotonic sequence number scoped to a single `SchemaId`
/// (§3). Version `0` is the first successful `Put` against a fresh key.
pub type Version = u64;

/// The polymorphic `version` parameter accepted by the public read
/// operations (§9: "model as a tagged variant rather than a class
/// hierarchy").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionSelector {
    Latest,
    Specific(Version),
}

impl From<Version> for VersionSelector {
    fn from(version: Version) -> Self {
        VersionSelector::Specific(version)
    }
}

/// Encodes a [`Version`] to its 8-byte big-endian wire form (§4.3, §6).
pub fn encode_version(version: Version) -> [u8; 8] {
    version.to_be_bytes()
}

/// Decodes a [`Version`] from either the current 8-byte wire form or the
/// legacy 64-byte form (where only the leading 8 bytes carry the big-endian
/// value). Fails if fewer than 8 bytes are supplied.
pub fn decode_version(bytes: &[u8]) -> crate::Result<Version> {
    if bytes.len() < 8 {
        return Err(crate::Error::DecodeError(format!(
            "version bytes too short: expected at least 8, got {}",
            bytes.len()
        )));
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    Ok(Version::from_be_bytes(buf))
}

impl crate::SchemaRegistry {
    /// `VersionFromBytes` (§6): decodes a wire-encoded version independent of
    /// any particular schema history. A plain associated function rather than
    /// a method on `self`, since it touches neither backend.
    pub fn version_from_bytes(bytes: &[u8]) -> crate::Result<Version> {
        decode_version(bytes)
    }
}
