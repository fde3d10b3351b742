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

//! A stable, self-describing tag-length-value binary encoding for the data
//! model records (C3, §4.3).
//!
//! Every record is a flat sequence of `(tag: u8, len: u32 big-endian, value:
//! [u8; len])` fields. Decoding never errors on an unrecognized tag — it is
//! simply skipped — so a decoder built against an older version of this
//! crate keeps working against data written by a newer one, and a field
//! absent from the wire decodes to its type's zero value rather than
//! failing the whole record.

use crate::error::{Error, Result};
use crate::model::{IndexEntry, SchemaEntry, SchemaLocator};
use crate::position::Position;
use crate::version::{decode_version, encode_version, Version};

use bytes::{Buf, BufMut, Bytes, BytesMut};

const TAG_VERSION: u8 = 1;
const TAG_HASH: u8 = 2;
const TAG_POSITION: u8 = 3;
const TAG_SCHEMA_DATA: u8 = 4;
const TAG_INDEX_ITEM: u8 = 5;
const TAG_INFO: u8 = 6;

fn write_tlv(buf: &mut BytesMut, tag: u8, value: &[u8]) {
    buf.put_u8(tag);
    buf.put_u32(value.len() as u32);
    buf.put_slice(value);
}

/// Splits a buffer into its top-level `(tag, value)` fields. Later fields
/// with the same tag are appended in order; callers that want "last wins"
/// semantics for a scalar field should take `.last()`, callers that want
/// every occurrence (e.g. a repeated field) should keep them all.
fn read_tlv(mut bytes: &[u8]) -> Vec<(u8, Bytes)> {
    let mut fields = Vec::new();
    while bytes.len() >= 5 {
        let tag = bytes[0];
        let len = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize;
        bytes.advance(5);
        if bytes.len() < len {
            // Truncated trailing field: stop rather than panic: nothing past this
            // point in the buffer can be trusted.
            break;
        }
        fields.push((tag, Bytes::copy_from_slice(&bytes[..len])));
        bytes.advance(len);
    }
    fields
}

fn encode_position(position: &Position) -> [u8; 16] {
    let mut buf = [0u8; 16];
    buf[..8].copy_from_slice(&position.ledger_id.to_be_bytes());
    buf[8..].copy_from_slice(&position.entry_id.to_be_bytes());
    buf
}

fn decode_position(bytes: &[u8]) -> Position {
    if bytes.len() < 16 {
        return Position::default();
    }
    let mut ledger_id = [0u8; 8];
    let mut entry_id = [0u8; 8];
    ledger_id.copy_from_slice(&bytes[..8]);
    entry_id.copy_from_slice(&bytes[8..16]);
    Position { ledger_id: i64::from_be_bytes(ledger_id), entry_id: i64::from_be_bytes(entry_id) }
}

pub fn encode_index_entry(entry: &IndexEntry) -> Vec<u8> {
    let mut buf = BytesMut::new();
    write_tlv(&mut buf, TAG_VERSION, &encode_version(entry.version));
    write_tlv(&mut buf, TAG_HASH, &entry.hash);
    write_tlv(&mut buf, TAG_POSITION, &encode_position(&entry.position));
    buf.to_vec()
}

pub fn decode_index_entry(bytes: &[u8]) -> Result<IndexEntry> {
    let fields = read_tlv(bytes);
    let mut version: Version = 0;
    let mut hash = Vec::new();
    let mut position = Position::default();
    for (tag, value) in fields {
        match tag {
            TAG_VERSION => version = decode_version(&value)?,
            TAG_HASH => hash = value.to_vec(),
            TAG_POSITION => position = decode_position(&value),
            _ => {} // unknown field: forward-compatible no-op.
        }
    }
    Ok(IndexEntry { version, hash, position })
}

pub fn encode_schema_entry(entry: &SchemaEntry) -> Vec<u8> {
    let mut buf = BytesMut::new();
    write_tlv(&mut buf, TAG_SCHEMA_DATA, &entry.schema_data);
    for index_entry in &entry.index {
        write_tlv(&mut buf, TAG_INDEX_ITEM, &encode_index_entry(index_entry));
    }
    buf.to_vec()
}

pub fn decode_schema_entry(bytes: &[u8]) -> Result<SchemaEntry> {
    let fields = read_tlv(bytes);
    let mut schema_data = Vec::new();
    let mut index = Vec::new();
    for (tag, value) in fields {
        match tag {
            TAG_SCHEMA_DATA => schema_data = value.to_vec(),
            TAG_INDEX_ITEM => index.push(decode_index_entry(&value)?),
            _ => {}
        }
    }
    Ok(SchemaEntry { schema_data, index })
}

pub fn encode_schema_locator(locator: &SchemaLocator) -> Vec<u8> {
    let mut buf = BytesMut::new();
    write_tlv(&mut buf, TAG_INFO, &encode_index_entry(&locator.info));
    for index_entry in &locator.index {
        write_tlv(&mut buf, TAG_INDEX_ITEM, &encode_index_entry(index_entry));
    }
    buf.to_vec()
}

pub fn decode_schema_locator(bytes: &[u8]) -> Result<SchemaLocator> {
    let fields = read_tlv(bytes);
    let mut info = None;
    let mut index = Vec::new();
    for (tag, value) in fields {
        match tag {
            TAG_INFO => info = Some(decode_index_entry(&value)?),
            TAG_INDEX_ITEM => index.push(decode_index_entry(&value)?),
            _ => {}
        }
    }
    let info = info.ok_or_else(|| Error::DecodeError("schema locator missing info field".to_string()))?;
    Ok(SchemaLocator { info, index })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index_entry(version: Version) -> IndexEntry {
        IndexEntry { version, hash: vec![0xAA, version as u8], position: Position { ledger_id: 7, entry_id: 0 } }
    }

    #[test]
    fn index_entry_round_trips() {
        let entry = sample_index_entry(3);
        let decoded = decode_index_entry(&encode_index_entry(&entry)).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn index_entry_with_sentinel_position_round_trips() {
        let entry = IndexEntry { version: 0, hash: vec![0xAA], position: Position::SENTINEL };
        let decoded = decode_index_entry(&encode_index_entry(&entry)).unwrap();
        assert_eq!(decoded.position, Position::SENTINEL);
    }

    #[test]
    fn schema_entry_round_trips_with_index_chain() {
        let entry = SchemaEntry {
            schema_data: b"{\"type\":\"record\"}".to_vec(),
            index: vec![sample_index_entry(0), sample_index_entry(1)],
        };
        let decoded = decode_schema_entry(&encode_schema_entry(&entry)).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn schema_locator_round_trips() {
        let e0 = sample_index_entry(0);
        let e1 = sample_index_entry(1);
        let locator = SchemaLocator { info: e1.clone(), index: vec![e0, e1] };
        let decoded = decode_schema_locator(&encode_schema_locator(&locator)).unwrap();
        assert_eq!(decoded, locator);
    }

    #[test]
    fn unknown_leading_field_is_skipped_not_fatal() {
        let mut buf = BytesMut::new();
        write_tlv(&mut buf, 0xFE, b"from-the-future");
        buf.extend_from_slice(&encode_index_entry(&sample_index_entry(5)));
        let decoded = decode_index_entry(&buf).unwrap();
        assert_eq!(decoded, sample_index_entry(5));
    }

    #[test]
    fn absent_scalar_fields_decode_to_zero_value() {
        let decoded = decode_index_entry(&[]).unwrap();
        assert_eq!(decoded, IndexEntry::default());
    }

    #[test]
    fn schema_locator_missing_info_is_decode_error() {
        let mut buf = BytesMut::new();
        write_tlv(&mut buf, TAG_INDEX_ITEM, &encode_index_entry(&sample_index_entry(0)));
        assert!(decode_schema_locator(&buf).is_err());
    }
}
