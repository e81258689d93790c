//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Txnoise.
//! The Txnoise project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! Dotted field paths addressing values inside a record.
//!
//! A path starts with `payload` or `metadata`; further segments walk
//! nested objects, e.g. `payload.text` or `metadata.source.lang`.

use std::fmt;

use serde_json::{Map, Value};

use crate::errors::{Result, TxError};
use crate::record::TxRecord;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxFieldPath {
    segments: Vec<String>,
}

impl TxFieldPath {
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<String> = path
            .split('.')
            .map(|segment| segment.trim().to_string())
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.first().map(String::as_str) {
            None => Err(TxError::validation("field path may not be empty")),
            Some("payload") => Ok(Self { segments }),
            Some("metadata") if segments.len() > 1 => Ok(Self { segments }),
            Some("metadata") => Err(TxError::validation(
                "metadata paths must include at least one key",
            )),
            Some(_) => Err(TxError::validation(
                "field path must start with 'payload' or 'metadata'",
            )),
        }
    }

    pub fn resolve<'a>(&self, record: &'a TxRecord) -> Option<&'a Value> {
        let (root, rest) = self.segments.split_first()?;
        let mut current = match root.as_str() {
            "payload" => &record.payload,
            _ => {
                let (key, rest) = rest.split_first()?;
                return walk(record.metadata.as_ref()?.get(key)?, rest);
            }
        };
        for segment in rest {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Text at this path, if the value there is a string.
    pub fn resolve_str<'a>(&self, record: &'a TxRecord) -> Option<&'a str> {
        self.resolve(record).and_then(Value::as_str)
    }

    /// Writes `value` at this path, creating intermediate objects. Returns
    /// false when a non-object value blocks the path.
    pub fn set_value(&self, record: &mut TxRecord, value: Value) -> bool {
        let Some((root, rest)) = self.segments.split_first() else {
            return false;
        };
        if root.as_str() == "payload" {
            let Some((last, parents)) = rest.split_last() else {
                record.payload = value;
                return true;
            };
            if !record.payload.is_object() {
                record.payload = Value::Object(Map::new());
            }
            let Value::Object(map) = &mut record.payload else {
                return false;
            };
            insert_at(map, parents, last, value)
        } else {
            let Some((last, parents)) = rest.split_last() else {
                return false;
            };
            insert_at(record.metadata_mut(), parents, last, value)
        }
    }
}

impl fmt::Display for TxFieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

fn walk<'a>(mut current: &'a Value, segments: &[String]) -> Option<&'a Value> {
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn insert_at(mut current: &mut Map<String, Value>, parents: &[String], last: &str, value: Value) -> bool {
    for segment in parents {
        let entry = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match entry {
            Value::Object(map) => map,
            _ => return false,
        };
    }
    current.insert(last.to_string(), value);
    true
}
