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

//! JSON Lines input and output for record batches.
//!
//! Each line is either a bare payload value or an object with `payload`
//! and optional `id` and `metadata`. Objects without a `payload` key are
//! taken as the payload themselves.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value};

use crate::errors::{Result, TxError};
use crate::record::{TxRecord, TxRecordBatch};

pub struct TxIO;

impl TxIO {
    pub fn load_jsonl(path: impl AsRef<Path>) -> Result<TxRecordBatch> {
        let path = path.as_ref();
        let records = Self::load_jsonl_reader(BufReader::new(File::open(path)?))?;
        log::info!(
            "io.load: records loaded - path={}, records={}",
            path.display(),
            records.len()
        );
        Ok(records)
    }

    pub fn load_jsonl_reader<R: BufRead>(reader: R) -> Result<TxRecordBatch> {
        reader
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| match line {
                Ok(content) if content.trim().is_empty() => None,
                Ok(content) => Some(parse_record(&content, idx + 1)),
                Err(err) => Some(Err(err.into())),
            })
            .collect()
    }

    pub fn write_jsonl(path: impl AsRef<Path>, batch: &[TxRecord]) -> Result<()> {
        let path = path.as_ref();
        Self::write_jsonl_writer(BufWriter::new(File::create(path)?), batch)?;
        log::info!(
            "io.write: records written - path={}, records={}",
            path.display(),
            batch.len()
        );
        Ok(())
    }

    pub fn write_jsonl_writer<W: Write>(mut writer: W, batch: &[TxRecord]) -> Result<()> {
        for record in batch {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn parse_record(line: &str, line_number: usize) -> Result<TxRecord> {
    let value: Value = serde_json::from_str(line)
        .map_err(|err| TxError::validation(format!("line {line_number}: {err}")))?;
    let mut object = match value {
        Value::Object(object) => object,
        payload => return Ok(TxRecord::new(None, payload)),
    };

    let id = match object.remove("id") {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(_) => {
            return Err(TxError::validation(format!(
                "line {line_number}: id must be string"
            )))
        }
    };

    let metadata: Option<Map<String, Value>> = match object.remove("metadata") {
        Some(Value::Object(map)) => Some(map),
        Some(Value::Null) | None => None,
        Some(_) => {
            return Err(TxError::validation(format!(
                "line {line_number}: metadata must be object"
            )))
        }
    };

    let payload = object
        .remove("payload")
        .unwrap_or_else(|| Value::Object(object));

    Ok(TxRecord {
        id,
        payload,
        metadata,
    })
}
