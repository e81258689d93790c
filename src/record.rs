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

//! # Txnoise Record Module
//!
//! Records are the unit that flows through operator pipelines. A record
//! holds an optional identifier, a JSON payload carrying the text to be
//! augmented, and optional metadata that augmentation operators use to
//! mark the variants they produce.
//!
//! ```rust
//! use serde_json::json;
//! use txnoise::record::TxRecord;
//!
//! let mut record = TxRecord::new(Some("s-1".to_string()), json!({"text": "Die Lehrerin [MASK] einen Roman."}));
//! record.metadata_mut().insert("lang".to_string(), json!("de"));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form attributes attached to a record.
pub type TxMetadata = Map<String, Value>;

/// One unit of text data processed by Txnoise operators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TxRecord {
    /// Optional stable identifier. Variant records derive their id from it.
    pub id: Option<String>,

    /// Primary payload, usually an object holding one or more text fields.
    pub payload: Value,

    /// Provenance and augmentation markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TxMetadata>,
}

impl TxRecord {
    pub fn new(id: impl Into<Option<String>>, payload: Value) -> Self {
        TxRecord {
            id: id.into(),
            payload,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: TxMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns a mutable reference to the metadata map, creating it if necessary.
    pub fn metadata_mut(&mut self) -> &mut TxMetadata {
        self.metadata.get_or_insert_with(TxMetadata::new)
    }

    /// Copy of this record marked as the `index`-th variant produced by
    /// `method`.
    pub fn variant(&self, method: &str, index: usize) -> Self {
        let mut record = self.clone();
        if let Some(id) = &self.id {
            record.id = Some(format!("{id}_aug_{index}"));
        }
        let metadata = record.metadata_mut();
        metadata.insert("augmented".to_string(), Value::Bool(true));
        metadata.insert(
            "augmentation_method".to_string(),
            Value::String(method.to_string()),
        );
        record
    }
}

/// Convenience alias for working on batches of records.
pub type TxRecordBatch = Vec<TxRecord>;
