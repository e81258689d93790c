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

//! # Txnoise Operator Module
//!
//! Operators are the record-level face of the augmentation engine. Each
//! operator receives a batch, applies one augmentation family to a text
//! field and returns the resulting batch, which may be larger than the
//! input when variants are emitted as new records.
//!
//! ```rust
//! use txnoise::errors::Result;
//! use txnoise::operator::TxOperator;
//! use txnoise::record::TxRecordBatch;
//!
//! #[derive(Debug)]
//! struct Lowercase;
//!
//! impl TxOperator for Lowercase {
//!     fn name(&self) -> &'static str {
//!         "text.lowercase"
//!     }
//!
//!     fn apply(&self, mut batch: TxRecordBatch) -> Result<TxRecordBatch> {
//!         for record in &mut batch {
//!             if let Some(text) = record.payload.as_str() {
//!                 record.payload = serde_json::json!(text.to_lowercase());
//!             }
//!         }
//!         Ok(batch)
//!     }
//! }
//! ```

use crate::errors::{Result, TxError};
use crate::record::TxRecordBatch;

/// Contract every pipeline stage fulfills.
pub trait TxOperator: std::fmt::Debug {
    /// Registry name, also used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Applies the operator to an incoming batch of records.
    ///
    /// The returned batch may hold more records than the input when the
    /// operator emits variants.
    fn apply(&self, batch: TxRecordBatch) -> Result<TxRecordBatch>;

    /// Applies the operator to a batch whose first record sits at `offset`
    /// in the full input stream. Operators that derive per-record state
    /// from the record position override this; the default ignores it.
    fn apply_at(&self, batch: TxRecordBatch, offset: usize) -> Result<TxRecordBatch> {
        let _ = offset;
        self.apply(batch)
    }
}

/// Runs `operator` and tags any failure with its name.
pub fn execute_operator(operator: &dyn TxOperator, batch: TxRecordBatch) -> Result<TxRecordBatch> {
    execute_operator_at(operator, batch, 0)
}

/// [`execute_operator`] for a batch starting at `offset` in the stream.
pub fn execute_operator_at(
    operator: &dyn TxOperator,
    batch: TxRecordBatch,
    offset: usize,
) -> Result<TxRecordBatch> {
    let before = batch.len();
    let output = operator
        .apply_at(batch, offset)
        .map_err(|err| TxError::operator(operator.name(), err.to_string()))?;
    log::debug!(
        "operator.apply: stage finished - operator={}, offset={}, records_in={}, records_out={}",
        operator.name(),
        offset,
        before,
        output.len()
    );
    Ok(output)
}
