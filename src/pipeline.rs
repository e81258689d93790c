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

//! # Txnoise Pipeline Module
//!
//! A pipeline is an ordered list of operators built from configuration.
//! Each step names a registered operator and carries its config:
//!
//! ```json
//! [
//!   {"operator": "augment.punct", "config": {"path": "payload.text"}},
//!   {"operator": "augment.compose", "config": {"path": "payload.text", "punct": {"num_augmentations": 2}}}
//! ]
//! ```
//!
//! The same structure can be written in YAML.

use std::collections::HashMap;

use serde_json::Value;

use crate::errors::{Result, TxError};
use crate::operator::{execute_operator_at, TxOperator};
use crate::operators::augment;
use crate::record::TxRecordBatch;

/// Constructor for an operator from its JSON config.
pub type TxOperatorFactory = fn(&Value) -> Result<Box<dyn TxOperator + Send + Sync>>;

/// Sequential chain of operators.
#[derive(Debug)]
pub struct TxPipeline {
    stages: Vec<Box<dyn TxOperator + Send + Sync>>,
}

impl TxPipeline {
    pub fn new(stages: Vec<Box<dyn TxOperator + Send + Sync>>) -> Self {
        TxPipeline { stages }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Names of the stages in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    pub fn run(&self, batch: TxRecordBatch) -> Result<TxRecordBatch> {
        self.run_from(batch, &mut vec![0; self.stages.len()])
    }

    /// Runs the pipeline on consecutive chunks of at most `chunk_size`
    /// records and concatenates the results.
    ///
    /// Every stage sees each record at the position it would have in an
    /// unchunked run, so the output equals that of [`TxPipeline::run`].
    pub fn run_chunked(&self, batch: TxRecordBatch, chunk_size: usize) -> Result<TxRecordBatch> {
        if chunk_size == 0 {
            return Err(TxError::pipeline("pipeline", "chunk_size must be positive"));
        }
        let mut offsets = vec![0; self.stages.len()];
        let mut out = Vec::with_capacity(batch.len());
        let mut rest = batch;
        while !rest.is_empty() {
            let tail = rest.split_off(chunk_size.min(rest.len()));
            out.extend(self.run_from(rest, &mut offsets)?);
            rest = tail;
        }
        Ok(out)
    }

    /// Runs every stage, starting stage `i` at `offsets[i]` and advancing
    /// it by the number of records that stage consumed.
    fn run_from(&self, mut batch: TxRecordBatch, offsets: &mut [usize]) -> Result<TxRecordBatch> {
        for (stage, offset) in self.stages.iter().zip(offsets.iter_mut()) {
            let consumed = batch.len();
            batch = execute_operator_at(stage.as_ref(), batch, *offset)?;
            *offset += consumed;
        }
        Ok(batch)
    }

    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(TxError::pipeline("pipeline", "no stages configured"));
        }
        Ok(())
    }
}

/// Registry of operator factories keyed by name.
#[derive(Default)]
pub struct TxPipelineBuilder {
    factories: HashMap<String, TxOperatorFactory>,
}

impl TxPipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with every built-in augmentation operator registered.
    pub fn with_defaults() -> Self {
        let mut builder = Self::new();
        builder.register("augment.compose", augment::augment_compose_factory);
        builder.register("augment.word_typo", augment::augment_word_typo_factory);
        builder.register("augment.sentence_typo", augment::augment_sentence_typo_factory);
        builder.register("augment.synonym", augment::augment_synonym_factory);
        builder.register("augment.punct", augment::augment_punct_factory);
        builder.register("augment.order", augment::augment_order_factory);
        builder
    }

    pub fn register(&mut self, name: impl Into<String>, factory: TxOperatorFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn build_from_config(&self, steps: &[Value]) -> Result<TxPipeline> {
        let mut stages = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            let object = step.as_object().ok_or_else(|| {
                TxError::pipeline(format!("step #{index}"), "pipeline step must be an object")
            })?;

            let operator_name = object
                .get("operator")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    TxError::pipeline(format!("step #{index}"), "missing string 'operator'")
                })?;

            let factory = self.factories.get(operator_name).ok_or_else(|| {
                TxError::pipeline(format!("step #{index}"), format!("unknown operator '{operator_name}'"))
            })?;

            let config_value = object.get("config").cloned().unwrap_or(Value::Null);
            stages.push(factory(&config_value)?);
        }

        let pipeline = TxPipeline::new(stages);
        pipeline.validate()?;
        log::info!(
            "pipeline.build: pipeline assembled - stages={:?}",
            pipeline.stage_names()
        );
        Ok(pipeline)
    }

    /// Builds from a JSON array of steps.
    pub fn build_from_json(&self, text: &str) -> Result<TxPipeline> {
        let value: Value = serde_json::from_str(text)?;
        self.build_from_value(value)
    }

    /// Builds from a YAML sequence of steps.
    pub fn build_from_yaml(&self, text: &str) -> Result<TxPipeline> {
        let value: Value = serde_yaml::from_str(text)?;
        self.build_from_value(value)
    }

    fn build_from_value(&self, value: Value) -> Result<TxPipeline> {
        match value {
            Value::Array(steps) => self.build_from_config(&steps),
            _ => Err(TxError::pipeline("pipeline", "pipeline definition must be a list of steps")),
        }
    }
}
