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

//! Record operators wrapping the augmentation families.
//!
//! Every operator reads a text field addressed by `path`. In-place
//! operators overwrite that field; emitting operators append one new record
//! per variant (see [`TxRecord::variant`]) after the original, which is kept
//! unless `preserve_original` is false.
//!
//! Each record gets its own RNG seeded with `seed + position`, where the
//! position counts from the start of the input stream. A batch yields the
//! same output whether records are processed in parallel, sequentially or
//! in chunks.

use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde_json::{Map, Value};

use crate::augmenter::{TxAugmentConfig, TxAugmenter};
use crate::errors::{Result, TxError};
use crate::operator::TxOperator;
use crate::operators::field::TxFieldPath;
use crate::order::TxOrderKind;
use crate::punct::{merge_words, remove_syntaxinfo, DEFAULT_SEPARATORS};
use crate::record::{TxRecord, TxRecordBatch};
use crate::synonyms::{synonym_replacement, TxSynonymMap, TxSynonymOptions};
use crate::text::{TxSentence, DEFAULT_PUNCTUATION};
use crate::typo::{
    check_pmax, parse_settings, sentence_augment, weights_distribution, word_augment, TxTypoSetting,
};

const DEFAULT_SEED: u64 = 0x7e57_5eed;

fn record_rng(seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(index as u64))
}

/// Applies `f` to every record with its own RNG and concatenates the
/// returned records in batch order. `offset` is the stream position of the
/// first record.
fn map_records<F>(batch: TxRecordBatch, seed: u64, offset: usize, f: F) -> Result<TxRecordBatch>
where
    F: Fn(TxRecord, &mut StdRng) -> Result<Vec<TxRecord>> + Send + Sync,
{
    #[cfg(feature = "parallel")]
    let outputs: Vec<Result<Vec<TxRecord>>> = batch
        .into_par_iter()
        .enumerate()
        .map(|(index, record)| f(record, &mut record_rng(seed, offset + index)))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let outputs: Vec<Result<Vec<TxRecord>>> = batch
        .into_iter()
        .enumerate()
        .map(|(index, record)| f(record, &mut record_rng(seed, offset + index)))
        .collect();

    let mut out = Vec::with_capacity(outputs.len());
    for records in outputs {
        out.extend(records?);
    }
    Ok(out)
}

/// Writes `text` at `path`, failing when a non-object value blocks it.
fn write_text(path: &TxFieldPath, record: &mut TxRecord, text: String) -> Result<()> {
    if path.set_value(record, Value::String(text)) {
        Ok(())
    } else {
        Err(TxError::validation(format!(
            "cannot write '{path}' on record {}",
            record.id.as_deref().unwrap_or("<no id>")
        )))
    }
}

/// Original record (optionally) followed by one record per variant text.
fn emit_variants(
    record: TxRecord,
    path: &TxFieldPath,
    method: &str,
    variants: Vec<String>,
    preserve_original: bool,
) -> Result<Vec<TxRecord>> {
    let mut out = Vec::with_capacity(variants.len() + 1);
    for (index, text) in variants.into_iter().enumerate() {
        let mut variant = record.variant(method, index);
        write_text(path, &mut variant, text)?;
        out.push(variant);
    }
    if preserve_original {
        out.insert(0, record);
    }
    Ok(out)
}

fn config_object<'a>(operator: &str, config: &'a Value) -> Result<&'a Map<String, Value>> {
    config
        .as_object()
        .ok_or_else(|| TxError::validation(format!("{operator} config must be object")))
}

fn field_path(operator: &str, obj: &Map<String, Value>) -> Result<TxFieldPath> {
    let path = obj
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| TxError::configuration("path", format!("{operator} requires string 'path'")))?;
    TxFieldPath::parse(path)
}

fn seed(obj: &Map<String, Value>) -> u64 {
    obj.get("seed").and_then(Value::as_u64).unwrap_or(DEFAULT_SEED)
}

fn preserve_original(obj: &Map<String, Value>) -> bool {
    obj.get("preserve_original")
        .and_then(Value::as_bool)
        .unwrap_or(true)
}

fn count(obj: &Map<String, Value>, key: &str, default: usize) -> Result<usize> {
    match obj.get(key) {
        None => Ok(default),
        Some(value) => value
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| TxError::configuration(key, "must be a non-negative integer")),
    }
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Result<Vec<String>> {
    match obj.get(key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| TxError::configuration(key, "entries must be strings"))
            })
            .collect(),
        Some(_) => Err(TxError::configuration(key, "must be an array of strings")),
    }
}

fn string_or(obj: &Map<String, Value>, key: &str, default: &str) -> Result<String> {
    match obj.get(key) {
        None => Ok(default.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(TxError::configuration(key, "must be a string")),
    }
}

/// Runs the composition driver on a text field and emits its variants.
#[derive(Debug)]
pub struct TxAugmentCompose {
    path: TxFieldPath,
    augmenter: TxAugmenter,
    preserve_original: bool,
    seed: u64,
}

impl TxAugmentCompose {
    pub fn new(path: TxFieldPath, augmenter: TxAugmenter, preserve_original: bool, seed: u64) -> Self {
        Self {
            path,
            augmenter,
            preserve_original,
            seed,
        }
    }
}

impl TxOperator for TxAugmentCompose {
    fn name(&self) -> &'static str {
        "augment.compose"
    }

    fn apply(&self, batch: TxRecordBatch) -> Result<TxRecordBatch> {
        self.apply_at(batch, 0)
    }

    fn apply_at(&self, batch: TxRecordBatch, offset: usize) -> Result<TxRecordBatch> {
        map_records(batch, self.seed, offset, |record, rng| {
            let variants = match self.path.resolve_str(&record) {
                Some(text) => self.augmenter.augment(text, rng)?,
                None => Vec::new(),
            };
            emit_variants(record, &self.path, "compose", variants, self.preserve_original)
        })
    }
}

/// Config: `path`, optional `exclude`, `seed`, `preserve_original`, plus
/// any of the driver families `typo`, `punct` and `order`.
pub fn augment_compose_factory(config: &Value) -> Result<Box<dyn TxOperator + Send + Sync>> {
    let obj = config_object("augment.compose", config)?;
    let path = field_path("augment.compose", obj)?;
    let exclude = string_list(obj, "exclude")?;

    let families: Map<String, Value> = obj
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "path" | "exclude" | "seed" | "preserve_original"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let augmenter = TxAugmenter::new(TxAugmentConfig::from_json(&Value::Object(families))?, exclude)?;

    Ok(Box::new(TxAugmentCompose::new(
        path,
        augmenter,
        preserve_original(obj),
        seed(obj),
    )))
}

/// Applies `word_augment` to every non-excluded token of a text field.
#[derive(Debug)]
pub struct TxAugmentWordTypo {
    path: TxFieldPath,
    settings: Vec<TxTypoSetting>,
    exclude: Vec<String>,
    seed: u64,
}

impl TxAugmentWordTypo {
    pub fn new(path: TxFieldPath, settings: Vec<TxTypoSetting>, exclude: Vec<String>, seed: u64) -> Self {
        Self {
            path,
            settings,
            exclude,
            seed,
        }
    }
}

impl TxOperator for TxAugmentWordTypo {
    fn name(&self) -> &'static str {
        "augment.word_typo"
    }

    fn apply(&self, batch: TxRecordBatch) -> Result<TxRecordBatch> {
        self.apply_at(batch, 0)
    }

    fn apply_at(&self, batch: TxRecordBatch, offset: usize) -> Result<TxRecordBatch> {
        map_records(batch, self.seed, offset, |mut record, rng| {
            if let Some(text) = self.path.resolve_str(&record) {
                let mut sentence = TxSentence::tokenize(text, DEFAULT_PUNCTUATION);
                for i in sentence.eligible(&self.exclude) {
                    let augmented = word_augment(sentence.text(i), &self.settings, rng)?;
                    sentence.set(i, augmented);
                }
                let rendered = sentence.render();
                write_text(&self.path, &mut record, rendered)?;
            }
            Ok(vec![record])
        })
    }
}

/// Config: `path`, `settings` (each with `p`), optional `exclude`, `seed`.
pub fn augment_word_typo_factory(config: &Value) -> Result<Box<dyn TxOperator + Send + Sync>> {
    let obj = config_object("augment.word_typo", config)?;
    let path = field_path("augment.word_typo", obj)?;
    let settings = parse_settings(obj.get("settings").unwrap_or(&Value::Null))?;
    for setting in &settings {
        setting.require_p()?;
    }
    Ok(Box::new(TxAugmentWordTypo::new(
        path,
        settings,
        string_list(obj, "exclude")?,
        seed(obj),
    )))
}

/// Emits `sentence_augment` variants of a text field.
#[derive(Debug)]
pub struct TxAugmentSentenceTypo {
    path: TxFieldPath,
    settings: Vec<TxTypoSetting>,
    exclude: Vec<String>,
    num_augmentations: usize,
    pmax: f64,
    preserve_original: bool,
    seed: u64,
}

impl TxOperator for TxAugmentSentenceTypo {
    fn name(&self) -> &'static str {
        "augment.sentence_typo"
    }

    fn apply(&self, batch: TxRecordBatch) -> Result<TxRecordBatch> {
        self.apply_at(batch, 0)
    }

    fn apply_at(&self, batch: TxRecordBatch, offset: usize) -> Result<TxRecordBatch> {
        map_records(batch, self.seed, offset, |record, rng| {
            let variants = match self.path.resolve_str(&record) {
                Some(text) => sentence_augment(
                    text,
                    &self.settings,
                    &self.exclude,
                    self.num_augmentations,
                    self.pmax,
                    rng,
                )?,
                None => Vec::new(),
            };
            emit_variants(record, &self.path, "sentence_typo", variants, self.preserve_original)
        })
    }
}

/// Config: `path`, `settings` (each with `weight`), optional `exclude`,
/// `num_augmentations` (1), `pmax` (0.1), `seed`, `preserve_original`.
pub fn augment_sentence_typo_factory(config: &Value) -> Result<Box<dyn TxOperator + Send + Sync>> {
    let obj = config_object("augment.sentence_typo", config)?;
    let path = field_path("augment.sentence_typo", obj)?;
    let settings = parse_settings(obj.get("settings").unwrap_or(&Value::Null))?;
    let pmax = match obj.get("pmax") {
        None => 0.1,
        Some(value) => check_pmax(
            value
                .as_f64()
                .ok_or_else(|| TxError::configuration("pmax", "must be a number"))?,
        )?,
    };
    let weights = settings
        .iter()
        .map(TxTypoSetting::require_weight)
        .collect::<Result<Vec<_>>>()?;
    weights_distribution(&weights)?;

    Ok(Box::new(TxAugmentSentenceTypo {
        path,
        settings,
        exclude: string_list(obj, "exclude")?,
        num_augmentations: count(obj, "num_augmentations", 1)?,
        pmax,
        preserve_original: preserve_original(obj),
        seed: seed(obj),
    }))
}

/// Emits synonym substitution variants of a whitespace-tokenized field.
#[derive(Debug)]
pub struct TxAugmentSynonym {
    path: TxFieldPath,
    synonyms: TxSynonymMap,
    options: TxSynonymOptions,
    preserve_original: bool,
    seed: u64,
}

impl TxAugmentSynonym {
    pub fn new(
        path: TxFieldPath,
        synonyms: TxSynonymMap,
        options: TxSynonymOptions,
        preserve_original: bool,
        seed: u64,
    ) -> Self {
        Self {
            path,
            synonyms,
            options,
            preserve_original,
            seed,
        }
    }
}

impl TxOperator for TxAugmentSynonym {
    fn name(&self) -> &'static str {
        "augment.synonym"
    }

    fn apply(&self, batch: TxRecordBatch) -> Result<TxRecordBatch> {
        self.apply_at(batch, 0)
    }

    fn apply_at(&self, batch: TxRecordBatch, offset: usize) -> Result<TxRecordBatch> {
        map_records(batch, self.seed, offset, |record, rng| {
            let variants = match self.path.resolve_str(&record) {
                Some(text) => {
                    let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
                    synonym_replacement(&[tokens], &self.synonyms, &self.options, rng)?
                        .into_iter()
                        .flatten()
                        .map(|sequence| sequence.join(" "))
                        .collect()
                }
                None => Vec::new(),
            };
            emit_variants(record, &self.path, "synonym", variants, self.preserve_original)
        })
    }
}

/// Config: `path`, `synonyms` (object of word to candidate list), plus the
/// substitution options `min_repl`, `max_repl`, `n_augmentations`,
/// `keep_case`, and `seed`, `preserve_original`.
pub fn augment_synonym_factory(config: &Value) -> Result<Box<dyn TxOperator + Send + Sync>> {
    let obj = config_object("augment.synonym", config)?;
    let path = field_path("augment.synonym", obj)?;

    let raw: TxSynonymMap = serde_json::from_value(obj.get("synonyms").cloned().unwrap_or(Value::Null))
        .map_err(|err| TxError::configuration("synonyms", err.to_string()))?;
    if raw.is_empty() {
        return Err(TxError::configuration("synonyms", "may not be empty"));
    }
    let synonyms = raw
        .into_iter()
        .map(|(word, candidates)| (word.to_lowercase(), candidates))
        .collect();

    let options_value: Map<String, Value> = obj
        .iter()
        .filter(|(key, _)| {
            matches!(key.as_str(), "min_repl" | "max_repl" | "n_augmentations" | "keep_case")
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let options: TxSynonymOptions = serde_json::from_value(Value::Object(options_value))
        .map_err(|err| TxError::configuration("settings", err.to_string()))?;

    Ok(Box::new(TxAugmentSynonym::new(
        path,
        synonyms,
        options,
        preserve_original(obj),
        seed(obj),
    )))
}

/// Punctuation noise in place: strips syntax characters, then merges
/// `merge` word pairs.
#[derive(Debug)]
pub struct TxAugmentPunct {
    path: TxFieldPath,
    remove: bool,
    merge: usize,
    separators: String,
    exclude: Vec<String>,
    seed: u64,
}

impl TxOperator for TxAugmentPunct {
    fn name(&self) -> &'static str {
        "augment.punct"
    }

    fn apply(&self, batch: TxRecordBatch) -> Result<TxRecordBatch> {
        self.apply_at(batch, 0)
    }

    fn apply_at(&self, batch: TxRecordBatch, offset: usize) -> Result<TxRecordBatch> {
        map_records(batch, self.seed, offset, |mut record, rng| {
            if let Some(text) = self.path.resolve_str(&record) {
                let mut out = if self.remove {
                    remove_syntaxinfo(text)
                } else {
                    text.to_string()
                };
                if self.merge > 0 {
                    out = merge_words(&out, &self.exclude, &self.separators, self.merge, rng);
                }
                write_text(&self.path, &mut record, out)?;
            }
            Ok(vec![record])
        })
    }
}

/// Config: `path`, optional `remove` (true), `merge` (0), `separators`,
/// `exclude`, `seed`.
pub fn augment_punct_factory(config: &Value) -> Result<Box<dyn TxOperator + Send + Sync>> {
    let obj = config_object("augment.punct", config)?;
    let path = field_path("augment.punct", obj)?;
    let remove = match obj.get("remove") {
        None => true,
        Some(value) => value
            .as_bool()
            .ok_or_else(|| TxError::configuration("remove", "must be a boolean"))?,
    };
    Ok(Box::new(TxAugmentPunct {
        path,
        remove,
        merge: count(obj, "merge", 0)?,
        separators: string_or(obj, "separators", DEFAULT_SEPARATORS)?,
        exclude: string_list(obj, "exclude")?,
        seed: seed(obj),
    }))
}

/// One word-order mutator applied in place.
#[derive(Debug)]
pub struct TxAugmentOrder {
    path: TxFieldPath,
    kind: TxOrderKind,
    exclude: Vec<String>,
    punctuation: String,
    num_aug: usize,
    seed: u64,
}

impl TxOperator for TxAugmentOrder {
    fn name(&self) -> &'static str {
        "augment.order"
    }

    fn apply(&self, batch: TxRecordBatch) -> Result<TxRecordBatch> {
        self.apply_at(batch, 0)
    }

    fn apply_at(&self, batch: TxRecordBatch, offset: usize) -> Result<TxRecordBatch> {
        map_records(batch, self.seed, offset, |mut record, rng| {
            if let Some(text) = self.path.resolve_str(&record) {
                let out = self
                    .kind
                    .apply(text, &self.exclude, &self.punctuation, self.num_aug, rng);
                write_text(&self.path, &mut record, out)?;
            }
            Ok(vec![record])
        })
    }
}

/// Config: `path`, `fn` (order mutator name), optional `num_aug` (1),
/// `punctuation`, `exclude`, `seed`.
pub fn augment_order_factory(config: &Value) -> Result<Box<dyn TxOperator + Send + Sync>> {
    let obj = config_object("augment.order", config)?;
    let path = field_path("augment.order", obj)?;
    let kind: TxOrderKind = obj
        .get("fn")
        .and_then(Value::as_str)
        .ok_or_else(|| TxError::configuration("fn", "augment.order requires string 'fn'"))?
        .parse()?;
    Ok(Box::new(TxAugmentOrder {
        path,
        kind,
        exclude: string_list(obj, "exclude")?,
        punctuation: string_or(obj, "punctuation", DEFAULT_PUNCTUATION)?,
        num_aug: count(obj, "num_aug", 1)?,
        seed: seed(obj),
    }))
}
