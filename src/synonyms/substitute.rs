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

//! # Synonym Substitution
//!
//! Replaces a bounded number of tokens per sequence with candidates from a
//! precomputed synonym map. Replacement position sets are enumerated as
//! combinations of the eligible positions, smallest sets first, and cycled
//! through until the requested number of variants exists.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TxError};

/// Lower-cased word to ordered candidate replacements.
pub type TxSynonymMap = HashMap<String, Vec<String>>;

/// Number of replacements: an absolute count or a fraction of the
/// sequence length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TxReplCount {
    Count(usize),
    Fraction(f64),
}

impl TxReplCount {
    fn resolve(self, key: &str, sequence_len: usize) -> Result<usize> {
        match self {
            TxReplCount::Count(n) => Ok(n),
            TxReplCount::Fraction(f) if f.is_finite() && f >= 0.0 => {
                Ok((f.min(1.0) * sequence_len as f64).ceil() as usize)
            }
            TxReplCount::Fraction(f) => Err(TxError::configuration(
                key,
                format!("fraction must be a non-negative number, got {f}"),
            )),
        }
    }
}

fn default_count() -> TxReplCount {
    TxReplCount::Count(1)
}

fn default_augmentations() -> usize {
    1
}

/// Options for [`synonym_replacement`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TxSynonymOptions {
    #[serde(default = "default_count")]
    pub min_repl: TxReplCount,
    #[serde(default = "default_count")]
    pub max_repl: TxReplCount,
    #[serde(default = "default_augmentations")]
    pub n_augmentations: usize,
    #[serde(default)]
    pub keep_case: bool,
}

impl Default for TxSynonymOptions {
    fn default() -> Self {
        Self {
            min_repl: default_count(),
            max_repl: default_count(),
            n_augmentations: default_augmentations(),
            keep_case: false,
        }
    }
}

/// Lexicographic k-combinations of `0..n` for every k in `low..=high`,
/// stopping after `limit` combinations.
fn combinations(n: usize, low: usize, high: usize, limit: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    for k in low..=high.min(n) {
        if k == 0 {
            continue;
        }
        let mut combo: Vec<usize> = (0..k).collect();
        loop {
            if out.len() >= limit {
                return out;
            }
            out.push(combo.clone());
            let Some(pos) = (0..k).rev().find(|&i| combo[i] < n - k + i) else {
                break;
            };
            combo[pos] += 1;
            for i in pos + 1..k {
                combo[i] = combo[i - 1] + 1;
            }
        }
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Produces up to `options.n_augmentations` variants per sequence.
///
/// A sequence without any combination of eligible positions in the
/// requested size range yields an empty list.
pub fn synonym_replacement<R: Rng + ?Sized>(
    sequences: &[Vec<String>],
    synonyms: &TxSynonymMap,
    options: &TxSynonymOptions,
    rng: &mut R,
) -> Result<Vec<Vec<Vec<String>>>> {
    sequences
        .iter()
        .map(|sequence| replace_sequence(sequence, synonyms, options, rng))
        .collect()
}

fn replace_sequence<R: Rng + ?Sized>(
    sequence: &[String],
    synonyms: &TxSynonymMap,
    options: &TxSynonymOptions,
    rng: &mut R,
) -> Result<Vec<Vec<String>>> {
    if options.n_augmentations == 0 {
        return Ok(Vec::new());
    }
    let eligible: Vec<(usize, &Vec<String>)> = sequence
        .iter()
        .enumerate()
        .filter_map(|(i, token)| {
            synonyms
                .get(&token.to_lowercase())
                .filter(|candidates| !candidates.is_empty())
                .map(|candidates| (i, candidates))
        })
        .collect();

    let high = options.max_repl.resolve("max_repl", sequence.len())?.min(eligible.len());
    let low = options.min_repl.resolve("min_repl", sequence.len())?.max(1).min(high);
    let combos = combinations(eligible.len(), low, high, options.n_augmentations);
    if combos.is_empty() {
        log::debug!(
            "synonym.replace.skip: no replacement combination - tokens={}, eligible={}, low={}, high={}",
            sequence.len(),
            eligible.len(),
            low,
            high
        );
        return Ok(Vec::new());
    }

    let mut variants = Vec::with_capacity(options.n_augmentations);
    for n in 0..options.n_augmentations {
        let mut variant = sequence.to_vec();
        for &e in &combos[n % combos.len()] {
            let (position, candidates) = eligible[e];
            if let Some(candidate) = candidates.choose(rng) {
                let original = &sequence[position];
                variant[position] = if options.keep_case
                    && original.chars().next().is_some_and(char::is_uppercase)
                {
                    capitalize(candidate)
                } else {
                    candidate.clone()
                };
            }
        }
        variants.push(variant);
    }
    Ok(variants)
}
