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

//! # Pseudo-Synonym Acquisition
//!
//! Boundary to the word-embedding service. A [`TxNeighborSource`] returns
//! scored nearest neighbors for a word; [`pseudo_synonyms`] keeps the ones
//! that are close in vector space but not mere spelling variants (low
//! k-shingle overlap) and records them in the language's
//! [`TxSynonymBuffer`].

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::buffer::TxSynonymBuffer;
use super::substitute::TxSynonymMap;
use crate::errors::{Result, TxError};

/// Nearest-neighbor lookup in an embedding space.
pub trait TxNeighborSource {
    /// Up to `k` neighbors of `word` as `(cosine similarity, neighbor)`.
    fn nearest_neighbors(&self, word: &str, k: usize) -> Result<Vec<(f32, String)>>;
}

impl TxNeighborSource for HashMap<String, Vec<(f32, String)>> {
    fn nearest_neighbors(&self, word: &str, k: usize) -> Result<Vec<(f32, String)>> {
        Ok(self
            .get(word)
            .map(|neighbors| neighbors.iter().take(k).cloned().collect())
            .unwrap_or_default())
    }
}

/// Location of the pretrained vectors for `lang` inside `dir`.
pub fn model_path(dir: impl AsRef<Path>, lang: &str) -> PathBuf {
    dir.as_ref().join(format!("wiki.{lang}.bin"))
}

/// Fails with [`TxError::ResourceUnavailable`] unless the model file exists.
pub fn require_model(dir: impl AsRef<Path>, lang: &str) -> Result<PathBuf> {
    let path = model_path(dir, lang);
    if path.is_file() {
        Ok(path)
    } else {
        Err(TxError::resource(
            path.display().to_string(),
            format!(
                "pretrained word vectors for '{lang}' are missing; download wiki.{lang}.bin into {}",
                path.parent().map(|p| p.display().to_string()).unwrap_or_default()
            ),
        ))
    }
}

/// All character shingles of length `1..=kmax`.
pub fn shingles(word: &str, kmax: usize) -> HashSet<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut set = HashSet::new();
    for k in 1..=kmax.min(chars.len()) {
        for window in chars.windows(k) {
            set.insert(window.iter().collect());
        }
    }
    set
}

/// Jaccard similarity of the shingle sets of two words.
pub fn shingle_similarity(a: &str, b: &str, kmax: usize) -> f64 {
    let (sa, sb) = (shingles(a, kmax), shingles(b, kmax));
    if sa.is_empty() && sb.is_empty() {
        return 1.0;
    }
    let intersection = sa.intersection(&sb).count() as f64;
    let union = (sa.len() + sb.len()) as f64 - intersection;
    intersection / union
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TxPseudoSynonymOptions {
    pub max_neighbors: usize,
    pub min_vector_score: f32,
    pub max_shingle_score: f64,
    pub kmax: usize,
}

impl Default for TxPseudoSynonymOptions {
    fn default() -> Self {
        Self {
            max_neighbors: 100,
            min_vector_score: 0.65,
            max_shingle_score: 0.35,
            kmax: 8,
        }
    }
}

/// Looks up pseudo-synonyms for `words`, preferring buffered entries.
///
/// New non-empty results are added to `buffer`; saving it is left to the
/// caller.
pub fn pseudo_synonyms<S: AsRef<str>>(
    words: &[S],
    source: &dyn TxNeighborSource,
    buffer: &mut TxSynonymBuffer,
    options: &TxPseudoSynonymOptions,
) -> Result<TxSynonymMap> {
    let mut synonyms = TxSynonymMap::new();
    let mut queried = 0usize;

    for word in words {
        let word = word.as_ref().to_lowercase();
        if let Some(buffered) = buffer.get(&word) {
            synonyms.insert(word, buffered.to_vec());
            continue;
        }

        queried += 1;
        let candidates: Vec<String> = source
            .nearest_neighbors(&word, options.max_neighbors)?
            .into_iter()
            .filter(|(score, neighbor)| {
                *score >= options.min_vector_score
                    && shingle_similarity(&word, neighbor, options.kmax) <= options.max_shingle_score
            })
            .map(|(_, neighbor)| neighbor)
            .collect();

        if !candidates.is_empty() {
            buffer.insert(&word, candidates.clone());
            synonyms.insert(word, candidates);
        }
    }

    log::info!(
        "synonym.lookup: pseudo-synonyms resolved - words={}, queried={}, found={}",
        words.len(),
        queried,
        synonyms.len()
    );
    Ok(synonyms)
}
