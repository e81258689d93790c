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

//! # Word and Sentence Orchestration
//!
//! `word_augment` runs every setting once, in a random order, each with its
//! own application probability. `sentence_augment` picks words of a
//! sentence and applies one weighted mutator to each pick.

use rand::distributions::Distribution;
use rand::seq::SliceRandom;
use rand::Rng;

use super::settings::{weights_distribution, TxTypoSetting};
use crate::errors::{Result, TxError};
use crate::text::{TxSentence, DEFAULT_PUNCTUATION};

/// Applies a probabilistic subset of `settings` to one word.
///
/// Settings are visited in a uniformly random permutation; each fires when
/// its `p` is at least a fresh uniform draw. Mutators compose, each one
/// working on the output of the previous.
pub fn word_augment<R: Rng + ?Sized>(
    word: &str,
    settings: &[TxTypoSetting],
    rng: &mut R,
) -> Result<String> {
    let probabilities = settings
        .iter()
        .map(TxTypoSetting::require_p)
        .collect::<Result<Vec<_>>>()?;

    let mut order: Vec<usize> = (0..settings.len()).collect();
    order.shuffle(rng);

    let mut result = word.to_string();
    for i in order {
        let draw: f64 = rng.gen();
        if probabilities[i] >= draw {
            result = settings[i].apply(&result, rng);
        }
    }
    Ok(result)
}

/// Accepts `pmax` only as a fraction of the words in `[0, 1]`.
pub fn check_pmax(pmax: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&pmax) {
        return Err(TxError::configuration(
            "pmax",
            format!("must be a fraction in [0,1], got {pmax}"),
        ));
    }
    Ok(pmax)
}

/// Produces `num_augmentations` typo variants of a sentence.
///
/// Each variant targets `max(floor(tokens * pmax), 1)` token positions drawn
/// with replacement from the non-excluded tokens, so a word may be hit
/// twice; the second mutator then works on the already mutated word.
/// Returns an empty list when every token is excluded.
pub fn sentence_augment<R: Rng + ?Sized>(
    sentence: &str,
    settings: &[TxTypoSetting],
    exclude: &[String],
    num_augmentations: usize,
    pmax: f64,
    rng: &mut R,
) -> Result<Vec<String>> {
    check_pmax(pmax)?;
    let weights = settings
        .iter()
        .map(TxTypoSetting::require_weight)
        .collect::<Result<Vec<_>>>()?;
    let choice = weights_distribution(&weights)?;

    let tokenized = TxSentence::tokenize(sentence, DEFAULT_PUNCTUATION);
    let num_targets = ((tokenized.len() as f64 * pmax).floor() as usize).clamp(1, tokenized.len().max(1));
    let eligible = tokenized.eligible(exclude);
    if eligible.is_empty() {
        log::debug!(
            "typo.sentence.skip: no eligible tokens - tokens={}, excluded={}",
            tokenized.len(),
            exclude.len()
        );
        return Ok(Vec::new());
    }

    let mut augmentations = Vec::with_capacity(num_augmentations);
    for _ in 0..num_augmentations {
        let mut variant = tokenized.clone();
        let selected: Vec<usize> = (0..num_targets)
            .map(|_| eligible[rng.gen_range(0..eligible.len())])
            .collect();
        for i in selected {
            let setting = &settings[choice.sample(rng)];
            let mutated = setting.apply(variant.text(i), rng);
            variant.set(i, mutated);
        }
        augmentations.push(variant.render());
    }
    Ok(augmentations)
}
