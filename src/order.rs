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

//! # Word-Order Augmentation
//!
//! Sentence-level mistakes that move, drop or repeat whole words. All four
//! mutators share the same tokenization, exclusion handling and clean-up:
//! tokens are edited in place through [`TxSentence`], then spacing is
//! normalized with [`tidy`].

use std::fmt;
use std::str::FromStr;

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TxError};
use crate::text::{adjacent_pairs, tidy, TxSentence};

/// The word-order mutators that can be referenced from settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TxOrderKind {
    SwapConsecutive,
    DropWord,
    WriteTwice,
    DropNNextTwice,
}

impl TxOrderKind {
    pub const ALL: [TxOrderKind; 4] = [
        TxOrderKind::SwapConsecutive,
        TxOrderKind::DropWord,
        TxOrderKind::WriteTwice,
        TxOrderKind::DropNNextTwice,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TxOrderKind::SwapConsecutive => "order.swap_consecutive",
            TxOrderKind::DropWord => "order.drop_word",
            TxOrderKind::WriteTwice => "order.write_twice",
            TxOrderKind::DropNNextTwice => "order.drop_n_next_twice",
        }
    }

    pub fn apply<R: Rng + ?Sized>(
        self,
        sentence: &str,
        exclude: &[String],
        punctuation: &str,
        num_aug: usize,
        rng: &mut R,
    ) -> String {
        match self {
            TxOrderKind::SwapConsecutive => swap_consecutive(sentence, exclude, punctuation, num_aug, rng),
            TxOrderKind::DropWord => drop_word(sentence, exclude, punctuation, num_aug, rng),
            TxOrderKind::WriteTwice => write_twice(sentence, exclude, punctuation, num_aug, rng),
            TxOrderKind::DropNNextTwice => drop_n_next_twice(sentence, exclude, punctuation, num_aug, rng),
        }
    }
}

impl FromStr for TxOrderKind {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self> {
        let short = s.strip_prefix("order.").unwrap_or(s);
        TxOrderKind::ALL
            .into_iter()
            .find(|kind| &kind.name()["order.".len()..] == short)
            .ok_or_else(|| TxError::configuration("fn", format!("unknown order mutator '{s}'")))
    }
}

impl TryFrom<String> for TxOrderKind {
    type Error = TxError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TxOrderKind> for String {
    fn from(kind: TxOrderKind) -> Self {
        kind.name().to_string()
    }
}

impl fmt::Display for TxOrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weighted entry for the composition driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TxOrderSetting {
    #[serde(rename = "fn")]
    pub kind: TxOrderKind,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl TxOrderSetting {
    pub fn new(kind: TxOrderKind, weight: f64) -> Self {
        Self { kind, weight }
    }
}

fn sample_without_replacement<T: Copy, R: Rng + ?Sized>(
    items: &[T],
    amount: usize,
    rng: &mut R,
) -> Vec<T> {
    let amount = amount.min(items.len());
    index::sample(rng, items.len(), amount)
        .into_iter()
        .map(|i| items[i])
        .collect()
}

/// Swaps `num_aug` pairs of adjacent, non-excluded words. The text between
/// the two words stays where it is.
pub fn swap_consecutive<R: Rng + ?Sized>(
    sentence: &str,
    exclude: &[String],
    punctuation: &str,
    num_aug: usize,
    rng: &mut R,
) -> String {
    let mut tokens = TxSentence::tokenize(sentence, punctuation);
    let pairs = adjacent_pairs(&tokens.eligible(exclude));
    for (i, j) in sample_without_replacement(&pairs, num_aug, rng) {
        tokens.swap(i, j);
    }
    tidy(&tokens.render(), punctuation)
}

/// Removes `num_aug` non-excluded words.
pub fn drop_word<R: Rng + ?Sized>(
    sentence: &str,
    exclude: &[String],
    punctuation: &str,
    num_aug: usize,
    rng: &mut R,
) -> String {
    let mut tokens = TxSentence::tokenize(sentence, punctuation);
    let eligible = tokens.eligible(exclude);
    for i in sample_without_replacement(&eligible, num_aug, rng) {
        tokens.set(i, "");
    }
    tidy(&tokens.render(), punctuation)
}

/// Writes `num_aug` non-excluded words twice.
pub fn write_twice<R: Rng + ?Sized>(
    sentence: &str,
    exclude: &[String],
    punctuation: &str,
    num_aug: usize,
    rng: &mut R,
) -> String {
    let mut tokens = TxSentence::tokenize(sentence, punctuation);
    let eligible = tokens.eligible(exclude);
    for i in sample_without_replacement(&eligible, num_aug, rng) {
        let doubled = format!("{0} {0}", tokens.text(i));
        tokens.set(i, doubled);
    }
    tidy(&tokens.render(), punctuation)
}

/// Replaces the first word of `num_aug` adjacent pairs by the second one.
pub fn drop_n_next_twice<R: Rng + ?Sized>(
    sentence: &str,
    exclude: &[String],
    punctuation: &str,
    num_aug: usize,
    rng: &mut R,
) -> String {
    let mut tokens = TxSentence::tokenize(sentence, punctuation);
    let pairs = adjacent_pairs(&tokens.eligible(exclude));
    for (i, j) in sample_without_replacement(&pairs, num_aug, rng) {
        let next = tokens.text(j).to_string();
        tokens.set(i, next);
    }
    tidy(&tokens.render(), punctuation)
}
