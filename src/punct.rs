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

//! # Punctuation Augmentation
//!
//! Loss of sentence punctuation and accidental merging of two words.

use std::sync::OnceLock;

use rand::seq::index;
use rand::Rng;
use regex::Regex;

use crate::text::DEFAULT_PUNCTUATION;

/// Separators `merge_words` removes by default: space, hyphen, en dash.
pub const DEFAULT_SEPARATORS: &str = " -–";

static SYNTAX_MARKS: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RUNS: OnceLock<Regex> = OnceLock::new();

/// Removes `.?!;:,`, collapses whitespace runs and trims the ends.
pub fn remove_syntaxinfo(text: &str) -> String {
    let marks = SYNTAX_MARKS.get_or_init(|| Regex::new(r"[.?!;:,]+").expect("valid syntax mark pattern"));
    let spaces = WHITESPACE_RUNS.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
    let stripped = marks.replace_all(text, " ");
    spaces.replace_all(&stripped, " ").trim().to_string()
}

fn is_word_char(c: char, separators: &str) -> bool {
    !c.is_whitespace() && !separators.contains(c)
}

fn word_before(chars: &[char], k: usize, separators: &str) -> String {
    let start = chars[..k]
        .iter()
        .rposition(|&c| !is_word_char(c, separators))
        .map_or(0, |p| p + 1);
    chars[start..k].iter().collect()
}

fn word_after(chars: &[char], k: usize, separators: &str) -> String {
    let rest = &chars[(k + 1).min(chars.len())..];
    let end = rest
        .iter()
        .position(|&c| !is_word_char(c, separators))
        .unwrap_or(rest.len());
    rest[..end].iter().collect()
}

fn is_excluded(word: &str, exclude: &[String]) -> bool {
    let bare = word.trim_matches(|c: char| DEFAULT_PUNCTUATION.contains(c));
    exclude.iter().any(|e| e == word || e == bare)
}

/// Merges `num_aug` word pairs by deleting the separator between them and
/// lower-casing the character that followed it.
///
/// Separators next to an excluded token are never chosen. A separator at
/// the very end of the text has nothing to merge and is left as it is.
pub fn merge_words<R: Rng + ?Sized>(
    text: &str,
    exclude: &[String],
    separators: &str,
    num_aug: usize,
    rng: &mut R,
) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    let candidates: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| separators.contains(**c))
        .map(|(k, _)| k)
        .filter(|&k| {
            !is_excluded(&word_before(&chars, k, separators), exclude)
                && !is_excluded(&word_after(&chars, k, separators), exclude)
        })
        .collect();

    let amount = num_aug.min(candidates.len());
    let mut selected: Vec<usize> = index::sample(rng, candidates.len(), amount)
        .into_iter()
        .map(|i| candidates[i])
        .collect();
    selected.sort_unstable_by(|a, b| b.cmp(a));

    for k in selected {
        if k + 1 >= chars.len() {
            continue;
        }
        let lowered: Vec<char> = chars[k + 1].to_lowercase().collect();
        chars.splice(k..k + 2, lowered);
    }
    chars.into_iter().collect()
}
