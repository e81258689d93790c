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

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use txnoise::order::*;
use txnoise::text::{TxSentence, DEFAULT_PUNCTUATION};

const SENTENCE: &str = "Tausche die Wörter, lasse sie weg, oder [MASK] was.";

fn mask() -> Vec<String> {
    vec!["[MASK]".to_string()]
}

fn count_masks(text: &str) -> usize {
    TxSentence::tokenize(text, DEFAULT_PUNCTUATION)
        .tokens()
        .iter()
        .filter(|t| t.text == "[MASK]")
        .count()
}

#[test]
fn swap_moves_first_pair_for_some_seed() {
    let outputs: HashSet<String> = (0..200)
        .map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            swap_consecutive(SENTENCE, &mask(), DEFAULT_PUNCTUATION, 1, &mut rng)
        })
        .collect();
    assert!(outputs.contains("die Tausche Wörter, lasse sie weg, oder [MASK] was."));
    assert!(outputs.iter().all(|o| o.ends_with("[MASK] was.")));
}

#[test]
fn drop_word_removes_one_word() {
    let mut rng = StdRng::seed_from_u64(3);
    let out = drop_word(SENTENCE, &mask(), DEFAULT_PUNCTUATION, 1, &mut rng);
    let before = TxSentence::tokenize(SENTENCE, DEFAULT_PUNCTUATION).len();
    assert_eq!(TxSentence::tokenize(&out, DEFAULT_PUNCTUATION).len(), before - 1);
    assert!(!out.contains("  "));
    assert!(!out.contains(" ,"));
}

#[test]
fn write_twice_adds_one_word() {
    let mut rng = StdRng::seed_from_u64(3);
    let out = write_twice(SENTENCE, &mask(), DEFAULT_PUNCTUATION, 1, &mut rng);
    let before = TxSentence::tokenize(SENTENCE, DEFAULT_PUNCTUATION).len();
    assert_eq!(TxSentence::tokenize(&out, DEFAULT_PUNCTUATION).len(), before + 1);
}

#[test]
fn too_many_requests_are_capped() {
    let mut rng = StdRng::seed_from_u64(3);
    let out = drop_word("eins zwei [MASK]", &mask(), DEFAULT_PUNCTUATION, 10, &mut rng);
    assert_eq!(out, "[MASK]");
}

#[test]
fn settings_deserialize_with_default_weight() {
    let settings: Vec<TxOrderSetting> = serde_json::from_str(
        r#"[{"fn": "order.swap_consecutive", "weight": 3}, {"fn": "drop_word"}]"#,
    )
    .unwrap();
    assert_eq!(settings[0], TxOrderSetting::new(TxOrderKind::SwapConsecutive, 3.0));
    assert_eq!(settings[1], TxOrderSetting::new(TxOrderKind::DropWord, 1.0));
    assert!(serde_json::from_str::<Vec<TxOrderSetting>>(r#"[{"fn": "order.reverse"}]"#).is_err());
}

proptest! {
    #[test]
    fn excluded_tokens_survive_every_order_mutator(
        words in proptest::collection::vec("[a-zäöüß]{1,7}", 0..10),
        masks in proptest::collection::vec(0usize..10, 1..4),
        num_aug in 0usize..5,
        seed in any::<u64>(),
    ) {
        let mut tokens = words;
        for m in &masks {
            let at = (*m).min(tokens.len());
            tokens.insert(at, "[MASK]".to_string());
        }
        let sentence = format!("{}.", tokens.join(" "));

        for kind in TxOrderKind::ALL {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = kind.apply(&sentence, &mask(), DEFAULT_PUNCTUATION, num_aug, &mut rng);
            prop_assert_eq!(count_masks(&out), masks.len(), "{} produced {}", kind, out);
        }
    }
}
