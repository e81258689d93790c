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
use serde_json::json;
use txnoise::augmenter::{TxAugmentConfig, TxAugmenter};
use txnoise::text::{TxSentence, DEFAULT_PUNCTUATION};

fn full_config() -> TxAugmentConfig {
    TxAugmentConfig::from_json(&json!({
        "typo": {
            "num_augmentations": 6,
            "pmax": 0.1,
            "settings": [
                {"weight": 2, "fn": "typo.drop_n_next_twice", "args": {"loc": "u", "keep_case": true}},
                {"weight": 2, "fn": "typo.swap_consecutive", "args": {"loc": "u", "keep_case": true}},
                {"weight": 1, "fn": "typo.pressed_twice", "args": {"loc": "u", "keep_case": true}},
                {"weight": 1, "fn": "typo.drop_char", "args": {"loc": "u", "keep_case": true}},
                {"weight": 1, "fn": "typo.pressed_shiftalt", "args": {"loc": ["b", "m"]}, "keymap": "qwertz_de"}
            ]
        },
        "punct": {"num_augmentations": 3},
        "order": {
            "num_augmentations": 6,
            "settings": [
                {"weight": 3, "fn": "order.swap_consecutive"},
                {"weight": 2, "fn": "order.drop_word"},
                {"weight": 1, "fn": "order.write_twice"},
                {"weight": 1, "fn": "order.drop_n_next_twice"}
            ]
        }
    }))
    .unwrap()
}

fn exclude() -> Vec<String> {
    vec!["[MASK]".to_string(), "[UNK]".to_string()]
}

#[test]
fn total_is_the_sum_of_requests() {
    assert_eq!(full_config().total(), 15);
    assert_eq!(TxAugmentConfig::default().total(), 0);
}

#[test]
fn seeded_driver_reproduces() {
    let augmenter = TxAugmenter::new(full_config(), exclude()).unwrap();
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        augmenter.augment("Die Lehrerin [MASK] einen Roman.", &mut rng).unwrap()
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn masks_survive_composition() {
    let augmenter = TxAugmenter::new(full_config(), exclude()).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let sentence = "Die Schülerin [MASK] ein Aufsatz, der sehr [MASK] war.";
    for variant in augmenter.augment(sentence, &mut rng).unwrap() {
        let masks = TxSentence::tokenize(&variant, DEFAULT_PUNCTUATION)
            .tokens()
            .iter()
            .filter(|t| t.text == "[MASK]")
            .count();
        assert_eq!(masks, 2, "{variant}");
    }
}

#[test]
fn short_sentences_return_fewer_variants() {
    let config = TxAugmentConfig::from_json(&json!({
        "punct": {"num_augmentations": 4},
        "order": {"num_augmentations": 4, "settings": [{"fn": "order.swap_consecutive"}]}
    }))
    .unwrap();
    let augmenter = TxAugmenter::new(config, exclude()).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let out = augmenter.augment("[MASK] [MASK]", &mut rng).unwrap();
    assert_eq!(out, vec!["[MASK] [MASK]".to_string()]);
}

#[test]
fn invalid_typo_settings_fail_at_construction() {
    let config = TxAugmentConfig::from_json(&json!({
        "typo": {"num_augmentations": 1, "settings": [{"p": 0.5, "fn": "typo.drop_char"}]}
    }))
    .unwrap();
    let err = TxAugmenter::new(config, exclude()).unwrap_err();
    assert_eq!(err.config_key(), Some("weight"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn output_is_bounded_and_distinct(
        words in proptest::collection::vec("[A-Za-zäöü]{1,9}", 1..10),
        with_mask in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mut tokens = words;
        if with_mask {
            tokens.insert(tokens.len() / 2, "[MASK]".to_string());
        }
        let sentence = format!("{}.", tokens.join(" "));
        let augmenter = TxAugmenter::new(full_config(), exclude()).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let out = augmenter.augment(&sentence, &mut rng).unwrap();

        prop_assert!(out.len() <= 15);
        let distinct: HashSet<&String> = out.iter().collect();
        prop_assert_eq!(distinct.len(), out.len());
    }
}
