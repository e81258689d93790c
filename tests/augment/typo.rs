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

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use txnoise::text::{TxSentence, DEFAULT_PUNCTUATION};
use txnoise::typo::*;

proptest! {
    #[test]
    fn swap_is_identity_below_two_chars(word in "\\PC{0,1}", seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        prop_assert_eq!(swap_consecutive(&word, &TxLoc::Uniform, true, &mut rng), word);
    }

    #[test]
    fn pressed_twice_doubles_single_char(c in any::<char>(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let word = c.to_string();
        prop_assert_eq!(pressed_twice(&word, &TxLoc::Middle, false, &mut rng), format!("{c}{c}"));
    }

    #[test]
    fn fixed_index_is_clamped_without_randomness(n in 0usize..500, k in -50i64..1000, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        prop_assert_eq!(draw_index(n, &TxLoc::Index(k), &mut rng), k.clamp(0, n as i64) as usize);
    }

    #[test]
    fn every_policy_stays_in_range(n in 0usize..200, p in -1.0f64..2.0, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        for loc in [TxLoc::Binomial(p), TxLoc::Begin, TxLoc::Middle, TxLoc::End, TxLoc::Uniform] {
            prop_assert!(draw_index(n, &loc, &mut rng) <= n);
        }
    }

    #[test]
    fn sentence_augment_never_touches_excluded_tokens(
        words in proptest::collection::vec("[a-zA-Zäöü]{1,8}", 1..12),
        masks in proptest::collection::vec(0usize..12, 0..4),
        seed in any::<u64>(),
    ) {
        let mut tokens = words.clone();
        for m in &masks {
            let at = (*m).min(tokens.len());
            tokens.insert(at, "[MASK]".to_string());
        }
        let sentence = format!("{}.", tokens.join(" "));
        let exclude = vec!["[MASK]".to_string()];
        let settings = vec![
            TxTypoSetting::new(TxTypoKind::SwapConsecutive).with_weight(1.0),
            TxTypoSetting::new(TxTypoKind::PressedTwice).with_weight(1.0),
            TxTypoSetting::new(TxTypoKind::DropChar).with_weight(1.0),
            TxTypoSetting::new(TxTypoKind::DropNNextTwice).with_weight(1.0),
            TxTypoSetting::new(TxTypoKind::PressedShiftalt).with_weight(1.0),
        ];

        let mut rng = StdRng::seed_from_u64(seed);
        let variants = sentence_augment(&sentence, &settings, &exclude, 5, 0.5, &mut rng).unwrap();
        prop_assert_eq!(variants.len(), 5);

        let mask_positions = |text: &str| {
            let parsed = TxSentence::tokenize(text, DEFAULT_PUNCTUATION);
            let count = parsed.tokens().iter().filter(|t| t.text == "[MASK]").count();
            count
        };
        for variant in &variants {
            prop_assert_eq!(mask_positions(variant), masks.len());
        }
    }
}

#[test]
fn kinder_swap_scenarios() {
    let mut rng = StdRng::seed_from_u64(42);
    assert_eq!(swap_consecutive("Kinder", &TxLoc::Index(0), false, &mut rng), "iKnder");
    assert_eq!(swap_consecutive("Kinder", &TxLoc::Index(0), true, &mut rng), "Iknder");
}

#[test]
fn tante_drop_n_next_twice() {
    let mut rng = StdRng::seed_from_u64(42);
    assert_eq!(drop_n_next_twice("Tante", &TxLoc::Index(2), false, &mut rng), "Tatte");
}

#[test]
fn policy_strings_parse() {
    for (text, loc) in [
        ("b", TxLoc::Begin),
        ("begin", TxLoc::Begin),
        ("m", TxLoc::Middle),
        ("end", TxLoc::End),
        ("u", TxLoc::Uniform),
    ] {
        assert_eq!(text.parse::<TxLoc>().unwrap(), loc);
    }
    let err = "left".parse::<TxLoc>().unwrap_err();
    assert_eq!(err.config_key(), Some("loc"));
}

#[test]
fn settings_parse_from_json() {
    let settings = parse_settings(&json!([
        {"p": 0.04, "fn": "typo.drop_n_next_twice", "args": {"loc": ["m", "e"], "keep_case": true}},
        {"weight": 2, "fn": "typo.swap_consecutive", "args": {"loc": 0.3}},
        {"weight": 1, "fn": "typo.pressed_shiftalt", "args": {"loc": ["b", "m"]}, "keymap": "qwertz_de"}
    ]))
    .unwrap();

    assert_eq!(settings.len(), 3);
    assert_eq!(settings[0].kind, TxTypoKind::DropNNextTwice);
    assert_eq!(settings[0].loc, TxChoice::Many(vec![TxLoc::Middle, TxLoc::End]));
    assert_eq!(settings[0].p, Some(0.04));
    assert_eq!(settings[1].loc, TxChoice::One(TxLoc::Binomial(0.3)));
    assert_eq!(settings[1].weight, Some(2.0));
    assert_eq!(settings[2].keyboard.layout.name(), "qwertz_de");
}

#[test]
fn unknown_mutator_is_a_configuration_error() {
    let err = parse_settings(&json!([{"p": 0.1, "fn": "typo.ocr"}])).unwrap_err();
    assert_eq!(err.config_key(), Some("fn"));
    assert!(err.to_string().contains("typo.ocr"));
}

#[test]
fn seeded_runs_reproduce() {
    let settings = parse_settings(&json!([
        {"weight": 2, "fn": "typo.drop_n_next_twice", "args": {"loc": "u", "keep_case": true}},
        {"weight": 2, "fn": "typo.swap_consecutive", "args": {"loc": "u", "keep_case": true}},
        {"weight": 1, "fn": "typo.pressed_twice", "args": {"loc": "u", "keep_case": true}},
        {"weight": 1, "fn": "typo.drop_char", "args": {"loc": "u", "keep_case": true}},
        {"weight": 1, "fn": "typo.pressed_shiftalt", "args": {"loc": ["b", "m"]}, "keymap": "qwertz_de"}
    ]))
    .unwrap();
    let exclude = vec!["[MASK]".to_string(), "[UNK]".to_string()];
    let sentence = "Die Lehrerin [MASK] einen Roman.";

    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        sentence_augment(sentence, &settings, &exclude, 4, 0.4, &mut rng).unwrap()
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn keyboard_layouts_are_parallel() {
    for name in ["macbook_us", "qwertz_de"] {
        let keyboard = TxKeyboard::by_name(name).unwrap();
        let len = keyboard.layout.len();
        for state in TxKeyState::ALL {
            assert_eq!(keyboard.layout.chars(state).len(), len);
        }
        assert_eq!(keyboard.layout.find_index('a').map(|(_, s)| s), Some(TxKeyState::Keys));
    }
    assert_eq!(TxKeyboard::by_name("dvorak").unwrap_err().config_key(), Some("keymap"));
}

#[test]
fn transition_rows_must_sum_to_one() {
    let mut rows = [[0.25; 4]; 4];
    assert!(TxTransitionTable::new(rows).is_ok());
    rows[2] = [0.5, 0.5, 0.5, 0.0];
    assert_eq!(TxTransitionTable::new(rows).unwrap_err().config_key(), Some("trans"));
}
