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

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;
use txnoise::errors::TxError;
use txnoise::synonyms::*;

fn seq(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

fn synonyms() -> TxSynonymMap {
    let mut map = TxSynonymMap::new();
    map.insert("auto".to_string(), vec!["wagen".to_string(), "karre".to_string()]);
    map.insert("schnell".to_string(), vec!["rasch".to_string()]);
    map.insert("leer".to_string(), Vec::new());
    map
}

#[test]
fn replaces_single_token_and_keeps_case() {
    let mut rng = StdRng::seed_from_u64(1);
    let options = TxSynonymOptions {
        keep_case: true,
        n_augmentations: 4,
        ..TxSynonymOptions::default()
    };
    let out = synonym_replacement(&[seq("Das Auto fährt")], &synonyms(), &options, &mut rng).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].len(), 4);
    for variant in &out[0] {
        assert_eq!(variant[0], "Das");
        assert!(variant[1] == "Wagen" || variant[1] == "Karre", "{variant:?}");
        assert_eq!(variant[2], "fährt");
    }
}

#[test]
fn combinations_cycle_in_size_order() {
    let mut rng = StdRng::seed_from_u64(1);
    let options = TxSynonymOptions {
        min_repl: TxReplCount::Count(1),
        max_repl: TxReplCount::Count(2),
        n_augmentations: 4,
        keep_case: false,
    };
    let out = synonym_replacement(&[seq("schnell ist das auto")], &synonyms(), &options, &mut rng)
        .unwrap()
        .remove(0);
    let replaced: Vec<Vec<bool>> = out
        .iter()
        .map(|v| vec![v[0] == "rasch", v[3] != "auto"])
        .collect();
    assert_eq!(
        replaced,
        vec![
            vec![true, false],
            vec![false, true],
            vec![true, true],
            vec![true, false],
        ]
    );
}

#[test]
fn sequences_without_candidates_yield_nothing() {
    let mut rng = StdRng::seed_from_u64(1);
    let out = synonym_replacement(
        &[seq("der leere Tank"), seq("leer"), Vec::new()],
        &synonyms(),
        &TxSynonymOptions::default(),
        &mut rng,
    )
    .unwrap();
    assert!(out.iter().all(Vec::is_empty));
}

#[test]
fn fractional_bounds_follow_sequence_length() {
    let mut rng = StdRng::seed_from_u64(1);
    let options: TxSynonymOptions =
        serde_json::from_str(r#"{"min_repl": 0.5, "max_repl": 0.5, "n_augmentations": 2}"#).unwrap();
    let out = synonym_replacement(&[seq("auto schnell")], &synonyms(), &options, &mut rng)
        .unwrap()
        .remove(0);
    assert_eq!(out.len(), 2);
    assert_ne!(out[0][0], "auto");
    assert_eq!(out[0][1], "schnell");
    assert_eq!(out[1][0], "auto");
    assert_eq!(out[1][1], "rasch");
}

#[test]
fn buffer_persists_and_never_overwrites() {
    let dir = tempdir().unwrap();
    let mut buffer = TxSynonymBuffer::open(dir.path(), "de").unwrap();
    assert!(buffer.is_empty());
    assert!(buffer.insert("Auto", vec!["wagen".to_string()]));
    assert!(!buffer.insert("auto", vec!["karre".to_string()]));
    buffer.save().unwrap();

    let reloaded = TxSynonymBuffer::open(dir.path(), "de").unwrap();
    assert_eq!(reloaded.path(), dir.path().join("de.json"));
    assert_eq!(reloaded.get("AUTO"), Some(&["wagen".to_string()][..]));
    let map = reloaded.lookup(&["Auto", "Haus"]);
    assert_eq!(map.len(), 1);
    assert_eq!(map["auto"], vec!["wagen".to_string()]);
}

#[test]
fn corrupt_buffer_is_an_error() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("de.json"), "not json").unwrap();
    assert!(matches!(TxSynonymBuffer::open(dir.path(), "de"), Err(TxError::Serde(_))));
}

#[test]
fn missing_model_is_a_resource_error() {
    let dir = tempdir().unwrap();
    assert_eq!(model_path(dir.path(), "de"), dir.path().join("wiki.de.bin"));
    match require_model(dir.path(), "de") {
        Err(TxError::ResourceUnavailable { message, .. }) => assert!(message.contains("wiki.de.bin")),
        other => panic!("unexpected result {other:?}"),
    }
    std::fs::write(dir.path().join("wiki.de.bin"), b"").unwrap();
    assert!(require_model(dir.path(), "de").is_ok());
}

#[test]
fn shingle_similarity_separates_spelling_variants() {
    assert_eq!(shingles("ab", 8).len(), 3);
    assert!(shingle_similarity("auto", "autos", 8) > 0.35);
    assert!(shingle_similarity("auto", "wagen", 8) <= 0.35);
    assert_eq!(shingle_similarity("", "", 8), 1.0);
}

#[test]
fn pseudo_synonyms_filter_and_fill_the_buffer() {
    let dir = tempdir().unwrap();
    let mut buffer = TxSynonymBuffer::open(dir.path(), "de").unwrap();
    buffer.insert("haus", vec!["gebäude".to_string()]);

    let mut source: HashMap<String, Vec<(f32, String)>> = HashMap::new();
    source.insert(
        "auto".to_string(),
        vec![
            (0.9, "autos".to_string()),
            (0.8, "wagen".to_string()),
            (0.5, "fahrrad".to_string()),
        ],
    );
    source.insert("haus".to_string(), vec![(0.99, "hütte".to_string())]);

    let found = pseudo_synonyms(
        &["Auto", "Haus", "Baum"],
        &source,
        &mut buffer,
        &TxPseudoSynonymOptions::default(),
    )
    .unwrap();

    assert_eq!(found["auto"], vec!["wagen".to_string()]);
    assert_eq!(found["haus"], vec!["gebäude".to_string()]);
    assert!(!found.contains_key("baum"));
    assert_eq!(buffer.get("auto"), Some(&["wagen".to_string()][..]));
    assert_eq!(buffer.len(), 2);
}
