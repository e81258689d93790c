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

use std::fs;

use serde_json::json;
use tempfile::tempdir;
use txnoise::errors::TxError;
use txnoise::io::TxIO;
use txnoise::pipeline::TxPipelineBuilder;
use txnoise::record::TxRecord;

const PIPELINE_YAML: &str = r#"
- operator: augment.punct
  config:
    path: payload.text
- operator: augment.compose
  config:
    path: payload.text
    exclude: ["[MASK]"]
    seed: 7
    order:
      num_augmentations: 3
      settings:
        - fn: order.swap_consecutive
          weight: 3
        - fn: order.drop_word
          weight: 1
"#;

#[test]
fn yaml_pipeline_runs_over_jsonl_files() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.jsonl");
    fs::write(
        &input,
        concat!(
            r#"{"id": "s1", "payload": {"text": "Die Lehrerin [MASK] einen Roman."}}"#,
            "\n",
            r#"{"id": "s2", "payload": {"text": "Sie lasse es weg, oder [MASK] was."}, "metadata": {"lang": "de"}}"#,
            "\n"
        ),
    )
    .unwrap();

    let pipeline = TxPipelineBuilder::with_defaults().build_from_yaml(PIPELINE_YAML).unwrap();
    assert_eq!(pipeline.stage_names(), vec!["augment.punct", "augment.compose"]);

    let records = TxIO::load_jsonl(&input).unwrap();
    let out = pipeline.run(records).unwrap();

    let originals: Vec<&TxRecord> = out
        .iter()
        .filter(|r| r.id.as_deref().map_or(false, |id| !id.contains("_aug_")))
        .collect();
    assert_eq!(originals.len(), 2);
    assert_eq!(originals[0].payload["text"], json!("Die Lehrerin [MASK] einen Roman"));

    for record in out.iter().filter(|r| r.id.as_deref().is_some_and(|id| id.contains("_aug_"))) {
        let text = record.payload["text"].as_str().unwrap();
        assert!(text.contains("[MASK]"));
        assert!(!text.contains(['.', ',']));
    }

    let variants_of_s2: Vec<&TxRecord> = out
        .iter()
        .filter(|r| r.id.as_deref().is_some_and(|id| id.starts_with("s2_aug_")))
        .collect();
    assert!(!variants_of_s2.is_empty());
    assert!(variants_of_s2
        .iter()
        .all(|r| r.metadata.as_ref().unwrap()["lang"] == json!("de")));

    let output = dir.path().join("output.jsonl");
    TxIO::write_jsonl(&output, &out).unwrap();
    assert_eq!(TxIO::load_jsonl(&output).unwrap(), out);
}

#[test]
fn json_and_yaml_definitions_agree() {
    let builder = TxPipelineBuilder::with_defaults();
    let from_json = builder
        .build_from_json(
            r#"[{"operator": "augment.order", "config": {"path": "payload.text", "fn": "order.drop_word", "seed": 1}}]"#,
        )
        .unwrap();
    let from_yaml = builder
        .build_from_yaml(
            "- operator: augment.order\n  config:\n    path: payload.text\n    fn: order.drop_word\n    seed: 1\n",
        )
        .unwrap();

    let batch = vec![TxRecord::new(None, json!({"text": "eins zwei drei vier"}))];
    assert_eq!(from_json.run(batch.clone()).unwrap(), from_yaml.run(batch).unwrap());
}

#[test]
fn defaults_register_every_augmenter() {
    let builder = TxPipelineBuilder::with_defaults();
    for name in [
        "augment.compose",
        "augment.word_typo",
        "augment.sentence_typo",
        "augment.synonym",
        "augment.punct",
        "augment.order",
    ] {
        assert!(builder.is_registered(name), "{name}");
    }
    assert!(!TxPipelineBuilder::new().is_registered("augment.punct"));
}

#[test]
fn malformed_definitions_are_rejected() {
    let builder = TxPipelineBuilder::with_defaults();
    assert!(matches!(
        builder.build_from_json(r#"{"operator": "augment.punct"}"#),
        Err(TxError::Pipeline { .. })
    ));
    assert!(matches!(
        builder.build_from_yaml("- config: {}\n"),
        Err(TxError::Pipeline { .. })
    ));
    assert!(matches!(
        builder.build_from_yaml("- operator: [unclosed\n"),
        Err(TxError::Serde(_))
    ));
    let err = builder
        .build_from_json(r#"[{"operator": "augment.punct", "config": {"path": "payload.text", "merge": -1}}]"#)
        .unwrap_err();
    assert_eq!(err.config_key(), Some("merge"));
}

#[test]
fn chunked_runs_match_plain_runs_with_random_stages() {
    let pipeline = TxPipelineBuilder::with_defaults()
        .build_from_json(
            r#"[
                {"operator": "augment.order", "config": {"path": "payload.text", "fn": "order.drop_word", "seed": 11}},
                {"operator": "augment.sentence_typo", "config": {
                    "path": "payload.text", "seed": 4, "num_augmentations": 2,
                    "settings": [{"weight": 1, "fn": "typo.pressed_twice"}]
                }}
            ]"#,
        )
        .unwrap();
    let batch: Vec<TxRecord> = (0..6)
        .map(|i| TxRecord::new(Some(format!("r{i}")), json!({"text": "eins zwei drei vier fünf sechs"})))
        .collect();

    let plain = pipeline.run(batch.clone()).unwrap();
    for chunk_size in [1, 2, 4] {
        assert_eq!(pipeline.run_chunked(batch.clone(), chunk_size).unwrap(), plain, "{chunk_size}");
    }

    let texts: std::collections::HashSet<&str> = plain
        .iter()
        .filter(|r| !r.id.as_deref().unwrap_or_default().contains("_aug_"))
        .filter_map(|r| r.payload["text"].as_str())
        .collect();
    assert!(texts.len() > 1);
}
