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

//! # Composition Driver
//!
//! Mixes the typo, punctuation and word-order families into one bounded,
//! deduplicated set of variants per input sentence.
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use txnoise::augmenter::{TxAugmentConfig, TxAugmenter};
//!
//! let config = TxAugmentConfig::from_json_str(r#"{
//!     "punct": {"num_augmentations": 2},
//!     "order": {"num_augmentations": 3, "settings": [{"fn": "order.drop_word", "weight": 1}]}
//! }"#)?;
//! let augmenter = TxAugmenter::new(config, vec!["[MASK]".to_string()])?;
//! let mut rng = StdRng::seed_from_u64(42);
//! let variants = augmenter.augment("Die Lehrerin [MASK] einen Roman.", &mut rng)?;
//! assert!(variants.len() <= 5);
//! # Ok::<(), txnoise::TxError>(())
//! ```

use std::collections::HashSet;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{Result, TxError};
use crate::order::{TxOrderKind, TxOrderSetting};
use crate::punct::{merge_words, remove_syntaxinfo, DEFAULT_SEPARATORS};
use crate::text::DEFAULT_PUNCTUATION;
use crate::typo::{check_pmax, parse_settings, sentence_augment, weights_distribution, TxTypoSetting};

/// Passes over all enabled families before giving up on reaching the total.
pub const MAX_PASSES: usize = 2;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TxTypoConfig {
    pub num_augmentations: usize,
    pub settings: Vec<TxTypoSetting>,
    #[serde(default = "default_pmax")]
    pub pmax: f64,
}

fn default_pmax() -> f64 {
    0.1
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TxPunctConfig {
    pub num_augmentations: usize,
    #[serde(default = "default_separators")]
    pub separators: String,
}

fn default_separators() -> String {
    DEFAULT_SEPARATORS.to_string()
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TxOrderConfig {
    pub num_augmentations: usize,
    pub settings: Vec<TxOrderSetting>,
    #[serde(default = "default_punctuation")]
    pub punctuation: String,
}

fn default_punctuation() -> String {
    DEFAULT_PUNCTUATION.to_string()
}

/// Selects the families to run and how many variants each contributes.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TxAugmentConfig {
    #[serde(default)]
    pub typo: Option<TxTypoConfig>,
    #[serde(default)]
    pub punct: Option<TxPunctConfig>,
    #[serde(default)]
    pub order: Option<TxOrderConfig>,
}

impl TxAugmentConfig {
    /// Reads the families from a JSON object. Mutator settings are checked
    /// one by one first, so a bad argument is reported under its own key.
    pub fn from_json(value: &Value) -> Result<Self> {
        if let Some(settings) = value.pointer("/typo/settings") {
            parse_settings(settings)?;
        }
        if let Some(Value::Array(settings)) = value.pointer("/order/settings") {
            for name in settings.iter().filter_map(|setting| setting.get("fn")?.as_str()) {
                name.parse::<TxOrderKind>()?;
            }
        }
        serde_json::from_value(value.clone())
            .map_err(|err| TxError::configuration("settings", err.to_string()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| TxError::configuration("settings", err.to_string()))?;
        Self::from_json(&value)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text)
            .map_err(|err| TxError::configuration("settings", err.to_string()))?;
        Self::from_json(&value)
    }

    /// Sum of the requested counts of every enabled family.
    pub fn total(&self) -> usize {
        self.typo.as_ref().map_or(0, |c| c.num_augmentations)
            + self.punct.as_ref().map_or(0, |c| c.num_augmentations)
            + self.order.as_ref().map_or(0, |c| c.num_augmentations)
    }
}

/// Validated driver; construction rejects settings that could only fail
/// later during augmentation.
#[derive(Clone, Debug)]
pub struct TxAugmenter {
    config: TxAugmentConfig,
    exclude: Vec<String>,
    order_choice: Option<WeightedIndex<f64>>,
}

impl TxAugmenter {
    pub fn new(config: TxAugmentConfig, exclude: Vec<String>) -> Result<Self> {
        if let Some(typo) = &config.typo {
            check_pmax(typo.pmax)?;
            let weights = typo
                .settings
                .iter()
                .map(TxTypoSetting::require_weight)
                .collect::<Result<Vec<_>>>()?;
            weights_distribution(&weights)?;
        }

        let order_choice = match &config.order {
            Some(order) => {
                let weights: Vec<f64> = order.settings.iter().map(|s| s.weight).collect();
                Some(weights_distribution(&weights)?)
            }
            None => None,
        };

        log::info!(
            "augment.init: driver configured - typo={}, punct={}, order={}, total={}",
            config.typo.is_some(),
            config.punct.is_some(),
            config.order.is_some(),
            config.total()
        );

        Ok(Self {
            config,
            exclude,
            order_choice,
        })
    }

    pub fn config(&self) -> &TxAugmentConfig {
        &self.config
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Returns at most `config.total()` distinct variants of `sentence`,
    /// in the order they were first produced.
    pub fn augment<R: Rng + ?Sized>(&self, sentence: &str, rng: &mut R) -> Result<Vec<String>> {
        let total = self.config.total();
        let mut produced: Vec<String> = Vec::new();

        for pass in 0..MAX_PASSES {
            self.run_pass(sentence, &mut produced, rng)?;
            let distinct = produced.iter().collect::<HashSet<_>>().len();
            if distinct >= total {
                break;
            }
            log::trace!(
                "augment.pass: short of requested variants - pass={}, distinct={}, total={}",
                pass,
                distinct,
                total
            );
        }

        let mut seen = HashSet::new();
        produced.retain(|variant| seen.insert(variant.clone()));
        produced.truncate(total);
        Ok(produced)
    }

    fn run_pass<R: Rng + ?Sized>(
        &self,
        sentence: &str,
        produced: &mut Vec<String>,
        rng: &mut R,
    ) -> Result<()> {
        if let Some(typo) = &self.config.typo {
            produced.extend(sentence_augment(
                sentence,
                &typo.settings,
                &self.exclude,
                typo.num_augmentations,
                typo.pmax,
                rng,
            )?);
        }

        if let Some(punct) = &self.config.punct {
            if punct.num_augmentations > 0 {
                produced.push(remove_syntaxinfo(sentence));
            }
            for _ in 1..punct.num_augmentations {
                produced.push(merge_words(sentence, &self.exclude, &punct.separators, 1, rng));
            }
        }

        if let (Some(order), Some(choice)) = (&self.config.order, &self.order_choice) {
            for _ in 0..order.num_augmentations {
                let setting = &order.settings[choice.sample(rng)];
                produced.push(setting.kind.apply(
                    sentence,
                    &self.exclude,
                    &order.punctuation,
                    1,
                    rng,
                ));
            }
        }
        Ok(())
    }
}
