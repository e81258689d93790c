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

//! # Mutation Settings
//!
//! Configuration entries for the character mutators. A setting names the
//! mutator (`"fn"`), its arguments (`"args"`) and either an application
//! probability `p` (word level) or a relative `weight` (sentence level).
//! Arguments may be a single value or a list of candidates; lists are
//! sampled uniformly each time the setting is applied.
//!
//! ```json
//! {"p": 0.04, "fn": "typo.swap_consecutive", "args": {"loc": ["m", "e"], "keep_case": true}}
//! {"weight": 1, "fn": "typo.pressed_shiftalt", "args": {"loc": ["b", "m"]}, "keymap": "qwertz_de"}
//! ```

use std::fmt;
use std::str::FromStr;

use rand::distributions::WeightedIndex;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::chars::{drop_char, drop_n_next_twice, pressed_shiftalt, pressed_twice, swap_consecutive};
use super::index::TxLoc;
use super::keyboard::{TxKeyboard, TxTransitionTable};
use crate::errors::{Result, TxError};

/// A single argument value or a list of candidates to sample from.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TxChoice<T> {
    One(T),
    Many(Vec<T>),
}

impl<T: Default> Default for TxChoice<T> {
    fn default() -> Self {
        TxChoice::One(T::default())
    }
}

impl<T> TxChoice<T> {
    /// Resolves the argument for one application. Draws from the random
    /// source only for candidate lists.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        match self {
            TxChoice::One(value) => Some(value),
            TxChoice::Many(values) => values.choose(rng),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TxChoice::Many(values) if values.is_empty())
    }
}

impl<T: DeserializeOwned> TxChoice<T> {
    /// Reads a single value or a list of candidates. Failures carry `key`,
    /// so a bad entry is reported against its own argument.
    pub fn from_value(key: &str, value: Value) -> Result<Self> {
        let parse = |item: Value| {
            serde_json::from_value::<T>(item).map_err(|err| TxError::configuration(key, err.to_string()))
        };
        match value {
            Value::Array(items) => Ok(TxChoice::Many(
                items.into_iter().map(parse).collect::<Result<Vec<_>>>()?,
            )),
            other => parse(other).map(TxChoice::One),
        }
    }
}

impl<T> From<T> for TxChoice<T> {
    fn from(value: T) -> Self {
        TxChoice::One(value)
    }
}

/// The character mutators that can be referenced from settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TxTypoKind {
    SwapConsecutive,
    PressedTwice,
    DropChar,
    DropNNextTwice,
    PressedShiftalt,
}

impl TxTypoKind {
    pub const ALL: [TxTypoKind; 5] = [
        TxTypoKind::SwapConsecutive,
        TxTypoKind::PressedTwice,
        TxTypoKind::DropChar,
        TxTypoKind::DropNNextTwice,
        TxTypoKind::PressedShiftalt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TxTypoKind::SwapConsecutive => "typo.swap_consecutive",
            TxTypoKind::PressedTwice => "typo.pressed_twice",
            TxTypoKind::DropChar => "typo.drop_char",
            TxTypoKind::DropNNextTwice => "typo.drop_n_next_twice",
            TxTypoKind::PressedShiftalt => "typo.pressed_shiftalt",
        }
    }
}

impl FromStr for TxTypoKind {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self> {
        let short = s.strip_prefix("typo.").unwrap_or(s);
        TxTypoKind::ALL
            .into_iter()
            .find(|kind| &kind.name()["typo.".len()..] == short)
            .ok_or_else(|| TxError::configuration("fn", format!("unknown typo mutator '{s}'")))
    }
}

impl TryFrom<String> for TxTypoKind {
    type Error = TxError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TxTypoKind> for String {
    fn from(kind: TxTypoKind) -> Self {
        kind.name().to_string()
    }
}

impl fmt::Display for TxTypoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One validated mutation setting.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "TxTypoSettingSpec")]
pub struct TxTypoSetting {
    pub kind: TxTypoKind,
    pub loc: TxChoice<TxLoc>,
    pub keep_case: TxChoice<bool>,
    pub keyboard: TxKeyboard,
    pub p: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TxTypoSettingSpec {
    #[serde(rename = "fn")]
    kind: String,
    #[serde(default)]
    args: TxTypoArgsSpec,
    #[serde(default)]
    p: Option<f64>,
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default)]
    keymap: Option<String>,
    #[serde(default)]
    trans: Option<Value>,
}

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TxTypoArgsSpec {
    #[serde(default)]
    loc: Option<Value>,
    #[serde(default)]
    keep_case: Option<Value>,
    #[serde(default)]
    keymap: Option<String>,
    #[serde(default)]
    trans: Option<Value>,
}

impl TryFrom<TxTypoSettingSpec> for TxTypoSetting {
    type Error = TxError;

    fn try_from(spec: TxTypoSettingSpec) -> Result<Self> {
        let mut setting = TxTypoSetting::new(spec.kind.parse()?);
        if let Some(loc) = spec.args.loc {
            setting.loc = TxChoice::from_value("loc", loc)?;
        }
        if let Some(keep_case) = spec.args.keep_case {
            setting.keep_case = TxChoice::from_value("keep_case", keep_case)?;
        }
        if let Some(name) = spec.args.keymap.or(spec.keymap) {
            setting.keyboard = TxKeyboard::by_name(&name)?;
        }
        if let Some(trans) = spec.args.trans.or(spec.trans) {
            setting.keyboard.transitions = serde_json::from_value::<TxTransitionTable>(trans)
                .map_err(|err| TxError::configuration("trans", err.to_string()))?;
        }
        setting.p = spec.p;
        setting.weight = spec.weight;
        setting.validate()?;
        Ok(setting)
    }
}

impl TxTypoSetting {
    /// Setting with uniform placement, no case preservation and the
    /// default keyboard.
    pub fn new(kind: TxTypoKind) -> Self {
        Self {
            kind,
            loc: TxChoice::One(TxLoc::Uniform),
            keep_case: TxChoice::One(false),
            keyboard: TxKeyboard::default(),
            p: None,
            weight: None,
        }
    }

    pub fn with_loc(mut self, loc: impl Into<TxChoice<TxLoc>>) -> Self {
        self.loc = loc.into();
        self
    }

    pub fn with_keep_case(mut self, keep_case: impl Into<TxChoice<bool>>) -> Self {
        self.keep_case = keep_case.into();
        self
    }

    pub fn with_keyboard(mut self, keyboard: TxKeyboard) -> Self {
        self.keyboard = keyboard;
        self
    }

    pub fn with_p(mut self, p: f64) -> Self {
        self.p = Some(p);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Checks candidate lists and numeric fields.
    pub fn validate(&self) -> Result<()> {
        if self.loc.is_empty() {
            return Err(TxError::configuration("loc", "candidate list may not be empty"));
        }
        if self.keep_case.is_empty() {
            return Err(TxError::configuration(
                "keep_case",
                "candidate list may not be empty",
            ));
        }
        if let Some(p) = self.p {
            if !(0.0..=1.0).contains(&p) {
                return Err(TxError::configuration("p", format!("must be in [0,1], got {p}")));
            }
        }
        if let Some(weight) = self.weight {
            if !weight.is_finite() || weight < 0.0 {
                return Err(TxError::configuration(
                    "weight",
                    format!("must be a non-negative number, got {weight}"),
                ));
            }
        }
        Ok(())
    }

    pub fn require_p(&self) -> Result<f64> {
        self.p.ok_or_else(|| {
            TxError::configuration("p", format!("setting '{}' has no probability", self.kind))
        })
    }

    pub fn require_weight(&self) -> Result<f64> {
        self.weight.ok_or_else(|| {
            TxError::configuration("weight", format!("setting '{}' has no weight", self.kind))
        })
    }

    /// Resolves candidate arguments and applies the mutator once.
    pub fn apply<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> String {
        let loc = self.loc.pick(rng).cloned().unwrap_or_default();
        match self.kind {
            TxTypoKind::SwapConsecutive => {
                let keep_case = self.pick_keep_case(rng);
                swap_consecutive(word, &loc, keep_case, rng)
            }
            TxTypoKind::PressedTwice => {
                let keep_case = self.pick_keep_case(rng);
                pressed_twice(word, &loc, keep_case, rng)
            }
            TxTypoKind::DropChar => {
                let keep_case = self.pick_keep_case(rng);
                drop_char(word, &loc, keep_case, rng)
            }
            TxTypoKind::DropNNextTwice => {
                let keep_case = self.pick_keep_case(rng);
                drop_n_next_twice(word, &loc, keep_case, rng)
            }
            TxTypoKind::PressedShiftalt => pressed_shiftalt(word, &loc, &self.keyboard, rng),
        }
    }

    fn pick_keep_case<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        self.keep_case.pick(rng).copied().unwrap_or(false)
    }
}

/// Parses a JSON list of settings. Errors in a setting's own fields keep
/// that field's key; structural errors are reported under `settings`.
pub fn parse_settings(value: &Value) -> Result<Vec<TxTypoSetting>> {
    let entries = value
        .as_array()
        .ok_or_else(|| TxError::configuration("settings", "expected a list of settings"))?;
    entries.iter().map(parse_setting).collect()
}

/// Parses and validates one setting object.
pub fn parse_setting(value: &Value) -> Result<TxTypoSetting> {
    let spec: TxTypoSettingSpec = serde_json::from_value(value.clone())
        .map_err(|err| TxError::configuration("settings", err.to_string()))?;
    TxTypoSetting::try_from(spec)
}

/// Normalizes relative weights into a selection distribution.
pub fn weights_distribution(weights: &[f64]) -> Result<WeightedIndex<f64>> {
    WeightedIndex::new(weights).map_err(|err| {
        TxError::configuration("weight", format!("invalid weights {weights:?}: {err}"))
    })
}
