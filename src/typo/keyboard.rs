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

//! # Keyboard Model
//!
//! Static lookup resource for the shifted-key mutator. A layout stores four
//! parallel character arrays, one per modifier state, where the same
//! position in every array is the same physical key. A transition table
//! gives, for the modifier state a character was typed with, the
//! probability of accidentally typing it with each of the four states.

use std::fmt;
use std::str::FromStr;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TxError};

/// Modifier state of a key press. The declaration order is the scan order
/// used by [`TxKeyboardLayout::find_index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxKeyState {
    #[serde(rename = "keys")]
    Keys,
    #[serde(rename = "shift")]
    Shift,
    #[serde(rename = "alt")]
    Alt,
    #[serde(rename = "shift+alt")]
    ShiftAlt,
}

impl TxKeyState {
    pub const ALL: [TxKeyState; 4] = [
        TxKeyState::Keys,
        TxKeyState::Shift,
        TxKeyState::Alt,
        TxKeyState::ShiftAlt,
    ];

    pub fn index(self) -> usize {
        match self {
            TxKeyState::Keys => 0,
            TxKeyState::Shift => 1,
            TxKeyState::Alt => 2,
            TxKeyState::ShiftAlt => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TxKeyState::Keys => "keys",
            TxKeyState::Shift => "shift",
            TxKeyState::Alt => "alt",
            TxKeyState::ShiftAlt => "shift+alt",
        }
    }
}

impl fmt::Display for TxKeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TxKeyState {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self> {
        TxKeyState::ALL
            .into_iter()
            .find(|state| state.name() == s)
            .ok_or_else(|| TxError::configuration("keymap", format!("unknown key state '{s}'")))
    }
}

/// Four parallel character arrays keyed by modifier state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TxKeyboardLayoutSpec", into = "TxKeyboardLayoutSpec")]
pub struct TxKeyboardLayout {
    name: String,
    states: [Vec<char>; 4],
}

#[derive(Serialize, Deserialize)]
struct TxKeyboardLayoutSpec {
    name: String,
    keys: Vec<char>,
    shift: Vec<char>,
    alt: Vec<char>,
    #[serde(rename = "shift+alt")]
    shift_alt: Vec<char>,
}

impl TryFrom<TxKeyboardLayoutSpec> for TxKeyboardLayout {
    type Error = TxError;

    fn try_from(spec: TxKeyboardLayoutSpec) -> Result<Self> {
        TxKeyboardLayout::new(spec.name, spec.keys, spec.shift, spec.alt, spec.shift_alt)
    }
}

impl From<TxKeyboardLayout> for TxKeyboardLayoutSpec {
    fn from(layout: TxKeyboardLayout) -> Self {
        let [keys, shift, alt, shift_alt] = layout.states;
        Self {
            name: layout.name,
            keys,
            shift,
            alt,
            shift_alt,
        }
    }
}

impl TxKeyboardLayout {
    /// Builds a layout, requiring all four state arrays to have equal length.
    pub fn new(
        name: impl Into<String>,
        keys: Vec<char>,
        shift: Vec<char>,
        alt: Vec<char>,
        shift_alt: Vec<char>,
    ) -> Result<Self> {
        let len = keys.len();
        if shift.len() != len || alt.len() != len || shift_alt.len() != len {
            return Err(TxError::configuration(
                "keymap",
                format!(
                    "state arrays must have equal length (keys={}, shift={}, alt={}, shift+alt={})",
                    len,
                    shift.len(),
                    alt.len(),
                    shift_alt.len()
                ),
            ));
        }
        Ok(Self {
            name: name.into(),
            states: [keys, shift, alt, shift_alt],
        })
    }

    /// Apple US layout.
    pub fn macbook_us() -> Self {
        Self::from_static("macbook_us", MACBOOK_US)
    }

    /// German QWERTZ layout.
    pub fn qwertz_de() -> Self {
        Self::from_static("qwertz_de", QWERTZ_DE)
    }

    /// Looks up one of the bundled layouts.
    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "macbook_us" => Ok(Self::macbook_us()),
            "qwertz_de" => Ok(Self::qwertz_de()),
            other => Err(TxError::configuration(
                "keymap",
                format!("unknown keyboard layout '{other}'"),
            )),
        }
    }

    fn from_static(name: &str, states: [&[char]; 4]) -> Self {
        Self {
            name: name.to_string(),
            states: states.map(|chars| chars.to_vec()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.states[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.states[0].is_empty()
    }

    pub fn chars(&self, state: TxKeyState) -> &[char] {
        &self.states[state.index()]
    }

    /// Returns the key position and the first modifier state (in
    /// `keys, shift, alt, shift+alt` order) that produces `c`.
    pub fn find_index(&self, c: char) -> Option<(usize, TxKeyState)> {
        TxKeyState::ALL.into_iter().find_map(|state| {
            self.chars(state)
                .iter()
                .position(|&k| k == c)
                .map(|pos| (pos, state))
        })
    }

    pub fn char_at(&self, position: usize, state: TxKeyState) -> Option<char> {
        self.chars(state).get(position).copied()
    }
}

/// Row-stochastic 4x4 matrix over [`TxKeyState`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[[f64; 4]; 4]", into = "[[f64; 4]; 4]")]
pub struct TxTransitionTable {
    rows: [[f64; 4]; 4],
}

impl TryFrom<[[f64; 4]; 4]> for TxTransitionTable {
    type Error = TxError;

    fn try_from(rows: [[f64; 4]; 4]) -> Result<Self> {
        TxTransitionTable::new(rows)
    }
}

impl From<TxTransitionTable> for [[f64; 4]; 4] {
    fn from(table: TxTransitionTable) -> Self {
        table.rows
    }
}

impl Default for TxTransitionTable {
    fn default() -> Self {
        Self {
            rows: [
                [0.0, 0.75, 0.2, 0.05],
                [0.9, 0.0, 0.05, 0.05],
                [0.9, 0.05, 0.0, 0.05],
                [0.3, 0.35, 0.35, 0.0],
            ],
        }
    }
}

impl TxTransitionTable {
    /// Validates that every row is a probability vector.
    pub fn new(rows: [[f64; 4]; 4]) -> Result<Self> {
        for (state, row) in TxKeyState::ALL.iter().zip(rows.iter()) {
            if row.iter().any(|p| !p.is_finite() || *p < 0.0) {
                return Err(TxError::configuration(
                    "trans",
                    format!("row '{state}' contains a negative or non-finite probability"),
                ));
            }
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > 1e-6 {
                return Err(TxError::configuration(
                    "trans",
                    format!("row '{state}' sums to {sum}, expected 1"),
                ));
            }
        }
        Ok(Self { rows })
    }

    pub fn row(&self, from: TxKeyState) -> &[f64; 4] {
        &self.rows[from.index()]
    }

    /// Samples the state a key is actually typed with.
    pub fn sample<R: Rng + ?Sized>(&self, from: TxKeyState, rng: &mut R) -> TxKeyState {
        match WeightedIndex::new(self.row(from)) {
            Ok(dist) => TxKeyState::ALL[dist.sample(rng)],
            Err(_) => from,
        }
    }
}

/// Layout plus transition probabilities, the resource consumed by
/// `pressed_shiftalt`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TxKeyboard {
    pub layout: TxKeyboardLayout,
    #[serde(default)]
    pub transitions: TxTransitionTable,
}

impl Default for TxKeyboard {
    fn default() -> Self {
        Self::new(TxKeyboardLayout::macbook_us())
    }
}

impl TxKeyboard {
    pub fn new(layout: TxKeyboardLayout) -> Self {
        Self {
            layout,
            transitions: TxTransitionTable::default(),
        }
    }

    pub fn with_transitions(mut self, transitions: TxTransitionTable) -> Self {
        self.transitions = transitions;
        self
    }

    /// Bundled layout with the default transition table.
    pub fn by_name(name: &str) -> Result<Self> {
        TxKeyboardLayout::by_name(name).map(Self::new)
    }
}

const MACBOOK_US: [&[char]; 4] = [
    &[
        '`', '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', '-', '=',
        'q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p', '[', ']', '\\',
        'a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l', ';', '\'',
        'z', 'x', 'c', 'v', 'b', 'n', 'm', ',', '.', '/',
    ],
    &[
        '~', '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+',
        'Q', 'W', 'E', 'R', 'T', 'Y', 'U', 'I', 'O', 'P', '{', '}', '|',
        'A', 'S', 'D', 'F', 'G', 'H', 'J', 'K', 'L', ':', '"',
        'Z', 'X', 'C', 'V', 'B', 'N', 'M', '<', '>', '?',
    ],
    &[
        '`', '¡', '™', '£', '¢', '∞', '§', '¶', '•', 'ª', 'º', '–', '≠',
        'œ', '∑', '´', '®', '†', '¥', '¨', 'ˆ', 'ø', 'π', '“', '‘', '«',
        'å', 'ß', '∂', 'ƒ', '©', '˙', '∆', '˚', '¬', '…', 'æ',
        'Ω', '≈', 'ç', '√', '∫', '˜', 'µ', '≤', '≥', '÷',
    ],
    &[
        '`', '⁄', '€', '‹', '›', 'ﬁ', 'ﬂ', '‡', '°', '·', '‚', '—', '±',
        'Œ', '„', '´', '‰', 'ˇ', 'Á', '¨', 'ˆ', 'Ø', '∏', '”', '’', '»',
        'Å', 'Í', 'Î', 'Ï', '˝', 'Ó', 'Ô', '\u{F8FF}', 'Ò', 'Ú', 'Æ',
        '¸', '˛', 'Ç', '◊', 'ı', '˜', 'Â', '¯', '˘', '¿',
    ],
];

const QWERTZ_DE: [&[char]; 4] = [
    &[
        '^', '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', 'ß', '\'',
        'q', 'w', 'e', 'r', 't', 'z', 'u', 'i', 'o', 'p', 'ü', '+',
        'a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'ö', 'ä', '#',
        '<', 'y', 'x', 'c', 'v', 'b', 'n', 'm', ',', '.', '-',
    ],
    &[
        '°', '!', '"', '§', '$', '%', '&', '/', '(', ')', '=', '?', '`',
        'Q', 'W', 'E', 'R', 'T', 'Z', 'U', 'I', 'O', 'P', 'Ü', '*',
        'A', 'S', 'D', 'F', 'G', 'H', 'J', 'K', 'L', 'Ö', 'Ä', '\'',
        '>', 'Y', 'X', 'C', 'V', 'B', 'N', 'M', ';', ':', '_',
    ],
    &[
        '′', '¹', '²', '³', '¼', '½', '¬', '{', '[', ']', '}', '\\', '¸',
        '@', 'ł', '€', '¶', 'ŧ', '←', '↓', '→', 'ø', 'þ', '"', '~',
        'æ', 'ſ', 'ð', 'đ', 'ŋ', 'ħ', '\u{0323}', 'ĸ', 'ł', '˝', '^', '’',
        '|', '»', '«', '¢', '„', '“', '”', 'µ', '·', '…', '–',
    ],
    &[
        '″', '¡', '⅛', '£', '¤', '⅜', '⅝', '⅞', '™', '±', '°', '¿', '˛',
        'Ω', 'Ł', '€', '®', 'Ŧ', '¥', '↑', 'ı', 'Ø', 'Þ', '°', '¯',
        'Æ', 'ẞ', 'Ð', 'ª', 'Ŋ', 'Ħ', '˙', '&', 'Ł', '\u{0323}', '\u{0323}', '˘',
        '¦', '›', '‹', '©', '‚', '‘', '’', 'º', '×', '÷', '—',
    ],
];
