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

//! # Typo Augmentation
//!
//! Character-level typing mistakes and their orchestration.
//!
//! - **index**: Placement policy shared by every character mutator
//! - **chars**: The five character mutators
//! - **keyboard**: Keyboard layouts and modifier transition probabilities
//! - **settings**: Mutation settings as read from JSON/YAML configuration
//! - **augment**: Word-level and sentence-level orchestration

pub mod augment;
pub mod chars;
pub mod index;
pub mod keyboard;
pub mod settings;

pub use augment::{check_pmax, sentence_augment, word_augment};
pub use chars::{drop_char, drop_n_next_twice, pressed_shiftalt, pressed_twice, swap_consecutive};
pub use index::{draw_index, TxLoc};
pub use keyboard::{TxKeyState, TxKeyboard, TxKeyboardLayout, TxTransitionTable};
pub use settings::{parse_setting, parse_settings, weights_distribution, TxChoice, TxTypoKind, TxTypoSetting};
