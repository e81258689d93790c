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

//! # Txnoise Operators
//!
//! - **field**: Dotted paths into record payload and metadata
//! - **augment**: Record operators for every augmentation family
//!
//! | Name | Effect |
//! |------|--------|
//! | `augment.compose` | driver variants as new records |
//! | `augment.word_typo` | per-word typos in place |
//! | `augment.sentence_typo` | sentence typo variants as new records |
//! | `augment.synonym` | synonym variants as new records |
//! | `augment.punct` | punctuation removal and word merges in place |
//! | `augment.order` | one word-order mutator in place |

pub mod augment;
pub mod field;

pub use augment::{
    augment_compose_factory, augment_order_factory, augment_punct_factory,
    augment_sentence_typo_factory, augment_synonym_factory, augment_word_typo_factory,
};
pub use field::TxFieldPath;
