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

//! # Txnoise
//!
//! Synthetic noisy text for training robustness into NLP models: typing
//! mistakes, punctuation loss, word-order noise and synonym substitution.
//!
//! ## Module Overview
//!
//! - **typo**: Index placement, character mutators, keyboard model, word
//!   and sentence orchestration
//! - **order**: Word-order mutators
//! - **punct**: Punctuation removal and word merging
//! - **synonyms**: Synonym substitution, synonym buffer and pseudo-synonym
//!   acquisition from embedding neighbors
//! - **augmenter**: Composition driver mixing typo, punctuation and order noise
//! - **text**: Span-tracked tokenization shared by the sentence-level code
//! - **record**, **operator**, **operators**, **pipeline**, **io**: Record
//!   batches, augmentation operators and configurable pipelines over JSONL
//!
//! ## Feature Flags
//!
//! - `parallel` (default): record operators process records with Rayon
//!
//! ## Randomness
//!
//! Every randomized function takes an explicit `&mut R where R: Rng`. A
//! seeded generator reproduces results exactly; nothing draws from a
//! global source.
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use txnoise::typo::{swap_consecutive, TxLoc};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! assert_eq!(swap_consecutive("Kinder", &TxLoc::Index(0), true, &mut rng), "Iknder");
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return `Result<T, TxError>`. Invalid settings are
//! rejected when configuration is parsed, with the offending key attached.

pub mod augmenter;
pub mod errors;
pub mod io;
pub mod operator;
pub mod operators;
pub mod order;
pub mod pipeline;
pub mod punct;
pub mod record;
pub mod synonyms;
pub mod text;
pub mod typo;

pub use augmenter::{TxAugmentConfig, TxAugmenter};
pub use errors::{Result, TxError};
pub use io::TxIO;
pub use operator::{execute_operator, execute_operator_at, TxOperator};
pub use operators::TxFieldPath;
pub use order::{TxOrderKind, TxOrderSetting};
pub use pipeline::{TxPipeline, TxPipelineBuilder};
pub use record::{TxMetadata, TxRecord, TxRecordBatch};
pub use synonyms::{
    pseudo_synonyms, synonym_replacement, TxNeighborSource, TxSynonymBuffer, TxSynonymMap,
    TxSynonymOptions,
};
pub use text::{TxSentence, TxToken};
pub use typo::{
    draw_index, sentence_augment, word_augment, TxKeyboard, TxLoc, TxTypoKind, TxTypoSetting,
};
