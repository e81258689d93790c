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

//! # Synonym Augmentation
//!
//! - **substitute**: Replacement engine over a read-only synonym map
//! - **buffer**: Per-language on-disk synonym cache
//! - **neighbors**: Embedding-neighbor filtering that fills the cache

pub mod buffer;
pub mod neighbors;
pub mod substitute;

pub use buffer::TxSynonymBuffer;
pub use neighbors::{
    model_path, pseudo_synonyms, require_model, shingle_similarity, shingles, TxNeighborSource,
    TxPseudoSynonymOptions,
};
pub use substitute::{synonym_replacement, TxReplCount, TxSynonymMap, TxSynonymOptions};
