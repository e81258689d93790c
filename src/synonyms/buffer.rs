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

//! # Synonym Buffer
//!
//! Per-language on-disk cache of pseudo-synonyms, stored as one JSON object
//! `<dir>/<lang>.json` mapping lower-cased words to candidate lists. The
//! buffer only grows: existing entries are never overwritten.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::substitute::TxSynonymMap;
use crate::errors::{Result, TxError};

#[derive(Debug, Clone)]
pub struct TxSynonymBuffer {
    path: PathBuf,
    entries: BTreeMap<String, Vec<String>>,
}

impl TxSynonymBuffer {
    pub fn path_for(dir: impl AsRef<Path>, lang: &str) -> PathBuf {
        dir.as_ref().join(format!("{lang}.json"))
    }

    /// Loads the buffer for `lang`; a missing file gives an empty buffer.
    pub fn open(dir: impl AsRef<Path>, lang: &str) -> Result<Self> {
        let path = Self::path_for(dir, lang);
        let entries = if path.exists() {
            let reader = BufReader::new(fs::File::open(&path)?);
            serde_json::from_reader(reader).map_err(|err| {
                TxError::Serde(format!("synonym buffer '{}': {}", path.display(), err))
            })?
        } else {
            BTreeMap::new()
        };
        log::debug!(
            "synonym.buffer.open: buffer loaded - path={}, entries={}",
            path.display(),
            entries.len()
        );
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&[String]> {
        self.entries.get(&word.to_lowercase()).map(Vec::as_slice)
    }

    /// Adds an entry unless the word is already buffered. Returns whether
    /// the buffer changed.
    pub fn insert(&mut self, word: &str, candidates: Vec<String>) -> bool {
        let key = word.to_lowercase();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, candidates);
        true
    }

    /// Synonym map restricted to the buffered words among `words`.
    pub fn lookup<S: AsRef<str>>(&self, words: &[S]) -> TxSynonymMap {
        words
            .iter()
            .filter_map(|word| {
                let key = word.as_ref().to_lowercase();
                self.entries.get(&key).map(|c| (key, c.clone()))
            })
            .collect()
    }

    /// Writes the buffer atomically, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer(&mut writer, &self.entries)?;
            writer.flush()?;
        }
        tmp.persist(&self.path).map_err(|err| TxError::from(err.error))?;
        log::info!(
            "synonym.buffer.save: buffer written - path={}, entries={}",
            self.path.display(),
            self.entries.len()
        );
        Ok(())
    }
}
