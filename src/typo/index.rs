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

//! # Index Placement
//!
//! Every character mutator asks this module where in a word to strike.
//! A [`TxLoc`] is either a fixed position, a binomial success probability
//! that skews the draw toward the start or end of the word, or one of the
//! named policies `begin|b`, `middle|m`, `end|e`, `uniform|u`.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand_distr::{Binomial, Distribution};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TxError};

/// Placement policy for [`draw_index`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TxLocValue", into = "TxLocValue")]
pub enum TxLoc {
    /// Fixed position, clamped into `[0, n]`.
    Index(i64),
    /// Binomial draw with `trials = n` and this success probability.
    Binomial(f64),
    /// Binomial draw with p = 0.1.
    Begin,
    /// Binomial draw with p = 0.5.
    Middle,
    /// Binomial draw with p = 0.9.
    End,
    /// Uniform draw from `[0, n]`.
    Uniform,
}

impl Default for TxLoc {
    fn default() -> Self {
        TxLoc::Uniform
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum TxLocValue {
    Index(i64),
    Probability(f64),
    Policy(String),
}

impl TryFrom<TxLocValue> for TxLoc {
    type Error = TxError;

    fn try_from(value: TxLocValue) -> Result<Self> {
        match value {
            TxLocValue::Index(i) => Ok(TxLoc::Index(i)),
            TxLocValue::Probability(p) if p.is_finite() => Ok(TxLoc::Binomial(p)),
            TxLocValue::Probability(p) => Err(TxError::configuration(
                "loc",
                format!("binomial probability must be finite, got {p}"),
            )),
            TxLocValue::Policy(name) => name.parse(),
        }
    }
}

impl From<TxLoc> for TxLocValue {
    fn from(loc: TxLoc) -> Self {
        match loc {
            TxLoc::Index(i) => TxLocValue::Index(i),
            TxLoc::Binomial(p) => TxLocValue::Probability(p),
            other => TxLocValue::Policy(other.to_string()),
        }
    }
}

impl FromStr for TxLoc {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "begin" | "b" => Ok(TxLoc::Begin),
            "middle" | "m" => Ok(TxLoc::Middle),
            "end" | "e" => Ok(TxLoc::End),
            "uniform" | "u" => Ok(TxLoc::Uniform),
            other => Err(TxError::configuration(
                "loc",
                format!("unknown placement policy '{other}'"),
            )),
        }
    }
}

impl fmt::Display for TxLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxLoc::Index(i) => write!(f, "{i}"),
            TxLoc::Binomial(p) => write!(f, "{p}"),
            TxLoc::Begin => f.write_str("begin"),
            TxLoc::Middle => f.write_str("middle"),
            TxLoc::End => f.write_str("end"),
            TxLoc::Uniform => f.write_str("uniform"),
        }
    }
}

/// Draws a position from `[0, n]` according to `loc`.
///
/// Fixed positions never touch the random source.
pub fn draw_index<R: Rng + ?Sized>(n: usize, loc: &TxLoc, rng: &mut R) -> usize {
    match *loc {
        TxLoc::Index(k) => k.clamp(0, n as i64) as usize,
        TxLoc::Binomial(p) => binomial(n, p.clamp(0.0, 1.0), rng),
        TxLoc::Begin => binomial(n, 0.1, rng),
        TxLoc::Middle => binomial(n, 0.5, rng),
        TxLoc::End => binomial(n, 0.9, rng),
        TxLoc::Uniform => rng.gen_range(0..=n),
    }
}

fn binomial<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> usize {
    match Binomial::new(n as u64, p) {
        Ok(dist) => (dist.sample(rng) as usize).min(n),
        Err(err) => {
            log::warn!(
                "typo.index.binomial: invalid distribution, falling back to first position - n={}, p={}, error={}",
                n,
                p,
                err
            );
            0
        }
    }
}
