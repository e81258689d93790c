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

//! # Sentence Tokenization
//!
//! Whitespace and punctuation splitting with byte spans. Sentence-level
//! augmenters edit the token texts of a [`TxSentence`] and render the
//! result back into the untouched gaps of the source, so an edit always
//! lands on the intended occurrence of a word.
//!
//! This is an approximation of tokenization, not a linguistic parser.

/// Punctuation characters treated as token separators by default.
pub const DEFAULT_PUNCTUATION: &str = ".,;:!?";

/// One token and its byte span in the source sentence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxToken {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// A tokenized sentence with editable token texts.
#[derive(Clone, Debug)]
pub struct TxSentence {
    source: String,
    tokens: Vec<TxToken>,
    current: Vec<String>,
}

impl TxSentence {
    /// Splits `text` on whitespace and on every character of `punctuation`.
    pub fn tokenize(text: &str, punctuation: &str) -> Self {
        let is_separator = |c: char| c.is_whitespace() || punctuation.contains(c);
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;

        for (pos, c) in text.char_indices() {
            match (is_separator(c), start) {
                (true, Some(s)) => {
                    tokens.push(TxToken {
                        text: text[s..pos].to_string(),
                        start: s,
                        end: pos,
                    });
                    start = None;
                }
                (false, None) => start = Some(pos),
                _ => {}
            }
        }
        if let Some(s) = start {
            tokens.push(TxToken {
                text: text[s..].to_string(),
                start: s,
                end: text.len(),
            });
        }

        let current = tokens.iter().map(|t| t.text.clone()).collect();
        Self {
            source: text.to_string(),
            tokens,
            current,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[TxToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Current (possibly edited) text of token `i`.
    pub fn text(&self, i: usize) -> &str {
        &self.current[i]
    }

    pub fn set(&mut self, i: usize, text: impl Into<String>) {
        self.current[i] = text.into();
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.current.swap(i, j);
    }

    /// Indices of tokens whose original text is not in `exclude`.
    pub fn eligible(&self, exclude: &[String]) -> Vec<usize> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| !exclude.iter().any(|e| *e == token.text))
            .map(|(i, _)| i)
            .collect()
    }

    /// Rebuilds the sentence from the source gaps and the current texts.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for (token, text) in self.tokens.iter().zip(&self.current) {
            out.push_str(&self.source[cursor..token.start]);
            out.push_str(text);
            cursor = token.end;
        }
        out.push_str(&self.source[cursor..]);
        out
    }
}

/// Pairs `(i, i + 1)` where both positions are eligible.
pub fn adjacent_pairs(eligible: &[usize]) -> Vec<(usize, usize)> {
    eligible
        .windows(2)
        .filter(|w| w[1] == w[0] + 1)
        .map(|w| (w[0], w[1]))
        .collect()
}

/// Collapses runs of spaces, trims the ends and removes whitespace in
/// front of punctuation.
pub fn tidy(text: &str, punctuation: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c == ' ' && out.ends_with(' ') {
            continue;
        }
        if punctuation.contains(c) {
            while out.ends_with(char::is_whitespace) {
                out.pop();
            }
        }
        out.push(c);
    }
    out.trim().to_string()
}
