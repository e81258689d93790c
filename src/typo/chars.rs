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

//! # Character-Level Mutators
//!
//! Five typing mistakes on a single word. Every mutator returns a new
//! string and leaves words that are too short for it unchanged. Positions
//! are chosen through [`draw_index`]; lengths and positions count Unicode
//! scalar values, not bytes.

use rand::Rng;

use super::index::{draw_index, TxLoc};
use super::keyboard::TxKeyboard;

fn to_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn to_lower(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn with_case(c: char, upper: bool) -> char {
    if upper {
        to_upper(c)
    } else {
        to_lower(c)
    }
}

/// Swaps two consecutive characters (transposition).
///
/// With `keep_case` the upper/lower flags stay with the positions, so
/// `"Kinder"` at position 0 becomes `"Iknder"` instead of `"iKnder"`.
pub fn swap_consecutive<R: Rng + ?Sized>(
    word: &str,
    loc: &TxLoc,
    keep_case: bool,
    rng: &mut R,
) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    if chars.len() < 2 {
        return word.to_string();
    }

    let i = draw_index(chars.len() - 2, loc, rng);
    let (upper0, upper1) = (chars[i].is_uppercase(), chars[i + 1].is_uppercase());
    chars.swap(i, i + 1);

    if keep_case {
        chars[i] = with_case(chars[i], upper0);
        chars[i + 1] = with_case(chars[i + 1], upper1);
    }
    chars.into_iter().collect()
}

/// Types a key twice (insertion).
///
/// The character at the drawn position is inserted once more right after
/// it; the last position duplicates the last character. With `keep_case`
/// the inserted copy takes the case of the character it is inserted before.
pub fn pressed_twice<R: Rng + ?Sized>(
    word: &str,
    loc: &TxLoc,
    keep_case: bool,
    rng: &mut R,
) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    match chars.len() {
        0 => return String::new(),
        1 => return format!("{word}{word}"),
        _ => {}
    }

    let n = chars.len();
    let i = draw_index(n - 1, loc, rng);
    let at = (i + 1).min(n - 1);
    let c = if keep_case {
        with_case(chars[i], chars[at].is_uppercase())
    } else {
        chars[i]
    };
    chars.insert(at, c);
    chars.into_iter().collect()
}

/// Leaves out one character (omission).
///
/// With `keep_case`, dropping an uppercase character upper-cases the
/// character that moves into its place.
pub fn drop_char<R: Rng + ?Sized>(
    word: &str,
    loc: &TxLoc,
    keep_case: bool,
    rng: &mut R,
) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    if chars.len() < 2 {
        return word.to_string();
    }

    let i = draw_index(chars.len() - 1, loc, rng);
    let dropped = chars.remove(i);
    if keep_case && dropped.is_uppercase() {
        if let Some(next) = chars.get_mut(i) {
            *next = to_upper(*next);
        }
    }
    chars.into_iter().collect()
}

/// Leaves out one character and types its successor twice instead.
///
/// `"Tante"` at position 2 becomes `"Tatte"`. Case handling follows
/// [`drop_char`].
pub fn drop_n_next_twice<R: Rng + ?Sized>(
    word: &str,
    loc: &TxLoc,
    keep_case: bool,
    rng: &mut R,
) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    if chars.len() < 2 {
        return word.to_string();
    }

    let n = chars.len();
    let i = draw_index(n - 2, loc, rng);
    let dropped_upper = chars[i].is_uppercase();
    chars[i] = chars[(i + 1).min(n - 1)];
    if keep_case && dropped_upper {
        chars[i] = to_upper(chars[i]);
    }
    chars.into_iter().collect()
}

/// Presses or misses SHIFT, ALT or SHIFT+ALT on one key.
///
/// The character's key and modifier state are looked up in the layout, a
/// new state is drawn from the transition table and the same key in the
/// new state replaces the character. Characters absent from the layout
/// leave the word unchanged.
pub fn pressed_shiftalt<R: Rng + ?Sized>(
    word: &str,
    loc: &TxLoc,
    keyboard: &TxKeyboard,
    rng: &mut R,
) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    if chars.len() < 2 {
        return word.to_string();
    }

    let i = draw_index(chars.len() - 1, loc, rng);
    let Some((position, state)) = keyboard.layout.find_index(chars[i]) else {
        return word.to_string();
    };
    let new_state = keyboard.transitions.sample(state, rng);
    match keyboard.layout.char_at(position, new_state) {
        Some(c) => {
            chars[i] = c;
            chars.into_iter().collect()
        }
        None => word.to_string(),
    }
}
