//! §4.4 "Query engine": the four read-only walks over a finished
//! `base`/`check` array pair, plus the multi-position `analysis` sweep.
//!
//! Every operation shares the same single-step transition; they differ only
//! in what they do with it.

use std::collections::HashSet;

use crate::alphabet::Alphabet;
use crate::keys::KeyTable;
use crate::layout::{slot, terminal_key_index, ROOT_STATE};

/// Advances one step from `state` on code point `c`, or `None` if no such
/// edge exists (unknown code point, out-of-bounds slot, or a `check`
/// mismatch).
#[inline]
fn step(base: &[i32], check: &[i32], alphabet: &Alphabet, state: i32, c: char) -> Option<i32> {
    let code = alphabet.code(c)?;
    let i = slot(code, state);
    if i < 0 {
        return None;
    }
    let i = i as usize;
    if i >= check.len() || check[i] != state {
        return None;
    }
    Some(base[i])
}

/// If `state` carries a terminal (end-of-word) child, returns the key index
/// it encodes. Re-checks `check[state - 2] == state` rather than trusting a
/// bare negative `base` value, since an out-of-range or stale slot could
/// otherwise be misread as a terminal belonging to a different parent.
fn terminal_at(base: &[i32], check: &[i32], state: i32) -> Option<usize> {
    if state < 2 {
        return None;
    }
    let j = (state - 2) as usize;
    if j >= check.len() || check[j] != state || base[j] >= 0 {
        return None;
    }
    Some(terminal_key_index(base[j]))
}

/// Walks every character of `word` from the root. Returns the final state
/// on a fully successful walk, `None` on the first failed transition.
fn walk(base: &[i32], check: &[i32], alphabet: &Alphabet, word: &str) -> Option<i32> {
    let mut state = ROOT_STATE;
    for c in word.chars() {
        state = step(base, check, alphabet, state, c)?;
    }
    Some(state)
}

pub(crate) fn matches(base: &[i32], check: &[i32], alphabet: &Alphabet, word: &str) -> bool {
    walk(base, check, alphabet, word)
        .map(|s| terminal_at(base, check, s).is_some())
        .unwrap_or(false)
}

pub(crate) fn matches_index(
    base: &[i32],
    check: &[i32],
    alphabet: &Alphabet,
    word: &str,
) -> Option<usize> {
    walk(base, check, alphabet, word).and_then(|s| terminal_at(base, check, s))
}

pub(crate) fn match_prefix(base: &[i32], check: &[i32], alphabet: &Alphabet, word: &str) -> bool {
    walk(base, check, alphabet, word).is_some()
}

/// Returns every key that is a prefix of `word`, in order of increasing
/// length. Stops early at the first failed transition, so a non-prefix
/// suffix of `word` cannot hide an earlier match.
pub(crate) fn obtain_prefixes(
    base: &[i32],
    check: &[i32],
    alphabet: &Alphabet,
    keys: &KeyTable,
    word: &str,
) -> Vec<String> {
    let mut found = Vec::new();
    let mut state = ROOT_STATE;
    for c in word.chars() {
        match step(base, check, alphabet, state, c) {
            Some(next) => {
                state = next;
                if let Some(idx) = terminal_at(base, check, state) {
                    found.push(keys.get(idx).to_owned());
                }
            }
            None => break,
        }
    }
    found
}

/// Scans every starting position in `sentence`, running an independent walk
/// from each. Every matching key at every position is reported — there is
/// no longest-match or non-overlap suppression — except that a key whose
/// text has already been reported once (from an earlier starting position)
/// is not reported again (§9 "first-discovery" semantics).
///
/// Returns parallel `(keys, byte_offsets)` lists, offsets into the original
/// UTF-8 encoding of `sentence`.
pub(crate) fn analysis(
    base: &[i32],
    check: &[i32],
    alphabet: &Alphabet,
    keys: &KeyTable,
    sentence: &str,
) -> (Vec<String>, Vec<usize>) {
    let positions: Vec<(usize, char)> = sentence.char_indices().collect();
    let mut matched = Vec::new();
    let mut offsets = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for start in 0..positions.len() {
        let byte_offset = positions[start].0;
        let mut state = ROOT_STATE;
        for &(_, c) in &positions[start..] {
            let Some(next) = step(base, check, alphabet, state, c) else {
                break;
            };
            state = next;
            if let Some(idx) = terminal_at(base, check, state) {
                let key = keys.get(idx);
                if seen.insert(key.to_owned()) {
                    matched.push(key.to_owned());
                    offsets.push(byte_offset);
                }
            }
        }
    }

    (matched, offsets)
}
