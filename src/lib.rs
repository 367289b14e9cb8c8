//! An immutable double-array trie over Unicode scalar strings.
//!
//! [`DoubleArrayTrie`] packs a finite set of keys into a pair of parallel
//! integer arrays (`base`, `check`) so that every character transition is a
//! single indexed lookup. It supports exact membership, prefix-of-input
//! recognition, enumeration of dictionary entries that are prefixes of an
//! input, and multi-position substring scanning of a text.
//!
//! # Quick start
//!
//! ```
//! use dat_trie::DoubleArrayTrie;
//!
//! let trie = DoubleArrayTrie::build(&["a", "ab", "abc", "b", "bc"]).unwrap();
//! assert!(trie.matches("abc"));
//! assert_eq!(trie.matches_index("abc"), Some(2));
//! assert!(!trie.matches("ab_"));
//! ```

#![warn(missing_docs)]

mod alphabet;
mod build;
mod error;
mod keys;
mod layout;
mod query;
mod serial;

use std::path::Path;

pub use alphabet::Alphabet;
pub use build::BuildConfig;
pub use error::TrieError;

use keys::KeyTable;

/// A finished double-array trie: two packed integer arrays plus the
/// alphabet and sorted key table used to build them.
///
/// Construction is the expensive, one-shot step (§4.3); every query method
/// below is a read-only `O(|input|)` walk that shares no mutable state with
/// construction or with any other query.
#[derive(Clone, Debug)]
pub struct DoubleArrayTrie {
    base: Vec<i32>,
    check: Vec<i32>,
    alphabet: Alphabet,
    keys: KeyTable,
}

impl DoubleArrayTrie {
    /// Builds a trie from `keys` using the default [`BuildConfig`].
    ///
    /// Returns `None` if `keys` is empty (§6 "empty sentinel") or if every
    /// key is the empty string — an empty key has no useful trie semantics
    /// (§3) and is excluded rather than given a synthetic root-terminal
    /// slot with no valid array index.
    pub fn build<S: AsRef<str>>(keys: &[S]) -> Option<Self> {
        Self::build_with_config(keys, BuildConfig::default())
    }

    /// Builds a trie from `keys` with an explicit [`BuildConfig`], tuning
    /// the resize factors used during placement (§6 "Configuration
    /// constants").
    pub fn build_with_config<S: AsRef<str>>(keys: &[S], config: BuildConfig) -> Option<Self> {
        let table = KeyTable::build(keys);
        let non_empty: Vec<&str> = table
            .as_slice()
            .iter()
            .map(String::as_str)
            .filter(|k| !k.is_empty())
            .collect();
        if non_empty.is_empty() {
            return None;
        }

        let table = KeyTable::build(&non_empty);
        let alphabet = Alphabet::build(&non_empty);
        let (base, check) = build::build_arrays(&table, &alphabet, config);

        Some(Self {
            base,
            check,
            alphabet,
            keys: table,
        })
    }

    /// Exact membership: `true` iff `word` is one of the keys the trie was
    /// built from.
    pub fn matches(&self, word: &str) -> bool {
        query::matches(&self.base, &self.check, &self.alphabet, word)
    }

    /// Exact membership, returning the matched key's 0-based index into the
    /// sorted key table, or `None` if `word` is not a key.
    pub fn matches_index(&self, word: &str) -> Option<usize> {
        query::matches_index(&self.base, &self.check, &self.alphabet, word)
    }

    /// `true` iff `word` is a prefix of at least one key (equivalently: the
    /// walk from the root over every character of `word` never fails).
    /// Does not require `word` itself to be a key.
    pub fn match_prefix(&self, word: &str) -> bool {
        query::match_prefix(&self.base, &self.check, &self.alphabet, word)
    }

    /// Every key that is a prefix of `word`, in order of increasing length.
    pub fn obtain_prefixes(&self, word: &str) -> Vec<String> {
        query::obtain_prefixes(&self.base, &self.check, &self.alphabet, &self.keys, word)
    }

    /// Scans every starting position of `sentence` for keys reached from
    /// there, reporting each matched key alongside its UTF-8 byte offset
    /// in `sentence`. A key's text is reported only at its first
    /// discovered occurrence (§4.4 "Analysis").
    pub fn analysis(&self, sentence: &str) -> (Vec<String>, Vec<usize>) {
        query::analysis(&self.base, &self.check, &self.alphabet, &self.keys, sentence)
    }

    /// Length of the `base`/`check` array pair.
    pub fn size(&self) -> usize {
        self.base.len()
    }

    /// Number of keys stored (after empty-key exclusion).
    pub fn key_size(&self) -> usize {
        self.keys.len()
    }

    /// Count of unused array slots (`check == 0`); a coarse density metric.
    /// Not memoized — recomputed each call from the finished arrays, which
    /// never change after construction.
    pub fn hollow(&self) -> usize {
        self.check.iter().filter(|&&c| c == 0).count()
    }

    /// Writes this trie to `path` as a gzip-compressed text dump (§6).
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<(), TrieError> {
        serial::dump(path.as_ref(), &self.base, &self.check, &self.alphabet, &self.keys)
    }

    /// Reads a trie previously written by [`DoubleArrayTrie::dump`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TrieError> {
        let (base, check, alphabet, keys) = serial::load(path.as_ref())?;
        Ok(Self {
            base,
            check,
            alphabet,
            keys,
        })
    }
}
