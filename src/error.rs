use thiserror::Error;

/// Errors surfaced at the persistence boundary (§7).
///
/// Construction and queries never fail: `build` on an empty key set returns
/// the documented empty sentinel, and queries return `false`/`-1`/empty
/// results rather than raising.
#[derive(Debug, Error)]
pub enum TrieError {
    /// Filesystem or gzip-stream failure while reading or writing a dump.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The dump is missing a header line, or a field could not be parsed
    /// as an integer.
    ///
    /// The reference source coerces unparsable integers to `0` instead of
    /// failing (§9); this implementation raises `Format` there rather than
    /// risk a silently corrupted trie.
    #[error("malformed trie dump: {reason}")]
    Format {
        /// Human-readable description of what was missing or malformed.
        reason: String,
    },
}

impl TrieError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        Self::Format {
            reason: reason.into(),
        }
    }
}
