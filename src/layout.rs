//! Shared index arithmetic for the packed `base`/`check` array pair.
//!
//! Every node in the conceptual trie is identified by a positive `state`.
//! The root is state `1`. A child reached from `state` via alphabet code
//! `code` lives at array index `code + state - 2`; the `-2` bias lets the
//! root start at state `1` while keeping `code >= 1` based at index `0`.

/// The end-of-word sentinel code used during construction. Never assigned
/// to a real code point by [`crate::alphabet::Alphabet`].
pub(crate) const TERMINAL_CODE: i32 = 0;

/// The state identifying the trie root.
pub(crate) const ROOT_STATE: i32 = 1;

/// Computes the array slot for the edge `state --code--> child`.
#[inline]
pub(crate) fn slot(code: i32, state: i32) -> i32 {
    code + state - 2
}

/// Returns `true` if `base` marks a terminal node (end of key `-base - 1`).
#[inline]
pub(crate) fn is_terminal(base: i32) -> bool {
    base < 0
}

/// Decodes a terminal `base` value back into the 0-based key index.
#[inline]
pub(crate) fn terminal_key_index(base: i32) -> usize {
    debug_assert!(is_terminal(base));
    (-base - 1) as usize
}

/// Encodes a 0-based key index as a terminal `base` value.
#[inline]
pub(crate) fn encode_terminal(key_index: usize) -> i32 {
    -(key_index as i32) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_slot_is_non_negative_for_any_code() {
        for code in 1..8 {
            assert!(slot(code, ROOT_STATE) >= 0);
        }
    }

    #[test]
    fn terminal_round_trip() {
        for k in [0usize, 1, 41] {
            let b = encode_terminal(k);
            assert!(is_terminal(b));
            assert_eq!(terminal_key_index(b), k);
        }
    }

    #[test]
    fn positive_base_is_not_terminal() {
        assert!(!is_terminal(1));
        assert!(!is_terminal(0));
    }
}
