use std::collections::BTreeMap;

/// A bijection between the code points appearing across a key set and the
/// positive integers `1..=|alphabet|`, assigned in ascending code-point
/// order (§4.1).
///
/// Code `0` is never assigned to a real code point; it is reserved as the
/// end-of-word sentinel used internally during placement.
#[derive(Clone, Debug)]
pub struct Alphabet {
    code_of: BTreeMap<char, i32>,
}

impl Alphabet {
    /// Scans every key, collects the distinct code points, sorts them
    /// ascending, and assigns dense codes starting at `1`.
    pub(crate) fn build<S: AsRef<str>>(keys: &[S]) -> Self {
        let mut chars: Vec<char> = keys
            .iter()
            .flat_map(|k| k.as_ref().chars())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        chars.sort_unstable();

        let code_of = chars
            .into_iter()
            .enumerate()
            .map(|(i, c)| (c, (i + 1) as i32))
            .collect();

        Self { code_of }
    }

    /// Looks up the code assigned to a code point, if any.
    #[inline]
    pub(crate) fn code(&self, c: char) -> Option<i32> {
        self.code_of.get(&c).copied()
    }

    /// The number of distinct code points in the alphabet (`|A|`).
    pub fn len(&self) -> usize {
        self.code_of.len()
    }

    /// `true` if the alphabet carries no code points (only possible for an
    /// empty key set).
    pub fn is_empty(&self) -> bool {
        self.code_of.is_empty()
    }

    /// Iterates the alphabet in `codepoint=code` pairs, ascending by
    /// code point, for use by the persistence format (§6).
    pub(crate) fn iter(&self) -> impl Iterator<Item = (char, i32)> + '_ {
        self.code_of.iter().map(|(&c, &code)| (c, code))
    }

    pub(crate) fn from_pairs(pairs: impl IntoIterator<Item = (char, i32)>) -> Self {
        Self {
            code_of: pairs.into_iter().collect(),
        }
    }
}
