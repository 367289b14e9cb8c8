use std::collections::HashSet;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::keys::KeyTable;
use crate::layout::{encode_terminal, slot, TERMINAL_CODE};

/// Construction-time knobs (§6 "Configuration constants").
///
/// Both factors are clamped to their documented floors so a misconfigured
/// caller cannot make placement pathological (a factor below 1.0 would let
/// resizing under-allocate and thrash; a floor below 0.1 would round the
/// initial array to nothing for small key sets).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildConfig {
    /// Minimum growth multiplier applied when the array pair is resized.
    /// Default `1.2`, clamped to `>= 1.0`.
    pub min_expansive_factor: f64,
    /// Initial array size multiplier against `|keys|`. Default `2.5`,
    /// clamped to `>= 0.1`.
    pub init_array_factor: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            min_expansive_factor: 1.2,
            init_array_factor: 2.5,
        }
    }
}

impl BuildConfig {
    /// Builds a config, clamping both factors to their documented floors.
    pub fn new(min_expansive_factor: f64, init_array_factor: f64) -> Self {
        Self {
            min_expansive_factor: min_expansive_factor.max(1.0),
            init_array_factor: init_array_factor.max(0.1),
        }
    }
}

/// One child edge discovered by [`fetch_children`]: the alphabet code
/// labeling the edge, and the `[left, right)` span of the sorted key table
/// that shares it.
type ChildSpan = (i32, usize, usize);

/// §4.2 "Fetch(parent)": scans `coded[left..right]` at `depth` and groups
/// consecutive equal codes into child spans, in ascending code order.
///
/// `coded[i]` is key `i`'s alphabet codes with a trailing `0` terminal
/// sentinel appended, so depth `d == key.len()` is represented uniformly as
/// code `0` rather than as a separate out-of-bounds case.
fn fetch_children(coded: &[Vec<i32>], left: usize, right: usize, depth: usize) -> Vec<ChildSpan> {
    let mut children = Vec::new();
    let mut i = left;
    while i < right {
        let code = coded[i][depth];
        let start = i;
        i += 1;
        while i < right && coded[i][depth] == code {
            i += 1;
        }
        children.push((code, start, i));
    }
    children
}

/// Mutable state threaded through a single `build` invocation (§9
/// "Global-ish state during construction"). Scoped to one call so two
/// concurrent builds never interfere.
struct PlacementEngine {
    base: Vec<i32>,
    check: Vec<i32>,
    used_states: HashSet<i32>,
    previous_state: i32,
    /// High-water mark: one past the highest array index ever written.
    size: i32,
    config: BuildConfig,
}

impl PlacementEngine {
    fn new(key_count: usize, config: BuildConfig) -> Self {
        let initial_len = ((key_count as f64) * config.init_array_factor).ceil() as usize;
        let initial_len = initial_len.max(1);
        Self {
            base: vec![0; initial_len],
            check: vec![0; initial_len],
            used_states: HashSet::new(),
            previous_state: 0,
            size: 0,
            config,
        }
    }

    fn ensure_capacity(&mut self, min_len: usize) {
        if min_len > self.base.len() {
            let grown = ((min_len as f64) * self.config.min_expansive_factor).ceil() as usize;
            let new_len = grown.max(min_len);
            debug!(old_len = self.base.len(), new_len, "growing base/check arrays");
            self.base.resize(new_len, 0);
            self.check.resize(new_len, 0);
        }
    }

    /// §4.3 "The search procedure": finds a state `s` placing every child
    /// of `children` into a currently-unused slot, growing the arrays as
    /// needed along the way.
    fn place(&mut self, children: &[ChildSpan]) -> i32 {
        let first_code = children[0].0;
        let last_code = children[children.len() - 1].0;

        let mut s = self.previous_state + 1;
        loop {
            if self.used_states.contains(&s) {
                s += 1;
                continue;
            }

            let max_index = s + last_code - 2;
            self.ensure_capacity((max_index + 1) as usize);

            let first_slot = slot(first_code, s) as usize;
            if self.check[first_slot] != 0 {
                s += 1;
                continue;
            }

            let all_free = children[1..]
                .iter()
                .all(|&(code, _, _)| self.check[slot(code, s) as usize] == 0);
            if !all_free {
                s += 1;
                continue;
            }

            self.used_states.insert(s);
            self.previous_state = s;
            self.size = self.size.max(s + last_code - 1);
            return s;
        }
    }

    /// Places `node`'s children and writes their slots, then depth-first
    /// descends into every non-terminal child in turn. `own_slot` is the
    /// array slot this node itself occupies (`None` for the root, which has
    /// no slot of its own).
    fn build_node(
        &mut self,
        coded: &[Vec<i32>],
        left: usize,
        right: usize,
        depth: usize,
        own_slot: Option<usize>,
    ) {
        let children = fetch_children(coded, left, right, depth);
        let s = self.place(&children);
        if let Some(i) = own_slot {
            self.base[i] = s;
        }

        let mut to_descend = Vec::with_capacity(children.len());
        for (code, child_left, child_right) in children {
            let i = slot(code, s) as usize;
            self.check[i] = s;
            if code == TERMINAL_CODE {
                self.base[i] = encode_terminal(child_left);
            } else {
                to_descend.push((i, child_left, child_right));
            }
        }

        for (i, child_left, child_right) in to_descend {
            self.build_node(coded, child_left, child_right, depth + 1, Some(i));
        }
    }

    fn finish(mut self) -> (Vec<i32>, Vec<i32>) {
        let size = self.size.max(0) as usize;
        self.base.truncate(size);
        self.check.truncate(size);
        (self.base, self.check)
    }
}

/// Runs the full placement algorithm over a sorted, non-empty key table and
/// returns the finished `(base, check)` array pair.
pub(crate) fn build_arrays(
    keys: &KeyTable,
    alphabet: &Alphabet,
    config: BuildConfig,
) -> (Vec<i32>, Vec<i32>) {
    debug_assert!(!keys.is_empty(), "build_arrays requires a non-empty key table");

    let coded: Vec<Vec<i32>> = keys
        .as_slice()
        .iter()
        .map(|key| {
            let mut codes: Vec<i32> = key
                .chars()
                .map(|c| alphabet.code(c).expect("alphabet built from these keys"))
                .collect();
            codes.push(TERMINAL_CODE);
            codes
        })
        .collect();

    let mut engine = PlacementEngine::new(keys.len(), config);
    engine.build_node(&coded, 0, keys.len(), 0, None);
    let (base, check) = engine.finish();
    debug!(key_count = keys.len(), size = base.len(), "trie built");
    (base, check)
}
