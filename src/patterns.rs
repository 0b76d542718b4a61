//! Tactical reply patterns used to bias random playouts.
//!
//! Patterns are keyed by the position the opponent just played. Each entry
//! names a set of positions the replying side must already own, a set of
//! positions the opponent must not own, and the candidate reply. The playout
//! sampler collects every matching reply and picks one uniformly at random,
//! falling back to an unbiased random move when nothing matches.
//!
//! The concrete pattern set is the two-bridge intrusions of the board: two
//! stones a and b that are not adjacent but share exactly two common
//! neighbours are connected through either of them, and when the opponent
//! takes one carrier the connection is kept by playing the other. The table
//! is derived from the adjacency table once, on first use.

use std::sync::OnceLock;

use crate::board::NEIGHBOURS;
use crate::constants::{PATTERN_STACK, POSITIONS};
use crate::state::Bits;

/// One reply candidate, keyed externally by the opponent's last move.
#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    /// Positions the replying side must own for the pattern to apply.
    pub require: Bits,
    /// Positions the opponent must not own. Contains the reply cell, so a
    /// reply the opponent already took never matches.
    pub forbid: Bits,
    /// The suggested reply.
    pub reply: usize,
}

/// All patterns, indexed by the key position.
pub struct PatternTable {
    by_key: Vec<Vec<Pattern>>,
}

impl PatternTable {
    /// Patterns whose key is the position just played by the opponent.
    #[inline]
    pub fn for_key(&self, key: usize) -> &[Pattern] {
        &self.by_key[key]
    }

    /// Total number of entries, all keys combined.
    pub fn len(&self) -> usize {
        self.by_key.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static PATTERNS: OnceLock<PatternTable> = OnceLock::new();

/// The shared pattern table, built on first use.
pub fn patterns() -> &'static PatternTable {
    PATTERNS.get_or_init(build_table)
}

fn adjacent(a: usize, b: usize) -> bool {
    NEIGHBOURS[a].contains(&b)
}

fn build_table() -> PatternTable {
    let mut by_key: Vec<Vec<Pattern>> = vec![Vec::new(); POSITIONS + 1];
    for key in 1..=POSITIONS {
        let ns = NEIGHBOURS[key];
        for (i, &a) in ns.iter().enumerate() {
            for &b in &ns[i + 1..] {
                if adjacent(a, b) {
                    continue;
                }
                let common: Vec<usize> = NEIGHBOURS[a]
                    .iter()
                    .copied()
                    .filter(|n| adjacent(b, *n))
                    .collect();
                if common.len() != 2 {
                    continue;
                }
                // `key` is one carrier of the bridge a-b; the reply is the other.
                let reply = if common[0] == key { common[1] } else { common[0] };
                let mut require = Bits::default();
                require.set(a);
                require.set(b);
                let mut forbid = Bits::default();
                forbid.set(reply);
                by_key[key].push(Pattern { require, forbid, reply });
            }
        }
        debug_assert!(by_key[key].len() <= PATTERN_STACK);
    }
    PatternTable { by_key }
}
