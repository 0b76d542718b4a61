//! Opening book and the pie-rule swap decision.
//!
//! Both exist to patch the search's weakest phase: the first few moves, where
//! playout statistics are nearly uniform. The swap rule decides whether the
//! second player should take over the first player's opening instead of
//! answering it; the book maps known history prefixes straight to a reply.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::board::edge_distance;
use crate::constants::{NO_MOVE, SWAP_MOVE};

/// The symmetry orbit of position 15: the ten cells equivalent to it under
/// the board's rotations and reflections. Swapping these is worthwhile even
/// though they sit close to the border.
const SWAP_WHITELIST: [usize; 10] = [11, 15, 18, 24, 63, 71, 74, 81, 95, 96];

/// Should the second player swap in the first player's opening move?
///
/// True for every interior move (edge distance above 1) and for the
/// whitelisted near-border cells. Only meaningful when exactly one move has
/// been played and swapping is still legal; the caller checks that.
pub fn should_swap(mv: usize) -> bool {
    edge_distance(mv) > 1 || SWAP_WHITELIST.contains(&mv)
}

/// One node of the opening trie: a suggested move for the player on turn,
/// plus continuations indexed by the move actually played.
struct BookNode {
    mv: usize,
    children: HashMap<usize, BookNode>,
}

impl BookNode {
    fn leaf(mv: usize) -> Self {
        BookNode { mv, children: HashMap::new() }
    }
}

static BOOK: OnceLock<BookNode> = OnceLock::new();

/// The book's reply to a move history, or [`NO_MOVE`] when the history has
/// left the book. Swap markers in the history are skipped: a swap exchanges
/// the players but not the sequence of board positions.
pub fn opening_move(history: &[i32]) -> usize {
    let mut node = BOOK.get_or_init(build_book);
    for &entry in history {
        if entry == SWAP_MOVE {
            continue;
        }
        if node.children.is_empty() {
            return NO_MOVE;
        }
        match node.children.get(&(entry as usize)) {
            Some(child) => node = child,
            None => return NO_MOVE,
        }
    }
    node.mv
}

/// A small curated book. The root move is a corner: under the pie rule the
/// first move must be weak enough that the opponent declines to swap it, and
/// a corner cell is the weakest opening that still contributes to one corner
/// fight. Interior continuations head for the centre.
fn build_book() -> BookNode {
    let mut root = BookNode::leaf(1);

    // Our corner opening was not swapped (or was swapped, in which case the
    // same subtree serves the opponent's side of the board).
    let mut after_corner = BookNode::leaf(43);
    after_corner.children.insert(43, BookNode::leaf(31));
    after_corner.children.insert(31, BookNode::leaf(43));
    after_corner.children.insert(21, BookNode::leaf(43));
    root.children.insert(1, after_corner);

    // Replies to other corner openings: take the centre.
    for corner in [37, 49, 100, 106] {
        root.children.insert(corner, BookNode::leaf(43));
    }
    // Replies to border openings next to our preferred corner lines.
    for border in [2, 4, 50, 92, 99, 105] {
        root.children.insert(border, BookNode::leaf(43));
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::POSITIONS;

    #[test]
    fn swaps_every_interior_move() {
        for p in 1..=POSITIONS {
            if edge_distance(p) > 1 {
                assert!(should_swap(p), "interior move {p} should swap");
            }
        }
    }

    #[test]
    fn swaps_the_whitelist_and_nothing_else_on_the_border() {
        for p in SWAP_WHITELIST {
            assert!(edge_distance(p) <= 1, "whitelist cell {p} is not near the border");
            assert!(should_swap(p));
        }
        // Corners and plain border cells are left alone.
        for p in [1, 2, 37, 49, 100, 106] {
            assert!(!should_swap(p), "{p} should not swap");
        }
    }

    #[test]
    fn empty_history_returns_the_root_move() {
        assert_eq!(opening_move(&[]), 1);
    }

    #[test]
    fn known_prefixes_walk_the_trie() {
        assert_eq!(opening_move(&[1]), 43);
        assert_eq!(opening_move(&[1, SWAP_MOVE]), 43);
        assert_eq!(opening_move(&[1, 43]), 31);
        assert_eq!(opening_move(&[49]), 43);
    }

    #[test]
    fn unknown_or_exhausted_histories_return_no_move() {
        assert_eq!(opening_move(&[60]), NO_MOVE);
        assert_eq!(opening_move(&[1, 43, 31, 20]), NO_MOVE);
        assert_eq!(opening_move(&[1, 44]), NO_MOVE);
    }
}
