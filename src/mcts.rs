//! Monte Carlo tree search with alpha-blended AMAF statistics.
//!
//! Nodes live in an arena and address each other by index, so expansion and
//! backpropagation are plain index walks instead of recursive mutation. Each
//! node stores its game state, whose turn it is, visit/win totals, and
//! per-move AMAF counters. One `expand` call descends by selection score,
//! creates at most one new node, runs one playout batch there, and merges the
//! batch result into every node on the path — that merge is the whole
//! backpropagation step.
//!
//! The tree is built fresh for every move decision and dropped afterwards.
//! Reusing the subtree of the previous move would be slightly stronger, but a
//! fresh tree keeps move requests independent of each other.

use std::collections::HashMap;

use crate::constants::{ALPHA, NO_MOVE, POSITIONS, UNEXPLORED_SCORE};
use crate::playout::{AmafPlayout, Rng, sample_playouts};
use crate::state::GameState;

/// Visit and AMAF statistics of one node, monotonically non-decreasing.
#[derive(Clone)]
pub struct Statistics {
    /// Playouts that have flowed through this node.
    pub samples: u32,
    /// How many of them the engine won.
    pub wins: u32,
    /// Per-move AMAF sample counts, for the side on turn at this node.
    pub amaf_samples: [u32; POSITIONS + 1],
    /// Per-move AMAF win counts.
    pub amaf_wins: [u32; POSITIONS + 1],
}

impl Default for Statistics {
    fn default() -> Self {
        Statistics {
            samples: 0,
            wins: 0,
            amaf_samples: [0; POSITIONS + 1],
            amaf_wins: [0; POSITIONS + 1],
        }
    }
}

impl Statistics {
    /// Merge a batch result, crediting the AMAF arrays of whichever side is
    /// on turn at the owning node.
    pub fn add(&mut self, playout: &AmafPlayout, my_move: bool) {
        self.samples += playout.samples;
        self.wins += playout.wins;
        let (samples, wins) = if my_move {
            (&playout.my_samples, &playout.my_wins)
        } else {
            (&playout.op_samples, &playout.op_wins)
        };
        for p in 1..=POSITIONS {
            self.amaf_samples[p] += samples[p];
            self.amaf_wins[p] += wins[p];
        }
    }
}

/// The move chosen by a search, with its estimated win probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMove {
    pub mv: usize,
    /// `wins / samples` of the chosen child, or 0.5 when nothing was sampled.
    pub win_probability: f32,
}

struct Node {
    state: GameState,
    /// Is the engine on turn at this node?
    my_move: bool,
    stats: Statistics,
    children: HashMap<usize, usize>,
}

/// One search tree, rooted at the position a move is requested for.
pub struct Tree {
    nodes: Vec<Node>,
    rng: Rng,
}

impl Tree {
    /// Root the tree at `state` with the engine on turn.
    pub fn new(state: GameState, rng: Rng) -> Self {
        let root = Node {
            state,
            my_move: true,
            stats: Statistics::default(),
            children: HashMap::new(),
        };
        Tree { nodes: vec![root], rng }
    }

    /// Number of nodes created so far, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The root node's statistics.
    pub fn root_statistics(&self) -> &Statistics {
        &self.nodes[0].stats
    }

    /// Descend to the most promising node, create its selected child, run one
    /// playout batch there, and merge the result into the whole path.
    ///
    /// A node with an empty pool is terminal: it contributes an empty result
    /// and creates nothing.
    pub fn expand(&mut self) -> AmafPlayout {
        let mut path: Vec<usize> = vec![0];
        let result;
        loop {
            let id = *path.last().expect("path never empty");
            if self.nodes[id].state.moves_left() == 0 {
                path.pop();
                result = AmafPlayout::default();
                break;
            }
            let mv = self.select_move(id);
            if let Some(&child) = self.nodes[id].children.get(&mv) {
                path.push(child);
            } else {
                let child = self.add_child(id, mv);
                let my_move = self.nodes[child].my_move;
                let batch = sample_playouts(&self.nodes[child].state, my_move, &mut self.rng);
                self.nodes[child].stats.add(&batch, my_move);
                result = batch;
                break;
            }
        }
        for &id in path.iter().rev() {
            let my_move = self.nodes[id].my_move;
            self.nodes[id].stats.add(&result, my_move);
        }
        result
    }

    /// The legal move with the best selection score at `id`.
    ///
    /// Maximize nodes score a move by its AMAF win rate, minimize nodes by
    /// its AMAF loss rate. When the move's child exists, the AMAF term is
    /// blended with the child's own rate at weight [`ALPHA`]. A move with no
    /// AMAF samples is forced to [`UNEXPLORED_SCORE`] so it gets tried once.
    /// Strict comparison keeps the earliest move of the pool on ties.
    fn select_move(&self, id: usize) -> usize {
        let node = &self.nodes[id];
        let stats = &node.stats;
        let mut best_score = -1.0f64;
        let mut selected = NO_MOVE;
        for i in 0..node.state.moves_left() {
            let mv = node.state.remaining[i] as usize;
            let amaf_samples = stats.amaf_samples[mv] as f64;
            let mut score = if node.my_move {
                stats.amaf_wins[mv] as f64 / amaf_samples
            } else {
                (stats.amaf_samples[mv] - stats.amaf_wins[mv]) as f64 / amaf_samples
            };
            if let Some(&child) = node.children.get(&mv) {
                let cs = &self.nodes[child].stats;
                let empirical = if node.my_move {
                    cs.wins as f64 / cs.samples as f64
                } else {
                    (cs.samples - cs.wins) as f64 / cs.samples as f64
                };
                score = score * ALPHA + empirical * (1.0 - ALPHA);
            }
            if stats.amaf_samples[mv] == 0 {
                score = UNEXPLORED_SCORE;
            }
            if score > best_score {
                best_score = score;
                selected = mv;
            }
        }
        selected
    }

    fn add_child(&mut self, parent: usize, mv: usize) -> usize {
        let mut state = self.nodes[parent].state.clone();
        let parent_my_move = self.nodes[parent].my_move;
        state.play(mv, parent_my_move);
        let child = Node {
            state,
            my_move: !parent_my_move,
            stats: Statistics::default(),
            children: HashMap::new(),
        };
        let id = self.nodes.len();
        self.nodes.push(child);
        self.nodes[parent].children.insert(mv, id);
        id
    }

    /// The most-sampled root move; earliest pool entry on ties, and a neutral
    /// 0.5 probability when no child has any samples.
    pub fn best_move(&self) -> BestMove {
        let root = &self.nodes[0];
        let mut most_samples = -1i64;
        let mut best = BestMove {
            mv: root.state.remaining[0] as usize,
            win_probability: 0.5,
        };
        for i in 0..root.state.moves_left() {
            let mv = root.state.remaining[i] as usize;
            if let Some(&child) = root.children.get(&mv) {
                let stats = &self.nodes[child].stats;
                if stats.samples as i64 > most_samples {
                    most_samples = stats.samples as i64;
                    best.mv = mv;
                    if stats.samples > 0 {
                        best.win_probability = stats.wins as f32 / stats.samples as f32;
                    }
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SAMPLES;

    fn small_tree() -> Tree {
        Tree::new(GameState::new(), Rng::new(42))
    }

    #[test]
    fn expand_accumulates_exactly_one_batch_per_call() {
        let mut tree = small_tree();
        for k in 1..=5 {
            tree.expand();
            assert_eq!(tree.root_statistics().samples, k * SAMPLES);
        }
    }

    #[test]
    fn expand_creates_at_most_one_node_per_call() {
        let mut tree = small_tree();
        for k in 1..=20 {
            tree.expand();
            assert!(tree.node_count() <= 1 + k);
        }
    }

    #[test]
    fn search_is_deterministic_for_a_fixed_seed() {
        let mut a = Tree::new(GameState::new(), Rng::new(7));
        let mut b = Tree::new(GameState::new(), Rng::new(7));
        for _ in 0..25 {
            a.expand();
            b.expand();
        }
        assert_eq!(a.best_move(), b.best_move());
        assert_eq!(a.node_count(), b.node_count());
    }

    #[test]
    fn terminal_tree_expands_to_nothing() {
        let mut state = GameState::new();
        let mut mine = true;
        for p in 1..=POSITIONS {
            state.try_play(p, mine).unwrap();
            mine = !mine;
        }
        let mut tree = Tree::new(state, Rng::new(1));
        let result = tree.expand();
        assert_eq!(result.samples, 0);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.root_statistics().samples, 0);
    }

    #[test]
    fn best_move_prefers_the_most_sampled_child() {
        let mut tree = small_tree();
        for _ in 0..30 {
            tree.expand();
        }
        let best = tree.best_move();
        let root = &tree.nodes[0];
        let best_child = root.children[&best.mv];
        let best_samples = tree.nodes[best_child].stats.samples;
        for (_, &child) in &root.children {
            assert!(tree.nodes[child].stats.samples <= best_samples);
        }
        assert!((0.0..=1.0).contains(&best.win_probability));
    }

    #[test]
    fn best_move_breaks_ties_toward_the_earlier_pool_entry() {
        let mut tree = small_tree();
        let a = tree.add_child(0, 5);
        let b = tree.add_child(0, 3);
        tree.nodes[a].stats.samples = 64;
        tree.nodes[a].stats.wins = 30;
        tree.nodes[b].stats.samples = 64;
        tree.nodes[b].stats.wins = 10;
        // The root pool iterates 1, 2, 3, ... so the tie goes to move 3.
        let best = tree.best_move();
        assert_eq!(best.mv, 3);
        assert_eq!(best.win_probability, 10.0 / 64.0);
    }

    #[test]
    fn fresh_tree_reports_neutral_probability() {
        let tree = small_tree();
        let best = tree.best_move();
        assert_eq!(best.mv, 1);
        assert_eq!(best.win_probability, 0.5);
    }
}
