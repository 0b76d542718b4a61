//! A Monte Carlo tree search engine for Poly-Y on the standard 106-position,
//! five-sided board.
//!
//! The search combines plain MCTS with the all-moves-as-first heuristic,
//! pattern-biased random playouts, bitset win detection, and an opening book
//! with a pie-rule swap decision.
//!
//! ## Modules
//!
//! - [`constants`] - Board size and search parameters
//! - [`board`] - Fixed topology tables of the standard board
//! - [`state`] - Bit-set game state and win detection
//! - [`patterns`] - Tactical reply patterns for playout biasing
//! - [`playout`] - Batched random playouts with AMAF crediting
//! - [`mcts`] - The search tree
//! - [`book`] - Opening book and swap rule
//! - [`engine`] - The per-request search controller
//! - [`proto`] - Line-based match protocol
//!
//! ## Example
//!
//! ```
//! use polyy_rust::engine::{Engine, SearchConfig};
//!
//! let mut engine = Engine::with_seed(1);
//! let config = SearchConfig::new(50, false);
//!
//! // The opponent opened on the border; find our reply.
//! let best = engine.find_move(&[2], &config, None).unwrap();
//! assert!((1..=106).contains(&best.mv));
//! ```

pub mod board;
pub mod book;
pub mod constants;
pub mod engine;
pub mod mcts;
pub mod patterns;
pub mod playout;
pub mod proto;
pub mod state;
