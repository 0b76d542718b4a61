//! The search controller: one entry point per move decision.
//!
//! An [`Engine`] is an explicitly constructed value — callers create one,
//! optionally with a fixed seed, and pass it wherever a move is needed. A
//! request replays the caller's move history into a fresh [`GameState`],
//! consults the swap rule and the opening book, and otherwise builds a fresh
//! search tree and expands it under the configured iteration budget.
//!
//! Everything here is single-threaded and CPU-bound. There is no cancellation
//! inside a request; the only granularity an impatient caller gets is the
//! per-percent progress callback.

use std::time::{Duration, Instant};

use crate::book::{opening_move, should_swap};
use crate::constants::{
    HARD_DIFFICULTY, MAX_DIFFICULTY, MIN_DIFFICULTY, NO_MOVE, POSITIONS, SWAP_MOVE,
};
use crate::mcts::{BestMove, Tree};
use crate::playout::Rng;
use crate::state::{GameState, MoveError};

/// Rejected difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyError(pub u32);

impl std::fmt::Display for DifficultyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "difficulty must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}, got {}",
            self.0
        )
    }
}

impl std::error::Error for DifficultyError {}

/// Immutable parameters of one search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of `expand` calls. Runtime grows linearly with this, playing
    /// strength only logarithmically.
    pub iterations: u64,
    /// Whether to answer known openings from the book instead of searching.
    pub use_opening_book: bool,
}

impl SearchConfig {
    /// Preset used for hints: strong enough to be useful, no book so the
    /// hint reflects the actual position.
    pub const HINT: SearchConfig = SearchConfig { iterations: 1000, use_opening_book: false };

    pub fn new(iterations: u64, use_opening_book: bool) -> Self {
        SearchConfig { iterations, use_opening_book }
    }

    /// Config for a difficulty level in 1..=15: `2 << level` iterations, with
    /// the opening book from level 10 up. Level 5 is a reasonable start;
    /// level 15 takes on the order of a minute.
    pub fn from_difficulty(level: u32) -> Result<Self, DifficultyError> {
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&level) {
            return Err(DifficultyError(level));
        }
        Ok(SearchConfig {
            iterations: 2u64 << level,
            use_opening_book: level >= HARD_DIFFICULTY,
        })
    }

    /// Encode as `"1,<iterations>,<book>"` (version 1), the form the
    /// surrounding system persists.
    pub fn encode(&self) -> String {
        format!("1,{},{}", self.iterations, if self.use_opening_book { 1 } else { 0 })
    }

    /// Decode the string form produced by [`SearchConfig::encode`].
    pub fn decode(s: &str) -> Option<Self> {
        let mut parts = s.split(',');
        let version: u32 = parts.next()?.parse().ok()?;
        if version != 1 {
            return None;
        }
        let iterations: u64 = parts.next()?.parse().ok()?;
        let book: u32 = parts.next()?.parse().ok()?;
        Some(SearchConfig { iterations, use_opening_book: book != 0 })
    }
}

/// A move-search engine for the standard board.
pub struct Engine {
    rng: Rng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine seeded from ambient entropy.
    pub fn new() -> Self {
        Self::with_seed(fastrand::u64(..))
    }

    /// An engine with a fixed seed; identical requests then produce
    /// identical moves.
    pub fn with_seed(seed: u64) -> Self {
        Engine { rng: Rng::new(seed) }
    }

    /// Select a move for the player on turn after `history`.
    ///
    /// `history` lists positions in the canonical numbering, with
    /// [`SWAP_MOVE`] as the second entry if the second player swapped. The
    /// engine is assumed to be on turn (even history length after replay).
    ///
    /// Returns the chosen move and a win-probability estimate; the
    /// probability is exactly 0.5 when no search ran (swap or book shortcut)
    /// or the chosen move was never sampled.
    ///
    /// `progress` is invoked with 1..=100 in increasing order, the last call
    /// after the final iteration. For absurdly large budgets the internal
    /// `iterations * percent` product can overflow; that is a documented
    /// limitation, not a guarded path.
    pub fn find_move(
        &mut self,
        history: &[i32],
        config: &SearchConfig,
        progress: Option<&mut dyn FnMut(u32)>,
    ) -> Result<BestMove, MoveError> {
        let state = replay(history)?;
        if state.moves_left() == 0 {
            return Err(MoveError::GameOver);
        }

        // Pie rule: exactly one move on the board and it is worth taking.
        if history.len() == 1 {
            let first = history[0] as usize;
            if should_swap(first) {
                return Ok(BestMove { mv: first, win_probability: 0.5 });
            }
        }

        if config.use_opening_book {
            let mv = opening_move(history);
            if mv != NO_MOVE {
                return Ok(BestMove { mv, win_probability: 0.5 });
            }
        }

        let mut tree = Tree::new(state, self.search_rng());
        match progress {
            None => {
                for _ in 0..config.iterations {
                    tree.expand();
                }
            }
            Some(callback) => {
                let mut done: u64 = 0;
                for percent in 1..=100u64 {
                    let target = config.iterations * percent / 100;
                    while done < target {
                        tree.expand();
                        done += 1;
                    }
                    callback(percent as u32);
                }
            }
        }
        Ok(tree.best_move())
    }

    /// Expansions per second over roughly `duration`, for calibration.
    ///
    /// Warms up first; the inner loop runs in batches of 50 so the clock is
    /// read a few thousand times per second at most.
    pub fn benchmark(&mut self, duration: Duration) -> f64 {
        let mut tree = Tree::new(GameState::new(), self.search_rng());
        for _ in 0..50 {
            tree.expand();
        }
        let start = Instant::now();
        let mut expansions: u64 = 0;
        let mut elapsed = start.elapsed();
        while elapsed < duration {
            for _ in 0..50 {
                tree.expand();
            }
            expansions += 50;
            elapsed = start.elapsed();
        }
        expansions as f64 / elapsed.as_secs_f64()
    }

    /// Every search gets its own generator split off the engine's, so one
    /// engine can serve many requests while staying reproducible.
    fn search_rng(&mut self) -> Rng {
        Rng::new(self.rng.next_raw() as u64 ^ ((self.rng.next_raw() as u64) << 32))
    }
}

/// Rebuild a game state by replaying an external move history.
///
/// The engine's stones are the entries at even indices (counting from the
/// end such that the engine is on turn after the last entry). A swap marker
/// is only legal as the second entry.
pub fn replay(history: &[i32]) -> Result<GameState, MoveError> {
    let mut state = GameState::new();
    let mut my_turn = history.len() % 2 == 0;
    for (i, &entry) in history.iter().enumerate() {
        if entry == SWAP_MOVE {
            if i != 1 {
                return Err(MoveError::InvalidSwap);
            }
            state.swap_players();
        } else {
            if entry < 1 || entry > POSITIONS as i32 {
                return Err(MoveError::OutOfRange(entry));
            }
            state.try_play(entry as usize, my_turn)?;
        }
        my_turn = !my_turn;
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_presets() {
        assert_eq!(SearchConfig::from_difficulty(5).unwrap().iterations, 64);
        assert!(!SearchConfig::from_difficulty(5).unwrap().use_opening_book);
        assert_eq!(SearchConfig::from_difficulty(10).unwrap().iterations, 2048);
        assert!(SearchConfig::from_difficulty(10).unwrap().use_opening_book);
        assert!(SearchConfig::from_difficulty(0).is_err());
        assert!(SearchConfig::from_difficulty(16).is_err());
    }

    #[test]
    fn config_string_round_trip() {
        let config = SearchConfig::new(2048, true);
        assert_eq!(config.encode(), "1,2048,1");
        assert_eq!(SearchConfig::decode(&config.encode()), Some(config));
        assert_eq!(SearchConfig::decode("2,10,0"), None);
        assert_eq!(SearchConfig::decode("nonsense"), None);
    }

    #[test]
    fn replay_tracks_both_sides_and_swaps() {
        let state = replay(&[43, SWAP_MOVE]).unwrap();
        // We opened with 43 and the opponent swapped it away.
        assert!(state.their_stones().contains(43));
        assert_eq!(state.my_stones().count(), 0);

        assert!(matches!(replay(&[43, 43]), Err(MoveError::Occupied(43))));
        assert!(matches!(replay(&[SWAP_MOVE]), Err(MoveError::InvalidSwap)));
        assert!(matches!(replay(&[200]), Err(MoveError::OutOfRange(200))));
    }

    #[test]
    fn swap_rule_shortcut_skips_the_search() {
        let mut engine = Engine::with_seed(5);
        let config = SearchConfig::new(1, false);
        let best = engine.find_move(&[43], &config, None).unwrap();
        assert_eq!(best.mv, 43);
        assert_eq!(best.win_probability, 0.5);
    }

    #[test]
    fn book_shortcut_answers_known_openings() {
        let mut engine = Engine::with_seed(5);
        let config = SearchConfig::new(1, true);
        // Position 2 is a border opening the swap rule declines but the book
        // knows.
        let best = engine.find_move(&[2], &config, None).unwrap();
        assert_eq!(best.mv, 43);
        assert_eq!(best.win_probability, 0.5);
    }

    #[test]
    fn progress_reaches_one_hundred_in_order() {
        let mut engine = Engine::with_seed(11);
        let config = SearchConfig::new(8, false);
        let mut seen = Vec::new();
        engine
            .find_move(&[1, 50], &config, Some(&mut |p| seen.push(p)))
            .unwrap();
        assert_eq!(seen.len(), 100);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*seen.last().unwrap(), 100);
    }

    #[test]
    fn full_board_is_rejected() {
        let mut history = Vec::new();
        for p in 1..=POSITIONS as i32 {
            history.push(p);
        }
        let mut engine = Engine::with_seed(3);
        let config = SearchConfig::new(1, false);
        assert_eq!(
            engine.find_move(&history, &config, None),
            Err(MoveError::GameOver)
        );
    }
}
