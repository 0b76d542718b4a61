//! Line-based match protocol, for playing against a referee or another
//! program over stdin/stdout.
//!
//! The protocol is the one competition referees speak for this game:
//!
//! - `Start` — we are the first player and must open.
//! - a number `1..=106` — the opponent played that position; reply with ours.
//! - `-1` — the opponent invoked the pie rule and took our opening.
//! - `Quit` — the game is over, exit.
//!
//! Every reply is a position number on its own line, or `-1` when the engine
//! itself swaps. Diagnostics go to stderr, never stdout.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};

use crate::constants::{POSITIONS, SWAP_MOVE};
use crate::engine::{Engine, SearchConfig};

/// One side of a match: an engine plus the game history so far.
pub struct MatchSession {
    engine: Engine,
    config: SearchConfig,
    history: Vec<i32>,
}

impl MatchSession {
    pub fn new(engine: Engine, config: SearchConfig) -> Self {
        MatchSession { engine, config, history: Vec::new() }
    }

    /// Read referee lines from stdin until `Quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        for line in stdin.lock().lines() {
            let line = line.context("reading referee input")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match self.handle_line(line)? {
                Some(reply) => {
                    writeln!(stdout, "{reply}")?;
                    stdout.flush()?;
                }
                None => break,
            }
        }
        Ok(())
    }

    /// Process one referee line; returns our reply, or `None` on `Quit`.
    pub fn handle_line(&mut self, line: &str) -> Result<Option<String>> {
        if line.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        if line.eq_ignore_ascii_case("start") {
            if !self.history.is_empty() {
                bail!("Start received mid-game");
            }
            return self.respond().map(Some);
        }
        let entry: i32 = line.parse().with_context(|| format!("unrecognized input {line:?}"))?;
        if entry == SWAP_MOVE {
            if self.history.len() != 1 {
                bail!("opponent swap is only legal as the second move");
            }
        } else if entry < 1 || entry > POSITIONS as i32 {
            bail!("move {entry} is not a board position");
        }
        self.history.push(entry);
        self.respond().map(Some)
    }

    /// Ask the engine for a move, record it, and render it for the referee.
    fn respond(&mut self) -> Result<String> {
        let best = self.engine.find_move(&self.history, &self.config, None)?;
        // The engine expresses a swap by returning the opponent's own move.
        let swapping = self.history.len() == 1 && best.mv == self.history[0] as usize;
        let entry = if swapping { SWAP_MOVE } else { best.mv as i32 };
        self.history.push(entry);
        eprintln!(
            "played {} with win probability {:.3}",
            entry, best.win_probability
        );
        Ok(entry.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> MatchSession {
        MatchSession::new(Engine::with_seed(17), SearchConfig::new(2, false))
    }

    #[test]
    fn start_produces_a_legal_first_move() {
        let mut s = session();
        let reply = s.handle_line("Start").unwrap().unwrap();
        let mv: i32 = reply.parse().unwrap();
        assert!((1..=POSITIONS as i32).contains(&mv));
        assert_eq!(s.history, vec![mv]);
    }

    #[test]
    fn interior_opponent_opening_is_swapped() {
        let mut s = session();
        let reply = s.handle_line("43").unwrap().unwrap();
        assert_eq!(reply, "-1");
        assert_eq!(s.history, vec![43, SWAP_MOVE]);
    }

    #[test]
    fn border_opponent_opening_is_answered_on_the_board() {
        let mut s = session();
        let reply = s.handle_line("2").unwrap().unwrap();
        let mv: i32 = reply.parse().unwrap();
        assert!((1..=POSITIONS as i32).contains(&mv));
        assert_ne!(mv, 2, "position 2 is already occupied");
    }

    #[test]
    fn quit_ends_the_session() {
        let mut s = session();
        assert!(s.handle_line("Quit").unwrap().is_none());
    }

    #[test]
    fn garbage_and_illegal_input_are_rejected() {
        let mut s = session();
        assert!(s.handle_line("resign").is_err());
        assert!(s.handle_line("0").is_err());
        assert!(s.handle_line("107").is_err());
        assert!(s.handle_line("-1").is_err(), "no opening to swap yet");
    }
}
