//! Reset/step environments for RL training loops.
//!
//! [`BoardEnv`] runs a full turn per `step`: the trainee's move, scoring, and
//! the interleaved opponent move. [`SecondPlayerEnv`] wraps it so the opponent
//! moves first.

mod engine;
mod second_player;

pub use engine::BoardEnv;
pub use second_player::SecondPlayerEnv;

use std::fmt;

use serde::{Serialize, Serializer};

use crate::game::{Board, Player};

/// Whether the episode continues after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EpisodeState {
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

/// Why an episode ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalReason {
    IllegalMove,
    Won(Player),
    /// The named player has an unstoppable win on their next move.
    WillWin(Player),
    Tie,
    /// The opponent never produced a legal move within the retry budget.
    OpponentExhausted { attempts: u32 },
    /// The opponent's provider reported an error instead of a move.
    OpponentFailed(String),
    /// `step` was called after the episode had already ended.
    EpisodeFinished,
}

impl fmt::Display for TerminalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalReason::IllegalMove => f.write_str("Illegal move"),
            TerminalReason::Won(player) => write!(f, "{player} has won"),
            TerminalReason::WillWin(player) => write!(f, "{player} will win"),
            TerminalReason::Tie => f.write_str("Players have tied (or are about to)"),
            TerminalReason::OpponentExhausted { attempts } => {
                write!(f, "Opponent found no legal move in {attempts} attempts")
            }
            TerminalReason::OpponentFailed(err) => write!(f, "Opponent failed: {err}"),
            TerminalReason::EpisodeFinished => f.write_str("Episode already finished"),
        }
    }
}

impl Serialize for TerminalReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The `info` mapping of a step: `state`, plus `reason` once terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepInfo {
    pub state: EpisodeState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<TerminalReason>,
}

impl StepInfo {
    pub fn in_progress() -> Self {
        StepInfo {
            state: EpisodeState::InProgress,
            reason: None,
        }
    }

    pub fn done(reason: TerminalReason) -> Self {
        StepInfo {
            state: EpisodeState::Done,
            reason: Some(reason),
        }
    }
}

/// Observation, reward, termination flag, and info for one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub board: Board,
    pub reward: f32,
    pub done: bool,
    pub info: StepInfo,
}

/// The reset/step surface a training loop drives.
pub trait Environment {
    /// Start a new episode and return the first observation.
    fn reset(&mut self) -> Board;

    /// Play the trainee's action and, unless the episode ends, the opponent's
    /// reply.
    fn step(&mut self, action: usize) -> StepResult;

    /// Human-readable board, one row per line.
    fn render(&self) -> String;

    /// Actions the trainee could legally take now.
    fn legal_actions(&self) -> Vec<usize>;

    /// Reseed every random source the environment owns.
    fn reseed(&mut self, seed: u64);
}
