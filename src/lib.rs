//! # ML Board Env
//!
//! Reset/step reinforcement-learning environments for two-player board games:
//! connect four on a 7×6 board with gravity, and noughts and crosses on 3×3.
//! The agent under training plays one side; a pluggable move provider plays
//! the other.
//!
//! ## Modules
//!
//! - [`game`] — Board geometry, cells, game state, and win/draw detection
//! - [`env`] — The step engine and its second-player variant
//! - [`opponent`] — Move providers: random, human, and policy-backed
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod env;
pub mod error;
pub mod game;
pub mod opponent;
