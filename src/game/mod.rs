//! Core board game logic: geometry and winning lines, board representation,
//! player types, mutable game state, and terminal predicates.

mod board;
mod geometry;
mod player;
mod rules;
mod state;

pub use board::{Board, Cell, MoveError};
pub use geometry::{BoardGeometry, Combo};
pub use player::Player;
pub use rules::Rules;
pub use state::GameState;
