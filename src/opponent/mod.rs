//! Opponent move providers: the pluggable capability that supplies the
//! non-trainee player's move each turn.
//!
//! A provider only proposes. The environment checks legality, retries, and
//! falls back to random legal sampling when the provider keeps missing.

mod human;
mod policy;
mod random;

pub use human::HumanProvider;
pub use policy::{Policy, PolicyProvider};
pub use random::RandomProvider;

use crate::error::ProviderError;
use crate::game::Board;

/// Supplies a candidate action for the player to move on `board`.
pub trait MoveProvider {
    /// Propose an action. It need not be legal.
    fn propose(&mut self, board: &Board) -> Result<usize, ProviderError>;

    /// Reset any internal random source.
    fn reseed(&mut self, _seed: u64) {}

    /// Return the provider's display name.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> MoveProvider for F
where
    F: FnMut(&Board) -> usize,
{
    fn propose(&mut self, board: &Board) -> Result<usize, ProviderError> {
        Ok(self(board))
    }
}
