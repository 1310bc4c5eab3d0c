use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::policy::Policy;
use super::MoveProvider;
use crate::error::ProviderError;
use crate::game::Board;

/// Picks uniformly at random among legal actions, from its own seeded RNG.
pub struct RandomProvider {
    rng: StdRng,
}

impl RandomProvider {
    pub fn new(seed: u64) -> Self {
        RandomProvider {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform choice among the legal actions on `board`, if any.
    pub fn sample(&mut self, board: &Board) -> Option<usize> {
        let actions = board.legal_actions();
        if actions.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..actions.len());
        Some(actions[idx])
    }
}

impl MoveProvider for RandomProvider {
    fn propose(&mut self, board: &Board) -> Result<usize, ProviderError> {
        self.sample(board).ok_or(ProviderError::Aborted)
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn name(&self) -> &str {
        "Random"
    }
}

impl Policy for RandomProvider {
    fn select_action(&mut self, board: &Board, _training: bool) -> usize {
        // A full board has no legal action; any out-of-range value is then
        // rejected by the environment as illegal.
        self.sample(board)
            .unwrap_or(board.geometry().action_count())
    }

    fn name(&self) -> &str {
        "Random"
    }
}
