use super::MoveProvider;
use crate::error::ProviderError;
use crate::game::Board;

/// A move-choosing policy, typically a trained model behind an inference
/// call. Model construction and encoding of the board live with the
/// implementor.
pub trait Policy {
    /// Select an action given the current board.
    /// When `training` is true, the policy may explore; otherwise it exploits.
    fn select_action(&mut self, board: &Board, training: bool) -> usize;

    /// Return the policy's display name.
    fn name(&self) -> &str;
}

/// Plays a [`Policy`] as the opponent, always in exploitation mode.
pub struct PolicyProvider<P> {
    policy: P,
}

impl<P: Policy> PolicyProvider<P> {
    pub fn new(policy: P) -> Self {
        PolicyProvider { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }
}

impl<P: Policy> MoveProvider for PolicyProvider<P> {
    fn propose(&mut self, board: &Board) -> Result<usize, ProviderError> {
        Ok(self.policy.select_action(board, false))
    }

    fn name(&self) -> &str {
        self.policy.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BoardGeometry;

    /// Picks the highest-scoring column from a fixed score table.
    struct TablePolicy {
        scores: Vec<f32>,
        saw_training: Option<bool>,
    }

    impl Policy for TablePolicy {
        fn select_action(&mut self, _board: &Board, training: bool) -> usize {
            self.saw_training = Some(training);
            self.scores
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap_or(0)
        }

        fn name(&self) -> &str {
            "Table"
        }
    }

    #[test]
    fn test_policy_provider_exploits() {
        let mut provider = PolicyProvider::new(TablePolicy {
            scores: vec![0.1, 0.9, 0.3],
            saw_training: None,
        });
        let board = Board::new(BoardGeometry::noughts_and_crosses());
        assert_eq!(provider.propose(&board).unwrap(), 1);
        assert_eq!(provider.policy().saw_training, Some(false));
        assert_eq!(provider.name(), "Table");
    }
}
