use tracing::warn;

use super::{BoardEnv, Environment, StepResult};
use crate::config::EnvConfig;
use crate::error::ConfigError;
use crate::game::{Board, Player};
use crate::opponent::MoveProvider;

/// Variant of [`BoardEnv`] in which the opponent opens every episode, so the
/// trainee always plays as player two.
pub struct SecondPlayerEnv {
    inner: BoardEnv,
}

impl SecondPlayerEnv {
    pub fn new(config: EnvConfig, seed: u64) -> Result<Self, ConfigError> {
        Ok(SecondPlayerEnv {
            inner: BoardEnv::new(config, seed)?,
        })
    }

    pub fn with_provider(
        config: EnvConfig,
        provider: impl MoveProvider + 'static,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Ok(SecondPlayerEnv {
            inner: BoardEnv::with_provider(config, provider, seed)?,
        })
    }

    pub fn with_boxed_provider(
        config: EnvConfig,
        provider: Box<dyn MoveProvider>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Ok(SecondPlayerEnv {
            inner: BoardEnv::with_boxed_provider(config, provider, seed)?,
        })
    }

    pub fn board(&self) -> &Board {
        self.inner.board()
    }

    pub fn current_player(&self) -> Player {
        self.inner.current_player()
    }

    pub fn is_terminal(&self) -> bool {
        self.inner.is_terminal()
    }

    /// Clear the board, let the opponent open, and hand the move to the
    /// trainee.
    pub fn reset(&mut self) -> Board {
        self.inner.reset();
        if let Err(reason) = self.inner.play_opponent_turn() {
            self.inner.abort(reason);
        }
        self.inner.switch_player();
        self.inner.board().clone()
    }

    pub fn step(&mut self, action: usize) -> StepResult {
        self.inner.step(action)
    }

    pub fn render(&self) -> String {
        self.inner.render()
    }

    pub fn legal_actions(&self) -> Vec<usize> {
        self.inner.legal_actions()
    }

    pub fn reseed(&mut self, seed: u64) {
        self.inner.reseed(seed)
    }
}

impl Environment for SecondPlayerEnv {
    fn reset(&mut self) -> Board {
        SecondPlayerEnv::reset(self)
    }

    fn step(&mut self, action: usize) -> StepResult {
        SecondPlayerEnv::step(self, action)
    }

    fn render(&self) -> String {
        SecondPlayerEnv::render(self)
    }

    fn legal_actions(&self) -> Vec<usize> {
        SecondPlayerEnv::legal_actions(self)
    }

    fn reseed(&mut self, seed: u64) {
        SecondPlayerEnv::reseed(self, seed)
    }
}
