use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use super::{Environment, StepInfo, StepResult, TerminalReason};
use crate::config::EnvConfig;
use crate::error::ConfigError;
use crate::game::{Board, GameState, Player, Rules};
use crate::opponent::{MoveProvider, RandomProvider};

/// Seed offset for the default opponent so it does not mirror the engine's
/// own fallback sampler.
const PROVIDER_SEED_OFFSET: u64 = 1;

/// Two-player board environment seen from the trainee's side.
///
/// Each `step` applies the trainee's move, scores it, and (if the episode
/// goes on) plays the opponent's reply so the returned board is always the
/// trainee's next decision point.
pub struct BoardEnv {
    config: EnvConfig,
    rules: Rules,
    state: GameState,
    done: bool,
    /// Reason for an episode ended outside `step`, reported by the next step.
    unreported: Option<TerminalReason>,
    provider: Box<dyn MoveProvider>,
    rng: StdRng,
}

impl BoardEnv {
    /// Environment with a uniform-random opponent.
    pub fn new(config: EnvConfig, seed: u64) -> Result<Self, ConfigError> {
        let provider = RandomProvider::new(seed.wrapping_add(PROVIDER_SEED_OFFSET));
        Self::with_provider(config, provider, seed)
    }

    /// Environment whose opponent moves come from `provider`.
    pub fn with_provider(
        config: EnvConfig,
        provider: impl MoveProvider + 'static,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_boxed_provider(config, Box::new(provider), seed)
    }

    /// Like [`BoardEnv::with_provider`], for a provider chosen at runtime.
    pub fn with_boxed_provider(
        config: EnvConfig,
        provider: Box<dyn MoveProvider>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate("env")?;
        Ok(Self::build(config, provider, seed))
    }

    pub fn connect_four(seed: u64) -> Self {
        let provider = RandomProvider::new(seed.wrapping_add(PROVIDER_SEED_OFFSET));
        Self::build(EnvConfig::connect_four(), Box::new(provider), seed)
    }

    pub fn noughts_and_crosses(seed: u64) -> Self {
        let provider = RandomProvider::new(seed.wrapping_add(PROVIDER_SEED_OFFSET));
        Self::build(EnvConfig::noughts_and_crosses(), Box::new(provider), seed)
    }

    fn build(config: EnvConfig, provider: Box<dyn MoveProvider>, seed: u64) -> Self {
        BoardEnv {
            rules: Rules::new(config.geometry),
            state: GameState::initial(config.geometry),
            config,
            done: false,
            unreported: None,
            provider,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    pub fn current_player(&self) -> Player {
        self.state.current_player()
    }

    pub fn is_terminal(&self) -> bool {
        self.done
    }

    pub fn legal_actions(&self) -> Vec<usize> {
        if self.done {
            return Vec::new();
        }
        self.rules.legal_actions(self.state.board())
    }

    /// Clear the board and hand the first move to player one.
    pub fn reset(&mut self) -> Board {
        self.state = GameState::initial(self.config.geometry);
        self.done = false;
        self.unreported = None;
        self.state.board().clone()
    }

    /// Play one trainee action and, if the game goes on, the opponent's reply.
    pub fn step(&mut self, action: usize) -> StepResult {
        if self.done {
            let reason = match self.unreported.take() {
                Some(reason) => reason,
                None => {
                    warn!(action, "step called on a finished episode; reset first");
                    TerminalReason::EpisodeFinished
                }
            };
            return self.result(0.0, StepInfo::done(reason));
        }

        let rewards = self.config.rewards;
        let trainee = self.state.current_player();

        if !self.rules.is_legal(self.state.board(), action) {
            return self.finish(rewards.illegal, TerminalReason::IllegalMove);
        }
        if let Err(err) = self.state.apply_move(action) {
            debug!(action, ?err, "board rejected a legal-looking move");
            return self.finish(rewards.illegal, TerminalReason::IllegalMove);
        }

        let board = self.state.board();
        if self.rules.has_won(board, trainee) {
            return self.finish(rewards.win, TerminalReason::Won(trainee));
        }
        if self.rules.opponent_can_win_next(board, trainee) {
            return self.finish(rewards.forced_loss, TerminalReason::WillWin(trainee.other()));
        }
        if self.rules.is_full_or_one_away(board) {
            return self.finish(rewards.draw, TerminalReason::Tie);
        }

        self.state.switch_player();
        let reply = self.play_opponent_turn();
        self.state.switch_player();

        match reply {
            Ok(_) => self.result(0.0, StepInfo::in_progress()),
            Err(reason) => self.finish(0.0, reason),
        }
    }

    /// Grid of `•`/`X`/`O`, one board row per line.
    pub fn render(&self) -> String {
        self.state.board().to_string()
    }

    /// Reseed the fallback sampler and the opponent provider.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.provider
            .reseed(seed.wrapping_add(PROVIDER_SEED_OFFSET));
    }

    /// Get one legal move for the current player from the provider, falling
    /// back to uniform legal sampling, and apply it. Does not switch turns.
    pub(crate) fn play_opponent_turn(&mut self) -> Result<usize, TerminalReason> {
        let retry = self.config.retry;

        for attempt in 0..retry.max_attempts {
            let candidate = if attempt < retry.provider_attempts {
                match self.provider.propose(self.state.board()) {
                    Ok(action) => action,
                    Err(err) => {
                        warn!(provider = self.provider.name(), %err, "opponent provider failed");
                        return Err(TerminalReason::OpponentFailed(err.to_string()));
                    }
                }
            } else {
                if attempt == retry.provider_attempts {
                    debug!(attempt, "switching to random legal opponent moves");
                }
                let legal = self.rules.legal_actions(self.state.board());
                if legal.is_empty() {
                    break;
                }
                legal[self.rng.random_range(0..legal.len())]
            };

            if self.rules.is_legal(self.state.board(), candidate)
                && self.state.apply_move(candidate).is_ok()
            {
                return Ok(candidate);
            }
            debug!(attempt, candidate, "opponent proposed an illegal move");
        }

        warn!(
            attempts = retry.max_attempts,
            "opponent produced no legal move; ending episode"
        );
        Err(TerminalReason::OpponentExhausted {
            attempts: retry.max_attempts,
        })
    }

    pub(crate) fn switch_player(&mut self) {
        self.state.switch_player();
    }

    /// End the episode outside `step`, e.g. when the opening move fails. The
    /// next `step` returns `reason`.
    pub(crate) fn abort(&mut self, reason: TerminalReason) {
        warn!(%reason, "episode aborted");
        self.done = true;
        self.unreported = Some(reason);
    }

    fn finish(&mut self, reward: f32, reason: TerminalReason) -> StepResult {
        debug!(reward, %reason, "episode finished");
        self.done = true;
        self.result(reward, StepInfo::done(reason))
    }

    fn result(&self, reward: f32, info: StepInfo) -> StepResult {
        StepResult {
            board: self.state.board().clone(),
            reward,
            done: self.done,
            info,
        }
    }
}

impl Environment for BoardEnv {
    fn reset(&mut self) -> Board {
        BoardEnv::reset(self)
    }

    fn step(&mut self, action: usize) -> StepResult {
        BoardEnv::step(self, action)
    }

    fn render(&self) -> String {
        BoardEnv::render(self)
    }

    fn legal_actions(&self) -> Vec<usize> {
        BoardEnv::legal_actions(self)
    }

    fn reseed(&mut self, seed: u64) {
        BoardEnv::reseed(self, seed)
    }
}
