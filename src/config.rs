use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::BoardGeometry;

/// Which board the environment plays on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    ConnectFour,
    NoughtsAndCrosses,
}

impl GameKind {
    pub fn name(self) -> &'static str {
        match self {
            GameKind::ConnectFour => "connect_four",
            GameKind::NoughtsAndCrosses => "noughts_and_crosses",
        }
    }
}

/// Who supplies the opponent's moves in the command-line player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OpponentKind {
    Random,
    Human,
}

/// Reward values handed back from `step`, from the trainee's perspective.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rewards {
    pub win: f32,
    pub illegal: f32,
    pub forced_loss: f32,
    pub draw: f32,
}

impl Rewards {
    pub const fn connect_four() -> Self {
        Rewards {
            win: 1.0,
            illegal: -10.0,
            forced_loss: -2.0,
            draw: 0.5,
        }
    }

    pub const fn noughts_and_crosses() -> Self {
        Rewards {
            win: 1.0,
            illegal: -10.0,
            forced_loss: -2.0,
            draw: 0.0,
        }
    }
}

/// Bounds on how long the engine waits for a legal opponent move.
///
/// The provider is asked up to `provider_attempts` times; after that the engine
/// samples uniformly among legal actions until `max_attempts` total attempts
/// have been made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub provider_attempts: u32,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            provider_attempts: 25,
            max_attempts: 100,
        }
    }
}

/// Everything one environment needs besides its opponent and seed.
///
/// When a game section is present in TOML, `geometry` and `rewards` must be
/// given in full; `retry` falls back to its defaults.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EnvConfig {
    pub geometry: BoardGeometry,
    pub rewards: Rewards,
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl EnvConfig {
    pub fn connect_four() -> Self {
        EnvConfig {
            geometry: BoardGeometry::connect_four(),
            rewards: Rewards::connect_four(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn noughts_and_crosses() -> Self {
        EnvConfig {
            geometry: BoardGeometry::noughts_and_crosses(),
            rewards: Rewards::noughts_and_crosses(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn validate(&self, game: &'static str) -> Result<(), ConfigError> {
        self.geometry
            .validate()
            .map_err(|source| ConfigError::Geometry { game, source })?;

        let r = &self.rewards;
        if ![r.win, r.illegal, r.forced_loss, r.draw]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(ConfigError::Validation(format!(
                "{game}.rewards must all be finite"
            )));
        }

        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Validation(format!(
                "{game}.retry.max_attempts must be > 0"
            )));
        }
        if self.retry.provider_attempts > self.retry.max_attempts {
            return Err(ConfigError::Validation(format!(
                "{game}.retry.provider_attempts must be <= {game}.retry.max_attempts"
            )));
        }
        Ok(())
    }
}

/// Settings for the command-line player.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub episodes: usize,
    pub second_player: bool,
    pub opponent: OpponentKind,
    pub log_level: String,
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            episodes: 1,
            second_player: false,
            opponent: OpponentKind::Random,
            log_level: "info".to_string(),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameKind,
    pub seed: u64,
    pub play: PlayConfig,
    #[serde(default = "EnvConfig::connect_four")]
    pub connect_four: EnvConfig,
    #[serde(default = "EnvConfig::noughts_and_crosses")]
    pub noughts_and_crosses: EnvConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            game: GameKind::ConnectFour,
            seed: 1,
            play: PlayConfig::default(),
            connect_four: EnvConfig::connect_four(),
            noughts_and_crosses: EnvConfig::noughts_and_crosses(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load_optional(path)? {
            Some(config) => Ok(config),
            None => {
                warn!("config file '{}' not found, using defaults", path.display());
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a TOML file, or `None` if the file does not exist.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Settings for the selected game.
    pub fn env_config(&self) -> &EnvConfig {
        match self.game {
            GameKind::ConnectFour => &self.connect_four,
            GameKind::NoughtsAndCrosses => &self.noughts_and_crosses,
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.connect_four
            .validate(GameKind::ConnectFour.name())?;
        self.noughts_and_crosses
            .validate(GameKind::NoughtsAndCrosses.name())?;

        if self.play.episodes == 0 {
            return Err(ConfigError::Validation(
                "play.episodes must be > 0".into(),
            ));
        }
        if self.play.log_level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "play.log_level must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
