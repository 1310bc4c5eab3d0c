use std::path::PathBuf;

/// Errors describing a board shape that cannot host a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("board must have a positive size (got {width}x{height})")]
    EmptyBoard { width: usize, height: usize },

    #[error("run length must be at least 2 (got {0})")]
    RunTooShort(usize),

    #[error("run length {run_length} does not fit on a {width}x{height} board")]
    RunDoesNotFit {
        run_length: usize,
        width: usize,
        height: usize,
    },
}

/// Errors an opponent move provider can report instead of a move.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("move provider gave up")]
    Aborted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid geometry for {game}: {source}")]
    Geometry {
        game: &'static str,
        source: GeometryError,
    },

    #[error("config validation error: {0}")]
    Validation(String),
}
