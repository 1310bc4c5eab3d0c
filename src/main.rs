use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use ml_board_env::config::{AppConfig, GameKind, OpponentKind};
use ml_board_env::env::{BoardEnv, Environment, SecondPlayerEnv, TerminalReason};
use ml_board_env::opponent::{HumanProvider, MoveProvider, Policy, RandomProvider};

/// Play board-game episodes between a random trainee and an opponent.
#[derive(Parser)]
#[command(name = "ml_board_env", about = "Play episodes in a two-player board environment")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the game to play
    #[arg(long, value_enum)]
    game: Option<GameKind>,

    /// Let the opponent move first so the trainee plays second
    #[arg(long)]
    second_player: bool,

    /// Override who supplies the opponent's moves
    #[arg(long, value_enum)]
    opponent: Option<OpponentKind>,

    /// Override number of episodes
    #[arg(long)]
    episodes: Option<usize>,

    /// Override the environment seed
    #[arg(long)]
    seed: Option<u64>,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = AppConfig::load_optional(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let config_found = loaded.is_some();
    let mut app_config = loaded.unwrap_or_default();

    // Apply CLI overrides
    if let Some(game) = cli.game {
        app_config.game = game;
    }
    if cli.second_player {
        app_config.play.second_player = true;
    }
    if let Some(opponent) = cli.opponent {
        app_config.play.opponent = opponent;
    }
    if let Some(episodes) = cli.episodes {
        app_config.play.episodes = episodes;
    }
    if let Some(seed) = cli.seed {
        app_config.seed = seed;
    }
    app_config.validate().context("invalid configuration")?;

    init_tracing(&app_config.play.log_level);
    if !config_found {
        warn!("config file '{}' not found, using defaults", cli.config.display());
    }
    info!(
        game = app_config.game.name(),
        seed = app_config.seed,
        episodes = app_config.play.episodes,
        second_player = app_config.play.second_player,
        "starting"
    );

    let provider: Box<dyn MoveProvider> = match app_config.play.opponent {
        OpponentKind::Random => Box::new(RandomProvider::new(app_config.seed.wrapping_add(1))),
        OpponentKind::Human => Box::new(HumanProvider::stdio()),
    };
    let env_config = app_config.env_config().clone();
    let mut env: Box<dyn Environment> = if app_config.play.second_player {
        Box::new(SecondPlayerEnv::with_boxed_provider(env_config, provider, app_config.seed)?)
    } else {
        Box::new(BoardEnv::with_boxed_provider(env_config, provider, app_config.seed)?)
    };

    // The trainee has its own stream so it never shares draws with the opponent
    let mut trainee = RandomProvider::new(app_config.seed.wrapping_add(2));
    let mut tally: BTreeMap<String, usize> = BTreeMap::new();

    for episode in 1..=app_config.play.episodes {
        println!("Episode {episode} of {}", app_config.play.episodes);
        let reason = play_episode(env.as_mut(), &mut trainee);
        println!("Game over: {reason}\n");

        let quit = matches!(reason, TerminalReason::OpponentFailed(_))
            && app_config.play.opponent == OpponentKind::Human;
        *tally.entry(reason.to_string()).or_default() += 1;
        if quit {
            break;
        }
    }

    println!("Outcomes:");
    for (reason, count) in &tally {
        println!("  {count:>4}  {reason}");
    }
    Ok(())
}

/// Run one episode to its end, printing every turn, and return why it ended.
fn play_episode(env: &mut dyn Environment, trainee: &mut RandomProvider) -> TerminalReason {
    let mut board = env.reset();
    let mut turn = 1;
    loop {
        println!("Turn: {turn}");
        let action = trainee.select_action(&board, false);
        let result = env.step(action);
        println!("{}", env.render());
        let info = serde_json::to_string(&result.info).unwrap_or_default();
        println!("action: {action}  reward: {}  info: {info}", result.reward);

        if result.done {
            return result
                .info
                .reason
                .unwrap_or(TerminalReason::EpisodeFinished);
        }
        board = result.board;
        turn += 1;
    }
}
