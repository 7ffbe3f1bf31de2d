use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::Level;

use bartok_engine::core::GameConfig;
use bartok_engine::game::Session;
use bartok_engine::telemetry::init_tracing;

/// Headless Bartok runner: plays sessions to game over on a fixed tick.
#[derive(Debug, Parser)]
#[command(name = "bartok-sim", version, about = "Run Bartok sessions without a renderer")]
struct Cli {
    /// JSON game configuration; the standard table when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed of the first session; later games reseed from it.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of games to play.
    #[arg(long, default_value_t = 1)]
    games: usize,

    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Let the AI drive the human seat too. Required unless the config
    /// has no human seat.
    #[arg(long)]
    all_ai: bool,

    /// Log level used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: Level,

    /// Give up on a game after this many simulated seconds.
    #[arg(long, default_value_t = 3600)]
    max_seconds: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config at {}", path.display()))?;
            GameConfig::from_json(&text)
                .with_context(|| format!("parsing config at {}", path.display()))?
        }
        None => GameConfig::standard(),
    };
    if cli.all_ai {
        config = config.all_ai();
    }
    if config.rules.human_seat.is_some() {
        bail!("a human seat cannot be simulated; pass --all-ai");
    }

    let tick = Duration::from_millis(cli.tick_ms.max(1));
    let limit = Duration::from_secs(cli.max_seconds);
    let mut session = Session::new(config, cli.seed)?;

    for game in 1..=cli.games {
        session.start()?;
        let mut now = Duration::ZERO;
        while !session.restart_due() {
            if now > limit {
                bail!("game {game} did not finish within {}s", cli.max_seconds);
            }
            now += tick;
            session
                .tick(now)
                .with_context(|| format!("game {game} (seed {})", session.seed()))?;
        }

        if let Some(result) = session.result() {
            println!(
                "game {game}: seed {} winner player {} after {} turns",
                session.seed(),
                result.winner.0 + 1,
                session.state().turn
            );
        }
        session = session.restart()?;
    }
    Ok(())
}
