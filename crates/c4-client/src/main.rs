//! Connect Four terminal client: entry point.
//!
//! # Usage
//!
//! ```text
//! c4-client local  [--computer] [--seed <N>]
//! c4-client online [--host <HOST>] [--port <PORT>] [--computer] [--seed <N>]
//! ```
//!
//! `local` plays a whole game in this terminal.  With `--computer` the random
//! computer plays Yellow.
//!
//! `online` connects to a `c4-server`.  With `--computer` the random computer
//! picks this seat's moves instead of the keyboard.
//!
//! Logs go to stderr so they never interleave with the board on stdout.
//! Set `RUST_LOG` (or `--log-level`) to change verbosity.

use std::io::{self, BufReader};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use c4_client::application::computer_player::ComputerMoveSource;
use c4_client::application::game_end::GameEnd;
use c4_client::application::local_game::LocalGame;
use c4_client::application::ports::MoveSource;
use c4_client::application::remote_game::RemoteGame;
use c4_client::infrastructure::console::{ColumnInput, ConsoleMoveSource, TextRenderer};
use c4_client::infrastructure::network::{connect, ClientConnectionConfig};
use c4_core::{RandomMovePlayer, TurnCoordinator};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Play Connect Four in the terminal.
#[derive(Debug, Parser)]
#[command(name = "c4-client", version)]
struct Cli {
    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Two players at this terminal, or one against the computer.
    Local {
        /// Let the computer play Yellow.
        #[arg(long)]
        computer: bool,

        /// Seed for the first-player draw and the computer's moves.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Join a game on a c4-server.
    Online {
        #[arg(long, env = "C4_SERVER_HOST", default_value = "127.0.0.1")]
        host: String,

        #[arg(long, env = "C4_SERVER_PORT", default_value_t = 8000)]
        port: u16,

        /// Let the computer choose this seat's moves.
        #[arg(long)]
        computer: bool,

        /// Seed for the computer's moves.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let end = match cli.mode {
        Mode::Local { computer, seed } => tokio::task::spawn_blocking(move || {
            run_local(computer, seed)
        })
        .await
        .context("local game task panicked")??,

        Mode::Online {
            host,
            port,
            computer,
            seed,
        } => {
            let config = ClientConnectionConfig { host, port };
            if computer {
                let source = ComputerMoveSource::new(RandomMovePlayer::with_rng(rng_from(seed)));
                run_online(&config, source).await?
            } else {
                let source = ConsoleMoveSource::spawn(BufReader::new(io::stdin()));
                run_online(&config, source).await?
            }
        }
    };

    if end == GameEnd::Quit {
        println!("Goodbye.");
    }
    Ok(())
}

fn run_local(computer: bool, seed: Option<u64>) -> anyhow::Result<GameEnd> {
    let mut rng = rng_from(seed);
    let game = TurnCoordinator::with_random_first(&mut rng);
    info!(first = %game.active_token(), "first player drawn");

    let prompt = ColumnInput::new(io::stdin().lock());
    let renderer = TextRenderer::new(io::stdout());
    let mut local = LocalGame::new(game, prompt, renderer);
    if computer {
        local = local.with_computer(RandomMovePlayer::with_rng(rng));
    }
    local.play().context("local game failed")
}

async fn run_online<M: MoveSource>(
    config: &ClientConnectionConfig,
    moves: M,
) -> anyhow::Result<GameEnd> {
    let stream = connect(config)
        .await
        .context("could not reach the game server")?;
    RemoteGame::new(stream, moves, TextRenderer::new(io::stdout()))
        .play()
        .await
        .context("online game ended abnormally")
}
