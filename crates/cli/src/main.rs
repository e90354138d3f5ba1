mod oneshot;
mod shell;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rafflebox_core::Session;
use rafflebox_data::{default_assets_dir, default_prefs_path, load_assets, FilePreferences};
use std::io;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Random ticket draw from a list of options.
#[derive(Debug, Parser)]
#[command(name = "rafflebox", version)]
struct Cli {
    /// Language for this run (not saved as the preference)
    #[arg(short, long, global = true, env = "RAFFLEBOX_LANG")]
    lang: Option<String>,
    /// Fixed RNG seed for reproducible draws
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Assets directory holding config.json and lang/
    #[arg(long, global = true, env = "RAFFLEBOX_ASSETS")]
    assets: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Line-oriented interactive shell (default)
    Shell,
    /// Full-screen terminal UI
    Cui {
        /// JSON file of actions to replay before the UI opens
        #[arg(long)]
        script: Option<PathBuf>,
    },
    /// Draw tickets once and print the labels
    Draw {
        /// Options file, one per line; `-` reads stdin
        #[arg(short, long, default_value = "-")]
        file: PathBuf,
        /// Number of tickets to draw; 0 draws all of them
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_env("RAFFLEBOX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command.unwrap_or(Command::Shell) {
        Command::Cui { script } => rafflebox_cui::run(rafflebox_cui::LaunchOptions {
            lang: cli.lang,
            seed: cli.seed,
            script,
            assets: cli.assets,
        }),
        Command::Shell => {
            let mut session = build_session(cli.lang.as_deref(), cli.seed, cli.assets);
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout();
            shell::run_shell(&mut session, &mut input, &mut out).context("shell")
        }
        Command::Draw { file, count } => {
            let text = oneshot::read_options_text(&file)?;
            let mut session = build_session(cli.lang.as_deref(), cli.seed, cli.assets);
            let mut out = io::stdout();
            oneshot::draw_labels(&mut session, &text, count, &mut out)?;
            Ok(())
        }
    }
}

fn build_session(lang: Option<&str>, seed: Option<u64>, assets: Option<PathBuf>) -> Session {
    let dir = assets.unwrap_or_else(default_assets_dir);
    let mut loaded = load_assets(&dir);
    for warning in &loaded.warnings {
        warn!(%warning, "asset warning");
    }
    if seed.is_some() {
        loaded.config.seed = seed;
    }
    let mut session = Session::new(loaded.config, loaded.packs);
    if let Some(path) = default_prefs_path() {
        session.set_preferences(Some(Box::new(FilePreferences::open(path))));
    }
    if let Some(code) = lang {
        if !session.prefer_language(code) {
            warn!(code, current = session.localizer().current(), "unknown language");
        }
    }
    session
}
