use clap::Parser;
use rafflebox_cui::LaunchOptions;
use std::path::PathBuf;

/// Full-screen ticket draw.
#[derive(Debug, Parser)]
#[command(name = "rafflebox-cui", version)]
struct Args {
    /// Start in this language (not saved as the preference)
    #[arg(short, long, env = "RAFFLEBOX_LANG")]
    lang: Option<String>,
    /// Fixed RNG seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,
    /// JSON file of actions to replay before the UI opens
    #[arg(long, alias = "auto-json")]
    script: Option<PathBuf>,
    /// Assets directory holding config.json and lang/
    #[arg(long, env = "RAFFLEBOX_ASSETS")]
    assets: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    rafflebox_cui::run(LaunchOptions {
        lang: args.lang,
        seed: args.seed,
        script: args.script,
        assets: args.assets,
    })
}
