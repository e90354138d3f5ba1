mod api;

use anyhow::Context;
use api::AppState;
use clap::Parser;
use rafflebox_core::Session;
use rafflebox_data::{default_assets_dir, default_prefs_path, load_assets, FilePreferences};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tiny_http::{Header, Response, Server, StatusCode};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// JSON API for the ticket draw.
#[derive(Debug, Parser)]
#[command(name = "rafflebox-web", version)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "RAFFLEBOX_WEB_ADDR", default_value = "127.0.0.1:7878")]
    addr: String,
    /// Fixed RNG seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,
    /// Assets directory holding config.json and lang/
    #[arg(long, env = "RAFFLEBOX_ASSETS")]
    assets: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_env("RAFFLEBOX_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let dir = args.assets.unwrap_or_else(default_assets_dir);
    let mut loaded = load_assets(&dir);
    for warning in &loaded.warnings {
        warn!(%warning, "asset warning");
    }
    if args.seed.is_some() {
        loaded.config.seed = args.seed;
    }
    let mut session = Session::new(loaded.config, loaded.packs);
    if let Some(path) = default_prefs_path() {
        session.set_preferences(Some(Box::new(FilePreferences::open(path))));
    }

    let server = Server::http(args.addr.as_str())
        .map_err(|err| anyhow::anyhow!(err))
        .with_context(|| format!("bind {}", args.addr))?;
    info!(addr = %args.addr, "rafflebox web server listening");
    let state = Arc::new(Mutex::new(AppState::new(session)));
    for request in server.incoming_requests() {
        let state = state.clone();
        if let Err(err) = handle_request(request, state) {
            warn!(error = %err, "request error");
        }
    }
    Ok(())
}

fn handle_request(
    mut request: tiny_http::Request,
    state: Arc<Mutex<AppState>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let method = request.method().clone();
    let url = request.url().to_string();
    let mut body = String::new();
    request.as_reader().read_to_string(&mut body)?;
    let reply = {
        let mut guard = state.lock().map_err(|_| "session lock poisoned")?;
        api::route(&mut guard, &method, &url, &body)
    };
    let header = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes())
        .map_err(|_| "invalid content type header")?;
    let response = Response::from_data(reply.body)
        .with_status_code(StatusCode(reply.status))
        .with_header(header);
    request.respond(response)?;
    Ok(())
}
