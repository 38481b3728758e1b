//! Confab REST API entry point.
//!
//! Binary name: `confab`
//!
//! Parses CLI arguments, loads the TOML config, initializes tracing and
//! the application state, then serves the HTTP API until Ctrl+C/SIGTERM.

mod http;
mod state;

use std::path::PathBuf;

use clap::Parser;

use confab_observe::LogFormat;
use confab_types::config::AppConfig;
use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "confab", version, about = "Conversational backend with rule-based intents and an optional LLM hop")]
struct Cli {
    /// Path to a TOML config file (defaults apply when omitted).
    #[arg(long, env = "CONFAB_CONFIG")]
    config: Option<PathBuf>,

    /// Listen host override.
    #[arg(long)]
    host: Option<String>,

    /// Listen port override.
    #[arg(long, short)]
    port: Option<u16>,

    /// Emit logs as JSON lines instead of human-readable output.
    #[arg(long)]
    json_logs: bool,

    /// Bridge tracing spans to OpenTelemetry (stdout exporter).
    #[arg(long)]
    otel: bool,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,confab=debug",
        _ => "trace",
    };
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    confab_observe::init_tracing(filter, format, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let state = AppState::init(&config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} Confab API listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    confab_observe::shutdown_tracing();
    println!("\n  Server stopped.");

    Ok(())
}

/// Load config from the given path, or fall back to defaults.
fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("cannot read config {}: {e}", path.display()))?;
            let config = toml::from_str(&raw)
                .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
            Ok(config)
        }
        None => Ok(AppConfig::default()),
    }
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
