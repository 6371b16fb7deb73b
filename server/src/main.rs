use clap::Parser;
use log::info;
use server::network::{self, AppState};
use server::registry::GameRegistry;
use server::result_log::ResultLog;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Path of the append-only result log
    #[arg(short, long, default_value = "game_results.jsonl")]
    results_file: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    let state = AppState {
        registry: Arc::new(GameRegistry::new()),
        results: Arc::new(ResultLog::new(&args.results_file)),
    };

    let address = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!("Server listening on {}", address);
    info!("Saving finished games to {}", args.results_file);

    axum::serve(listener, network::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl+C, shutting down gracefully...");
    }
}
