use clap::Parser;
use tracing_subscriber::EnvFilter;

use taskdeck::cli::{serve, Cli, Commands};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taskdeck=info,tower_http=warn")),
        )
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Serve {
            port,
            db,
            static_dir,
        }) => serve::execute(port, db, static_dir).await,
        None => {
            // Bare `taskdeck` serves on PORT (or 5000), like `serve` with no flags
            let port = std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(serve::DEFAULT_PORT);
            serve::execute(port, None, None).await
        }
    }
}
