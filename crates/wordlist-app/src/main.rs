use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use wordlist_config::Config;

pub mod cli;
pub mod logging;
pub mod state;
pub mod webhook;


use self::cli::Args;
use self::state::AppState;

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    logging::init(args.log_format);

    let config = match Config::load_from_env(&args.config_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Cannot load config: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config, args).await {
        tracing::error!("wordlist exited: {e:#}");
        std::process::exit(1);
    }
}

async fn run(config: Config, args: Args) -> anyhow::Result<()> {
    let state = AppState::build(&config, &args).await?;
    let app = webhook::router(state);

    let listener = TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("Failed to bind {}", args.listen))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Cancel `cancel` on Ctrl+C or SIGTERM
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown requested");
    cancel.cancel();
}
