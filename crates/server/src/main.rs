use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lixi_core::{
    create_llm_client, load_config, load_config_from_env, validate_config, Config, LlmClient,
};
use lixi_server::{api::create_router, state::AppState};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file used when `LIXI_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// How often idle rate-limit buckets are swept.
const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Buckets untouched for this long (and full again) are dropped.
const IDLE_BUCKET_TTL: Duration = Duration::from_secs(600);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // .env is optional
    let dotenv_path = dotenvy::dotenv().ok();

    let config = match load() {
        Ok(config) => {
            init_tracing(&config.logging.level);
            config
        }
        Err(e) => {
            init_tracing("info");
            return Err(e);
        }
    };

    if let Some(path) = dotenv_path {
        debug!("Loaded environment from {:?}", path);
    }
    info!("lixi v{} starting", VERSION);
    info!(
        "LLM provider: {:?}, deployment: {}",
        config.llm.provider, config.llm.deployment
    );
    info!(
        "Rate limit: {} requests/minute per client",
        config.rate_limit.requests_per_minute
    );

    let llm_client: Arc<dyn LlmClient> = create_llm_client(&config.llm);
    info!("Using LLM client: {} ({})", llm_client.provider(), llm_client.model());

    let addr = SocketAddr::new(config.server.host, config.server.port);

    // Create app state
    let state = Arc::new(AppState::new(config, llm_client));

    // Sweep idle rate-limit buckets so memory stays bounded
    let prune_state = Arc::clone(&state);
    let prune_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            let removed = prune_state.rate_limiter().prune_idle(IDLE_BUCKET_TTL).await;
            if removed > 0 {
                debug!("Pruned {} idle rate-limit buckets", removed);
            }
        }
    });

    // Create router
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    prune_task.abort();
    info!("Server shut down");

    Ok(())
}

/// Load, override and validate configuration.
///
/// `LIXI_CONFIG` names a file that must exist. Without it, `config.toml` is
/// used when present and the environment alone otherwise.
fn load() -> Result<Config> {
    let mut config = match std::env::var("LIXI_CONFIG") {
        Ok(path) => load_from_file(Path::new(&path))?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            load_from_file(&PathBuf::from(DEFAULT_CONFIG_PATH))?
        }
        Err(_) => load_config_from_env().context("Failed to load config from environment")?,
    };

    // Hosting platforms hand the listen port over in PORT
    if let Ok(port) = std::env::var("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .with_context(|| format!("Invalid PORT value '{}'", port))?;
    }

    validate_config(&config).context("Configuration validation failed")?;

    Ok(config)
}

fn load_from_file(path: &Path) -> Result<Config> {
    load_config(path).with_context(|| format!("Failed to load config from {:?}", path))
}

/// Initialize logging. `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(format!("{level},tower_http=debug")))
        .unwrap_or_else(|e| {
            eprintln!("Invalid log level '{}': {}, falling back to info", level, e);
            "info,tower_http=debug".into()
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
