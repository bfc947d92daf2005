pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod models;
pub mod services;

use anyhow::Context;
use cli::{Cli, Commands};
pub use config::Config;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli, mut config: Config) -> anyhow::Result<()> {
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_tracing(&config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::CheckConfig => check_config(&config),
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("{}", e);
        return Err(e);
    }

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    info!(
        response_mode = ?config.tmdb.response_mode,
        "cinerelay v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = api::create_app_state(config, prometheus_handle)?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server running on port {}", listener.local_addr()?.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    info!("Server stopped");
    Ok(())
}

fn check_config(config: &Config) -> anyhow::Result<()> {
    println!("{}", config.masked_toml()?);
    config.validate()?;
    println!("✓ Configuration is valid");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
