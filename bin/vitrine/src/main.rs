//! Vitrine - headless storefront front-end.
//!
//! # Usage
//!
//! ```bash
//! # Start with default config
//! vitrine --shop-domain demo.myshopify.com --storefront-api-token shpat_xxx
//!
//! # Start with environment overrides
//! SHOP_DOMAIN=demo.myshopify.com STOREFRONT_API_TOKEN=shpat_xxx vitrine
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::signal;
use tokio::sync::watch;
use tracing::{debug, error, info, info_span, warn, Instrument};
use tracing_subscriber::{fmt, EnvFilter};

use vitrine_core::metrics::init_metrics;
use vitrine_core::ports::{CartService, CatalogSource};
use vitrine_core::services::{ListingConfig, ListingService, DEFAULT_PAGE_BY};
use vitrine_storefront::{StorefrontClient, StorefrontConfig};
use vitrine_web::{serve_with_shutdown, AppState, ServerConfig};

/// Vitrine CLI - headless storefront front-end.
#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(about = "Vitrine - storefront front-end over the hosted Storefront API")]
#[command(version)]
struct Cli {
    /// Shop domain of the hosted platform.
    #[arg(long, env = "SHOP_DOMAIN", default_value = "demo.myshopify.com")]
    shop_domain: String,

    /// Public Storefront API access token.
    #[arg(long, env = "STOREFRONT_API_TOKEN", default_value = "")]
    storefront_api_token: String,

    /// Storefront API version.
    #[arg(long, env = "STOREFRONT_API_VERSION", default_value = "2024-10")]
    api_version: String,

    /// HTTP server port.
    #[arg(long, env = "HTTP_PORT", default_value = "3000")]
    http_port: u16,

    /// Prometheus metrics port.
    #[arg(long, env = "METRICS_PORT", default_value = "9090")]
    metrics_port: u16,

    /// Products per listing page.
    #[arg(long, env = "PAGE_SIZE", default_value_t = DEFAULT_PAGE_BY)]
    page_size: i32,

    /// Enable JSON log output.
    #[arg(long, env = "JSON_LOGS")]
    json_logs: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs);

    // Prometheus metrics exporter (optional - failures don't crash the app)
    let metrics_enabled = match format!("0.0.0.0:{}", cli.metrics_port).parse::<std::net::SocketAddr>()
    {
        Ok(metrics_addr) => {
            match PrometheusBuilder::new()
                .with_http_listener(metrics_addr)
                .install()
            {
                Ok(()) => {
                    init_metrics();
                    true
                }
                Err(e) => {
                    warn!(
                        "⚠️  Failed to start metrics exporter: {}. Continuing without metrics.",
                        e
                    );
                    false
                }
            }
        }
        Err(e) => {
            warn!("⚠️  Invalid metrics address: {}. Continuing without metrics.", e);
            false
        }
    };

    // ─────────────────────────────────────────────────────────────────────────
    // 🚀 STARTUP
    // ─────────────────────────────────────────────────────────────────────────
    info!("🚀 Starting Vitrine storefront");
    debug!(shop = %cli.shop_domain, api_version = %cli.api_version, "Storefront endpoint");

    if cli.page_size < 1 {
        anyhow::bail!("Page size must be at least 1, got {}", cli.page_size);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 🛰️ STOREFRONT API
    // ─────────────────────────────────────────────────────────────────────────
    let storefront_config = StorefrontConfig {
        shop_domain: cli.shop_domain.clone(),
        api_version: cli.api_version.clone(),
        access_token: cli.storefront_api_token.clone(),
        ..Default::default()
    };

    let client = Arc::new(
        StorefrontClient::new(storefront_config).context("Failed to build storefront client")?,
    );

    let catalog: Arc<dyn CatalogSource> = client.clone();
    let cart: Arc<dyn CartService> = client;

    let listing = Arc::new(ListingService::new(
        ListingConfig {
            page_by: cli.page_size,
        },
        catalog,
    ));

    // ─────────────────────────────────────────────────────────────────────────
    // ⚡ SERVICES START
    // ─────────────────────────────────────────────────────────────────────────
    let (shutdown_tx, _shutdown_rx) = watch::channel(false);
    let mut server_shutdown_rx = shutdown_tx.subscribe();

    let server_config = ServerConfig {
        host: "0.0.0.0".to_string(),
        port: cli.http_port,
    };

    let state = AppState::new(listing, cart);
    let http_port = cli.http_port;
    let server_handle = tokio::spawn(
        async move {
            let shutdown_signal = async move {
                while !*server_shutdown_rx.borrow() {
                    if server_shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            };

            if let Err(e) = serve_with_shutdown(state, server_config, shutdown_signal).await {
                error!(error = %e, "❌ Server error");
            }
            debug!("Server stopped");
        }
        .instrument(info_span!("web")),
    );

    // ─────────────────────────────────────────────────────────────────────────
    // ✅ READY
    // ─────────────────────────────────────────────────────────────────────────
    info!("✅ Vitrine ready");
    info!("   🛍️  Storefront: http://localhost:{}/products", http_port);
    if metrics_enabled {
        info!("   📊 Metrics:    http://localhost:{}/metrics", cli.metrics_port);
    } else {
        info!("   📊 Metrics:    disabled");
    }
    info!("   Press Ctrl+C to stop");

    shutdown_signal().await;

    // ─────────────────────────────────────────────────────────────────────────
    // 🛑 SHUTDOWN
    // ─────────────────────────────────────────────────────────────────────────
    info!("🛑 Shutting down...");
    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(Duration::from_secs(10), server_handle).await {
        Ok(_) => debug!("Server stopped"),
        Err(_) => warn!("⚠️  Server shutdown timed out"),
    }

    info!("🛑 Shutdown complete");
    Ok(())
}

/// Initialize tracing subscriber.
fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
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
