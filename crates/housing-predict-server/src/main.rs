use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use anyhow::Context;
use clap::Parser;
use housing_predict::config::{CorsConfig, ServerConfig, DEFAULT_CORS_ORIGINS, DEFAULT_MODEL_PATH};
use housing_predict::model::linear::LinearRegressor;
use housing_predict::{create_router, AppState, ModelHandle};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// California Housing Price Predictor API
#[derive(Debug, Parser)]
#[command(version, about = "An API to predict median house value in California districts")]
struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Safetensors model artifact to serve
    #[arg(long, env = "MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    model_path: PathBuf,

    /// Origins allowed to make cross-origin requests (comma separated)
    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_values_t = DEFAULT_CORS_ORIGINS.map(String::from)
    )]
    cors_origins: Vec<String>,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            model_path: args.model_path,
            cors: CorsConfig {
                allowed_origins: args.cors_origins,
                ..Default::default()
            },
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load the model once for the life of the process.
///
/// A failure is logged and leaves the service running without a model.
fn load_model(path: &Path) -> Option<ModelHandle> {
    match LinearRegressor::load(path) {
        Ok(model) => {
            info!(path = %path.display(), "model loaded successfully");
            match (model.coefficients(), model.intercept()) {
                (Ok(coefficients), Ok(intercept)) => {
                    debug!(?coefficients, intercept, "model parameters")
                }
                (Err(err), _) | (_, Err(err)) => {
                    debug!(error = %err, "could not read model parameters")
                }
            }
            Some(Arc::new(model))
        }
        Err(err) => {
            error!(path = %path.display(), error = %err, "failed to load model");
            None
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
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
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::from(Args::parse());
    let addr: SocketAddr = config.socket_addr()?;

    let state = AppState::new(load_model(&config.model_path));
    let app = create_router(state, &config.cors);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!(%addr, origins = ?config.cors.allowed_origins, "serving housing price predictions");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutting down");
    Ok(())
}
