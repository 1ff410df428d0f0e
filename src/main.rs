use anyhow::Context;
use dotenvy::dotenv;
use flashdeck::logging::{init_tracing, log_dir};
use flashdeck::metrics::{init_metrics, metrics_app};
use flashdeck::router::init_router;
use flashdeck::state::init_app_state;
use flashdeck_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing(&log_dir()).context("failed to initialize logging")?;

    let metrics_handle = init_metrics().context("failed to install metrics recorder")?;

    let db_config = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    let jwt_config = JwtConfig::from_env();
    let server_config = ServerConfig::from_env();

    if !jwt_config.secrets_are_distinct() {
        warn!("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET are identical; use separate secrets");
    }

    let state = init_app_state(&db_config, &jwt_config, CorsConfig::from_env())
        .await
        .context("failed to connect to database")?;

    let mut app = init_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
        info!("Prometheus metrics exposed at /metrics");
    }

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    info!(%address, "Server running");
    info!("Swagger UI at http://{address}/swagger-ui, Scalar at http://{address}/scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
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
