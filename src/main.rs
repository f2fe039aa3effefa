use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use yamdb::logging::{init_tracing, shutdown_tracer};
use yamdb::metrics::{init_metrics, metrics_app};
use yamdb::router::init_router;
use yamdb::state::AppState;
use yamdb_config::ServerConfig;
use yamdb_db::{init_db_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    let run_pending = std::env::var("RUN_MIGRATIONS")
        .map(|v| v != "false" && v != "0")
        .unwrap_or(true);
    if run_pending {
        run_migrations(&db)
            .await
            .context("Failed to run migrations")?;
        info!("Migrations applied");
    }

    let state = AppState::from_env(db);
    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
    }

    let server = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server.address())
        .await
        .with_context(|| format!("Failed to bind {}", server.address()))?;

    info!(address = %server.address(), "Server running");
    info!("Swagger UI at /swagger-ui, Scalar at /scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
