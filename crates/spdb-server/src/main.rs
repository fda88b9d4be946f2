mod api;
mod middleware;

use spdb_core::Environment;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = spdb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(ansi_logs(&config.env))
        .init();

    let pool_config = spdb_db::PoolConfig::from_app_config(&config);
    let pool = spdb_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = spdb_db::run_migrations(&pool).await?;
    tracing::info!(applied, "database migrations up to date");

    let app = build_app(AppState::new(pool, &config));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "profile server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Colored output is for terminals; deployed environments ship plain lines
/// to the log collector.
fn ansi_logs(env: &Environment) -> bool {
    matches!(env, Environment::Development)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_logs_only_in_development() {
        assert!(ansi_logs(&Environment::Development));
        assert!(!ansi_logs(&Environment::Test));
        assert!(!ansi_logs(&Environment::Production));
    }
}
