use anyhow::Context;
use axum::Router;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use user_settings::UserSettingsModule;

use crate::config::AppConfig;
use crate::signals::wait_for_shutdown;

/// Open the configured database.
///
/// # Errors
/// Fails when the DSN is invalid or the database is unreachable.
pub async fn connect(config: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(config.database.dsn.clone());
    opts.max_connections(config.database.max_connections)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to database '{}'", config.database.dsn))
}

/// Migrate, wire modules and return the application router.
///
/// # Errors
/// Fails when migrations or module initialization fail.
pub async fn build_app(config: &AppConfig, db: DatabaseConnection) -> anyhow::Result<Router> {
    UserSettingsModule::migrate(&db).await?;
    let module = UserSettingsModule::init(db, &config.search, &config.user_settings).await?;

    Ok(module
        .register_rest(Router::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()))
}

/// Serve until a shutdown signal arrives.
///
/// # Errors
/// Fails when the listener cannot bind or the server stops with an error.
pub async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    let db = connect(config).await?;
    let app = build_app(config, db).await?;

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "HTTP server listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(e) = wait_for_shutdown().await {
                tracing::error!(error = %e, "Signal handling failed, shutting down");
            }
        })
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

#[cfg(all(test, feature = "db-sqlite"))]
mod tests {
    use super::*;
    use crate::config::{CliOverrides, MOCK_DSN};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn mock_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(&CliOverrides {
            mock: true,
            ..CliOverrides::default()
        });
        config
    }

    #[tokio::test]
    async fn app_serves_user_settings_on_mock_database() {
        let config = mock_config();
        assert_eq!(config.database.dsn, MOCK_DSN);
        let db = connect(&config).await.unwrap();
        let app = build_app(&config, db).await.unwrap();

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/user-settings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("x-total-count").unwrap(), "0");
    }

    #[tokio::test]
    async fn cors_preflight_is_answered() {
        let config = mock_config();
        let db = connect(&config).await.unwrap();
        let app = build_app(&config, db).await.unwrap();

        let resp = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/user-settings")
                    .header("origin", "http://localhost:9000")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(resp.status().is_success());
        assert!(resp.headers().contains_key("access-control-allow-origin"));
    }
}
