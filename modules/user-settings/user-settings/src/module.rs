use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::api::rest::headers::Alerts;
use crate::api::rest::pagination::PageLimits;
use crate::api::rest::routes;
use crate::config::{SearchBackend, SearchConfig, UserSettingsConfig};
use crate::domain::repo::UserSettingsRepository;
use crate::domain::search::SearchIndex;
use crate::domain::service::{Service, ServiceConfig};
use crate::infra::search::InMemorySearchIndex;
use crate::infra::storage::sea_orm_repo::SeaOrmUserSettingsRepository;

/// Wires storage, search index, domain service and REST routes together.
pub struct UserSettingsModule {
    service: Arc<Service>,
    alerts: Alerts,
    limits: PageLimits,
}

impl UserSettingsModule {
    /// Build the module on top of an open database connection.
    ///
    /// # Errors
    /// Fails when the search backend cannot be reached or the configuration is
    /// invalid.
    pub async fn init(
        db: DatabaseConnection,
        search: &SearchConfig,
        config: &UserSettingsConfig,
    ) -> anyhow::Result<Self> {
        info!("Initializing user-settings module");

        let repo = Arc::new(SeaOrmUserSettingsRepository::new(db));
        let index = build_search_index(search).await?;
        let module = Self::from_parts(repo, index, config)?;

        info!("User-settings module initialized");
        Ok(module)
    }

    /// Build the module from explicit gateways.
    ///
    /// # Errors
    /// Fails when the configuration is invalid.
    pub fn from_parts(
        repo: Arc<dyn UserSettingsRepository>,
        index: Arc<dyn SearchIndex>,
        config: &UserSettingsConfig,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        let alerts = Alerts::new(&config.app_name)?;
        let service = Service::new(
            repo,
            index,
            ServiceConfig {
                min_weekly_goal: config.min_weekly_goal,
            },
        );

        Ok(Self {
            service: Arc::new(service),
            alerts,
            limits: PageLimits {
                default_size: config.default_page_size,
                max_size: config.max_page_size,
            },
        })
    }

    /// Apply pending schema migrations.
    ///
    /// # Errors
    /// Returns the migration failure.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running user-settings database migrations");
        crate::infra::storage::migrations::Migrator::up(db, None).await?;
        info!("User-settings database migrations completed successfully");
        Ok(())
    }

    #[must_use]
    pub fn register_rest(&self, router: Router) -> Router {
        info!("Registering user-settings REST routes");
        routes::register_routes(
            router,
            Arc::clone(&self.service),
            self.alerts.clone(),
            self.limits,
        )
    }
}

#[cfg_attr(not(feature = "meilisearch"), allow(clippy::unused_async))]
async fn build_search_index(config: &SearchConfig) -> anyhow::Result<Arc<dyn SearchIndex>> {
    match config.backend {
        SearchBackend::Memory => {
            info!("Using in-memory search index");
            Ok(Arc::new(InMemorySearchIndex::new()))
        }
        #[cfg(feature = "meilisearch")]
        SearchBackend::Meilisearch => {
            let url = config
                .url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("search.url is required for meilisearch"))?;
            info!(url, index = %config.index, "Using Meilisearch search index");
            let index = crate::infra::search::MeiliSearchIndex::connect(
                url,
                config.api_key.as_deref(),
                &config.index,
            )
            .await?;
            Ok(Arc::new(index))
        }
        #[cfg(not(feature = "meilisearch"))]
        SearchBackend::Meilisearch => {
            anyhow::bail!("search backend 'meilisearch' requires the `meilisearch` feature")
        }
    }
}
