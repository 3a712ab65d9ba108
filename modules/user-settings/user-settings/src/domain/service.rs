use std::sync::Arc;

use tracing::{debug, warn};
use user_settings_sdk::{Page, PageRequest, UserSettings};

use super::error::DomainError;
use super::repo::UserSettingsRepository;
use super::search::SearchIndex;
use super::validation::Validator;

pub struct ServiceConfig {
    pub min_weekly_goal: i32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            min_weekly_goal: 10,
        }
    }
}

/// Keeps the primary store and the search index in step.
///
/// Every write goes to the repository first, then to the search index. A
/// failed index write is logged and does not fail the request.
pub struct Service {
    repo: Arc<dyn UserSettingsRepository>,
    index: Arc<dyn SearchIndex>,
    validator: Validator,
}

impl Service {
    pub fn new(
        repo: Arc<dyn UserSettingsRepository>,
        index: Arc<dyn SearchIndex>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            index,
            validator: Validator::new(config.min_weekly_goal),
        }
    }

    pub async fn create(&self, settings: UserSettings) -> Result<UserSettings, DomainError> {
        debug!("Request to save UserSettings : {settings}");
        if settings.id.is_some() {
            return Err(DomainError::IdExists);
        }
        self.validator.validate(&settings)?;

        let saved = self.repo.save(settings).await?;
        self.mirror_save(&saved).await;
        Ok(saved)
    }

    /// Overwrite the record identified by `settings.id`.
    ///
    /// Without an id the call is a create.
    pub async fn update(&self, settings: UserSettings) -> Result<UserSettings, DomainError> {
        debug!("Request to update UserSettings : {settings}");
        if settings.id.is_none() {
            return self.create(settings).await;
        }
        self.validator.validate(&settings)?;

        let saved = self.repo.save(settings).await?;
        self.mirror_save(&saved).await;
        Ok(saved)
    }

    pub async fn get(&self, id: i64) -> Result<UserSettings, DomainError> {
        debug!("Request to get UserSettings : {id}");
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(id))
    }

    pub async fn list(&self, request: &PageRequest) -> Result<Page<UserSettings>, DomainError> {
        debug!(
            page = request.page,
            size = request.size,
            "Request to get a page of UserSettings"
        );
        Ok(self.repo.find_all(request).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        debug!("Request to delete UserSettings : {id}");
        self.repo.delete_by_id(id).await?;
        if let Err(e) = self.index.delete_by_id(id).await {
            warn!(
                user_settings_id = id,
                error = %e,
                "Failed to remove user settings from search index"
            );
        }
        Ok(())
    }

    /// Query the search index. Results are whatever the index holds, which may
    /// lag behind the primary store after a failed mirror write.
    pub async fn search(
        &self,
        query: &str,
        request: &PageRequest,
    ) -> Result<Page<UserSettings>, DomainError> {
        debug!(query, "Request to search for a page of UserSettings");
        self.index
            .search(query, request)
            .await
            .map_err(DomainError::SearchIndex)
    }

    async fn mirror_save(&self, settings: &UserSettings) {
        if let Err(e) = self.index.save(settings).await {
            warn!(
                user_settings_id = ?settings.id,
                error = %e,
                "Failed to mirror user settings into search index"
            );
        }
    }
}
