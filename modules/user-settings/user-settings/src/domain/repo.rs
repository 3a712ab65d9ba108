use async_trait::async_trait;
use user_settings_sdk::{Page, PageRequest, UserSettings};

/// Primary (authoritative) store for user settings.
#[async_trait]
pub trait UserSettingsRepository: Send + Sync {
    /// Insert when `settings.id` is `None`, otherwise overwrite the row with
    /// that id (inserting it if missing). Returns the stored record.
    async fn save(&self, settings: UserSettings) -> anyhow::Result<UserSettings>;

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<UserSettings>>;

    async fn find_all(&self, request: &PageRequest) -> anyhow::Result<Page<UserSettings>>;

    /// Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()>;

    async fn count(&self) -> anyhow::Result<u64>;
}
