use async_trait::async_trait;
use user_settings_sdk::{Page, PageRequest, UserSettings};

/// Derived, denormalized copy of the user settings used for free-text queries.
///
/// Never the source of truth: the primary store wins on any disagreement.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Upsert by id. Records without an id are rejected.
    async fn save(&self, settings: &UserSettings) -> anyhow::Result<()>;

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()>;

    /// Run `query` verbatim against the backing engine.
    async fn search(&self, query: &str, request: &PageRequest)
    -> anyhow::Result<Page<UserSettings>>;

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<UserSettings>>;

    async fn delete_all(&self) -> anyhow::Result<()>;
}
