use async_trait::async_trait;
use meilisearch_sdk::client::Client;
use meilisearch_sdk::errors::{Error as MeiliError, ErrorCode, MeilisearchError};
use meilisearch_sdk::indexes::Index;
use meilisearch_sdk::settings::Settings;
use serde::{Deserialize, Serialize};
use user_settings_sdk::{
    Direction, Page, PageRequest, SortOrder, SortProperty, UserRef, UserSettings,
};

use crate::domain::search::SearchIndex;

const PRIMARY_KEY: &str = "id";
const SORTABLE: [&str; 4] = ["id", "weeklyGoal", "weightUnit", "userId"];

/// Flattened document stored in Meilisearch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserSettingsDocument {
    id: i64,
    weekly_goal: Option<i32>,
    weight_unit: Option<String>,
    user_id: Option<i64>,
}

impl UserSettingsDocument {
    fn from_settings(settings: &UserSettings) -> anyhow::Result<Self> {
        let id = settings
            .id
            .ok_or_else(|| anyhow::anyhow!("cannot index user settings without an id"))?;
        Ok(Self {
            id,
            weekly_goal: settings.weekly_goal,
            weight_unit: settings.weight_unit.map(|u| u.as_str().to_owned()),
            user_id: settings.user.map(|u| u.id),
        })
    }

    fn into_settings(self) -> UserSettings {
        UserSettings {
            id: Some(self.id),
            weekly_goal: self.weekly_goal,
            weight_unit: self.weight_unit.and_then(|u| u.parse().ok()),
            user: self.user_id.map(|id| UserRef { id }),
        }
    }
}

fn sort_field(property: SortProperty) -> &'static str {
    match property {
        SortProperty::Id => "id",
        SortProperty::WeeklyGoal => "weeklyGoal",
        SortProperty::WeightUnit => "weightUnit",
        SortProperty::UserId => "userId",
    }
}

/// Meilisearch `sort` expressions for `orders`, ending with `id:asc` unless
/// the id is already ordered on.
fn sort_expressions(orders: &[SortOrder]) -> Vec<String> {
    let mut sort: Vec<String> = orders
        .iter()
        .map(|o| {
            let dir = match o.direction {
                Direction::Asc => "asc",
                Direction::Desc => "desc",
            };
            format!("{}:{dir}", sort_field(o.property))
        })
        .collect();
    if !orders.iter().any(|o| o.property == SortProperty::Id) {
        sort.push("id:asc".to_owned());
    }
    sort
}

/// Search index backed by a Meilisearch instance.
pub struct MeiliSearchIndex {
    client: Client,
    index: Index,
}

impl MeiliSearchIndex {
    /// Connect and make sure the index has the sortable attributes paging
    /// relies on.
    pub async fn connect(url: &str, api_key: Option<&str>, index: &str) -> anyhow::Result<Self> {
        let client = Client::new(url, api_key)?;
        let index = client.index(index);

        let settings = Settings::new()
            .with_sortable_attributes(SORTABLE)
            .with_filterable_attributes(SORTABLE);
        index
            .set_settings(&settings)
            .await?
            .wait_for_completion(&client, None, None)
            .await?;
        tracing::info!(index = %index.uid, "Meilisearch index ready");

        Ok(Self { client, index })
    }
}

#[async_trait]
impl SearchIndex for MeiliSearchIndex {
    async fn save(&self, settings: &UserSettings) -> anyhow::Result<()> {
        let doc = UserSettingsDocument::from_settings(settings)?;
        self.index
            .add_or_replace(&[doc], Some(PRIMARY_KEY))
            .await?
            .wait_for_completion(&self.client, None, None)
            .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        self.index
            .delete_document(id)
            .await?
            .wait_for_completion(&self.client, None, None)
            .await?;
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        request: &PageRequest,
    ) -> anyhow::Result<Page<UserSettings>> {
        let sort = sort_expressions(&request.sort);
        let sort_refs: Vec<&str> = sort.iter().map(String::as_str).collect();

        let results = self
            .index
            .search()
            .with_query(query)
            .with_offset(usize::try_from(request.offset())?)
            .with_limit(usize::try_from(request.size)?)
            .with_sort(&sort_refs)
            .execute::<UserSettingsDocument>()
            .await?;

        let total = match results.estimated_total_hits.or(results.total_hits) {
            Some(n) => u64::try_from(n)?,
            None => u64::try_from(results.hits.len())?,
        };
        let content = results
            .hits
            .into_iter()
            .map(|hit| hit.result.into_settings())
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<UserSettings>> {
        match self
            .index
            .get_document::<UserSettingsDocument>(&id.to_string())
            .await
        {
            Ok(doc) => Ok(Some(doc.into_settings())),
            Err(MeiliError::Meilisearch(MeilisearchError {
                error_code: ErrorCode::DocumentNotFound,
                ..
            })) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_all(&self) -> anyhow::Result<()> {
        self.index
            .delete_all_documents()
            .await?
            .wait_for_completion(&self.client, None, None)
            .await?;
        Ok(())
    }
}
