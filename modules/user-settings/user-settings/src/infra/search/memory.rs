use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use user_settings_sdk::{Direction, Page, PageRequest, SortOrder, SortProperty, UserSettings};

use crate::domain::search::SearchIndex;

use super::query::SearchQuery;

/// Process-local search index. Contents are lost on restart.
#[derive(Default)]
pub struct InMemorySearchIndex {
    docs: RwLock<BTreeMap<i64, UserSettings>>,
}

impl InMemorySearchIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }
}

fn compare_by(a: &UserSettings, b: &UserSettings, order: SortOrder) -> Ordering {
    let ord = match order.property {
        SortProperty::Id => a.id.cmp(&b.id),
        SortProperty::WeeklyGoal => a.weekly_goal.cmp(&b.weekly_goal),
        SortProperty::WeightUnit => a.weight_unit.cmp(&b.weight_unit),
        SortProperty::UserId => a.user.map(|u| u.id).cmp(&b.user.map(|u| u.id)),
    };
    match order.direction {
        Direction::Asc => ord,
        Direction::Desc => ord.reverse(),
    }
}

fn sort_records(records: &mut [UserSettings], sort: &[SortOrder]) {
    records.sort_by(|a, b| {
        sort.iter()
            .map(|order| compare_by(a, b, *order))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    });
}

#[async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn save(&self, settings: &UserSettings) -> anyhow::Result<()> {
        let id = settings
            .id
            .ok_or_else(|| anyhow::anyhow!("cannot index user settings without an id"))?;
        self.docs.write().insert(id, settings.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        self.docs.write().remove(&id);
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        request: &PageRequest,
    ) -> anyhow::Result<Page<UserSettings>> {
        let parsed = SearchQuery::parse(query);
        let mut hits: Vec<UserSettings> = self
            .docs
            .read()
            .values()
            .filter(|doc| parsed.matches(doc))
            .cloned()
            .collect();
        sort_records(&mut hits, &request.sort);

        let total = u64::try_from(hits.len())?;
        let content = hits
            .into_iter()
            .skip(usize::try_from(request.offset())?)
            .take(usize::try_from(request.size)?)
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<UserSettings>> {
        Ok(self.docs.read().get(&id).cloned())
    }

    async fn delete_all(&self) -> anyhow::Result<()> {
        self.docs.write().clear();
        Ok(())
    }
}
