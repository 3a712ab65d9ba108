use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryOrder,
};
use user_settings_sdk::{Direction, Page, PageRequest, SortProperty, UserSettings};

use crate::domain::repo::UserSettingsRepository;

use super::entity::{self, Column, Entity as UserSettingsEntity};

pub struct SeaOrmUserSettingsRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserSettingsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn column_for(property: SortProperty) -> Column {
    match property {
        SortProperty::Id => Column::Id,
        SortProperty::WeeklyGoal => Column::WeeklyGoal,
        SortProperty::WeightUnit => Column::WeightUnit,
        SortProperty::UserId => Column::UserId,
    }
}

fn order_for(direction: Direction) -> Order {
    match direction {
        Direction::Asc => Order::Asc,
        Direction::Desc => Order::Desc,
    }
}

#[async_trait]
impl UserSettingsRepository for SeaOrmUserSettingsRepository {
    async fn save(&self, settings: UserSettings) -> anyhow::Result<UserSettings> {
        let weekly_goal = ActiveValue::Set(settings.weekly_goal);
        let weight_unit = ActiveValue::Set(settings.weight_unit.map(Into::into));
        let user_id = ActiveValue::Set(settings.user.map(|u| u.id));

        let existing = match settings.id {
            Some(id) => UserSettingsEntity::find_by_id(id).one(&self.db).await?,
            None => None,
        };

        let model = if let Some(existing) = existing {
            let active_model = entity::ActiveModel {
                id: ActiveValue::Unchanged(existing.id),
                weekly_goal,
                weight_unit,
                user_id,
            };
            active_model.update(&self.db).await?
        } else {
            // Missing rows get a store-generated id, even when one was supplied.
            let active_model = entity::ActiveModel {
                id: ActiveValue::NotSet,
                weekly_goal,
                weight_unit,
                user_id,
            };
            active_model.insert(&self.db).await?
        };

        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<UserSettings>> {
        let result = UserSettingsEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn find_all(&self, request: &PageRequest) -> anyhow::Result<Page<UserSettings>> {
        let mut query = UserSettingsEntity::find();
        for order in &request.sort {
            query = query.order_by(column_for(order.property), order_for(order.direction));
        }
        if !request.sort.iter().any(|o| o.property == SortProperty::Id) {
            query = query.order_by_asc(Column::Id);
        }

        let paginator = query.paginate(&self.db, request.size.max(1));
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(request.page).await?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            request,
            total,
        ))
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        UserSettingsEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn count(&self) -> anyhow::Result<u64> {
        Ok(UserSettingsEntity::find().count(&self.db).await?)
    }
}

#[cfg(all(test, feature = "db-sqlite"))]
mod tests {
    use super::*;
    use crate::infra::storage::migrations::Migrator;
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;
    use user_settings_sdk::{SortOrder, WeightUnit};

    async fn setup() -> SeaOrmUserSettingsRepository {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.expect("connect");
        Migrator::up(&db, None).await.expect("migrate");
        SeaOrmUserSettingsRepository::new(db)
    }

    fn sample(goal: i32) -> UserSettings {
        UserSettings::default()
            .with_weekly_goal(goal)
            .with_weight_unit(WeightUnit::Kg)
    }

    #[tokio::test]
    async fn save_assigns_increasing_ids() {
        let repo = setup().await;

        let first = repo.save(sample(10)).await.unwrap();
        let second = repo.save(sample(11)).await.unwrap();

        assert!(second.id.unwrap() > first.id.unwrap());
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn save_with_existing_id_overwrites_every_field() {
        let repo = setup().await;
        let created = repo.save(sample(10).with_user(4)).await.unwrap();
        let id = created.id.unwrap();

        let updated = repo
            .save(UserSettings::default().with_id(id).with_weekly_goal(11))
            .await
            .unwrap();

        assert_eq!(updated.weekly_goal, Some(11));
        assert!(updated.weight_unit.is_none());
        assert!(updated.user.is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn save_with_unknown_id_inserts_with_generated_id() {
        let repo = setup().await;

        let saved = repo.save(sample(12).with_id(99)).await.unwrap();
        let id = saved.id.unwrap();

        assert_ne!(id, 99);
        assert!(repo.find_by_id(99).await.unwrap().is_none());
        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.weekly_goal, Some(12));

        let next = repo.save(sample(13)).await.unwrap();
        assert!(next.id.unwrap() > id);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn user_id_is_unique() {
        let repo = setup().await;
        repo.save(sample(10).with_user(1)).await.unwrap();

        let res = repo.save(sample(10).with_user(1)).await;

        assert!(res.is_err());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_missing_id_is_ok() {
        let repo = setup().await;
        repo.delete_by_id(12345).await.unwrap();
    }

    #[tokio::test]
    async fn find_all_orders_and_pages() {
        let repo = setup().await;
        for goal in [14, 10, 12] {
            repo.save(sample(goal)).await.unwrap();
        }

        let request = PageRequest::new(0, 2).with_sort(SortOrder::desc(SortProperty::WeeklyGoal));
        let page = repo.find_all(&request).await.unwrap();

        assert_eq!(page.total_elements, 3);
        let goals: Vec<_> = page.content.iter().map(|s| s.weekly_goal).collect();
        assert_eq!(goals, vec![Some(14), Some(12)]);

        let next = repo.find_all(&PageRequest::new(1, 2)).await.unwrap();
        assert_eq!(next.content.len(), 1);
    }
}
