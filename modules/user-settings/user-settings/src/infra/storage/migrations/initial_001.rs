use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let conn = manager.get_connection();

        let sql = match backend {
            sea_orm::DatabaseBackend::Postgres => {
                r"
CREATE TABLE IF NOT EXISTS user_settings (
    id BIGSERIAL PRIMARY KEY NOT NULL,
    weekly_goal INTEGER,
    weight_unit VARCHAR(2),
    user_id BIGINT
);

CREATE UNIQUE INDEX IF NOT EXISTS ux_user_settings_user_id ON user_settings(user_id);
                "
            }
            sea_orm::DatabaseBackend::MySql => {
                r"
CREATE TABLE IF NOT EXISTS user_settings (
    id BIGINT PRIMARY KEY NOT NULL AUTO_INCREMENT,
    weekly_goal INT,
    weight_unit VARCHAR(2),
    user_id BIGINT,
    UNIQUE KEY ux_user_settings_user_id (user_id)
);
                "
            }
            sea_orm::DatabaseBackend::Sqlite => {
                r"
CREATE TABLE IF NOT EXISTS user_settings (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    weekly_goal INTEGER,
    weight_unit TEXT,
    user_id INTEGER
);

CREATE UNIQUE INDEX IF NOT EXISTS ux_user_settings_user_id ON user_settings(user_id);
                "
            }
        };

        conn.execute_unprepared(sql).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute_unprepared("DROP TABLE IF EXISTS user_settings;")
            .await?;
        Ok(())
    }
}
