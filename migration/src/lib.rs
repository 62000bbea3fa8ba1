pub use sea_orm_migration::prelude::*;

mod m20251110_000001_create_user_table;
mod m20251110_000002_create_post_table;
mod m20251110_000003_create_like_table;
mod m20251110_000004_create_repost_table;
mod m20251110_000005_create_follow_table;
mod m20251110_000006_create_notification_table;
mod m20251110_000007_create_hashtag_tables;
mod m20251110_000008_create_session_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251110_000001_create_user_table::Migration),
            Box::new(m20251110_000002_create_post_table::Migration),
            Box::new(m20251110_000003_create_like_table::Migration),
            Box::new(m20251110_000004_create_repost_table::Migration),
            Box::new(m20251110_000005_create_follow_table::Migration),
            Box::new(m20251110_000006_create_notification_table::Migration),
            Box::new(m20251110_000007_create_hashtag_tables::Migration),
            Box::new(m20251110_000008_create_session_table::Migration),
        ]
    }
}
