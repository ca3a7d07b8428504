//! Database schema migrations.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_posts;
mod m20240101_000003_create_favorites;
mod m20240102_000001_backfill_post_authors;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_posts::Migration),
            Box::new(m20240101_000003_create_favorites::Migration),
            Box::new(m20240102_000001_backfill_post_authors::Migration),
        ]
    }
}
