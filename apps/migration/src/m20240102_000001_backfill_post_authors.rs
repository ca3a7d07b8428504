//! Backfill authorship for posts created before authors existed.
//!
//! A placeholder user owns every orphaned post afterwards. Re-running is
//! harmless: the insert skips an existing placeholder and the update only
//! touches rows that still lack an author.

use sea_orm_migration::prelude::*;

const PLACEHOLDER_ID: &str = "default-user";
const PLACEHOLDER_EMAIL: &str = "default@example.com";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(&format!(
            "INSERT INTO users (id, email) VALUES ('{PLACEHOLDER_ID}', '{PLACEHOLDER_EMAIL}') \
             ON CONFLICT (id) DO NOTHING"
        ))
        .await?;

        db.execute_unprepared(&format!(
            "UPDATE posts SET author_id = '{PLACEHOLDER_ID}' WHERE author_id IS NULL"
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(&format!(
            "UPDATE posts SET author_id = NULL WHERE author_id = '{PLACEHOLDER_ID}'"
        ))
        .await?;
        db.execute_unprepared(&format!(
            "DELETE FROM users WHERE id = '{PLACEHOLDER_ID}'"
        ))
        .await?;

        Ok(())
    }
}
