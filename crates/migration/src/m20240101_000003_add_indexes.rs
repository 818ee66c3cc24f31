use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Poll: owner-scoped list and count
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_poll_owner")
                    .table(Poll::Table)
                    .col(Poll::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_poll_owner").table(Poll::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Poll { Table, OwnerId }
